mod app;
mod components;
mod config;
mod display;
mod logging;
mod model;
mod ui;

use color_eyre::Result;
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;
    let config = config::Config::from_env()?;
    let log_path = logging::init(&config);
    info!(
        base_url = %config.base_url,
        log = ?log_path,
        "starting prime-tui"
    );

    let app = app::App::new(&config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

use crate::config::Config;
use std::{
    fs::{self, File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "prime-tui.log";

/// Sends tracing output to `<data dir>/prime-tui.log`. The terminal belongs
/// to the UI, so nothing is ever written to stdout. Returns the log path,
/// or `None` when the file could not be opened and logging is disabled.
pub fn init(config: &Config) -> Option<PathBuf> {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    match open_log_file(&config.data_dir) {
        Ok((path, file)) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            Some(path)
        }
        Err(_) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
            None
        }
    }
}

pub fn open_log_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn creates_missing_directories() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("dev");
        let (path, _file) = open_log_file(&dir).unwrap();
        assert_eq!(path, dir.join("prime-tui.log"));
        assert!(path.exists());
    }

    #[test]
    fn appends_to_an_existing_log() {
        let root = tempfile::tempdir().unwrap();
        let (path, mut file) = open_log_file(root.path()).unwrap();
        writeln!(file, "first").unwrap();
        drop(file);

        let (_, mut file) = open_log_file(root.path()).unwrap();
        writeln!(file, "second").unwrap();
        drop(file);

        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }
}

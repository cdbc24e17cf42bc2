use super::util::pane_title_style;
use crate::{
    app::{Action, AppContext, AppResult, AppView, Status},
    components::Component,
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

#[derive(Debug)]
pub struct TopBar {
    title: String,
    status: Option<String>,
}

impl Default for TopBar {
    fn default() -> Self {
        Self {
            title: "prime-tui".to_string(),
            status: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TopCommand {
    ShowStatus(String),
}

impl TopBar {
    fn status_line(&self) -> Line<'_> {
        match &self.status {
            Some(status) => Line::from(status.clone()).style(Style::default().fg(Color::Gray)),
            None => Line::from("Pick an operation and press s to submit")
                .style(Style::default().fg(Color::DarkGray)),
        }
    }
}

impl Component for TopBar {
    type Command = TopCommand;

    fn init(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<()> {
        Ok(())
    }

    fn update(
        &mut self,
        command: &Self::Command,
        _ctx: &mut AppContext<'_>,
    ) -> AppResult<Option<Action>> {
        match command {
            TopCommand::ShowStatus(message) => {
                self.status = Some(message.clone());
            }
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &AppView<'_>) {
        let controller = ctx.state.shell.controller();
        let descriptor = controller.descriptor();
        let activity = match controller.status() {
            Status::Loading => " • calculating…",
            Status::Idle => "",
        };
        let title = Line::from(format!(
            "{} • P{} {}{activity}",
            self.title,
            descriptor.id.number(),
            descriptor.title
        ));

        let server = Line::from(vec![
            Span::styled("Server: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                ctx.state.server.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        let widget = Paragraph::new(vec![server, self.status_line()])
            .style(Style::default().fg(Color::Gray))
            .block(Block::bordered().title(title.style(pane_title_style(false))));
        frame.render_widget(widget, area);
    }

    fn tick(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<Option<Action>> {
        Ok(None)
    }
}

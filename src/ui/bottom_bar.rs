use super::util::pane_title_style;
use crate::{
    app::{Action, AppContext, AppResult, AppView},
    components::Component,
};
use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Paragraph},
};

#[derive(Debug, Default)]
pub struct BottomBar;

impl BottomBar {
    fn keymap(editing_hint: bool) -> &'static str {
        if editing_hint {
            "Enter Commit • Esc Restore • Backspace Delete"
        } else {
            concat!(
                "q Quit • Tab Focus • 1..7 Operation • j/k Move • Enter/e Edit • ",
                "s Submit • r Reset • h/l Pick value • y Copy"
            )
        }
    }
}

impl Component for BottomBar {
    type Command = ();

    fn init(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<()> {
        Ok(())
    }

    fn update(
        &mut self,
        _command: &Self::Command,
        _ctx: &mut AppContext<'_>,
    ) -> AppResult<Option<Action>> {
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &AppView<'_>) {
        let widget = Paragraph::new(Line::from(Self::keymap(ctx.state.editing)))
            .block(Block::bordered().title(Line::from("Keymap").style(pane_title_style(false))));
        frame.render_widget(widget, area);
    }

    fn tick(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<Option<Action>> {
        Ok(None)
    }
}

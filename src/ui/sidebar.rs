use super::util::pane_title_style;
use crate::{
    app::{Action, AppContext, AppResult, AppView, FocusedPane},
    components::Component,
    model::{DESCRIPTORS, OperationId},
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Operation picker. Moving the cursor does not switch operations; only
/// activation does, since switching discards the current form.
#[derive(Debug, Default)]
pub struct Sidebar {
    cursor: usize,
}

#[derive(Debug)]
pub enum SidebarCommand {
    MoveUp,
    MoveDown,
    ActivateCursor,
    Activate(OperationId),
}

impl Sidebar {
    fn operation_at(&self, index: usize) -> Option<OperationId> {
        DESCRIPTORS.get(index).map(|descriptor| descriptor.id)
    }
}

impl Component for Sidebar {
    type Command = SidebarCommand;

    fn init(&mut self, ctx: &mut AppContext<'_>) -> AppResult<()> {
        self.cursor = usize::from(ctx.state.shell.active().number()) - 1;
        Ok(())
    }

    fn update(
        &mut self,
        command: &Self::Command,
        _ctx: &mut AppContext<'_>,
    ) -> AppResult<Option<Action>> {
        match command {
            SidebarCommand::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            SidebarCommand::MoveDown => {
                self.cursor = (self.cursor + 1).min(DESCRIPTORS.len() - 1);
            }
            SidebarCommand::ActivateCursor => {
                return Ok(self.operation_at(self.cursor).map(Action::SelectOperation));
            }
            SidebarCommand::Activate(id) => {
                self.cursor = usize::from(id.number()) - 1;
                return Ok(Some(Action::SelectOperation(*id)));
            }
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &AppView<'_>) {
        let is_focused = matches!(ctx.state.navigation.focused_pane, FocusedPane::Sidebar);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Line::from("Operations").style(pane_title_style(is_focused)));

        let active = ctx.state.shell.active();
        let list_items: Vec<ListItem> = ctx
            .state
            .shell
            .descriptors()
            .iter()
            .map(|descriptor| {
                let marker = if descriptor.id == active { "●" } else { " " };
                let style = if descriptor.id == active {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{marker} P{} ", descriptor.id.number()), style),
                    Span::styled(descriptor.title, style),
                ]))
            })
            .collect();
        let highlight = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut state = ListState::default();
        state.select(Some(self.cursor));

        let list = List::new(list_items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("▸ ");
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn tick(&mut self, _ctx: &mut AppContext<'_>) -> AppResult<Option<Action>> {
        Ok(None)
    }
}

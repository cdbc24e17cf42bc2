use super::{result_view::result_lines, util::pane_title_style};
use crate::{
    app::{Action, AppContext, AppResult, AppView, FocusedPane},
    components::Component,
    display::{self, ResultView},
    model::{OperationId, field_label},
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::debug;

/// Form and result pane for the active operation.
#[derive(Debug, Default)]
pub struct MainView {
    session: u64,
    field_index: usize,
    copy_index: usize,
    edit_backup: Option<String>,
}

#[derive(Debug)]
pub enum MainViewCommand {
    NextField,
    PreviousField,
    BeginEdit,
    InputChar(char),
    Backspace,
    CommitEdit,
    CancelEdit,
    Submit,
    Reset,
    NextCopyTarget,
    PreviousCopyTarget,
    CopySelected,
}

impl MainView {
    pub fn is_editing(&self) -> bool {
        self.edit_backup.is_some()
    }

    fn clear_cursors(&mut self) {
        self.field_index = 0;
        self.copy_index = 0;
        self.edit_backup = None;
    }

    fn current_view(ctx: &AppContext<'_>) -> Option<ResultView> {
        let controller = ctx.state.shell.controller();
        controller
            .last_result()
            .map(|result| display::render(controller.operation(), result))
    }

    fn field_name(&self, ctx: &AppContext<'_>) -> Option<String> {
        ctx.state
            .shell
            .controller()
            .inputs()
            .get(self.field_index)
            .map(|(name, _)| name.clone())
    }

    fn edit_field(&self, ctx: &mut AppContext<'_>, edit: impl FnOnce(&mut String)) {
        let Some(name) = self.field_name(ctx) else {
            return;
        };
        let controller = ctx.state.shell.controller_mut();
        let mut value = controller.field(&name).unwrap_or_default().to_string();
        edit(&mut value);
        controller.set_field(&name, value);
    }

    fn handle(
        &mut self,
        command: &MainViewCommand,
        ctx: &mut AppContext<'_>,
    ) -> AppResult<Option<Action>> {
        let field_count = ctx.state.shell.controller().inputs().len();
        match command {
            MainViewCommand::NextField if !self.is_editing() => {
                self.field_index = (self.field_index + 1).min(field_count.saturating_sub(1));
            }
            MainViewCommand::PreviousField if !self.is_editing() => {
                self.field_index = self.field_index.saturating_sub(1);
            }
            MainViewCommand::NextField | MainViewCommand::PreviousField => {}
            MainViewCommand::BeginEdit => {
                if self.is_editing() {
                    return Ok(None);
                }
                if let Some(name) = self.field_name(ctx) {
                    let current = ctx.state.shell.controller().field(&name).unwrap_or_default();
                    self.edit_backup = Some(current.to_string());
                }
            }
            MainViewCommand::InputChar(c) if self.is_editing() => {
                self.edit_field(ctx, |value| value.push(*c));
            }
            MainViewCommand::Backspace if self.is_editing() => {
                self.edit_field(ctx, |value| {
                    value.pop();
                });
            }
            MainViewCommand::InputChar(_) | MainViewCommand::Backspace => {}
            MainViewCommand::CommitEdit => {
                if self.edit_backup.take().is_some() {
                    if let Some(name) = self.field_name(ctx) {
                        let value = ctx.state.shell.controller().field(&name).unwrap_or_default();
                        return Ok(Some(Action::ShowStatus(format!(
                            "{} = {value}",
                            field_label(&name)
                        ))));
                    }
                }
            }
            MainViewCommand::CancelEdit => {
                if let Some(previous) = self.edit_backup.take() {
                    self.edit_field(ctx, |value| *value = previous);
                }
            }
            MainViewCommand::Submit => {
                self.edit_backup = None;
                let title = ctx.state.shell.controller().descriptor().title;
                let status = match ctx.state.shell.controller_mut().begin_submit() {
                    Some(pending) => {
                        debug!(
                            endpoint = pending.operation.endpoint(),
                            ?pending.ticket,
                            "submitting"
                        );
                        ctx.commands.submit(pending);
                        format!("Calculating {title}…")
                    }
                    None => {
                        let error = ctx
                            .state
                            .shell
                            .controller()
                            .last_result()
                            .and_then(|result| result.error())
                            .unwrap_or("invalid input")
                            .to_string();
                        format!("Not submitted: {error}")
                    }
                };
                self.copy_index = 0;
                return Ok(Some(Action::ShowStatus(status)));
            }
            MainViewCommand::Reset => {
                ctx.state.shell.controller_mut().reset();
                self.clear_cursors();
                return Ok(Some(Action::ShowStatus("Inputs reset to defaults".into())));
            }
            MainViewCommand::NextCopyTarget => {
                let count = Self::current_view(ctx).map_or(0, |view| view.copy_targets().len());
                self.copy_index = (self.copy_index + 1).min(count.saturating_sub(1));
            }
            MainViewCommand::PreviousCopyTarget => {
                self.copy_index = self.copy_index.saturating_sub(1);
            }
            MainViewCommand::CopySelected => {
                let Some(view) = Self::current_view(ctx) else {
                    return Ok(Some(Action::ShowStatus("Nothing to copy yet".into())));
                };
                let targets = view.copy_targets();
                let Some(target) = targets
                    .get(self.copy_index)
                    .or_else(|| targets.last())
                    .copied()
                else {
                    return Ok(Some(Action::ShowStatus(
                        "This result has no value to copy".into(),
                    )));
                };
                let status = if display::copy(&mut *ctx.clipboard, &target.full) {
                    let digits = target.full.trim_start_matches('-').chars().count();
                    format!("Copied {} ({digits} digits)", target.label)
                } else {
                    "Clipboard unavailable".to_string()
                };
                return Ok(Some(Action::ShowStatus(status)));
            }
        }
        Ok(None)
    }

    fn form_lines(&self, ctx: &AppView<'_>, is_focused: bool) -> Vec<Line<'static>> {
        ctx.state
            .shell
            .controller()
            .inputs()
            .iter()
            .enumerate()
            .map(|(index, (name, value))| {
                let selected = is_focused && index == self.field_index;
                let editing = selected && self.is_editing();
                let marker = if selected { "▸ " } else { "  " };
                let value_style = if editing {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let mut spans = vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{:<14}", field_label(name)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(value.clone(), value_style),
                ];
                if editing {
                    spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
                }
                Line::from(spans)
            })
            .collect()
    }
}

impl Component for MainView {
    type Command = MainViewCommand;

    fn init(&mut self, ctx: &mut AppContext<'_>) -> AppResult<()> {
        self.session = ctx.state.shell.controller().session();
        self.clear_cursors();
        ctx.state.editing = false;
        Ok(())
    }

    fn update(
        &mut self,
        command: &Self::Command,
        ctx: &mut AppContext<'_>,
    ) -> AppResult<Option<Action>> {
        let action = self.handle(command, ctx)?;
        ctx.state.editing = self.is_editing();
        Ok(action)
    }

    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &AppView<'_>) {
        let is_focused = matches!(ctx.state.navigation.focused_pane, FocusedPane::MainView);
        let controller = ctx.state.shell.controller();
        let descriptor = controller.descriptor();

        let block = Block::default().borders(Borders::ALL).title(
            Line::from(format!("Problem {} • {}", descriptor.id.number(), descriptor.title))
                .style(pane_title_style(is_focused)),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut header = vec![Line::from(Span::styled(
            descriptor.description,
            Style::default().fg(Color::Gray),
        ))];
        if descriptor.id == OperationId::PerfectNumber {
            header.push(Line::from(vec![
                Span::styled("Reference document: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    ctx.state.document_path.clone(),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }

        let form = self.form_lines(ctx, is_focused);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header.len() as u16 + 1),
                Constraint::Length(form.len() as u16 + 2),
                Constraint::Min(1),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), layout[0]);
        frame.render_widget(
            Paragraph::new(form).block(Block::default().borders(Borders::ALL).title("Inputs")),
            layout[1],
        );

        let mut title_style = Style::default();
        let (title, body) = if controller.is_loading() {
            (
                "Result".to_string(),
                vec![Line::from(Span::styled(
                    "Calculating…",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                ))],
            )
        } else if let Some(result) = controller.last_result() {
            let view = display::render(descriptor.id, result);
            if view.is_error() {
                title_style = Style::default().fg(Color::Red);
            }
            let selected = self
                .copy_index
                .min(view.copy_targets().len().saturating_sub(1));
            (view.heading.clone(), result_lines(&view, selected))
        } else {
            (
                "Result".to_string(),
                vec![Line::from(Span::styled(
                    "No result yet. Press s to submit.",
                    Style::default().fg(Color::DarkGray),
                ))],
            )
        };
        let result = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .title(Line::from(title).style(title_style)),
            );
        frame.render_widget(result, layout[2]);
    }

    fn tick(&mut self, ctx: &mut AppContext<'_>) -> AppResult<Option<Action>> {
        let session = ctx.state.shell.controller().session();
        if session != self.session {
            self.session = session;
            self.clear_cursors();
            ctx.state.editing = false;
        }
        Ok(None)
    }
}

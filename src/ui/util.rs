use ratatui::style::{Color, Modifier, Style};

/// Title style for a pane border, highlighted when the pane has focus.
pub fn pane_title_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

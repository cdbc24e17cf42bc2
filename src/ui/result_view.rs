use crate::display::{LargeNumber, PrimeBadge, ResultView, ViewBlock};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

fn label_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn badge_span(badge: PrimeBadge) -> Span<'static> {
    let (symbol, color) = match badge {
        PrimeBadge::Prime => ("✔", Color::Green),
        PrimeBadge::Composite => ("✘", Color::Red),
        PrimeBadge::Unknown => ("?", Color::Yellow),
    };
    Span::styled(
        format!(" {symbol} {} ", badge.label()),
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

fn number_spans(number: &LargeNumber, selected: bool) -> Vec<Span<'static>> {
    let value_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![Span::styled(number.display(), value_style)];
    if number.is_truncated() {
        let digits = number.full.trim_start_matches('-').chars().count();
        spans.push(Span::styled(format!(" ({digits} digits)"), label_style()));
    }
    if selected {
        spans.push(Span::styled("  ◂ y copies all digits", label_style()));
    }
    spans
}

/// Converts a result view into styled lines. `selected_copy` indexes
/// [`ResultView::copy_targets`].
pub fn result_lines(view: &ResultView, selected_copy: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut copy_index = 0;
    for block in &view.blocks {
        match block {
            ViewBlock::Error(message) => {
                lines.push(Line::from(vec![
                    Span::styled(
                        "Error: ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(message.clone(), Style::default().fg(Color::Red)),
                ]));
            }
            ViewBlock::Text(text) => lines.push(Line::from(text.clone())),
            ViewBlock::Field { label, value } => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label}: "), label_style()),
                    Span::raw(value.clone()),
                ]));
            }
            ViewBlock::Badge(badge) => lines.push(Line::from(badge_span(*badge))),
            ViewBlock::Number(number) => {
                let mut spans = vec![Span::styled(format!("{}: ", number.label), label_style())];
                spans.extend(number_spans(number, copy_index == selected_copy));
                lines.push(Line::from(spans));
                copy_index += 1;
            }
            ViewBlock::Rows(rows) => {
                for row in rows {
                    let mut spans = vec![Span::styled(
                        format!("{:<8}", row.key),
                        Style::default().add_modifier(Modifier::BOLD),
                    )];
                    if let Some(detail) = &row.detail {
                        spans.push(Span::styled(format!("{detail:<12}"), label_style()));
                    }
                    spans.extend(number_spans(&row.value, copy_index == selected_copy));
                    lines.push(Line::from(spans));
                    copy_index += 1;
                }
            }
            ViewBlock::Chips { label, items } => {
                lines.push(Line::from(Span::styled(format!("{label}:"), label_style())));
                let mut chips = Vec::with_capacity(items.len() * 2);
                for item in items {
                    chips.push(Span::styled(
                        format!(" {item} "),
                        Style::default().fg(Color::Black).bg(Color::Gray),
                    ));
                    chips.push(Span::raw(" "));
                }
                lines.push(Line::from(chips));
            }
            ViewBlock::Empty(message) => {
                lines.push(Line::from(Span::styled(
                    message.clone(),
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            ViewBlock::Document { label, path } => {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label}: "), label_style()),
                    Span::styled(
                        path.clone(),
                        Style::default().add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        display::render,
        model::{
            OperationId, OperationResult,
            result::{DecimalString, GoldbachPair, PatternPrime, SquareInterval},
        },
    };

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn pattern_prime_shows_badge_and_value() {
        let result = OperationResult::PatternPrime(PatternPrime {
            n: Some(10),
            is_prime: Some(true),
            pattern_number: Some(DecimalString::parse("12345678910987654321").unwrap()),
        });
        let lines = text(&result_lines(&render(OperationId::PatternPrime, &result), 0));
        assert_eq!(lines[0], "n: 10");
        assert_eq!(lines[1], " ✔ Prime ");
        assert!(lines[2].starts_with("Pattern number: 12345678910987654321"));
        assert!(lines[2].ends_with("y copies all digits"));
    }

    #[test]
    fn goldbach_pair_reads_as_a_sum() {
        let result = OperationResult::GoldbachPair(GoldbachPair {
            n: 20,
            pair: Some((3, 17)),
        });
        let lines = text(&result_lines(&render(OperationId::GoldbachPair, &result), 0));
        assert_eq!(lines, vec!["n: 20", "Pair: 3 + 17"]);
    }

    #[test]
    fn chips_are_separate_spans() {
        let result = OperationResult::PrimesBetweenSquares(SquareInterval {
            interval: [169, 289],
            primes_found: vec![173, 179, 181, 191],
        });
        let lines = result_lines(&render(OperationId::PrimesBetweenSquares, &result), 0);
        let chip_line = lines.last().unwrap();
        let chips: Vec<&str> = chip_line
            .spans
            .iter()
            .map(|span| span.content.trim())
            .filter(|content| !content.is_empty())
            .collect();
        assert_eq!(chips, vec!["173", "179", "181", "191"]);
    }

    #[test]
    fn error_is_a_single_line() {
        let view = render(
            OperationId::MersennePrimes,
            &OperationResult::Error("timeout".into()),
        );
        assert_eq!(text(&result_lines(&view, 0)), vec!["Error: timeout"]);
    }
}

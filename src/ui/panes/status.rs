//! Status bar rendering with keybindings and state indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const KEYBINDS: [(&str, &str); 5] = [
    (" ←/→ ", " step "),
    (" ⎵ ", " play "),
    (" ↵ / ⌫ ", " end/start "),
    (" ⇥ ", " focus "),
    ("q", " quit "),
];

/// Position indicator shown at the right end of the bar.
fn indicator(
    current_step: usize,
    total_steps: usize,
    run_error: bool,
    is_playing: bool,
) -> Option<(&'static str, Color)> {
    let is_at_end = current_step + 1 >= total_steps;
    if is_playing {
        Some((" ▶ PLAYING ", DEFAULT_THEME.secondary))
    } else if is_at_end && run_error {
        Some((" ERROR ", DEFAULT_THEME.error))
    } else if is_at_end {
        Some((" END ", DEFAULT_THEME.error))
    } else if current_step == 0 {
        Some((" START ", DEFAULT_THEME.success))
    } else {
        None
    }
}

/// Render the status bar at the bottom.
///
/// `run_error` is set when execution stopped on a runtime error; the last
/// step is then the state right before the failing instruction.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    current_step: usize,
    total_steps: usize,
    run_error: bool,
    is_playing: bool,
) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let badge = |color: Color| {
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    };
    let accent = if run_error {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.primary
    };

    // Left: step counter and message
    let left = Line::from(vec![
        Span::styled(
            format!(" Step {}/{} ", current_step + 1, total_steps.max(1)),
            badge(accent),
        ),
        Span::styled(" | ", bar_bg.fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!(" {} ", message),
            bar_bg.fg(if run_error {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            }),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(left).style(bar_bg).alignment(Alignment::Left),
        halves[0],
    );

    // Right: keybinds, then the position indicator
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar_bg.fg(DEFAULT_THEME.fg);
    let sep_style = bar_bg.fg(DEFAULT_THEME.comment);

    let mut right = Vec::new();
    for (i, (key, desc)) in KEYBINDS.iter().enumerate() {
        if i > 0 {
            right.push(Span::styled("│", sep_style));
            right.push(Span::styled(" ", desc_style));
        }
        right.push(Span::styled(*key, key_style));
        right.push(Span::styled(*desc, desc_style));
    }

    if let Some((text, color)) = indicator(current_step, total_steps, run_error, is_playing) {
        right.push(Span::styled("│", sep_style));
        right.push(Span::styled(text, badge(color)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right))
            .style(bar_bg)
            .alignment(Alignment::Right),
        halves[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator() {
        assert_eq!(indicator(0, 4, false, false).map(|i| i.0), Some(" START "));
        assert_eq!(indicator(1, 4, false, false), None);
        assert_eq!(indicator(3, 4, false, false).map(|i| i.0), Some(" END "));
        assert_eq!(indicator(3, 4, true, false).map(|i| i.0), Some(" ERROR "));
        assert_eq!(indicator(3, 4, true, true).map(|i| i.0), Some(" ▶ PLAYING "));
    }
}

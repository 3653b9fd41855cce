//! Bindings pane: variable and temp values at the selected step

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::snapshot::{Slot, Snapshot};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Whether `slot` differs from the previous step (new or rebound).
fn is_changed(slot: &Slot, value: i64, previous: Option<&Snapshot>) -> bool {
    match previous {
        Some(prev) => prev.bindings.get(slot) != Some(&value),
        None => false,
    }
}

fn binding_lines(current: &Snapshot, previous: Option<&Snapshot>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (slot, value) in current.sorted_bindings() {
        let name_style = match slot {
            Slot::Var(_) => Style::default().fg(DEFAULT_THEME.fg),
            Slot::Temp(_) => Style::default().fg(DEFAULT_THEME.temp),
        };
        let value_style = if is_changed(slot, value, previous) {
            Style::default()
                .fg(DEFAULT_THEME.changed)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.number)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", slot.to_string()), name_style),
            Span::styled("= ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(value.to_string(), value_style),
        ]));
    }

    if let Some(value) = current.return_value {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "  returned  ",
                Style::default()
                    .fg(DEFAULT_THEME.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.success)),
        ]));
    }

    lines
}

/// Render the bindings pane for `current`, comparing against `previous`.
pub fn render_bindings_pane(
    frame: &mut Frame,
    area: Rect,
    current: Option<&Snapshot>,
    previous: Option<&Snapshot>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Variables ", is_focused);

    let lines = match current {
        Some(snapshot) => binding_lines(snapshot, previous),
        None => vec![Line::from(Span::styled(
            "  (no execution history)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
    };

    let visible = visible_height(area);
    clamp_scroll(scroll_offset, lines.len(), visible);

    let lines: Vec<Line> = lines.into_iter().skip(*scroll_offset).take(visible).collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

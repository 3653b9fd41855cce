//! Helpers shared by the panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block with the focus-dependent border colour.
pub fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least 1.
pub fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `offset` so the visible window never runs past the last item.
pub fn clamp_scroll(offset: &mut usize, total_items: usize, visible: usize) {
    if total_items > visible {
        *offset = (*offset).min(total_items - visible);
    } else {
        *offset = 0;
    }
}

/// Scroll just enough to bring `row` into the window.
pub fn follow_row(offset: &mut usize, row: usize, visible: usize) {
    if row < *offset {
        *offset = row;
    } else if row >= *offset + visible {
        *offset = row + 1 - visible;
    }
}

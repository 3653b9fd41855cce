//! AST pane rendering
//!
//! Renders the indented tree produced by [`Node::pretty_lines`](crate::parser::ast::Node::pretty_lines),
//! colouring the node kind and its leaf text separately.

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn tree_line(line: &str) -> Line<'_> {
    let indent_len = line.len() - line.trim_start().len();
    let (indent, rest) = line.split_at(indent_len);

    let mut spans = vec![Span::raw(indent)];
    match rest.split_once(' ') {
        Some((kind, leaf)) => {
            spans.push(Span::styled(kind, Style::default().fg(DEFAULT_THEME.primary)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(leaf, Style::default().fg(DEFAULT_THEME.secondary)));
        }
        None => spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.fg))),
    }
    Line::from(spans)
}

/// Render the AST pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    ast_lines: &[String],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Syntax Tree ", is_focused);

    let visible = visible_height(area);
    clamp_scroll(scroll_offset, ast_lines.len(), visible);

    let lines: Vec<Line> = ast_lines
        .iter()
        .skip(*scroll_offset)
        .take(visible)
        .map(|line| tree_line(line))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_line_splits_kind_and_leaf() {
        let line = tree_line("    identifier (a)");
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, ["    ", "identifier", " ", "(a)"]);

        let line = tree_line("  statements");
        let texts: Vec<&str> = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, ["  ", "statements"]);
    }
}

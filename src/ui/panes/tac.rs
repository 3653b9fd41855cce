//! TAC listing pane with the current instruction highlighted

use super::utils::{follow_row, pane_block, visible_height};
use crate::tac::{Opcode, Operand, TacInstruction};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn operand_style(operand: &Operand) -> Style {
    match operand {
        Operand::Var(_) => Style::default().fg(DEFAULT_THEME.fg),
        Operand::Literal(_) => Style::default().fg(DEFAULT_THEME.number),
        Operand::Temp(_) => Style::default().fg(DEFAULT_THEME.temp),
        Operand::Label(_) => Style::default().fg(DEFAULT_THEME.label),
    }
}

/// Instruction rendered with control opcodes and operand sorts coloured.
fn instruction_spans(instr: &TacInstruction) -> Vec<Span<'static>> {
    let keyword = |text: &'static str| {
        Span::styled(
            text,
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD),
        )
    };
    let operand = |slot: &Option<Operand>| match slot {
        Some(op) => Span::styled(op.to_string(), operand_style(op)),
        None => Span::styled("_", Style::default().fg(DEFAULT_THEME.comment)),
    };

    match instr.op {
        Opcode::Copy => vec![operand(&instr.result), Span::raw(" = "), operand(&instr.arg1)],
        Opcode::If => vec![
            keyword("IF "),
            operand(&instr.arg1),
            keyword(" GOTO "),
            operand(&instr.result),
        ],
        Opcode::Goto => vec![keyword("GOTO "), operand(&instr.result)],
        Opcode::Label => vec![keyword("LABEL "), operand(&instr.result)],
        Opcode::Return => vec![keyword("RETURN "), operand(&instr.arg1)],
        op => vec![
            operand(&instr.result),
            Span::raw(" = "),
            operand(&instr.arg1),
            Span::raw(format!(" {} ", op)),
            operand(&instr.arg2),
        ],
    }
}

/// Render the TAC pane. `current_pc` is `None` when nothing has executed.
pub fn render_tac_pane(
    frame: &mut Frame,
    area: Rect,
    instructions: &[TacInstruction],
    current_pc: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Three-Address Code ", is_focused);
    let visible = visible_height(area);

    if let Some(pc) = current_pc {
        follow_row(scroll_offset, pc.min(instructions.len().saturating_sub(1)), visible);
    }

    let lines: Vec<Line> = instructions
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible)
        .map(|(idx, instr)| {
            let is_current = current_pc == Some(idx);
            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, idx), num_style)];
            // Labels are outdented like assembler labels.
            if instr.op != Opcode::Label {
                spans.push(Span::raw("  "));
            }
            spans.extend(instruction_spans(instr));

            let line = Line::from(spans);
            if is_current {
                line.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

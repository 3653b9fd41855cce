//! Colour palette shared by all panes

use ratatui::style::Color;

// Base palette
const TEXT: Color = Color::Rgb(205, 214, 244);
const BLUE: Color = Color::Rgb(137, 180, 250);
const PEACH: Color = Color::Rgb(250, 179, 135);
const OVERLAY: Color = Color::Rgb(108, 112, 134);
const GREEN: Color = Color::Rgb(166, 227, 161);
const RED: Color = Color::Rgb(243, 139, 168);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const TEAL: Color = Color::Rgb(148, 226, 213);
const PINK: Color = Color::Rgb(245, 194, 231);
const SURFACE: Color = Color::Rgb(50, 50, 70);

/// Colours by role. Panes only ever read [`DEFAULT_THEME`].
pub struct Theme {
    pub fg: Color,
    /// Node kinds, brackets, the step counter
    pub primary: Color,
    /// Leaf text, the current-instruction marker, auto-play
    pub secondary: Color,
    /// Line numbers, separators, empty operand fields
    pub comment: Color,
    pub success: Color,
    pub error: Color,
    pub keyword: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    /// Jump targets
    pub label: Color,
    /// Compiler temps
    pub temp: Color,
    /// Bindings written by the last step
    pub changed: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: TEXT,
    primary: BLUE,
    secondary: PEACH,
    comment: OVERLAY,
    success: GREEN,
    error: RED,
    keyword: BLUE,
    number: PEACH,
    border_focused: YELLOW,
    border_normal: OVERLAY,
    current_line_bg: SURFACE,
    label: YELLOW,
    temp: TEAL,
    changed: PINK,
};

//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source program with line numbers and keyword highlighting
//! - [`tree`]: Indented syntax tree
//! - [`tac`]: Instruction listing with the current instruction marked
//! - [`bindings`]: Variable and temp values at the selected step
//! - [`status`]: Status bar with keybindings and execution state
//! - `utils`: Block styling and scroll helpers shared by the panes
//!
//! Each pane exports a single `render_*` function and keeps no state of its
//! own; scroll offsets live in [`App`](crate::ui::App).

mod utils;

pub mod bindings;
pub mod source;
pub mod status;
pub mod tac;
pub mod tree;

pub use bindings::render_bindings_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tac::render_tac_pane;
pub use tree::render_tree_pane;

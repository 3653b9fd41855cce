//! Main TUI application state and logic

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Ast,
    Tac,
    Bindings,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> ast -> bindings -> tac)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Bindings,
            FocusedPane::Bindings => FocusedPane::Tac,
            FocusedPane::Tac => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tac,
            FocusedPane::Ast => FocusedPane::Source,
            FocusedPane::Bindings => FocusedPane::Ast,
            FocusedPane::Tac => FocusedPane::Bindings,
        }
    }
}

/// The main application state
pub struct App {
    /// The interpreter instance, already run
    pub interpreter: Interpreter,

    /// The source code that was compiled
    pub source_code: String,

    /// Pretty-printed syntax tree, one entry per line
    pub ast_lines: Vec<String>,

    /// Runtime error that stopped execution, if any
    pub run_error: Option<RuntimeError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub ast_scroll: usize,
    pub tac_scroll: usize,
    pub bindings_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over an interpreter whose `run` has already completed.
    ///
    /// The view starts at the first recorded step. A run that recorded nothing
    /// (a snapshot limit of 0) still opens, showing `run_error`.
    pub fn new(
        mut interpreter: Interpreter,
        source_code: String,
        ast_lines: Vec<String>,
        run_error: Option<RuntimeError>,
    ) -> Self {
        if let Err(e) = interpreter.rewind_to_start() {
            log::debug!("viewer opened without history: {}", e);
        }
        let status_message = match &run_error {
            Some(e) => format!("Execution stopped: {}", e),
            None => String::from("Ready!"),
        };
        let now = Instant::now();

        App {
            interpreter,
            source_code,
            ast_lines,
            run_error,
            focused_pane: FocusedPane::Tac,
            source_scroll: 0,
            ast_scroll: 0,
            tac_scroll: 0,
            bindings_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_secs(1) {
                if self.interpreter.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        // Left column: Source (top) | AST (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[0]);

        // Right column: TAC (top) | Bindings (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            left_rows[1],
            &self.ast_lines,
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        let current = self.interpreter.current_snapshot();
        let current_pc = current
            .map(|s| s.pc)
            .filter(|pc| *pc < self.interpreter.instructions().len());

        super::panes::render_tac_pane(
            frame,
            right_rows[0],
            self.interpreter.instructions(),
            current_pc,
            self.focused_pane == FocusedPane::Tac,
            &mut self.tac_scroll,
        );

        super::panes::render_bindings_pane(
            frame,
            right_rows[1],
            current,
            self.interpreter.previous_snapshot(),
            self.focused_pane == FocusedPane::Bindings,
            &mut self.bindings_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.interpreter.history_position(),
            self.interpreter.total_snapshots(),
            self.run_error.is_some(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c as usize - '0' as usize;
                let stepped = (0..n)
                    .take_while(|_| self.interpreter.step_forward().is_ok())
                    .count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play (200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        let now = Instant::now();
                        self.last_play_time =
                            now.checked_sub(Duration::from_secs(1)).unwrap_or(now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.status_message = match self.interpreter.jump_to_end() {
                    Ok(()) => match &self.run_error {
                        Some(e) => format!("Jumped to end: {}", e),
                        None => "Jumped to end".to_string(),
                    },
                    Err(e) => e.to_string(),
                };
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.status_message = match self.interpreter.rewind_to_start() {
                    Ok(()) => "Jumped to start".to_string(),
                    Err(e) => e.to_string(),
                };
            }
            _ => {}
        }
    }

    /// The TAC pane follows the current instruction, so manual scrolling there
    /// only lasts until the next step.
    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Ast => &mut self.ast_scroll,
            FocusedPane::Tac => &mut self.tac_scroll,
            FocusedPane::Bindings => &mut self.bindings_scroll,
        }
    }

    fn step_forward(&mut self) {
        self.status_message = match self.interpreter.step_forward() {
            Ok(()) => "Stepped forward".to_string(),
            Err(RuntimeError::HistoryBoundary { message }) => match &self.run_error {
                Some(e) => format!("Cannot step forward: {}", e),
                None => format!("Cannot step forward: {}", message),
            },
            Err(e) => format!("Error: {}", e),
        };
    }

    fn step_backward(&mut self) {
        self.status_message = match self.interpreter.step_backward() {
            Ok(()) => "Stepped backward".to_string(),
            Err(RuntimeError::HistoryBoundary { message }) => {
                format!("Cannot step backward: {}", message)
            }
            Err(e) => format!("Error: {}", e),
        };
    }
}

//! Main TUI application state and logic

use crate::interpreter::engine::{Halt, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::snapshot::Snapshot;
use crate::ui::panes::source::SourceScrollState;
use crate::ui::panes::status::RunState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between steps while autoplaying
const PLAY_INTERVAL: Duration = Duration::from_millis(100);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tape,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> output -> tape)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Source,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tape,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Tape => FocusedPane::Output,
        }
    }
}

/// The main application state
pub struct App {
    /// Interpreter that has already run with history enabled
    pub interpreter: Interpreter,

    /// Raw program source, including anything after the terminator
    pub source: Vec<u8>,

    /// How the recorded run ended
    pub run_state: RunState,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub tape_scroll: usize,
    pub output_scroll: usize,

    /// Keep the tape head in view; cleared when the user scrolls the tape
    pub follow_head: bool,

    pub should_quit: bool,

    pub status_message: String,

    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(interpreter: Interpreter, source: Vec<u8>) -> Self {
        let run_state = match (interpreter.halted(), interpreter.aborted()) {
            (Some(Halt::TapeLimit), _) => RunState::TapeLimit,
            (_, Some(RuntimeError::TimedOut { .. })) => RunState::TimedOut,
            (_, Some(_)) => RunState::HistoryFull,
            _ => RunState::Halted,
        };

        let earlier = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or_else(Instant::now);

        App {
            interpreter,
            source,
            run_state,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            tape_scroll: 0,
            output_scroll: 0,
            follow_head: true,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: earlier,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.interpreter.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.output_scroll = usize::MAX;
                    self.follow_head = true;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            if event::poll(Duration::from_millis(20))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// State to display: the snapshot at the history cursor, or the live
    /// interpreter state if nothing was recorded
    fn displayed_state(&self) -> Snapshot {
        match self.interpreter.current_snapshot() {
            Some(snapshot) => snapshot.clone(),
            None => Snapshot {
                step: self.interpreter.steps(),
                ip: None,
                tape: self.interpreter.tape().cells().to_vec(),
                head: self.interpreter.tape().head(),
                output_len: self.interpreter.output().len(),
                read_cursor: self.interpreter.read_cursor(),
            },
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let state = self.displayed_state();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source,
            self.interpreter.program().len(),
            state.ip,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_output_pane(
            frame,
            left_rows[1],
            self.interpreter.output_sink(),
            state.output_len,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_tape_pane(
            frame,
            columns[1],
            &state.tape,
            state.head,
            self.interpreter.tape().limit(),
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
            self.follow_head,
        );

        let message = format!(
            "{} (input {}/{})",
            self.status_message,
            state.read_cursor,
            self.interpreter.input().len()
        );
        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &message,
            self.interpreter.history_position(),
            self.interpreter.total_snapshots(),
            self.run_state,
            self.is_playing,
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if self.interpreter.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.output_scroll = usize::MAX;
                self.follow_head = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let result = self.interpreter.step_backward();
                self.report_step(result, "Stepped backward");
            }
            KeyCode::Right => {
                self.is_playing = false;
                let result = self.interpreter.step_forward();
                self.report_step(result, "Stepped forward");
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tape => {
                    self.follow_head = false;
                    self.tape_scroll = self.tape_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tape => {
                    self.follow_head = false;
                    self.tape_scroll = self.tape_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // 200ms debounce against key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                let result = self.interpreter.jump_to_end();
                self.report_step(result, "Jumped to end");
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                let result = self.interpreter.rewind_to_start();
                self.report_step(result, "Jumped to start");
            }
            _ => {}
        }
    }

    fn report_step(&mut self, result: Result<(), RuntimeError>, done: &str) {
        match result {
            Ok(()) => {
                self.status_message = done.to_string();
                self.output_scroll = usize::MAX;
                self.follow_head = true;
            }
            Err(RuntimeError::HistoryOperationFailed { message }) => {
                self.status_message = format!("Cannot move: {}", message);
            }
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }
    }
}

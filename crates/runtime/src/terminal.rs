//! Terminal setup and teardown for the render loop.

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tracing::debug;

use crate::error::RuntimeError;

/// A raw-mode, alternate-screen terminal that restores itself on drop, so a
/// panicking render loop still leaves the shell usable.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn new() -> Result<Self, RuntimeError> {
        enable_raw_mode().map_err(RuntimeError::Setup)?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(RuntimeError::Setup)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(RuntimeError::Setup)?;

        debug!("terminal session started");
        Ok(Self { terminal })
    }

    /// Draws one frame. When this returns, ratatui has finished layout and
    /// paint for the frame and flushed the diff to the terminal — the point
    /// the end-of-frame signal is anchored to.
    pub fn draw<F>(&mut self, render: F) -> Result<(), RuntimeError>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render).map_err(RuntimeError::Draw)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
        debug!("terminal session restored");
    }
}

/// Best-effort terminal restore for paths where the session is gone, such as
/// a panic hook.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}

//! Terminal lifecycle with RAII cleanup.
//!
//! [`TerminalManager`] puts the terminal into raw mode on the alternate
//! screen and puts it back when dropped. [`setup_panic_hook`] covers the
//! paths where `Drop` never runs.
//!
//! ```no_run
//! use bloghub::terminal::{setup_panic_hook, TerminalManager};
//!
//! fn main() -> color_eyre::Result<()> {
//!     setup_panic_hook();
//!     let mut manager = TerminalManager::new()?;
//!     manager.terminal().draw(|_frame| {})?;
//!     Ok(())
//! }
//! ```

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Restores the terminal when dropped. Restoring twice is a no-op.
pub struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    fn new() -> Self {
        Self { restored: false }
    }

    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        leave_tui_mode(&mut io::stdout());
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// The ratatui terminal plus the guard that undoes its setup.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: TerminalGuard,
}

impl TerminalManager {
    /// Enable raw mode, enter the alternate screen with bracketed paste,
    /// and clear it.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        // Raw mode is already on; make sure a failure here still undoes it.
        let guard = TerminalGuard::new();
        enter_tui_mode(&mut stdout)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore now instead of at drop, e.g. before printing to stdout.
    pub fn restore(&mut self) -> Result<()> {
        self.guard.restore();
        self.terminal.show_cursor()?;
        Ok(())
    }
}

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

type BrowserTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus alternate screen for the lifetime of the value
///
/// Dropping the manager without calling [`TerminalManager::restore`] (early return, panic)
/// still puts the terminal back.
pub struct TerminalManager {
    terminal: BrowserTerminal,
    active: bool,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("Failed to enter alternate screen");
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(mut terminal) => {
                let _ = terminal.clear();
                Ok(Self { terminal, active: true })
            }
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(e).context("Failed to initialize terminal")
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut BrowserTerminal {
        &mut self.terminal
    }

    /// Leave the alternate screen and report cleanup failures
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        leave(&mut self.terminal)
    }
}

fn leave(terminal: &mut BrowserTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        if self.active {
            let _ = leave(&mut self.terminal);
        }
    }
}

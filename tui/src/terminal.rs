//! RAII terminal setup on stderr.

use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

pub type StderrTerminal = Terminal<CrosstermBackend<Stderr>>;

/// How much of the terminal the session takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// Alternate screen, restored on exit.
    Fullscreen,
    /// A fixed number of rows below the cursor; scrollback is left intact.
    Inline(u16),
}

/// Raw mode, bracketed paste, and the chosen screen, undone on drop.
///
/// Drawing goes to stderr so stdout stays free for results.
pub struct TerminalSession {
    pub terminal: StderrTerminal,
    mode: ScreenMode,
}

impl TerminalSession {
    pub fn new(mode: ScreenMode) -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stderr();
        if let Err(err) = execute!(out, EnableBracketedPaste) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        if mode == ScreenMode::Fullscreen
            && let Err(err) = execute!(out, EnterAlternateScreen)
        {
            let _ = disable_raw_mode();
            let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
            return Err(err.into());
        }

        let backend = CrosstermBackend::new(out);
        let terminal = match mode {
            ScreenMode::Fullscreen => Terminal::new(backend),
            ScreenMode::Inline(height) => Terminal::with_options(
                backend,
                TerminalOptions {
                    viewport: Viewport::Inline(height),
                },
            ),
        };
        let terminal = match terminal {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let mut out = stderr();
                if mode == ScreenMode::Fullscreen {
                    let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
                } else {
                    let _ = execute!(out, DisableBracketedPaste);
                }
                return Err(err.into());
            }
        };

        tracing::debug!(?mode, "Terminal session started");
        Ok(Self { terminal, mode })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        match self.mode {
            ScreenMode::Fullscreen => {
                let _ = execute!(
                    self.terminal.backend_mut(),
                    LeaveAlternateScreen,
                    DisableBracketedPaste
                );
            }
            ScreenMode::Inline(_) => {
                // Wipe the overlay so later output starts where it was drawn.
                let area = self.terminal.get_frame().area();
                let _ = self.terminal.clear();
                let _ = self.terminal.set_cursor_position(area.as_position());
                let _ = execute!(self.terminal.backend_mut(), DisableBracketedPaste);
            }
        }
        let _ = self.terminal.show_cursor();
    }
}

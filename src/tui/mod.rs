// src/tui/mod.rs
pub mod app;
pub mod view;

pub use app::{App, AppExit};

use std::io;

use crossterm::{
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::error::Result;

/// Runs the editor until the user exports or quits. The terminal is restored
/// even when the loop fails.
pub fn run(app: &mut App) -> Result<AppExit> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    if let Ok(exit) = &result {
        info!(?exit, sections = app.editor().sections().len(), "editor closed");
    }
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<AppExit> {
    loop {
        terminal.draw(|f| view::render(f, app))?;
        app.handle_event(event::read()?);
        if let Some(exit) = app.exit() {
            return Ok(exit);
        }
    }
}

//! Closing key-press pause.

use crate::error::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use std::io::IsTerminal;

/// Block until a single key is pressed.
///
/// Returns immediately when stdin is not a terminal, so piped and
/// scripted runs never hang here.
///
/// # Errors
///
/// Returns an error if raw mode cannot be toggled or the terminal cannot
/// be read.
pub fn wait_for_key() -> Result<()> {
    if !std::io::stdin().is_terminal() {
        return Ok(());
    }

    terminal::enable_raw_mode()?;
    let read = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };
    terminal::disable_raw_mode()?;
    read?;
    Ok(())
}

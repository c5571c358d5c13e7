//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Story API traffic never passes
//! through here; the runtime talks to the API directly.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use storymap_app::{App, AppEvent, Driver, KeyInput};
use thiserror::Error;

use crate::ui;

/// Interval between tick events while the terminal is idle.
const TICK: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Puts the terminal in raw mode on the alternate screen for its lifetime
/// and restores it on drop.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, event_stream: EventStream::new(), restored: false })
    }

    /// Convert a crossterm key event to a [`KeyInput`].
    ///
    /// Control chords on letters become [`KeyInput::Ctrl`]; keys the app
    /// has no use for map to `None`.
    pub fn convert_key(event: KeyEvent) -> Option<KeyInput> {
        match event.code {
            KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyInput::Ctrl(c.to_ascii_lowercase()))
            },
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Tab | KeyCode::BackTab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            _ => None,
        }
    }

    fn convert_event(event: Event) -> Option<AppEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::convert_key(key).map(AppEvent::Key)
            },
            Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
            _ => None,
        }
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        tokio::select! {
            biased;

            maybe_event = self.event_stream.next() => match maybe_event {
                Some(Ok(event)) => Ok(Self::convert_event(event)),
                Some(Err(e)) => Err(TerminalError::Io(e)),
                None => Ok(None),
            },

            () = tokio::time::sleep(TICK) => Ok(Some(AppEvent::Tick)),
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_chords_map_to_ctrl() {
        let input = TerminalDriver::convert_key(key(KeyCode::Char('S'), KeyModifiers::CONTROL));
        assert_eq!(input, Some(KeyInput::Ctrl('s')));
    }

    #[test]
    fn plain_chars_pass_through() {
        let input = TerminalDriver::convert_key(key(KeyCode::Char('Q'), KeyModifiers::SHIFT));
        assert_eq!(input, Some(KeyInput::Char('Q')));
    }

    #[test]
    fn unused_keys_are_dropped() {
        assert_eq!(TerminalDriver::convert_key(key(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn resize_becomes_event() {
        let event = TerminalDriver::convert_event(Event::Resize(100, 40));
        assert!(matches!(event, Some(AppEvent::Resize(100, 40))));
    }
}

//! Home page: pick a theme room by id.

use storymap_core::ThemeRoomId;

use crate::KeyInput;

/// State of the home page.
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    room_input: String,
}

impl HomePage {
    /// Theme room id typed so far.
    pub fn room_input(&self) -> &str {
        &self.room_input
    }

    /// Edit the room id. Returns the room to open when Enter confirms a
    /// non-blank id.
    pub fn handle_key(&mut self, key: KeyInput) -> Option<ThemeRoomId> {
        match key {
            KeyInput::Char(c) if !c.is_whitespace() && c != '/' => self.room_input.push(c),
            KeyInput::Backspace => {
                self.room_input.pop();
            },
            KeyInput::Enter if !self.room_input.is_empty() => {
                return Some(ThemeRoomId::new(self.room_input.clone()));
            },
            _ => {},
        }
        None
    }
}

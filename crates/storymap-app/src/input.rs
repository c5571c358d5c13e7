//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Character pressed with Control held (shortcuts).
    Ctrl(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Tab key (cycle form fields).
    Tab,
    /// Escape key (close sidebar, go back).
    Esc,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
}

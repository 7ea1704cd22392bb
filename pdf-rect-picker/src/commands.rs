//! User commands and their default key bindings.

use iced::keyboard::key::Named;
use iced::keyboard::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Open,
    PreviousPage,
    NextPage,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    CopySelection,
    ClearSelection,
}

/// Resolve a key press to a command, if it is bound to one.
///
/// `Ctrl` is `Cmd` on macOS.
pub fn command_for_key(key: &Key, modifiers: Modifiers) -> Option<Command> {
    match key.as_ref() {
        Key::Named(Named::Escape) => Some(Command::ClearSelection),
        Key::Named(Named::PageUp) => Some(Command::PreviousPage),
        Key::Named(Named::PageDown) => Some(Command::NextPage),
        Key::Character(c) if modifiers.command() => match c {
            "=" | "+" => Some(Command::ZoomIn),
            "-" => Some(Command::ZoomOut),
            "0" => Some(Command::ZoomReset),
            "c" | "C" => Some(Command::CopySelection),
            "o" | "O" => Some(Command::Open),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_key(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn zoom_and_clipboard_need_command_modifier() {
        assert_eq!(command_for_key(&char_key("="), Modifiers::COMMAND), Some(Command::ZoomIn));
        assert_eq!(command_for_key(&char_key("+"), Modifiers::COMMAND), Some(Command::ZoomIn));
        assert_eq!(command_for_key(&char_key("-"), Modifiers::COMMAND), Some(Command::ZoomOut));
        assert_eq!(command_for_key(&char_key("0"), Modifiers::COMMAND), Some(Command::ZoomReset));
        assert_eq!(
            command_for_key(&char_key("c"), Modifiers::COMMAND),
            Some(Command::CopySelection)
        );
        assert_eq!(command_for_key(&char_key("o"), Modifiers::COMMAND), Some(Command::Open));

        assert_eq!(command_for_key(&char_key("c"), Modifiers::empty()), None);
        assert_eq!(command_for_key(&char_key("0"), Modifiers::SHIFT), None);
    }

    #[test]
    fn named_keys_work_without_modifiers() {
        assert_eq!(
            command_for_key(&Key::Named(Named::Escape), Modifiers::empty()),
            Some(Command::ClearSelection)
        );
        assert_eq!(
            command_for_key(&Key::Named(Named::PageDown), Modifiers::empty()),
            Some(Command::NextPage)
        );
        assert_eq!(
            command_for_key(&Key::Named(Named::PageUp), Modifiers::empty()),
            Some(Command::PreviousPage)
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(command_for_key(&char_key("q"), Modifiers::COMMAND), None);
        assert_eq!(command_for_key(&Key::Named(Named::Enter), Modifiers::empty()), None);
    }
}

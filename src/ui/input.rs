//! Keyboard mapping

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::machine::Command;

/// Map a key press to a machine command
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char(' ') => Some(Command::Spin),
        KeyCode::Up => Some(Command::IncreaseBet),
        KeyCode::Down => Some(Command::DecreaseBet),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::BuyEnergy),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::BuyGold),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

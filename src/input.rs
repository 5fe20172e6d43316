//! Key mapping from terminal events to session commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Command, Phase};

/// Map a key press to a command, given the observed session phase (the
/// `p` key toggles between `Pause` and `Resume`).
pub fn map_key(key: KeyEvent, phase: Phase) -> Option<Command> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::SoftDrop),

        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Command::RotateCcw),

        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Hold),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(match phase {
            Phase::Paused => Command::Resume,
            _ => Command::Pause,
        }),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),

        _ => None,
    }
}

/// Whether the key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

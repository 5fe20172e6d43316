//! Observable state snapshot handed to presentation layers.
//!
//! Plain `Copy` data, no references into the core: a frontend can keep
//! one around and have the core refresh it every frame.

use crate::core::game_state::ActivePiece;
use crate::core::shapes::Shape;
use crate::types::{Phase, PieceKind, COLS, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(piece: ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            shape: piece.shape,
            x: piece.x,
            y: piece.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Settled cells as 0..=7 identifiers (0 = empty).
    pub board: [[u8; COLS as usize]; ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub hold: Option<PieceKind>,
    pub hold_locked: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
    pub phase: Phase,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; COLS as usize]; ROWS as usize],
            active: None,
            next: PieceKind::T,
            hold: None,
            hold_locked: false,
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: 0,
            phase: Phase::Running,
        }
    }
}

//! Core types and constants shared across the crate.
//! This module contains pure data types with no external dependencies.

/// Grid dimensions (fixed for the lifetime of a session).
pub const COLS: u8 = 10;
pub const ROWS: u8 = 20;

/// Frontend frame tick (milliseconds).
pub const TICK_MS: u32 = 16;

/// Fall-speed progression (milliseconds).
pub const INITIAL_FALL_INTERVAL_MS: u32 = 1000;
pub const MIN_FALL_INTERVAL_MS: u32 = 100;
pub const LEVEL_SPEEDUP_MS: u32 = 100;

/// Scoring and leveling.
pub const LINES_PER_LEVEL: u32 = 10;
pub const POINTS_PER_LINE: u32 = 100;
/// Bonus per row descended during a hard drop.
pub const HARD_DROP_BONUS: u32 = 2;

/// The seven tetromino kinds.
///
/// Declaration order matches the original catalog so that `id()` values
/// line up with the classic 1..=7 color indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    I,
    O,
    L,
    J,
    Z,
    S,
}

impl PieceKind {
    /// All kinds, in catalog order. Uniform draws index into this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Stable cell identifier in `1..=7` (0 is reserved for empty cells).
    pub fn id(self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::I => 2,
            PieceKind::O => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::Z => 6,
            PieceKind::S => 7,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::I),
            3 => Some(PieceKind::O),
            4 => Some(PieceKind::L),
            5 => Some(PieceKind::J),
            6 => Some(PieceKind::Z),
            7 => Some(PieceKind::S),
            _ => None,
        }
    }
}

/// A grid cell: empty, or the kind of the piece that settled there.
pub type Cell = Option<PieceKind>;

/// Player-facing commands accepted by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
    Resume,
    Restart,
}

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Fire-and-forget cues emitted by the core for external collaborators
/// (audio, flashes). The core never waits on their consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Moved,
    Rotated,
    Held,
    Locked,
    LinesCleared(u32),
    GameOver,
}

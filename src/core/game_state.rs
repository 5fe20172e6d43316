//! Session controller - owns the grid, the active piece, the supply and
//! the progression, and drives the fall loop.
//!
//! All mutation goes through `apply_command` and `tick`; both run
//! synchronously to completion, so the lock/sweep/score transaction is
//! never observable half-done.

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::core::placement::{collides, drop_distance, try_rotate};
use crate::core::progress::Progress;
use crate::core::shapes::{canonical, spawn_x, Shape};
use crate::core::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::core::supply::{PieceSource, PieceSupply};
use crate::types::{Command, GameEvent, Phase, PieceKind};

/// Upper bound on cues buffered between frames; excess cues are dropped,
/// they are advisory only.
const EVENT_QUEUE_CAP: usize = 16;

/// The currently falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A piece in canonical orientation at the standard spawn position.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = canonical(kind);
        Self {
            kind,
            shape,
            x: spawn_x(&shape),
            y: 0,
        }
    }
}

/// Complete session state.
pub struct GameState {
    grid: Grid,
    active: Option<ActivePiece>,
    supply: PieceSupply,
    progress: Progress,
    phase: Phase,
    fall_accumulator_ms: u32,
    events: ArrayVec<GameEvent, EVENT_QUEUE_CAP>,
}

impl GameState {
    /// Create a session with a uniform random supply and spawn the first
    /// piece.
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(crate::core::supply::RandomSource::new(seed)))
    }

    /// Create a session with a custom piece source (scripted streams for
    /// tests or external drivers).
    pub fn with_source(source: Box<dyn PieceSource>) -> Self {
        let mut state = Self {
            grid: Grid::new(),
            active: None,
            supply: PieceSupply::with_source(source),
            progress: Progress::new(),
            phase: Phase::Running,
            fall_accumulator_ms: 0,
            events: ArrayVec::new(),
        };
        state.spawn_piece();
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.progress.fall_interval_ms()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.supply.next_kind()
    }

    pub fn hold_kind(&self) -> Option<PieceKind> {
        self.supply.hold_kind()
    }

    pub fn hold_locked(&self) -> bool {
        self.supply.hold_locked()
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Drain the cues accumulated since the last drain.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_QUEUE_CAP> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        // Cues are fire-and-forget; a full queue drops the cue rather
        // than growing or panicking.
        let _ = self.events.try_push(event);
    }

    /// Refresh `out` with the current observable state.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_id_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.supply.next_kind();
        out.hold = self.supply.hold_kind();
        out.hold_locked = self.supply.hold_locked();
        out.score = self.progress.score();
        out.level = self.progress.level();
        out.lines = self.progress.lines();
        out.fall_interval_ms = self.progress.fall_interval_ms();
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Apply a player command. Returns whether any state changed;
    /// illegal or ignored commands return `false` silently.
    pub fn apply_command(&mut self, cmd: Command) -> bool {
        match self.phase {
            Phase::Paused => match cmd {
                Command::Resume => {
                    self.phase = Phase::Running;
                    true
                }
                _ => false,
            },
            Phase::GameOver => match cmd {
                Command::Restart => {
                    self.restart();
                    true
                }
                _ => false,
            },
            Phase::Running => match cmd {
                Command::MoveLeft => self.shift(-1),
                Command::MoveRight => self.shift(1),
                Command::SoftDrop => self.step_down(),
                Command::HardDrop => self.hard_drop(),
                Command::RotateCw => self.rotate(true),
                Command::RotateCcw => self.rotate(false),
                Command::Hold => self.hold(),
                Command::Pause => {
                    self.phase = Phase::Paused;
                    true
                }
                Command::Resume => false,
                Command::Restart => {
                    self.restart();
                    true
                }
            },
        }
    }

    /// Advance the fall clock. When the accumulator exceeds the current
    /// fall interval one gravity step runs and the accumulator resets to
    /// zero (the remainder is discarded).
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.fall_accumulator_ms = self.fall_accumulator_ms.saturating_add(elapsed_ms);
        if self.fall_accumulator_ms > self.progress.fall_interval_ms() {
            return self.step_down();
        }
        false
    }

    /// Horizontal move; rejected silently when the target collides.
    fn shift(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if collides(&self.grid, &active.shape, active.x + dx, active.y) {
            return false;
        }
        self.active = Some(ActivePiece {
            x: active.x + dx,
            ..active
        });
        self.emit(GameEvent::Moved);
        true
    }

    /// Rotate with the kick search; a failed search leaves the piece
    /// untouched (full rollback).
    fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match try_rotate(&self.grid, &active.shape, active.x, active.y, clockwise) {
            Some((shape, x)) => {
                self.active = Some(ActivePiece { shape, x, ..active });
                self.emit(GameEvent::Rotated);
                true
            }
            None => false,
        }
    }

    /// One downward step. A colliding step does not move the piece;
    /// instead it locks at its last valid position. Either way the fall
    /// accumulator resets.
    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.fall_accumulator_ms = 0;
        if collides(&self.grid, &active.shape, active.x, active.y + 1) {
            self.lock_active();
        } else {
            self.active = Some(ActivePiece {
                y: active.y + 1,
                ..active
            });
        }
        true
    }

    /// Drop to contact, credit the per-row bonus, then lock.
    fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let distance = drop_distance(&self.grid, &active.shape, active.x, active.y);
        if distance > 0 {
            self.active = Some(ActivePiece {
                y: active.y + distance as i8,
                ..active
            });
            self.progress.add_drop_bonus(distance);
        }
        self.fall_accumulator_ms = 0;
        self.lock_active();
        true
    }

    /// The landing transaction: merge, sweep, score, spawn. Callers see
    /// it as atomic; no command or tick can interleave.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        debug_assert!(
            !collides(&self.grid, &active.shape, active.x, active.y),
            "locking a colliding piece"
        );
        self.grid
            .merge(&active.shape, active.x, active.y, active.kind);
        self.emit(GameEvent::Locked);

        let cleared = self.grid.sweep_completed_rows();
        if cleared > 0 {
            self.progress.apply_clear(cleared);
            self.emit(GameEvent::LinesCleared(cleared));
        }

        self.spawn_piece();
    }

    /// Draw the upcoming piece and place it at the spawn position. A
    /// spawn that immediately collides with settled content ends the
    /// game; the blocked piece stays visible.
    fn spawn_piece(&mut self) {
        let kind = self.supply.advance();
        let piece = ActivePiece::spawn(kind);
        self.active = Some(piece);
        if collides(&self.grid, &piece.shape, piece.x, piece.y) {
            self.phase = Phase::GameOver;
            self.emit(GameEvent::GameOver);
        }
    }

    /// Bank the active piece. With an empty hold slot the current kind is
    /// stored and the queued piece spawns; otherwise the held kind swaps
    /// in, reset to canonical orientation at the spawn position. Locked
    /// until the next spawn either way.
    fn hold(&mut self) -> bool {
        if self.supply.hold_locked() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        match self.supply.stash(active.kind) {
            Some(held) => {
                // In-progress rotation state of the outgoing piece is
                // discarded; the incoming piece starts over.
                self.active = Some(ActivePiece::spawn(held));
            }
            None => {
                self.spawn_piece();
            }
        }
        self.supply.lock_hold();
        self.emit(GameEvent::Held);
        true
    }

    /// Full reinitialization: grid, progression, supply and a fresh
    /// spawn. The piece stream continues from the same RNG state.
    fn restart(&mut self) {
        self.grid.reset();
        self.progress = Progress::new();
        self.supply.reset();
        self.phase = Phase::Running;
        self.fall_accumulator_ms = 0;
        self.spawn_piece();
    }
}

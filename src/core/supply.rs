//! Piece supply - the randomized generator, one-slot lookahead and the
//! hold buffer.
//!
//! Draws are independent and uniform over the seven kinds; there is no
//! bag-style fairness window, so streaks of the same piece are possible
//! by design.

use crate::core::rng::SimpleRng;
use crate::types::PieceKind;

/// Strategy seam for piece generation. The default is uniform random;
/// tests and external drivers can script the stream.
pub trait PieceSource {
    fn draw(&mut self) -> PieceKind;
}

/// Uniform independent draws over all seven kinds.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: SimpleRng,
}

impl RandomSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for RandomSource {
    fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// A scripted source that replays a fixed sequence, then falls back to a
/// seeded random stream. Used by tests and useful for demos.
pub struct ScriptedSource {
    script: Vec<PieceKind>,
    cursor: usize,
    fallback: RandomSource,
}

impl ScriptedSource {
    pub fn new(script: Vec<PieceKind>) -> Self {
        Self {
            script,
            cursor: 0,
            fallback: RandomSource::new(1),
        }
    }
}

impl PieceSource for ScriptedSource {
    fn draw(&mut self) -> PieceKind {
        match self.script.get(self.cursor) {
            Some(&kind) => {
                self.cursor += 1;
                kind
            }
            None => self.fallback.draw(),
        }
    }
}

/// Supply state: the precomputed "next" slot, the hold buffer and its
/// once-per-piece usage lock.
pub struct PieceSupply {
    source: Box<dyn PieceSource>,
    next: PieceKind,
    hold: Option<PieceKind>,
    hold_locked: bool,
}

impl PieceSupply {
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(RandomSource::new(seed)))
    }

    pub fn with_source(mut source: Box<dyn PieceSource>) -> Self {
        let next = source.draw();
        Self {
            source,
            next,
            hold: None,
            hold_locked: false,
        }
    }

    /// Consume the "next" slot for a spawn and immediately refill it.
    /// A spawn also releases the hold lock for the new piece.
    pub fn advance(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = self.source.draw();
        self.hold_locked = false;
        kind
    }

    /// Store `kind` in the hold buffer, returning the previously held
    /// kind (if any). Does not touch the lock; the session controller
    /// locks after its spawn/swap bookkeeping.
    pub fn stash(&mut self, kind: PieceKind) -> Option<PieceKind> {
        self.hold.replace(kind)
    }

    pub fn lock_hold(&mut self) {
        self.hold_locked = true;
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn hold_kind(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn hold_locked(&self) -> bool {
        self.hold_locked
    }

    /// Restart: clear the hold buffer and redraw "next" from the same
    /// stream.
    pub fn reset(&mut self) {
        self.hold = None;
        self.hold_locked = false;
        self.next = self.source.draw();
    }
}

impl std::fmt::Debug for PieceSupply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieceSupply")
            .field("next", &self.next)
            .field("hold", &self.hold)
            .field("hold_locked", &self.hold_locked)
            .finish_non_exhaustive()
    }
}

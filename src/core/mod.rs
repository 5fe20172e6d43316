//! Core module - pure game-state logic with no I/O dependencies.
//!
//! Everything the session needs lives here: the grid, the shape catalog,
//! collision/placement, the piece supply, progression and the session
//! controller. Presentation and input are external collaborators that
//! consume `GameSnapshot` and feed `Command`s.

pub mod game_state;
pub mod grid;
pub mod placement;
pub mod progress;
pub mod rng;
pub mod shapes;
pub mod snapshot;
pub mod supply;

pub use game_state::{ActivePiece, GameState};
pub use grid::Grid;
pub use placement::{collides, drop_distance, try_rotate};
pub use progress::Progress;
pub use shapes::{canonical, spawn_x, Shape};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use supply::{PieceSource, PieceSupply, RandomSource, ScriptedSource};

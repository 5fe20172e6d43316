//! Neotris - a neon terminal falling-block puzzle game.
//!
//! The `core` module is the game-state engine; `term`, `input` and
//! `highscore` are the replaceable collaborators around it.

pub mod core;
pub mod highscore;
pub mod input;
pub mod term;
pub mod types;

//! Terminal frontend: crossterm renderer and frame layout.

pub mod game_view;
pub mod renderer;

pub use game_view::GameView;
pub use renderer::TerminalRenderer;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event};

use neotris::core::GameState;
use neotris::highscore::HighScoreStore;
use neotris::input::{map_key, should_quit};
use neotris::term::{GameView, TerminalRenderer};
use neotris::types::{GameEvent, TICK_MS};

fn main() -> Result<()> {
    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let result = run(&mut renderer);
    // Always restore the terminal, even when the game loop errored.
    renderer.exit()?;
    result
}

fn run(renderer: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut game = GameState::new(seed);
    let mut store = HighScoreStore::open_default();
    let view = GameView;

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        let wait = tick.saturating_sub(last_tick.elapsed());
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if should_quit(key) {
                    break;
                }
                if let Some(cmd) = map_key(key, game.phase()) {
                    if game.apply_command(cmd) {
                        dirty = true;
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if game.tick(TICK_MS) {
                dirty = true;
            }
        }

        for ev in game.take_events() {
            match ev {
                GameEvent::LinesCleared(_) | GameEvent::GameOver => renderer.bell()?,
                _ => {}
            }
            dirty = true;
        }

        // Persist as soon as the score beats the stored best, so quitting
        // or restarting mid-game never loses it.
        if store.record(game.score()) {
            dirty = true;
        }

        if dirty {
            renderer.draw(&view, &game.snapshot(), store.best())?;
            dirty = false;
        }
    }
    Ok(())
}

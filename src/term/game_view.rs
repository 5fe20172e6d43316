//! Game view: lays out the playfield, previews and score panel as
//! crossterm commands queued into a byte buffer.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use crate::core::{canonical, GameSnapshot};
use crate::types::{Phase, PieceKind, COLS, ROWS};

/// Two terminal columns per grid cell keeps blocks roughly square.
const CELL_W: u16 = 2;
const FIELD_X: u16 = 1;
const FIELD_Y: u16 = 1;
const PANEL_X: u16 = FIELD_X + COLS as u16 * CELL_W + 3;

const BLOCK: &str = "██";
const EMPTY: &str = "  ";

/// The original neon palette, carried over as RGB.
fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::T => Color::Rgb { r: 0xff, g: 0x00, b: 0x6e },
        PieceKind::I => Color::Rgb { r: 0x00, g: 0xf0, b: 0xff },
        PieceKind::O => Color::Rgb { r: 0x39, g: 0xff, b: 0x14 },
        PieceKind::L => Color::Rgb { r: 0x70, g: 0x00, b: 0xff },
        PieceKind::J => Color::Rgb { r: 0xff, g: 0x95, b: 0x00 },
        PieceKind::Z => Color::Rgb { r: 0xff, g: 0xfc, b: 0x00 },
        PieceKind::S => Color::Rgb { r: 0xff, g: 0x07, b: 0x3a },
    }
}

#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    /// Queue a full frame for `snap` into `out`.
    pub fn render(&self, snap: &GameSnapshot, high_score: u32, out: &mut Vec<u8>) -> Result<()> {
        out.queue(Clear(ClearType::All))?;
        self.render_border(out)?;
        self.render_field(snap, out)?;
        self.render_panel(snap, high_score, out)?;
        self.render_overlay(snap, out)?;
        out.queue(ResetColor)?;
        Ok(())
    }

    fn render_border(&self, out: &mut Vec<u8>) -> Result<()> {
        let right = FIELD_X + COLS as u16 * CELL_W;
        let bottom = FIELD_Y + ROWS as u16;
        out.queue(SetForegroundColor(Color::DarkGrey))?;
        out.queue(MoveTo(FIELD_X - 1, FIELD_Y - 1))?;
        out.queue(Print("┌"))?;
        for _ in 0..COLS as u16 * CELL_W {
            out.queue(Print("─"))?;
        }
        out.queue(Print("┐"))?;
        for y in FIELD_Y..bottom {
            out.queue(MoveTo(FIELD_X - 1, y))?;
            out.queue(Print("│"))?;
            out.queue(MoveTo(right, y))?;
            out.queue(Print("│"))?;
        }
        out.queue(MoveTo(FIELD_X - 1, bottom))?;
        out.queue(Print("└"))?;
        for _ in 0..COLS as u16 * CELL_W {
            out.queue(Print("─"))?;
        }
        out.queue(Print("┘"))?;
        Ok(())
    }

    fn render_field(&self, snap: &GameSnapshot, out: &mut Vec<u8>) -> Result<()> {
        // Settled cells.
        for (y, row) in snap.board.iter().enumerate() {
            out.queue(MoveTo(FIELD_X, FIELD_Y + y as u16))?;
            for id in row {
                match PieceKind::from_id(*id) {
                    Some(kind) => {
                        out.queue(SetForegroundColor(piece_color(kind)))?;
                        out.queue(Print(BLOCK))?;
                    }
                    None => {
                        out.queue(Print(EMPTY))?;
                    }
                }
            }
        }

        // Active piece, skipping cells above the visible field.
        if let Some(active) = snap.active {
            out.queue(SetForegroundColor(piece_color(active.kind)))?;
            for (dx, dy) in active.shape.cells() {
                let cx = active.x + dx;
                let cy = active.y + dy;
                if cy < 0 {
                    continue;
                }
                out.queue(MoveTo(FIELD_X + cx as u16 * CELL_W, FIELD_Y + cy as u16))?;
                out.queue(Print(BLOCK))?;
            }
        }
        Ok(())
    }

    fn render_panel(&self, snap: &GameSnapshot, high_score: u32, out: &mut Vec<u8>) -> Result<()> {
        let lines = [
            format!("SCORE {:>8}", snap.score),
            format!("HIGH  {:>8}", high_score.max(snap.score)),
            format!("LEVEL {:>8}", snap.level),
            format!("LINES {:>8}", snap.lines),
        ];
        out.queue(SetForegroundColor(Color::White))?;
        for (i, text) in lines.iter().enumerate() {
            out.queue(MoveTo(PANEL_X, FIELD_Y + i as u16))?;
            out.queue(Print(text))?;
        }

        let next_y = FIELD_Y + 5;
        out.queue(MoveTo(PANEL_X, next_y))?;
        out.queue(Print("NEXT"))?;

        let hold_y = next_y + 6;
        let hold_label = if snap.hold_locked { "HOLD (used)" } else { "HOLD" };
        out.queue(MoveTo(PANEL_X, hold_y))?;
        out.queue(Print(hold_label))?;

        self.render_preview(Some(snap.next), next_y + 1, out)?;
        self.render_preview(snap.hold, hold_y + 1, out)?;

        out.queue(SetForegroundColor(Color::DarkGrey))?;
        out.queue(MoveTo(PANEL_X, hold_y + 6))?;
        out.queue(Print("←→ move  ↑ rotate  ↓ drop"))?;
        out.queue(MoveTo(PANEL_X, hold_y + 7))?;
        out.queue(Print("space hard  c hold  p pause  q quit"))?;
        Ok(())
    }

    fn render_preview(&self, kind: Option<PieceKind>, top: u16, out: &mut Vec<u8>) -> Result<()> {
        let Some(kind) = kind else {
            return Ok(());
        };
        let shape = canonical(kind);
        out.queue(SetForegroundColor(piece_color(kind)))?;
        for (dx, dy) in shape.cells() {
            out.queue(MoveTo(PANEL_X + dx as u16 * CELL_W, top + dy as u16))?;
            out.queue(Print(BLOCK))?;
        }
        Ok(())
    }

    fn render_overlay(&self, snap: &GameSnapshot, out: &mut Vec<u8>) -> Result<()> {
        let center_y = FIELD_Y + ROWS as u16 / 2;
        match snap.phase {
            Phase::Paused => {
                out.queue(SetForegroundColor(Color::White))?;
                out.queue(MoveTo(FIELD_X + 6, center_y))?;
                out.queue(Print(" PAUSED "))?;
            }
            Phase::GameOver => {
                out.queue(SetForegroundColor(Color::Red))?;
                out.queue(MoveTo(FIELD_X + 5, center_y))?;
                out.queue(Print(" GAME OVER "))?;
                out.queue(SetForegroundColor(Color::White))?;
                out.queue(MoveTo(FIELD_X + 3, center_y + 1))?;
                out.queue(Print(" press r to restart "))?;
            }
            Phase::Running => {}
        }
        Ok(())
    }
}

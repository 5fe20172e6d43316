//! Collision and placement engine.
//!
//! Decides whether a shape fits at a grid position, how far it can fall,
//! and resolves rotations with a horizontal kick search.

use crate::core::grid::Grid;
use crate::core::shapes::Shape;
use crate::types::{COLS, ROWS};

/// True when any occupied cell of `shape`, offset by `(x, y)`, leaves the
/// horizontal bounds, passes the bottom, or overlaps a settled cell.
///
/// Cells above the top edge (`y < 0`) never collide: pieces may spawn or
/// rotate while partially off-screen.
pub fn collides(grid: &Grid, shape: &Shape, x: i8, y: i8) -> bool {
    shape.cells().any(|(dx, dy)| {
        let cx = x + dx;
        let cy = y + dy;
        if cx < 0 || cx >= COLS as i8 || cy >= ROWS as i8 {
            return true;
        }
        if cy < 0 {
            return false;
        }
        grid.is_occupied(cx, cy)
    })
}

/// How many rows the shape can descend from `(x, y)` before resting.
pub fn drop_distance(grid: &Grid, shape: &Shape, x: i8, y: i8) -> u32 {
    let mut distance = 0u32;
    while !collides(grid, shape, x, y + distance as i8 + 1) {
        distance += 1;
    }
    distance
}

/// Rotate a shape in place with a wall-kick search.
///
/// The rotated matrix is first tried at the original x. If it collides,
/// horizontal kicks are tried with alternating sign and increasing
/// magnitude (+1, -1, +2, -2, ...) up to the rotated shape's width.
/// Returns the rotated shape and the accepted x, or `None` when every
/// kick fails — the caller keeps the original shape and position
/// untouched (full rollback).
pub fn try_rotate(
    grid: &Grid,
    shape: &Shape,
    x: i8,
    y: i8,
    clockwise: bool,
) -> Option<(Shape, i8)> {
    let rotated = shape.rotated(clockwise);

    if !collides(grid, &rotated, x, y) {
        return Some((rotated, x));
    }

    for magnitude in 1..=rotated.size() as i8 {
        for kicked_x in [x + magnitude, x - magnitude] {
            if !collides(grid, &rotated, kicked_x, y) {
                return Some((rotated, kicked_x));
            }
        }
    }

    None
}

//! Shape catalog - the seven tetromino occupancy matrices.
//!
//! Each shape is a small square bitmask matrix (2x2 for O, 4x4 for I,
//! 3x3 for the rest), copied straight from the classic catalog. Catalog
//! entries are `const` and never mutated: rotation always produces a new
//! `Shape` value.

use crate::types::{PieceKind, COLS};

/// A square occupancy matrix, at most 4x4.
///
/// Bit `x` of `rows[y]` is set when cell `(x, y)` is occupied. Stored as
/// a `Copy` bitmask rather than a nested Vec so rotation and collision
/// probing never allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    rows: [u8; 4],
}

impl Shape {
    const fn new(size: u8, rows: [u8; 4]) -> Self {
        Self { size, rows }
    }

    /// Matrix edge length (2, 3 or 4). Also the kick search limit.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether cell `(x, y)` of the matrix is occupied.
    pub fn filled(&self, x: u8, y: u8) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        (self.rows[y as usize] >> x) & 1 == 1
    }

    /// Iterate occupied cells as `(dx, dy)` offsets from the piece origin.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let shape = *self;
        (0..shape.size).flat_map(move |y| {
            (0..shape.size).filter_map(move |x| shape.filled(x, y).then_some((x as i8, y as i8)))
        })
    }

    /// Rotate 90 degrees clockwise: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Shape {
        let mut rows = [0u8; 4];
        for y in 0..self.size {
            for x in 0..self.size {
                if self.filled(y, self.size - 1 - x) {
                    rows[y as usize] |= 1 << x;
                }
            }
        }
        Shape::new(self.size, rows)
    }

    /// Rotate 90 degrees counter-clockwise: transpose, then reverse row order.
    pub fn rotated_ccw(&self) -> Shape {
        let mut rows = [0u8; 4];
        for y in 0..self.size {
            for x in 0..self.size {
                if self.filled(self.size - 1 - y, x) {
                    rows[y as usize] |= 1 << x;
                }
            }
        }
        Shape::new(self.size, rows)
    }

    pub fn rotated(&self, clockwise: bool) -> Shape {
        if clockwise {
            self.rotated_cw()
        } else {
            self.rotated_ccw()
        }
    }
}

/// The canonical (spawn) orientation for a piece kind.
pub const fn canonical(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => Shape::new(3, [0b010, 0b111, 0b000, 0]),
        PieceKind::I => Shape::new(4, [0b0000, 0b1111, 0b0000, 0b0000]),
        PieceKind::O => Shape::new(2, [0b11, 0b11, 0, 0]),
        PieceKind::L => Shape::new(3, [0b100, 0b111, 0b000, 0]),
        PieceKind::J => Shape::new(3, [0b001, 0b111, 0b000, 0]),
        PieceKind::Z => Shape::new(3, [0b011, 0b110, 0b000, 0]),
        PieceKind::S => Shape::new(3, [0b110, 0b011, 0b000, 0]),
    }
}

/// Standard spawn column: the matrix horizontally centered on the grid.
pub fn spawn_x(shape: &Shape) -> i8 {
    (COLS / 2) as i8 - (shape.size() / 2) as i8
}

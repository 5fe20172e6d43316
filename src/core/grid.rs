//! Grid module - the settled-cell matrix.
//!
//! A fixed 10x20 field where each cell is empty or remembers which piece
//! kind settled there (kept for coloring; gameplay only cares about
//! occupancy). Uses a flat array for cache locality.
//! Coordinates: (x, y), x grows right, y grows down, (0, 0) is top-left.

use crate::core::shapes::Shape;
use crate::types::{Cell, PieceKind, COLS, ROWS};

const CELL_COUNT: usize = (COLS as usize) * (ROWS as usize);

/// The settled playfield, 10 columns x 20 rows, row-major flat storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= COLS as i8 || y < 0 || y >= ROWS as i8 {
            return None;
        }
        Some((y as usize) * (COLS as usize) + (x as usize))
    }

    /// Cell contents at `(x, y)`; `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether an in-bounds cell holds a settled piece.
    /// Out-of-bounds coordinates report unoccupied; bounds handling is the
    /// collision engine's job.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Write a settled piece's cells into the grid.
    ///
    /// Precondition: the caller has verified the placement is collision
    /// free. Cells above the top edge are skipped (a piece may lock while
    /// partially off-screen); everything else must land on an empty
    /// in-bounds cell, asserted in debug builds.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8, kind: PieceKind) {
        for (dx, dy) in shape.cells() {
            let cx = x + dx;
            let cy = y + dy;
            if cy < 0 {
                continue;
            }
            debug_assert!(
                Self::index(cx, cy).is_some(),
                "merge out of bounds at ({}, {})",
                cx,
                cy
            );
            debug_assert!(!self.is_occupied(cx, cy), "merge overlap at ({}, {})", cx, cy);
            self.set(cx, cy, Some(kind));
        }
    }

    fn is_row_full(&self, y: usize) -> bool {
        let start = y * COLS as usize;
        self.cells[start..start + COLS as usize]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove row `y`, shifting every row above it down by one and
    /// inserting an empty row at the top.
    fn remove_row(&mut self, y: usize) {
        let width = COLS as usize;
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            self.cells.copy_within(src..src + width, row * width);
        }
        for cell in &mut self.cells[0..width] {
            *cell = None;
        }
    }

    /// Clear every completed row and return how many were removed.
    ///
    /// Scans bottom to top. After removing a row the same index is
    /// re-examined, because the row that shifted down into it may itself
    /// be complete.
    pub fn sweep_completed_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = ROWS as usize;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Reset every cell to empty.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Export the field as 0..=7 identifiers for presentation.
    pub fn write_id_grid(&self, out: &mut [[u8; COLS as usize]; ROWS as usize]) {
        for y in 0..ROWS as usize {
            for x in 0..COLS as usize {
                out[y][x] = self.cells[y * COLS as usize + x].map_or(0, PieceKind::id);
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shapes::canonical;

    fn fill_row(grid: &mut Grid, y: i8, kind: PieceKind) {
        for x in 0..COLS as i8 {
            grid.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        for y in 0..ROWS as i8 {
            for x in 0..COLS as i8 {
                assert_eq!(grid.get(x, y), Some(None));
            }
        }
    }

    #[test]
    fn test_index_bounds() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
        assert_eq!(Grid::index(0, -1), None);
    }

    #[test]
    fn test_is_occupied() {
        let mut grid = Grid::new();
        assert!(!grid.is_occupied(4, 10));
        grid.set(4, 10, Some(PieceKind::Z));
        assert!(grid.is_occupied(4, 10));
        // Out of bounds is not "occupied" at this layer.
        assert!(!grid.is_occupied(-1, 0));
        assert!(!grid.is_occupied(0, 25));
    }

    #[test]
    fn test_merge_writes_kind() {
        let mut grid = Grid::new();
        let shape = canonical(PieceKind::O);
        grid.merge(&shape, 4, 18, PieceKind::O);
        assert_eq!(grid.get(4, 18), Some(Some(PieceKind::O)));
        assert_eq!(grid.get(5, 18), Some(Some(PieceKind::O)));
        assert_eq!(grid.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(grid.get(5, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_merge_skips_cells_above_top() {
        let mut grid = Grid::new();
        // I piece occupies matrix row 1; y = -1 places it at grid row 0.
        let shape = canonical(PieceKind::I);
        grid.merge(&shape, 3, -1, PieceKind::I);
        for x in 3..7 {
            assert_eq!(grid.get(x, 0), Some(Some(PieceKind::I)));
        }
        // y = -2 puts the occupied row entirely above the field.
        let mut empty = Grid::new();
        empty.merge(&shape, 3, -2, PieceKind::I);
        assert_eq!(empty, Grid::new());
    }

    #[test]
    fn test_sweep_no_complete_rows() {
        let mut grid = Grid::new();
        grid.set(0, 19, Some(PieceKind::T));
        assert_eq!(grid.sweep_completed_rows(), 0);
        assert_eq!(grid.get(0, 19), Some(Some(PieceKind::T)));
    }

    #[test]
    fn test_sweep_single_row() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 19, PieceKind::I);
        grid.set(3, 18, Some(PieceKind::J));
        assert_eq!(grid.sweep_completed_rows(), 1);
        // Partial row shifted down, top rows empty.
        assert_eq!(grid.get(3, 19), Some(Some(PieceKind::J)));
        assert!(!grid.is_occupied(0, 19));
        assert!(!grid.is_occupied(3, 18));
    }

    #[test]
    fn test_sweep_two_adjacent_rows_rechecks_same_index() {
        // Rows (top-to-bottom) ..., full, full, partial. Clearing the lower
        // full row shifts the upper full row into the same index, which must
        // be cleared in the same sweep.
        let mut grid = Grid::new();
        fill_row(&mut grid, 17, PieceKind::S);
        fill_row(&mut grid, 18, PieceKind::Z);
        grid.set(7, 19, Some(PieceKind::L));
        assert_eq!(grid.sweep_completed_rows(), 2);
        assert_eq!(grid.get(7, 19), Some(Some(PieceKind::L)));
        for y in 0..19 {
            for x in 0..COLS as i8 {
                assert!(!grid.is_occupied(x, y), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_sweep_full_full_above_partial_bottom() {
        // Stack reading top-down: [partial, full, full]; returns 2, row
        // count unchanged, partial content preserved.
        let mut grid = Grid::new();
        fill_row(&mut grid, 18, PieceKind::I);
        fill_row(&mut grid, 19, PieceKind::I);
        let mut survivors = Grid::new();
        for x in [1, 4, 8] {
            grid.set(x, 17, Some(PieceKind::T));
            survivors.set(x, 19, Some(PieceKind::T));
        }
        assert_eq!(grid.sweep_completed_rows(), 2);
        assert_eq!(grid, survivors);
    }

    #[test]
    fn test_sweep_non_adjacent_rows() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 15, PieceKind::O);
        grid.set(2, 16, Some(PieceKind::L));
        fill_row(&mut grid, 17, PieceKind::O);
        assert_eq!(grid.sweep_completed_rows(), 2);
        assert_eq!(grid.get(2, 17), Some(Some(PieceKind::L)));
        assert!(!grid.is_occupied(2, 16));
    }

    #[test]
    fn test_sweep_four_rows() {
        let mut grid = Grid::new();
        for y in 16..20 {
            fill_row(&mut grid, y, PieceKind::I);
        }
        assert_eq!(grid.sweep_completed_rows(), 4);
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_reset() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 10, PieceKind::J);
        grid.reset();
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_write_id_grid() {
        let mut grid = Grid::new();
        grid.set(0, 0, Some(PieceKind::T));
        grid.set(9, 19, Some(PieceKind::S));
        let mut out = [[0u8; COLS as usize]; ROWS as usize];
        grid.write_id_grid(&mut out);
        assert_eq!(out[0][0], 1);
        assert_eq!(out[19][9], 7);
        assert_eq!(out[5][5], 0);
    }
}

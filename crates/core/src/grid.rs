//! Grid module - the tile matrix
//!
//! The grid is a 10x6 matrix where each cell is empty or holds a numbered
//! tile. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) with row 0 at the top and row 9 at the bottom;
//! new rows are injected at the bottom and the stack loses when a tile
//! would be pushed past row 0.
//!
//! A tile caches its own (row, col); the grid keeps that cache in sync
//! whenever tiles move. In every settled state each column's tiles form a
//! contiguous block at the bottom.

use sumstack_types::{TileId, GRID_CELLS, GRID_COLS, GRID_ROWS};

use crate::rng::TileGen;

/// A single numbered grid occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: u8,
    pub row: u8,
    pub col: u8,
}

/// Cell on the grid (None = empty)
pub type Cell = Option<Tile>;

/// The game grid - 10 rows x 6 columns using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: u8, col: u8) -> Option<usize> {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return None;
        }
        Some((row as usize) * (GRID_COLS as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        GRID_ROWS
    }

    pub fn cols(&self) -> u8 {
        GRID_COLS
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: u8, col: u8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: u8, col: u8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Tile at (row, col), if the cell is occupied and in bounds.
    pub fn tile_at(&self, row: u8, col: u8) -> Option<Tile> {
        self.get(row, col).flatten()
    }

    /// Look up a tile by id.
    pub fn find(&self, id: TileId) -> Option<Tile> {
        self.cells.iter().flatten().find(|t| t.id == id).copied()
    }

    /// Whether a tile with this id is currently on the grid.
    pub fn contains(&self, id: TileId) -> bool {
        self.find(id).is_some()
    }

    /// Iterate over all tiles on the grid (row-major).
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Check whether any cell in the given row is occupied.
    pub fn is_row_occupied(&self, row: u8) -> bool {
        (0..GRID_COLS).any(|col| self.tile_at(row, col).is_some())
    }

    /// Loss probe: an occupied top row means the next injection overflows.
    pub fn top_row_blocked(&self) -> bool {
        self.is_row_occupied(0)
    }

    /// Fill the bottom `rows` rows with fresh tiles (initial game setup).
    pub fn fill_bottom_rows(&mut self, gen: &mut TileGen, rows: u8) {
        let first = GRID_ROWS - rows.min(GRID_ROWS);
        for row in first..GRID_ROWS {
            for col in 0..GRID_COLS {
                let tile = gen.tile(row, col);
                self.set(row, col, Some(tile));
            }
        }
    }

    /// Remove every tile whose id appears in `ids`. Returns the number of
    /// tiles removed. Leaves columns unsettled; callers follow up with
    /// [`settle_columns`](Self::settle_columns).
    pub fn remove_matched(&mut self, ids: &[TileId]) -> usize {
        let mut removed = 0;
        for cell in &mut self.cells {
            if let Some(tile) = cell {
                if ids.contains(&tile.id) {
                    *cell = None;
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Gravity pass: compact each column's tiles to the bottom, preserving
    /// their relative vertical order and rewriting each moved tile's row.
    pub fn settle_columns(&mut self) {
        for col in 0..GRID_COLS {
            let mut write_row = GRID_ROWS;
            // Two-pointer compaction, scanning bottom to top.
            for read_row in (0..GRID_ROWS).rev() {
                if let Some(mut tile) = self.tile_at(read_row, col) {
                    write_row -= 1;
                    if write_row != read_row {
                        tile.row = write_row;
                        self.set(write_row, col, Some(tile));
                        self.set(read_row, col, None);
                    }
                }
            }
        }
    }

    /// Row injection: shift every tile up one row and fill a fresh bottom
    /// row. Returns false (grid untouched) if the top row is occupied.
    pub fn raise_and_refill(&mut self, gen: &mut TileGen) -> bool {
        if self.top_row_blocked() {
            return false;
        }

        // Row 0 was verified empty, so discarding it loses nothing.
        for row in 0..GRID_ROWS - 1 {
            for col in 0..GRID_COLS {
                let cell = self.tile_at(row + 1, col).map(|mut tile| {
                    tile.row = row;
                    tile
                });
                self.set(row, col, cell);
            }
        }

        for col in 0..GRID_COLS {
            let tile = gen.tile(GRID_ROWS - 1, col);
            self.set(GRID_ROWS - 1, col, Some(tile));
        }

        true
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Build a grid from a value layout (0 = empty), top row first.
    /// Tiles get fresh ids from `gen`. Intended for tests and harnesses.
    pub fn from_rows(gen: &mut TileGen, rows: &[[u8; GRID_COLS as usize]]) -> Self {
        assert_eq!(rows.len(), GRID_ROWS as usize);
        let mut grid = Self::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value != 0 {
                    let tile = Tile {
                        id: gen.id(),
                        value,
                        row: row as u8,
                        col: col as u8,
                    };
                    grid.set(row as u8, col as u8, Some(tile));
                }
            }
        }
        grid
    }

    /// Invariant check: every occupied cell holds a tile whose cached
    /// (row, col) matches its slot.
    pub fn positions_consistent(&self) -> bool {
        (0..GRID_ROWS).all(|row| {
            (0..GRID_COLS).all(|col| match self.tile_at(row, col) {
                Some(tile) => tile.row == row && tile.col == col,
                None => true,
            })
        })
    }

    /// Invariant check: within each column, occupied cells form a
    /// contiguous block at the bottom (no tile above an empty cell).
    pub fn columns_settled(&self) -> bool {
        (0..GRID_COLS).all(|col| {
            let mut seen_tile = false;
            // Top to bottom: once a tile appears, no empty cell may follow.
            (0..GRID_ROWS).all(|row| {
                let occupied = self.tile_at(row, col).is_some();
                seen_tile |= occupied;
                occupied || !seen_tile
            })
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

//! Game state module - the complete state machine
//!
//! Ties together grid, generator, selection, scoring, and mode timing.
//! Every transition is a synchronous, non-suspending step on `&mut self`;
//! the struct is `Clone`, so callers that want immutable history can copy
//! the state (or take a [`snapshot`](GameState::snapshot)) around each step.
//!
//! Once `game_over` is set the state is terminal: every command returns an
//! `Ignored` outcome and leaves the state untouched. A new run starts only
//! by constructing a new `GameState`.

use arrayvec::ArrayVec;

use sumstack_types::{
    GameMode, RowOutcome, SelectOutcome, TickOutcome, TileId, GRID_CELLS, GRID_COLS,
    INITIAL_ROWS, POINTS_PER_TILE, TIME_LIMIT_SECS,
};

use crate::grid::Grid;
use crate::rng::TileGen;
use crate::snapshot::GameSnapshot;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    gen: TileGen,
    target: u8,
    score: u32,
    /// Selected tile ids in toggle order (order matters for display only).
    selected: ArrayVec<TileId, GRID_CELLS>,
    game_over: bool,
    mode: GameMode,
    /// Seconds left in the current countdown window (time mode only).
    time_left: u8,
    /// Informational difficulty field; never consulted by the rules.
    level: u32,
}

impl GameState {
    /// Create a new game: bottom rows filled, fresh target, clean score.
    /// The seed makes the entire run deterministic.
    pub fn new(mode: GameMode, seed: u32) -> Self {
        let mut gen = TileGen::new(seed);
        let mut grid = Grid::new();
        grid.fill_bottom_rows(&mut gen, INITIAL_ROWS);
        let target = gen.target();

        Self {
            grid,
            gen,
            target,
            score: 0,
            selected: ArrayVec::new(),
            game_over: false,
            mode,
            time_left: TIME_LIMIT_SECS,
            level: 1,
        }
    }

    /// Build a state over an explicit tile layout (0 = empty, top row
    /// first) and target. Intended for tests and harnesses.
    pub fn with_layout(
        mode: GameMode,
        seed: u32,
        rows: &[[u8; GRID_COLS as usize]],
        target: u8,
    ) -> Self {
        let mut gen = TileGen::new(seed);
        let grid = Grid::from_rows(&mut gen, rows);
        Self {
            grid,
            gen,
            target,
            score: 0,
            selected: ArrayVec::new(),
            game_over: false,
            mode,
            time_left: TIME_LIMIT_SECS,
            level: 1,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected(&self) -> &[TileId] {
        &self.selected
    }

    /// Sum of the currently selected tile values.
    pub fn selected_sum(&self) -> u32 {
        self.selected
            .iter()
            .filter_map(|&id| self.grid.find(id))
            .map(|tile| tile.value as u32)
            .sum()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn time_left(&self) -> u8 {
        self.time_left
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current generator state (for restarting with the same sequence).
    pub fn seed(&self) -> u32 {
        self.gen.seed()
    }

    /// Toggle a tile in the selection and evaluate the sum against the
    /// target. Unknown ids and terminal states are tolerated as no-ops.
    pub fn select_tile(&mut self, id: TileId) -> SelectOutcome {
        if self.game_over || !self.grid.contains(id) {
            return SelectOutcome::Ignored;
        }

        if let Some(pos) = self.selected.iter().position(|&sel| sel == id) {
            // Deselect, preserving the order of the remaining ids.
            self.selected.remove(pos);
        } else {
            self.selected.push(id);
        }

        let sum = self.selected_sum();

        if sum == self.target as u32 {
            self.apply_match()
        } else if sum > self.target as u32 {
            self.selected.clear();
            SelectOutcome::Overshoot { sum }
        } else {
            SelectOutcome::Pending { sum }
        }
    }

    /// Clear the matched selection, settle gravity, score, and redraw the
    /// target. Classic mode follows up with one row injection.
    fn apply_match(&mut self) -> SelectOutcome {
        let picked = std::mem::take(&mut self.selected);
        let cleared = self.grid.remove_matched(&picked);
        self.grid.settle_columns();

        let points = cleared as u32 * POINTS_PER_TILE;
        self.score += points;
        self.target = self.gen.target();

        if self.mode == GameMode::Classic {
            // May set game_over when a full column leaves the top row
            // occupied even after gravity.
            let _ = self.inject_row();
        }

        debug_assert!(self.grid.positions_consistent());
        debug_assert!(self.grid.columns_settled());

        SelectOutcome::Matched { cleared, points }
    }

    /// Row injection command: loss check, shift up, fresh bottom row.
    pub fn add_row(&mut self) -> RowOutcome {
        if self.game_over {
            return RowOutcome::Ignored;
        }
        self.inject_row()
    }

    fn inject_row(&mut self) -> RowOutcome {
        if !self.grid.raise_and_refill(&mut self.gen) {
            self.game_over = true;
            return RowOutcome::Overflowed;
        }
        // The countdown restarts on every injection, whatever caused it.
        // Classic mode carries the field too, it just never expires there.
        self.time_left = TIME_LIMIT_SECS;
        RowOutcome::Injected
    }

    /// One-second timer tick. Only meaningful in time mode; expiry
    /// performs exactly one row injection, which restarts the countdown.
    pub fn tick_second(&mut self) -> TickOutcome {
        if self.game_over || self.mode != GameMode::Time {
            return TickOutcome::Ignored;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            TickOutcome::Expired(self.inject_row())
        } else {
            TickOutcome::Counting {
                remaining: self.time_left,
            }
        }
    }

    /// Write the full state into a reusable snapshot buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        for tile in self.grid.tiles() {
            out.values[tile.row as usize][tile.col as usize] = tile.value;
            out.ids[tile.row as usize][tile.col as usize] = tile.id.as_u32();
        }
        out.selected = self.selected.clone();
        out.target = self.target;
        out.score = self.score;
        out.game_over = self.game_over;
        out.mode = self.mode;
        out.time_left = self.time_left;
        out.level = self.level;
        out.seed = self.gen.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

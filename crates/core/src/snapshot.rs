//! Read-only state snapshot for observers (presentation, session).

use arrayvec::ArrayVec;

use sumstack_types::{GameMode, TileId, GRID_CELLS, GRID_COLS, GRID_ROWS, TIME_LIMIT_SECS};

/// Full game state as a plain value. `values[r][c]` is the tile value at
/// (r, c) or 0 for empty; `ids[r][c]` is the tile id or 0 for empty.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub values: [[u8; GRID_COLS as usize]; GRID_ROWS as usize],
    pub ids: [[u32; GRID_COLS as usize]; GRID_ROWS as usize],
    /// Selected tile ids in toggle order.
    pub selected: ArrayVec<TileId, GRID_CELLS>,
    pub target: u8,
    pub score: u32,
    pub game_over: bool,
    pub mode: GameMode,
    pub time_left: u8,
    pub level: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.values = [[0; GRID_COLS as usize]; GRID_ROWS as usize];
        self.ids = [[0; GRID_COLS as usize]; GRID_ROWS as usize];
        self.selected.clear();
        self.target = 0;
        self.score = 0;
        self.game_over = false;
        self.mode = GameMode::Classic;
        self.time_left = TIME_LIMIT_SECS;
        self.level = 1;
        self.seed = 0;
    }

    /// Whether commands would still be accepted.
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.values.iter().flatten().filter(|&&v| v != 0).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            values: [[0; GRID_COLS as usize]; GRID_ROWS as usize],
            ids: [[0; GRID_COLS as usize]; GRID_ROWS as usize],
            selected: ArrayVec::new(),
            target: 0,
            score: 0,
            game_over: false,
            mode: GameMode::Classic,
            time_left: TIME_LIMIT_SECS,
            level: 1,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_empty_and_playable() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.tile_count(), 0);
        assert!(snap.playable());
        assert_eq!(snap.time_left, TIME_LIMIT_SECS);
    }

    #[test]
    fn test_clear_resets_fields() {
        let mut snap = GameSnapshot::default();
        snap.values[9][0] = 5;
        snap.ids[9][0] = 12;
        snap.score = 40;
        snap.game_over = true;

        snap.clear();
        assert_eq!(snap.tile_count(), 0);
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_cleared_snapshot_equals_default() {
        let mut snap = GameSnapshot::default();
        snap.values[0][0] = 3;
        snap.target = 18;
        snap.mode = GameMode::Time;
        snap.seed = 99;

        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }
}

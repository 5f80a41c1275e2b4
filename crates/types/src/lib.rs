//! Core types shared across the workspace.
//! This crate contains pure data types with no external dependencies.

/// Grid dimensions.
pub const GRID_COLS: u8 = 6;
pub const GRID_ROWS: u8 = 10;

/// Total number of cells on the grid.
pub const GRID_CELLS: usize = (GRID_COLS as usize) * (GRID_ROWS as usize);

/// Number of bottom rows filled when a game starts.
pub const INITIAL_ROWS: u8 = 4;

/// Tile value range (inclusive).
pub const TILE_VALUE_MIN: u8 = 1;
pub const TILE_VALUE_MAX: u8 = 9;

/// Target value range (inclusive).
pub const TARGET_MIN: u8 = 10;
pub const TARGET_MAX: u8 = 25;

/// Points awarded per cleared tile.
pub const POINTS_PER_TILE: u32 = 10;

/// Countdown window in time mode (seconds). A row is injected each time
/// the countdown expires, and every injection restarts it.
pub const TIME_LIMIT_SECS: u8 = 15;

/// Game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Row injection happens once per successful match.
    Classic,
    /// Row injection happens once per expired countdown window.
    Time,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "time" => Some(GameMode::Time),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Time => "time",
        }
    }
}

/// Opaque unique tile identifier.
///
/// Ids are drawn from a monotonic counter and never reused within a game,
/// so identity comparisons stay valid across gravity and row shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Result of a select-tile command.
///
/// Invalid input (unknown id, terminal state) is tolerated as `Ignored`
/// rather than an error; the caller can still observe what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Game over or the id is not on the grid; state unchanged.
    Ignored,
    /// Selection toggled, sum still below the target.
    Pending { sum: u32 },
    /// Sum exceeded the target; the selection was cleared.
    Overshoot { sum: u32 },
    /// Selection summed exactly to the target; tiles cleared and scored.
    /// In classic mode a row injection follows (check game-over on state).
    Matched { cleared: usize, points: u32 },
}

/// Result of a row-injection command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Game already over; state unchanged.
    Ignored,
    /// All rows shifted up and a fresh bottom row was added.
    Injected,
    /// The top row was occupied: loss condition, grid unchanged.
    Overflowed,
}

/// Result of a one-second timer tick (time mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not in time mode, or game already over.
    Ignored,
    /// Countdown decremented, window still open.
    Counting { remaining: u8 },
    /// Countdown expired; exactly one row injection was performed.
    Expired(RowOutcome),
}

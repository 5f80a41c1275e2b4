//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has
//! zero dependencies on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule, exact-value assertions
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 10x6 tile matrix with gravity and row injection
//! - [`rng`]: seedable LCG plus the tile/target generator
//! - [`state`]: the state machine (select / add-row / tick transitions)
//! - [`snapshot`]: plain read-only snapshot for observers
//!
//! # Game Rules
//!
//! - The grid starts with 4 filled bottom rows of tiles valued 1..=9.
//! - Selecting tiles accumulates their sum against a target in 10..=25:
//!   an exact hit clears the tiles (10 points each), gravity compacts
//!   each column, and a fresh target is drawn; an overshoot resets the
//!   selection; anything less keeps it pending.
//! - Classic mode injects a bottom row after every match; time mode
//!   injects one whenever the 15-second countdown expires.
//! - An injection that finds the top row occupied ends the game.
//!
//! # Example
//!
//! ```
//! use sumstack_core::GameState;
//! use sumstack_types::{GameMode, INITIAL_ROWS, GRID_COLS};
//!
//! let game = GameState::new(GameMode::Classic, 12345);
//!
//! assert_eq!(game.score(), 0);
//! assert!(!game.game_over());
//! assert_eq!(
//!     game.grid().tile_count(),
//!     INITIAL_ROWS as usize * GRID_COLS as usize,
//! );
//! ```

pub mod grid;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use grid::{Cell, Grid, Tile};
pub use rng::{SimpleRng, TileGen};
pub use snapshot::GameSnapshot;
pub use state::GameState;

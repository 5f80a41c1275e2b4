//! Session module - game lifecycle, timer driver, observation stream
//!
//! The core state machine is synchronous and owns no clock; this crate
//! supplies the pieces around it that a real frontend needs:
//!
//! - [`Session`](runtime::Session): owns a [`GameState`](sumstack_core::GameState),
//!   applies commands, and runs the time-mode one-second tick driver on a
//!   tokio runtime. The tick task is cancelled on game over and on every
//!   new start; tick events carry the epoch they were scheduled in, and
//!   events from an older epoch are discarded, never applied.
//! - [`ObservationMessage`](observation::ObservationMessage): full-state
//!   JSON-serializable snapshot published to an in-process channel after
//!   every applied command. The presentation layer treats it as read-only
//!   and re-renders on each message.
//!
//! There is no network, file, or process surface here; observers consume
//! the channel directly.

pub mod observation;
pub mod runtime;

pub use sumstack_core as core;
pub use sumstack_types as types;

pub use observation::{ModeName, ObservationMessage, ObservationType};
pub use runtime::{Session, TickEvent};

//! sumstack (workspace facade crate).
//!
//! This package keeps a stable `sumstack::{core,session,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.

pub use sumstack_core as core;
pub use sumstack_session as session;
pub use sumstack_types as types;

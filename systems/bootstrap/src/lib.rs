#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that assembles a playable Miam session.
//!
//! The registry resolves a strategy by name, the [`Session`] owns the board
//! sized from the strategy's preference, and per-frame driver input is
//! translated into contract calls. Seed patterns populate a fresh board
//! through the strategy's own action so its invariants hold from the start.

mod patterns;
mod registry;
mod session;

pub use patterns::{pattern, random_cells, Pattern, PATTERNS};
pub use registry::{Registry, RegistryError, DEFAULT_STRATEGY};
pub use session::{FrameInput, FrameOutcome, PlayClock, Session, DEFAULT_RATE, MAX_RATE, MIN_RATE};

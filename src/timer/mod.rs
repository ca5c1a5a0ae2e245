//! Timer module for the study timer.
//!
//! - `engine`: pure countdown state machine (study/break alternation)
//! - `driver`: tokio task that ticks the engine once per second and
//!   serializes commands against ticks
//! - `error`: driver error types

pub mod driver;
pub mod engine;
pub mod error;

pub use driver::{TimerCommand, TimerDriver, TimerEvent, TimerHandle, TICK_PERIOD};
pub use engine::{TickOutcome, TimerEngine};
pub use error::TimerError;

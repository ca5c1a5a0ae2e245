//! Timer driver error types.

use thiserror::Error;

/// Errors returned by [`TimerHandle`](super::TimerHandle) commands.
///
/// The engine itself has no failure modes; only the channel to the driver
/// task can break.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The driver task has exited and no longer accepts commands.
    #[error("timer driver is no longer running")]
    DriverStopped,
}

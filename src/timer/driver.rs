//! Periodic driver for the timer engine.
//!
//! The driver owns a [`TimerEngine`] inside a single tokio task and is the
//! only writer of its state. Commands and ticks are handled one at a time,
//! so a command is never observed halfway through a tick.
//!
//! The pending wait is tied to the `(mode, running)` pair: whenever that pair
//! changes, including the switch performed by a tick that reaches zero, the
//! wait is cancelled and re-armed for a full period. Stopping the timer
//! therefore cancels the next tick, and a new mode always starts counting
//! on its own.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::{debug, info};

use super::engine::{TickOutcome, TimerEngine};
use super::error::TimerError;
use crate::types::{TimerMode, TimerSettings, TimerSnapshot};

// ============================================================================
// Constants
// ============================================================================

/// Interval between two ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// TimerCommand / TimerEvent
// ============================================================================

/// Commands accepted by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start a stopped timer or pause a running one
    StartOrPause,
    /// Stop and restore the full duration of the current mode
    Reset,
    /// Replace both durations (clamped by the engine)
    Configure {
        /// Study duration in seconds
        study_seconds: u32,
        /// Break duration in seconds
        break_seconds: u32,
    },
}

/// Timer events for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Mode that is counting down
        mode: TimerMode,
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Countdown paused
    Paused {
        /// Mode that was counting down
        mode: TimerMode,
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// Timer reset to the full duration of its mode
    Reset {
        /// Current mode
        mode: TimerMode,
        /// Remaining seconds (the full duration)
        remaining_seconds: u32,
    },
    /// Durations replaced
    Reconfigured {
        /// Effective durations after clamping
        settings: TimerSettings,
        /// Remaining seconds after the change
        remaining_seconds: u32,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// The countdown reached zero and the next mode started
    ModeSwitched {
        /// Mode that finished
        from: TimerMode,
        /// Mode now counting down
        to: TimerMode,
        /// Full duration of the new mode
        remaining_seconds: u32,
    },
}

// ============================================================================
// TimerDriver
// ============================================================================

enum Wake {
    Command(TimerCommand),
    Tick,
    Closed,
}

impl From<Option<TimerCommand>> for Wake {
    fn from(command: Option<TimerCommand>) -> Self {
        match command {
            Some(command) => Wake::Command(command),
            None => Wake::Closed,
        }
    }
}

/// Runs a [`TimerEngine`] against the tokio clock.
pub struct TimerDriver {
    engine: TimerEngine,
    period: Duration,
    commands: mpsc::UnboundedReceiver<TimerCommand>,
    snapshots: watch::Sender<TimerSnapshot>,
    events: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerDriver {
    /// Creates a driver from its engine and channel endpoints.
    pub fn new(
        engine: TimerEngine,
        period: Duration,
        commands: mpsc::UnboundedReceiver<TimerCommand>,
        snapshots: watch::Sender<TimerSnapshot>,
        events: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        Self {
            engine,
            period,
            commands,
            snapshots,
            events,
        }
    }

    /// Runs the driver loop until every command sender is dropped.
    ///
    /// This method should be spawned as a separate tokio task.
    pub async fn run(mut self) {
        let mut key = self.arm_key();
        let mut deadline = self.rearm();
        self.publish();

        loop {
            let wake = match deadline {
                Some(at) => tokio::select! {
                    biased;
                    command = self.commands.recv() => Wake::from(command),
                    () = sleep_until(at) => Wake::Tick,
                },
                None => Wake::from(self.commands.recv().await),
            };

            let ticked = match wake {
                Wake::Command(command) => {
                    self.apply(command);
                    false
                }
                Wake::Tick => {
                    self.advance();
                    true
                }
                Wake::Closed => {
                    debug!("Command channel closed, stopping timer driver");
                    break;
                }
            };

            self.publish();

            let current = self.arm_key();
            if current != key {
                key = current;
                deadline = self.rearm();
            } else if ticked {
                deadline = deadline.map(|at| at + self.period);
            }
        }
    }

    fn arm_key(&self) -> (TimerMode, bool) {
        (self.engine.mode(), self.engine.is_running())
    }

    fn rearm(&self) -> Option<Instant> {
        self.engine
            .is_running()
            .then(|| Instant::now() + self.period)
    }

    fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::StartOrPause => {
                let running = self.engine.toggle_running();
                let mode = self.engine.mode();
                let remaining_seconds = self.engine.remaining_seconds();
                if running {
                    info!(mode = mode.as_str(), remaining_seconds, "Timer started");
                    self.emit(TimerEvent::Started {
                        mode,
                        remaining_seconds,
                    });
                } else {
                    info!(mode = mode.as_str(), remaining_seconds, "Timer paused");
                    self.emit(TimerEvent::Paused {
                        mode,
                        remaining_seconds,
                    });
                }
            }
            TimerCommand::Reset => {
                self.engine.reset();
                let mode = self.engine.mode();
                let remaining_seconds = self.engine.remaining_seconds();
                info!(mode = mode.as_str(), remaining_seconds, "Timer reset");
                self.emit(TimerEvent::Reset {
                    mode,
                    remaining_seconds,
                });
            }
            TimerCommand::Configure {
                study_seconds,
                break_seconds,
            } => {
                let settings = self.engine.reconfigure(study_seconds, break_seconds);
                info!(
                    study_seconds = settings.study_seconds(),
                    break_seconds = settings.break_seconds(),
                    "Timer reconfigured"
                );
                self.emit(TimerEvent::Reconfigured {
                    settings,
                    remaining_seconds: self.engine.remaining_seconds(),
                });
            }
        }
    }

    fn advance(&mut self) {
        match self.engine.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Counted { remaining_seconds } => {
                self.emit(TimerEvent::Tick { remaining_seconds });
            }
            TickOutcome::Switched {
                from,
                to,
                remaining_seconds,
            } => {
                info!(
                    from = from.as_str(),
                    to = to.as_str(),
                    remaining_seconds,
                    "Timer mode switched"
                );
                self.emit(TimerEvent::ModeSwitched {
                    from,
                    to,
                    remaining_seconds,
                });
            }
        }
    }

    fn emit(&self, event: TimerEvent) {
        // The host may not listen for events at all.
        if self.events.send(event).is_err() {
            debug!(?event, "No event listener, dropping timer event");
        }
    }

    fn publish(&self) {
        let snapshot = self.engine.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

// ============================================================================
// TimerHandle
// ============================================================================

/// Command/query interface to a spawned [`TimerDriver`].
///
/// Dropping the handle aborts the driver task, so no tick fires after the
/// owner is torn down.
pub struct TimerHandle {
    commands: mpsc::UnboundedSender<TimerCommand>,
    snapshots: watch::Receiver<TimerSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    /// Spawns a driver ticking once per second.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(settings: TimerSettings) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        Self::spawn_with_period(settings, TICK_PERIOD)
    }

    /// Spawns a driver with a custom tick period.
    pub fn spawn_with_period(
        settings: TimerSettings,
        period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let engine = TimerEngine::new(settings);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let driver = TimerDriver::new(engine, period, command_rx, snapshot_tx, event_tx);
        let task = tokio::spawn(driver.run());

        debug!(?period, "Timer driver spawned");

        (
            Self {
                commands: command_tx,
                snapshots: snapshot_rx,
                task: Some(task),
            },
            event_rx,
        )
    }

    /// Starts a stopped timer or pauses a running one.
    pub fn start_or_pause(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::StartOrPause)
    }

    /// Stops the timer and restores the full duration of the current mode.
    pub fn reset(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Reset)
    }

    /// Replaces both durations, given in whole minutes.
    pub fn configure(&self, study_minutes: u32, break_minutes: u32) -> Result<(), TimerError> {
        self.configure_seconds(
            study_minutes.saturating_mul(60),
            break_minutes.saturating_mul(60),
        )
    }

    /// Replaces both durations, given in seconds.
    pub fn configure_seconds(
        &self,
        study_seconds: u32,
        break_seconds: u32,
    ) -> Result<(), TimerError> {
        self.send(TimerCommand::Configure {
            study_seconds,
            break_seconds,
        })
    }

    /// Sends a raw command to the driver.
    pub fn send(&self, command: TimerCommand) -> Result<(), TimerError> {
        self.commands
            .send(command)
            .map_err(|_| TimerError::DriverStopped)
    }

    /// Returns the last committed snapshot.
    pub fn current_state(&self) -> TimerSnapshot {
        *self.snapshots.borrow()
    }

    /// Waits until a new snapshot is committed and returns it.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::DriverStopped` if the driver exits first.
    pub async fn changed(&mut self) -> Result<TimerSnapshot, TimerError> {
        self.snapshots
            .changed()
            .await
            .map_err(|_| TimerError::DriverStopped)?;
        Ok(*self.snapshots.borrow_and_update())
    }

    /// Returns an independent receiver of committed snapshots.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }

    /// Stops the driver task and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            debug!("Timer driver shut down");
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

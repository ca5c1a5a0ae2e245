//! Timer engine for the study timer.
//!
//! This module provides the core countdown state machine:
//! - State transitions over (Study | Break) x (stopped | running)
//! - One-second ticks that switch mode when the countdown reaches zero
//! - Reconfiguration that respects an in-flight countdown
//!
//! The engine never waits on a clock. Time is advanced by calling
//! [`TimerEngine::tick`], which the driver does once per period.

use crate::types::{TimerMode, TimerSettings, TimerSnapshot};

// ============================================================================
// TickOutcome
// ============================================================================

/// Result of advancing the countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is stopped; nothing changed.
    Idle,
    /// One second was counted down.
    Counted {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// The countdown reached zero and the mode switched.
    Switched {
        /// Mode that just finished
        from: TimerMode,
        /// Mode that is now counting down
        to: TimerMode,
        /// Full duration of the new mode
        remaining_seconds: u32,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Countdown state machine alternating between study and break.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    settings: TimerSettings,
    mode: TimerMode,
    running: bool,
    remaining_seconds: u32,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

impl TimerEngine {
    /// Creates a stopped engine in study mode with the full study duration.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            mode: TimerMode::Study,
            running: false,
            remaining_seconds: settings.study_seconds(),
        }
    }

    /// Flips between running and stopped.
    ///
    /// Returns the new running flag. Mode and remaining time are unchanged.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.check_invariants();
        self.running
    }

    /// Stops the timer and restores the full duration of the current mode.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.duration_for(self.mode);
        self.check_invariants();
    }

    /// Replaces both durations, clamping them into their allowed ranges.
    ///
    /// A stopped timer immediately shows the new duration of its current mode.
    /// A running countdown keeps its remaining time and picks up the new
    /// durations at the next mode switch; it is only shortened when the
    /// remaining time would exceed the new duration of the current mode.
    pub fn reconfigure(&mut self, study_seconds: u32, break_seconds: u32) -> TimerSettings {
        self.settings = TimerSettings::new(study_seconds, break_seconds);

        let duration = self.duration_for(self.mode);
        if !self.running {
            self.remaining_seconds = duration;
        } else if self.remaining_seconds > duration {
            self.remaining_seconds = duration;
        }

        self.check_invariants();
        self.settings
    }

    /// Advances the countdown by one second.
    ///
    /// Has no effect while stopped. When the countdown reaches zero the mode
    /// switches and the new mode starts counting down from its full duration
    /// without stopping.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        let outcome = if self.remaining_seconds == 0 {
            let from = self.mode;
            self.mode = from.next();
            self.remaining_seconds = self.duration_for(self.mode);
            TickOutcome::Switched {
                from,
                to: self.mode,
                remaining_seconds: self.remaining_seconds,
            }
        } else {
            TickOutcome::Counted {
                remaining_seconds: self.remaining_seconds,
            }
        };

        self.check_invariants();
        outcome
    }

    /// Returns the full duration of the given mode.
    pub fn duration_for(&self, mode: TimerMode) -> u32 {
        self.settings.duration_for(mode)
    }

    /// Returns an immutable copy of the current state.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            running: self.running,
            remaining_seconds: self.remaining_seconds,
            duration_seconds: self.duration_for(self.mode),
        }
    }

    /// Returns the effective durations.
    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    /// Returns the current mode.
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Returns true if the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the seconds left in the current mode.
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.remaining_seconds <= self.duration_for(self.mode),
            "remaining {}s exceeds {:?} duration {}s",
            self.remaining_seconds,
            self.mode,
            self.duration_for(self.mode)
        );
        debug_assert!(
            self.remaining_seconds > 0,
            "countdown left at zero in {:?} mode",
            self.mode
        );
    }

    /// Overrides the remaining time (for testing).
    #[cfg(test)]
    pub(crate) fn set_remaining_seconds(&mut self, seconds: u32) {
        self.remaining_seconds = seconds;
        self.check_invariants();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn running_engine() -> TimerEngine {
        let mut engine = TimerEngine::default();
        engine.toggle_running();
        engine
    }

    fn assert_within_bounds(engine: &TimerEngine) {
        let snap = engine.snapshot();
        assert!(snap.remaining_seconds <= engine.duration_for(snap.mode));
    }

    // ------------------------------------------------------------------------
    // Construction Tests
    // ------------------------------------------------------------------------

    mod construction_tests {
        use super::*;

        #[test]
        fn test_new_engine_is_stopped_study() {
            let engine = TimerEngine::default();
            let snap = engine.snapshot();

            assert_eq!(snap.mode, TimerMode::Study);
            assert!(!snap.running);
            assert_eq!(snap.remaining_seconds, 20 * 60);
            assert_eq!(snap.duration_seconds, 20 * 60);
        }

        #[test]
        fn test_new_engine_uses_study_duration() {
            let engine = TimerEngine::new(TimerSettings::from_minutes(50, 10));
            assert_eq!(engine.remaining_seconds(), 50 * 60);
            assert_eq!(engine.settings(), TimerSettings::from_minutes(50, 10));
        }
    }

    // ------------------------------------------------------------------------
    // toggle_running Tests
    // ------------------------------------------------------------------------

    mod toggle_tests {
        use super::*;

        #[test]
        fn test_toggle_flips_running() {
            let mut engine = TimerEngine::default();

            assert!(engine.toggle_running());
            assert!(engine.is_running());

            assert!(!engine.toggle_running());
            assert!(!engine.is_running());
        }

        #[test]
        fn test_toggle_keeps_mode_and_remaining() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(300);

            engine.toggle_running();

            let snap = engine.snapshot();
            assert_eq!(snap.mode, TimerMode::Study);
            assert_eq!(snap.remaining_seconds, 300);
        }

        #[test]
        fn test_paused_snapshots_do_not_decay() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(300);
            engine.toggle_running();

            let first = engine.snapshot();
            let second = engine.snapshot();
            assert_eq!(first.remaining_seconds, 300);
            assert_eq!(second.remaining_seconds, 300);
        }
    }

    // ------------------------------------------------------------------------
    // reset Tests
    // ------------------------------------------------------------------------

    mod reset_tests {
        use super::*;

        #[test]
        fn test_reset_stops_and_restores_duration() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(77);

            engine.reset();

            let snap = engine.snapshot();
            assert!(!snap.running);
            assert_eq!(snap.remaining_seconds, 20 * 60);
        }

        #[test]
        fn test_reset_keeps_break_mode() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(1);
            engine.tick();
            engine.tick();
            assert_eq!(engine.mode(), TimerMode::Break);

            engine.reset();

            assert_eq!(engine.mode(), TimerMode::Break);
            assert_eq!(engine.remaining_seconds(), 10 * 60);
            assert!(!engine.is_running());
        }

        #[test]
        fn test_reset_is_idempotent() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(500);

            engine.reset();
            let once = engine.snapshot();
            engine.reset();
            let twice = engine.snapshot();

            assert_eq!(once, twice);
        }
    }

    // ------------------------------------------------------------------------
    // reconfigure Tests
    // ------------------------------------------------------------------------

    mod reconfigure_tests {
        use super::*;

        #[test]
        fn test_reconfigure_clamps_out_of_range() {
            let mut engine = TimerEngine::default();

            let settings = engine.reconfigure(5 * 60, 100 * 60);

            assert_eq!(settings.study_seconds(), 20 * 60);
            assert_eq!(settings.break_seconds(), 30 * 60);
            assert_eq!(engine.settings(), settings);
        }

        #[test]
        fn test_reconfigure_clamps_zero() {
            let mut engine = TimerEngine::default();

            let settings = engine.reconfigure(0, 0);

            assert_eq!(settings.study_seconds(), 20 * 60);
            assert_eq!(settings.break_seconds(), 5 * 60);
        }

        #[test]
        fn test_reconfigure_while_stopped_resets_remaining() {
            let mut engine = TimerEngine::new(TimerSettings::from_minutes(30, 10));
            engine.set_remaining_seconds(300);

            engine.reconfigure(45 * 60, 10 * 60);

            assert_eq!(engine.remaining_seconds(), 45 * 60);
            assert!(!engine.is_running());
        }

        #[test]
        fn test_reconfigure_while_stopped_in_break_uses_break_duration() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(1);
            engine.tick();
            engine.toggle_running();
            assert_eq!(engine.mode(), TimerMode::Break);

            engine.reconfigure(60 * 60, 25 * 60);

            assert_eq!(engine.remaining_seconds(), 25 * 60);
        }

        #[test]
        fn test_reconfigure_while_running_keeps_remaining() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(300);

            engine.reconfigure(15 * 60, 10 * 60);

            assert_eq!(engine.remaining_seconds(), 300);
            assert!(engine.is_running());
            assert_eq!(engine.mode(), TimerMode::Study);
        }

        #[test]
        fn test_reconfigure_while_running_caps_to_shorter_duration() {
            let mut engine = TimerEngine::new(TimerSettings::from_minutes(60, 10));
            engine.toggle_running();
            engine.set_remaining_seconds(50 * 60);

            engine.reconfigure(25 * 60, 10 * 60);

            assert_eq!(engine.remaining_seconds(), 25 * 60);
            assert_within_bounds(&engine);
        }

        #[test]
        fn test_reconfigure_while_running_applies_at_next_switch() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(2);

            engine.reconfigure(20 * 60, 12 * 60);
            engine.tick();
            let outcome = engine.tick();

            assert_eq!(
                outcome,
                TickOutcome::Switched {
                    from: TimerMode::Study,
                    to: TimerMode::Break,
                    remaining_seconds: 12 * 60,
                }
            );
        }
    }

    // ------------------------------------------------------------------------
    // tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_while_stopped_is_idle() {
            let mut engine = TimerEngine::default();

            assert_eq!(engine.tick(), TickOutcome::Idle);
            assert_eq!(engine.remaining_seconds(), 20 * 60);
        }

        #[test]
        fn test_tick_decrements_by_one() {
            let mut engine = running_engine();

            let outcome = engine.tick();

            assert_eq!(
                outcome,
                TickOutcome::Counted {
                    remaining_seconds: 20 * 60 - 1
                }
            );
        }

        #[test]
        fn test_tick_at_one_switches_to_break() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(1);

            let outcome = engine.tick();

            assert_eq!(
                outcome,
                TickOutcome::Switched {
                    from: TimerMode::Study,
                    to: TimerMode::Break,
                    remaining_seconds: 10 * 60,
                }
            );
            let snap = engine.snapshot();
            assert_eq!(snap.mode, TimerMode::Break);
            assert!(snap.running);
            assert_eq!(snap.remaining_seconds, 10 * 60);
        }

        #[test]
        fn test_break_switches_back_to_study() {
            let mut engine = running_engine();
            engine.set_remaining_seconds(1);
            engine.tick();
            engine.set_remaining_seconds(1);

            let outcome = engine.tick();

            assert_eq!(
                outcome,
                TickOutcome::Switched {
                    from: TimerMode::Break,
                    to: TimerMode::Study,
                    remaining_seconds: 20 * 60,
                }
            );
            assert!(engine.is_running());
        }

        #[test]
        fn test_full_study_session_switches_once() {
            let mut engine = running_engine();
            let mut switches = 0;

            for _ in 0..1200 {
                if matches!(engine.tick(), TickOutcome::Switched { .. }) {
                    switches += 1;
                }
                assert_within_bounds(&engine);
            }

            assert_eq!(switches, 1);
            let snap = engine.snapshot();
            assert_eq!(snap.mode, TimerMode::Break);
            assert!(snap.running);
            assert_eq!(snap.remaining_seconds, 10 * 60);
        }

        #[test]
        fn test_cycles_indefinitely() {
            let mut engine = running_engine();
            let mut modes = Vec::new();

            for _ in 0..(1200 + 600) * 3 {
                if let TickOutcome::Switched { to, .. } = engine.tick() {
                    modes.push(to);
                }
            }

            assert_eq!(
                modes,
                vec![
                    TimerMode::Break,
                    TimerMode::Study,
                    TimerMode::Break,
                    TimerMode::Study,
                    TimerMode::Break,
                    TimerMode::Study,
                ]
            );
            assert!(engine.is_running());
        }
    }

    // ------------------------------------------------------------------------
    // Invariant Tests
    // ------------------------------------------------------------------------

    mod invariant_tests {
        use super::*;

        #[test]
        fn test_bounds_hold_across_mixed_operations() {
            let mut engine = TimerEngine::default();

            for step in 0u32..5000 {
                match step % 97 {
                    0 => {
                        engine.toggle_running();
                    }
                    13 => engine.reset(),
                    41 => {
                        engine.reconfigure(step * 3, step / 2);
                    }
                    _ => {
                        engine.tick();
                    }
                }
                assert_within_bounds(&engine);
                assert!(engine.remaining_seconds() > 0);
            }
        }

        #[test]
        fn test_snapshot_is_a_copy() {
            let mut engine = running_engine();
            let before = engine.snapshot();

            engine.tick();

            assert_eq!(before.remaining_seconds, 20 * 60);
            assert_eq!(engine.snapshot().remaining_seconds, 20 * 60 - 1);
        }
    }
}

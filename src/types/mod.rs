//! Core data types for the study timer.
//!
//! This module defines the data structures used for:
//! - The two alternating timer modes
//! - Duration settings with clamping to the supported ranges
//! - Immutable snapshots handed to the presentation layer

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Shortest allowed study session (20 minutes).
pub const STUDY_MIN_SECONDS: u32 = 20 * 60;

/// Longest allowed study session (180 minutes).
pub const STUDY_MAX_SECONDS: u32 = 180 * 60;

/// Shortest allowed break (5 minutes).
pub const BREAK_MIN_SECONDS: u32 = 5 * 60;

/// Longest allowed break (30 minutes).
pub const BREAK_MAX_SECONDS: u32 = 30 * 60;

/// Default study duration (20 minutes).
pub const DEFAULT_STUDY_SECONDS: u32 = 20 * 60;

/// Default break duration (10 minutes).
pub const DEFAULT_BREAK_SECONDS: u32 = 10 * 60;

// ============================================================================
// TimerMode
// ============================================================================

/// The phase the countdown is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused study session
    Study,
    /// Break between study sessions
    Break,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Study => "study",
            TimerMode::Break => "break",
        }
    }

    /// Returns the mode that follows this one when the countdown reaches zero.
    pub fn next(&self) -> Self {
        match self {
            TimerMode::Study => TimerMode::Break,
            TimerMode::Break => TimerMode::Study,
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Study
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

/// Study and break durations in seconds.
///
/// Values are clamped into their allowed ranges on construction, so a
/// `TimerSettings` is always valid. Out-of-range input is never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSettings {
    study_seconds: u32,
    break_seconds: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            study_seconds: DEFAULT_STUDY_SECONDS,
            break_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

impl TimerSettings {
    /// Creates settings from durations in seconds, clamping each to its range.
    pub fn new(study_seconds: u32, break_seconds: u32) -> Self {
        Self {
            study_seconds: study_seconds.clamp(STUDY_MIN_SECONDS, STUDY_MAX_SECONDS),
            break_seconds: break_seconds.clamp(BREAK_MIN_SECONDS, BREAK_MAX_SECONDS),
        }
    }

    /// Creates settings from whole minutes, the granularity of the settings sliders.
    pub fn from_minutes(study_minutes: u32, break_minutes: u32) -> Self {
        Self::new(
            study_minutes.saturating_mul(60),
            break_minutes.saturating_mul(60),
        )
    }

    /// Study duration in seconds.
    pub fn study_seconds(&self) -> u32 {
        self.study_seconds
    }

    /// Break duration in seconds.
    pub fn break_seconds(&self) -> u32 {
        self.break_seconds
    }

    /// Returns the full duration of the given mode.
    pub fn duration_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Study => self.study_seconds,
            TimerMode::Break => self.break_seconds,
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Immutable view of the timer for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Current mode
    pub mode: TimerMode,
    /// Whether the countdown is advancing
    pub running: bool,
    /// Seconds left in the current mode
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// Full duration of the current mode
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: u32,
}

impl TimerSnapshot {
    /// Fraction of the current mode still remaining, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration_seconds == 0 {
            return 0.0;
        }
        (self.remaining_seconds as f32 / self.duration_seconds as f32).clamp(0.0, 1.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Display utilities for the IntelliCube CLI.
//!
//! This module provides formatted output for:
//! - Timer status lines and JSON snapshots
//! - Timer events
//! - Track lists and the now-playing line
//! - Error messages

use crate::sound::{SoundError, Track};
use crate::timer::TimerEvent;
use crate::types::{TimerMode, TimerSettings, TimerSnapshot};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats seconds as `MM:SS`. Minutes are not capped at 99.
    pub fn format_time(total_seconds: u32) -> String {
        format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
    }

    /// Returns the heading shown for a mode.
    pub fn mode_label(mode: TimerMode) -> &'static str {
        match mode {
            TimerMode::Study => "Study Time",
            TimerMode::Break => "Break Time",
        }
    }

    /// Formats a snapshot as `Study Time 19:59 [running]`.
    pub fn status_line(snapshot: &TimerSnapshot) -> String {
        format!(
            "{} {} [{}]",
            Self::mode_label(snapshot.mode),
            Self::format_time(snapshot.remaining_seconds),
            if snapshot.running { "running" } else { "paused" }
        )
    }

    /// Formats a snapshot as a single JSON line.
    pub fn json_line(snapshot: &TimerSnapshot) -> serde_json::Result<String> {
        serde_json::to_string(snapshot)
    }

    /// Shows the current timer state, as text or JSON.
    pub fn show_snapshot(snapshot: &TimerSnapshot, json: bool) {
        if json {
            match Self::json_line(snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => Self::show_error(&e.to_string()),
            }
        } else {
            println!("{}", Self::status_line(snapshot));
        }
    }

    /// Describes a timer event, or returns None for plain ticks.
    pub fn event_message(event: &TimerEvent) -> Option<String> {
        match event {
            TimerEvent::Started {
                mode,
                remaining_seconds,
            } => Some(format!(
                "> {} started ({} left)",
                Self::mode_label(*mode),
                Self::format_time(*remaining_seconds)
            )),
            TimerEvent::Paused {
                mode,
                remaining_seconds,
            } => Some(format!(
                "|| {} paused ({} left)",
                Self::mode_label(*mode),
                Self::format_time(*remaining_seconds)
            )),
            TimerEvent::Reset {
                mode,
                remaining_seconds,
            } => Some(format!(
                "[] {} reset to {}",
                Self::mode_label(*mode),
                Self::format_time(*remaining_seconds)
            )),
            TimerEvent::Reconfigured {
                settings,
                remaining_seconds,
            } => Some(format!(
                "* {} ({} left)",
                Self::settings_summary(settings),
                Self::format_time(*remaining_seconds)
            )),
            TimerEvent::ModeSwitched { from, to, .. } => Some(format!(
                "* {} is over, {} begins",
                Self::mode_label(*from),
                Self::mode_label(*to)
            )),
            TimerEvent::Tick { .. } => None,
        }
    }

    /// Formats settings as `study 20 min, break 10 min`.
    pub fn settings_summary(settings: &TimerSettings) -> String {
        format!(
            "study {} min, break {} min",
            settings.study_seconds() / 60,
            settings.break_seconds() / 60
        )
    }

    /// Shows the timer help text.
    pub fn show_timer_help() {
        println!("Commands:");
        println!("  s, start, p, pause   start or pause the countdown");
        println!("  r, reset             stop and restore the full duration");
        println!("  c, set <study> <break>");
        println!("                       set durations in minutes");
        println!("  status               show the current state");
        println!("  h, help              show this help");
        println!("  q, quit              exit");
    }

    /// Shows the music help text.
    pub fn show_music_help() {
        println!("Commands:");
        println!("  p           play or pause");
        println!("  n           next track");
        println!("  b           previous track");
        println!("  <number>    play track <number>");
        println!("  l           list tracks");
        println!("  h           show this help");
        println!("  q           exit");
    }

    /// Formats one row of the track list. `index` is zero-based.
    pub fn track_row(index: usize, track: &Track, current: bool) -> String {
        format!(
            "{} {:>2}. {} - {} ({})",
            if current { ">" } else { " " },
            index + 1,
            track.title,
            track.artist,
            track.duration_label
        )
    }

    /// Shows the track list, marking the current track if any.
    pub fn show_tracks(tracks: &[Track], current: Option<usize>) {
        if tracks.is_empty() {
            println!("No tracks found");
            return;
        }
        for (index, track) in tracks.iter().enumerate() {
            println!("{}", Self::track_row(index, track, current == Some(index)));
        }
    }

    /// Formats the now-playing line.
    pub fn now_playing_line(track: &Track, playing: bool) -> String {
        format!(
            "{} {} - {}",
            if playing { ">" } else { "||" },
            track.title,
            track.artist
        )
    }

    /// Shows the now-playing line.
    pub fn show_now_playing(track: &Track, playing: bool) {
        println!("{}", Self::now_playing_line(track, playing));
    }

    /// Shows a music error with a hint on how to fix it.
    pub fn show_sound_error(error: &SoundError) {
        Self::show_error(&error.to_string());
        eprintln!("  hint: {}", error.suggestion());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================

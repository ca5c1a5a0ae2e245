//! Command definitions for the IntelliCube CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::TimerSettings;

// ============================================================================
// CLI Structure
// ============================================================================

/// IntelliCube - study timer and study music for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "intellicube",
    version,
    about = "Study timer and study music for the terminal",
    long_about = "Alternates study and break periods on a one-second countdown,\n\
                  and plays a study-music playlist in the background.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the study/break timer in the foreground
    Timer(TimerArgs),

    /// Play the study-music playlist
    Music(MusicArgs),

    /// List the study-music tracks
    Tracks(MusicArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Timer Command Arguments
// ============================================================================

/// Arguments for the timer command
#[derive(Args, Debug, Clone)]
pub struct TimerArgs {
    /// Study duration in minutes (20-180)
    #[arg(
        short,
        long,
        default_value = "20",
        value_parser = clap::value_parser!(u32).range(20..=180)
    )]
    pub study: u32,

    /// Break duration in minutes (5-30)
    #[arg(
        short = 'b',
        long = "break",
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(5..=30)
    )]
    pub break_minutes: u32,

    /// Start counting down immediately
    #[arg(short, long)]
    pub autostart: bool,

    /// Print one JSON snapshot per line instead of text
    #[arg(long)]
    pub json: bool,

    /// Disable the mode-switch chime
    #[arg(long)]
    pub no_sound: bool,
}

impl TimerArgs {
    /// Returns the durations as timer settings.
    pub fn settings(&self) -> TimerSettings {
        TimerSettings::from_minutes(self.study, self.break_minutes)
    }
}

impl Default for TimerArgs {
    fn default() -> Self {
        Self {
            study: 20,
            break_minutes: 10,
            autostart: false,
            json: false,
            no_sound: false,
        }
    }
}

// ============================================================================
// Music Command Arguments
// ============================================================================

/// Arguments for the music and tracks commands
#[derive(Args, Debug, Clone, Default)]
pub struct MusicArgs {
    /// Music directory (defaults to <audio dir>/IntelliCube)
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Build the playlist from the audio files in the directory
    #[arg(long)]
    pub scan: bool,
}

impl MusicArgs {
    /// Returns the music directory, falling back to the default location.
    pub fn library_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(default_library_dir)
    }
}

/// Returns `<audio dir>/IntelliCube`, or the current directory if the
/// platform has no audio directory.
pub fn default_library_dir() -> PathBuf {
    dirs::audio_dir()
        .map(|dir| dir.join("IntelliCube"))
        .unwrap_or_else(|| PathBuf::from("."))
}

// ============================================================================
// Tests
// ============================================================================

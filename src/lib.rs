//! IntelliCube Library
//!
//! This library provides the core of the IntelliCube study aid.
//! It includes:
//! - Timer engine alternating study and break periods
//! - Tokio driver ticking the engine once per second
//! - Study-music playlist and playback controller
//! - CLI command parsing and display utilities
//! - Type definitions for settings and snapshots

pub mod cli;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{TimerMode, TimerSettings, TimerSnapshot};

// Re-export timer types
pub use timer::{
    TickOutcome, TimerCommand, TimerDriver, TimerEngine, TimerError, TimerEvent, TimerHandle,
    TICK_PERIOD,
};

// Re-export sound types
pub use sound::{
    default_catalog, scan_directory, try_create_player, AudioPlayer, MockAudioPlayer,
    MusicPlayer, PlayerCall, Playlist, RodioAudioPlayer, SoundError, Track,
};

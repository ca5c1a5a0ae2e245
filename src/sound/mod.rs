//! Study-music playback.
//!
//! This module provides the background-music side of the study aid:
//!
//! - A bundled track catalog and discovery of audio files on disk
//! - A playlist cursor that never wraps around
//! - A music controller that auto-advances when a track completes
//! - A mode-switch chime for the study timer
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   MusicPlayer    │ ← play / pause / next / previous / select
//! └────────┬─────────┘
//!          │
//!     ┌────┴─────────────┐
//!     ▼                  ▼
//! ┌──────────┐   ┌──────────────────┐
//! │ Playlist │   │   AudioPlayer    │ ← opaque playback capability
//! │ (cursor) │   │ (rodio / mock)   │
//! └──────────┘   └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use intellicube::sound::{default_catalog, MusicPlayer, Playlist, RodioAudioPlayer};
//!
//! let playlist = Playlist::new(default_catalog()).expect("catalog is not empty");
//! let player = RodioAudioPlayer::new().expect("audio init");
//! let mut music = MusicPlayer::new(playlist, player, PathBuf::from("."));
//!
//! music.toggle_play().expect("playback failed");
//! ```

mod error;
mod player;
mod playlist;
mod track;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use player::{try_create_player, RodioAudioPlayer};
pub use playlist::{MusicPlayer, Playlist};
pub use track::{default_catalog, scan_directory, Track};

/// Trait for music playback implementations.
///
/// This trait abstracts the audio engine, allowing for different
/// implementations (e.g., rodio-based, mock for testing). At most one track
/// is loaded at a time.
pub trait AudioPlayer {
    /// Stops any current track and starts playing the file at `path`.
    ///
    /// This method should be non-blocking; the track plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, decoded or played.
    fn play_file(&mut self, path: &Path) -> Result<(), SoundError>;

    /// Pauses the current track, keeping its position.
    fn pause(&mut self);

    /// Resumes a paused track.
    fn resume(&mut self);

    /// Stops and unloads the current track.
    fn stop(&mut self);

    /// Returns true if a track is loaded and not yet finished.
    fn is_loaded(&self) -> bool;

    /// Returns true if the loaded track has played to the end.
    fn is_finished(&self) -> bool;
}

/// Calls recorded by [`MockAudioPlayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCall {
    /// `play_file` with the requested path
    Play(PathBuf),
    /// `pause`
    Pause,
    /// `resume`
    Resume,
    /// `stop`
    Stop,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<PlayerCall>,
    loaded: bool,
    finished: bool,
    should_fail: bool,
}

/// Mock audio player for testing.
///
/// Clones share their state, so a test can keep a clone after handing the
/// player to a [`MusicPlayer`].
#[derive(Debug, Clone, Default)]
pub struct MockAudioPlayer {
    state: Arc<Mutex<MockState>>,
}

impl MockAudioPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `play_file` calls fail with `FileNotFound`.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.lock().should_fail = should_fail;
    }

    /// Marks the loaded track as played to the end.
    pub fn finish_current(&self) {
        let mut state = self.lock();
        if state.loaded {
            state.finished = true;
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<PlayerCall> {
        self.lock().calls.clone()
    }

    /// Returns the paths passed to `play_file`, in order.
    #[must_use]
    pub fn played_paths(&self) -> Vec<PathBuf> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                PlayerCall::Play(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AudioPlayer for MockAudioPlayer {
    fn play_file(&mut self, path: &Path) -> Result<(), SoundError> {
        let mut state = self.lock();
        state.calls.push(PlayerCall::Play(path.to_path_buf()));
        if state.should_fail {
            state.loaded = false;
            state.finished = false;
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        state.loaded = true;
        state.finished = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.lock().calls.push(PlayerCall::Pause);
    }

    fn resume(&mut self) {
        self.lock().calls.push(PlayerCall::Resume);
    }

    fn stop(&mut self) {
        let mut state = self.lock();
        state.calls.push(PlayerCall::Stop);
        state.loaded = false;
        state.finished = false;
    }

    fn is_loaded(&self) -> bool {
        let state = self.lock();
        state.loaded && !state.finished
    }

    fn is_finished(&self) -> bool {
        let state = self.lock();
        state.loaded && state.finished
    }
}

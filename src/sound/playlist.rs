//! Playlist cursor and music controller.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::SoundError;
use super::track::Track;
use super::AudioPlayer;

// ============================================================================
// Playlist
// ============================================================================

/// Non-empty list of tracks with a cursor on the current one.
///
/// The cursor never wraps: moving past either end is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
    index: usize,
}

impl Playlist {
    /// Creates a playlist positioned on the first track.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::EmptyPlaylist` if `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Result<Self, SoundError> {
        if tracks.is_empty() {
            return Err(SoundError::EmptyPlaylist);
        }
        Ok(Self { tracks, index: 0 })
    }

    /// Returns the track under the cursor.
    pub fn current(&self) -> &Track {
        &self.tracks[self.index]
    }

    /// Returns the zero-based cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Returns true if the cursor is on the last track.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.tracks.len()
    }

    /// Moves to the next track. Returns false at the end of the list.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Moves to the previous track. Returns false at the start of the list.
    pub fn retreat(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves the cursor to `index`.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::TrackOutOfRange` if there is no such track.
    pub fn select(&mut self, index: usize) -> Result<&Track, SoundError> {
        if index >= self.tracks.len() {
            return Err(SoundError::TrackOutOfRange {
                index,
                len: self.tracks.len(),
            });
        }
        self.index = index;
        Ok(self.current())
    }
}

// ============================================================================
// MusicPlayer
// ============================================================================

/// Drives an [`AudioPlayer`] through a [`Playlist`].
///
/// Finished tracks advance to the next one; the last track stops playback.
/// Dropping the controller stops the player.
pub struct MusicPlayer<P: AudioPlayer> {
    playlist: Playlist,
    player: P,
    library_dir: PathBuf,
    playing: bool,
}

impl<P: AudioPlayer> MusicPlayer<P> {
    /// Creates a stopped controller. Track files resolve against `library_dir`.
    pub fn new(playlist: Playlist, player: P, library_dir: PathBuf) -> Self {
        Self {
            playlist,
            player,
            library_dir,
            playing: false,
        }
    }

    /// Pauses while playing; otherwise resumes the loaded track or starts
    /// the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if the current track cannot be started.
    pub fn toggle_play(&mut self) -> Result<(), SoundError> {
        if self.playing {
            self.player.pause();
            self.playing = false;
            debug!("Music paused");
            return Ok(());
        }

        if self.player.is_loaded() {
            self.player.resume();
            self.playing = true;
            debug!("Music resumed");
            Ok(())
        } else {
            self.play_current()
        }
    }

    /// Moves to the next track, switching playback to it if playing.
    ///
    /// Does nothing on the last track.
    ///
    /// # Errors
    ///
    /// Returns an error if the new track cannot be started.
    pub fn next(&mut self) -> Result<(), SoundError> {
        if !self.playlist.advance() {
            return Ok(());
        }
        self.follow_cursor()
    }

    /// Moves to the previous track, switching playback to it if playing.
    ///
    /// Does nothing on the first track.
    ///
    /// # Errors
    ///
    /// Returns an error if the new track cannot be started.
    pub fn previous(&mut self) -> Result<(), SoundError> {
        if !self.playlist.retreat() {
            return Ok(());
        }
        self.follow_cursor()
    }

    /// Moves to `index` and starts playing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the track cannot be
    /// started.
    pub fn select(&mut self, index: usize) -> Result<(), SoundError> {
        self.playlist.select(index)?;
        self.play_current()
    }

    /// Handles the end of the current track.
    ///
    /// # Errors
    ///
    /// Returns an error if the following track cannot be started.
    pub fn on_track_completed(&mut self) -> Result<(), SoundError> {
        if self.playlist.advance() {
            self.play_current()
        } else {
            info!("Reached end of playlist");
            self.player.stop();
            self.playing = false;
            Ok(())
        }
    }

    /// Checks for a finished track and advances if needed.
    ///
    /// Hosts call this periodically while music is playing.
    ///
    /// # Errors
    ///
    /// Returns an error if the following track cannot be started.
    pub fn poll(&mut self) -> Result<(), SoundError> {
        if self.playing && self.player.is_finished() {
            self.on_track_completed()
        } else {
            Ok(())
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_track(&self) -> &Track {
        self.playlist.current()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    fn follow_cursor(&mut self) -> Result<(), SoundError> {
        if self.playing {
            self.play_current()
        } else {
            // A paused track no longer matches the cursor.
            self.player.stop();
            Ok(())
        }
    }

    fn play_current(&mut self) -> Result<(), SoundError> {
        let track = self.playlist.current();
        let path = track.path_in(&self.library_dir);

        match self.player.play_file(&path) {
            Ok(()) => {
                info!(
                    index = self.playlist.index(),
                    title = %track.title,
                    "Playing track"
                );
                self.playing = true;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to play '{}': {}", track.title, e);
                self.playing = false;
                Err(e)
            }
        }
    }
}

impl<P: AudioPlayer> Drop for MusicPlayer<P> {
    fn drop(&mut self) {
        self.player.stop();
    }
}

// ============================================================================
// Tests
// ============================================================================

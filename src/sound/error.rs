//! Sound system error types.
//!
//! This module defines the error types for study-music playback and the
//! playlist cursor.

use thiserror::Error;

/// Errors that can occur while playing study music.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device is not available: {0}")]
    DeviceNotAvailable(String),

    /// Track file was not found at the specified path.
    #[error("audio file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode audio file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// Generic playback error.
    #[error("playback error: {0}")]
    PlaybackError(String),

    /// A playlist needs at least one track.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// The requested track does not exist.
    #[error("track {index} is out of range (playlist has {len} tracks)")]
    TrackOutOfRange {
        /// Requested zero-based index
        index: usize,
        /// Number of tracks in the playlist
        len: usize,
    },
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio output device",
            Self::FileNotFound(_) => "check the music directory (--dir) or use --scan",
            Self::DecodeError(_) => "the audio file may be corrupted or in an unsupported format",
            Self::StreamError(_) => "check the system audio settings",
            Self::PlaybackError(_) => "restart the music player",
            Self::EmptyPlaylist => "add audio files to the music directory",
            Self::TrackOutOfRange { .. } => "pick a track number from the list",
        }
    }
}

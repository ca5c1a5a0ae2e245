//! Audio player implementation using rodio.
//!
//! This module provides the `RodioAudioPlayer` which uses the rodio v0.20
//! audio library for cross-platform music playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::AudioPlayer;

/// Frequency of the mode-switch chime.
const CHIME_FREQUENCY_HZ: f32 = 880.0;

/// Length of the mode-switch chime.
const CHIME_DURATION: Duration = Duration::from_millis(300);

/// Loudness of the mode-switch chime.
const CHIME_VOLUME: f32 = 0.2;

/// A music player that uses rodio for audio playback.
///
/// One sink holds the current track; starting another track replaces it.
/// The output stream is not `Send`, so the player stays on the thread
/// that created it.
pub struct RodioAudioPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Sink of the current track, if any.
    sink: Option<Sink>,
}

impl RodioAudioPlayer {
    /// Creates a new player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
        })
    }

    /// Plays a short tone without interrupting the current track.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::StreamError` if no sink can be created.
    pub fn play_chime(&self) -> Result<(), SoundError> {
        let sink = self.new_sink()?;
        sink.append(
            SineWave::new(CHIME_FREQUENCY_HZ)
                .take_duration(CHIME_DURATION)
                .amplify(CHIME_VOLUME),
        );
        sink.detach();

        debug!("Chime playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

impl AudioPlayer for RodioAudioPlayer {
    fn play_file(&mut self, path: &Path) -> Result<(), SoundError> {
        self.stop();

        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(format!("{}: {}", path.display(), e)))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        self.sink = Some(sink);

        debug!("Playing {}", path.display());
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            debug!("Playback stopped");
        }
    }

    fn is_loaded(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| !sink.empty())
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_some_and(Sink::empty)
    }
}

impl std::fmt::Debug for RodioAudioPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudioPlayer")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

/// Creates a player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<RodioAudioPlayer> {
    match RodioAudioPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: These tests return early in environments without audio hardware
    // (e.g., CI containers).

    #[test]
    fn test_new_player_is_idle() {
        let player = match RodioAudioPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        assert!(!player.is_loaded());
        assert!(!player.is_finished());
    }

    #[test]
    fn test_play_missing_file() {
        let mut player = match RodioAudioPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        let result = player.play_file(Path::new("/nonexistent/path/to/track.mp3"));
        assert!(matches!(result, Err(SoundError::FileNotFound(_))));
        assert!(!player.is_loaded());
    }

    #[test]
    fn test_play_undecodable_file() {
        let mut player = match RodioAudioPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.mp3");
        std::fs::write(&path, b"not audio").unwrap();

        let result = player.play_file(&path);
        assert!(matches!(result, Err(SoundError::DecodeError(_))));
    }

    #[test]
    fn test_controls_without_track_do_not_panic() {
        let mut player = match RodioAudioPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        player.pause();
        player.resume();
        player.stop();
        assert!(!player.is_loaded());
    }

    #[test]
    fn test_try_create_player_no_panic() {
        let _ = try_create_player();
    }

    #[test]
    fn test_debug_impl() {
        let player = match RodioAudioPlayer::new() {
            Ok(p) => p,
            Err(_) => return,
        };

        let debug_str = format!("{:?}", player);
        assert!(debug_str.contains("RodioAudioPlayer"));
    }
}

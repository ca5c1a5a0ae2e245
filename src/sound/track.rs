//! Study-music tracks.
//!
//! Provides the bundled track catalog and discovery of audio files in a
//! user-supplied music directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::SoundError;

/// A single entry of the study-music playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display title
    pub title: String,
    /// Display artist
    pub artist: String,
    /// Display duration (e.g. "10:34")
    #[serde(rename = "duration")]
    pub duration_label: String,
    /// File path relative to the music directory
    #[serde(rename = "fileName")]
    pub file_name: String,
}

impl Track {
    /// Creates a new track.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        duration_label: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            duration_label: duration_label.into(),
            file_name: file_name.into(),
        }
    }

    /// Resolves the track file against a music directory.
    #[must_use]
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// Audio file extensions picked up by [`scan_directory`].
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a"];

/// Returns the bundled study-music catalog.
///
/// File names are relative to the music directory.
#[must_use]
pub fn default_catalog() -> Vec<Track> {
    [
        ("Focus Meditation", "Ambient Sounds", "01:24"),
        ("Deep Concentration", "Study Music", "10:34"),
        ("Ambient Study", "Background Sounds", "10:24"),
        ("Nature Sounds", "Relaxation", "01:25"),
        ("Classical Study", "Mozart", "20:10"),
        ("Focus Meditation", "Ambient Sounds", "07:41"),
        ("Deep Concentration", "Study Music", "07:20"),
        ("Ambient Study", "Background Sounds", "02:19"),
        ("Nature Sounds", "Relaxation", "02:31"),
        ("Classical Study", "Mozart", "10:05"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (title, artist, duration))| {
        Track::new(title, artist, duration, format!("Music/music{}.mp3", i + 1))
    })
    .collect()
}

/// Builds tracks from the audio files found directly in `dir`.
///
/// Tracks are sorted by file name. The title is the file stem.
///
/// # Errors
///
/// Returns `SoundError::FileNotFound` if the directory cannot be read.
pub fn scan_directory(dir: &Path) -> Result<Vec<Track>, SoundError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", dir.display(), e)))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported(path))
        .collect();
    files.sort();

    Ok(files
        .into_iter()
        .filter_map(|path| {
            let stem = path.file_stem()?.to_string_lossy().into_owned();
            let file_name = path.file_name()?.to_string_lossy().into_owned();
            Some(Track::new(stem, "Unknown", "--:--", file_name))
        })
        .collect())
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

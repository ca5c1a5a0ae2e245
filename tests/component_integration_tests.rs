//! Component integration tests for the study-music player.
//!
//! These tests wire the playlist, track discovery and music controller
//! together over the mock audio player:
//! - Playing through a scanned music directory
//! - Auto-advance and the end of the playlist
//! - Navigation while playing, paused and stopped
//! - Failure handling for missing files

use std::path::{Path, PathBuf};

use intellicube::sound::{
    default_catalog, scan_directory, MockAudioPlayer, MusicPlayer, PlayerCall, Playlist,
    SoundError,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a music directory with the given (empty) files.
fn create_library(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        std::fs::write(dir.path().join(file), b"").unwrap();
    }
    dir
}

/// Creates a controller over the tracks found in `dir`.
fn create_music(dir: &Path) -> (MusicPlayer<MockAudioPlayer>, MockAudioPlayer) {
    let tracks = scan_directory(dir).unwrap();
    let playlist = Playlist::new(tracks).unwrap();
    let mock = MockAudioPlayer::new();
    let music = MusicPlayer::new(playlist, mock.clone(), dir.to_path_buf());
    (music, mock)
}

/// Simulates the player reaching the end of the current track.
fn finish_track(music: &mut MusicPlayer<MockAudioPlayer>, mock: &MockAudioPlayer) {
    mock.finish_current();
    music.poll().unwrap();
}

// ============================================================================
// Playback Through a Scanned Library
// ============================================================================

#[test]
fn plays_whole_library_then_stops() {
    let library = create_library(&["01_rain.mp3", "02_waves.ogg", "03_forest.wav"]);
    let (mut music, mock) = create_music(library.path());

    music.toggle_play().unwrap();
    finish_track(&mut music, &mock);
    finish_track(&mut music, &mock);
    assert!(music.is_playing());
    assert_eq!(music.current_track().title, "03_forest");

    finish_track(&mut music, &mock);

    assert!(!music.is_playing());
    assert_eq!(music.current_track().title, "03_forest");
    assert_eq!(
        mock.played_paths(),
        vec![
            library.path().join("01_rain.mp3"),
            library.path().join("02_waves.ogg"),
            library.path().join("03_forest.wav"),
        ]
    );

    // Starting again replays the last track rather than wrapping around.
    music.toggle_play().unwrap();
    assert_eq!(
        mock.played_paths().last(),
        Some(&library.path().join("03_forest.wav"))
    );
}

#[test]
fn empty_library_cannot_build_playlist() {
    let library = create_library(&["readme.txt", "cover.jpg"]);

    let tracks = scan_directory(library.path()).unwrap();

    assert!(tracks.is_empty());
    assert!(matches!(
        Playlist::new(tracks),
        Err(SoundError::EmptyPlaylist)
    ));
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn navigation_while_paused_does_not_start_playback() {
    let library = create_library(&["a.mp3", "b.mp3", "c.mp3"]);
    let (mut music, mock) = create_music(library.path());

    music.toggle_play().unwrap();
    music.toggle_play().unwrap();
    music.next().unwrap();
    music.next().unwrap();
    music.previous().unwrap();

    assert!(!music.is_playing());
    assert_eq!(music.current_track().title, "b");
    assert_eq!(mock.played_paths(), vec![library.path().join("a.mp3")]);

    music.toggle_play().unwrap();
    assert_eq!(
        mock.played_paths().last(),
        Some(&library.path().join("b.mp3"))
    );
}

#[test]
fn select_by_number_plays_immediately() {
    let library = create_library(&["a.mp3", "b.mp3", "c.mp3"]);
    let (mut music, mock) = create_music(library.path());

    music.select(2).unwrap();

    assert!(music.is_playing());
    assert_eq!(mock.calls(), vec![PlayerCall::Play(library.path().join("c.mp3"))]);

    let err = music.select(3).unwrap_err();
    assert!(matches!(err, SoundError::TrackOutOfRange { index: 3, len: 3 }));
    assert!(music.is_playing());
    assert_eq!(music.playlist().index(), 2);
}

// ============================================================================
// Failure Handling
// ============================================================================

#[test]
fn missing_file_stops_playback_but_keeps_cursor() {
    let library = create_library(&["a.mp3", "b.mp3"]);
    let (mut music, mock) = create_music(library.path());
    music.toggle_play().unwrap();

    mock.set_should_fail(true);
    mock.finish_current();
    let err = music.poll().unwrap_err();

    assert!(err.is_file_error());

    assert!(!music.is_playing());
    assert_eq!(music.current_track().title, "b");

    mock.set_should_fail(false);
    music.toggle_play().unwrap();
    assert!(music.is_playing());
}

#[test]
fn bundled_catalog_resolves_under_library_dir() {
    let playlist = Playlist::new(default_catalog()).unwrap();
    let mock = MockAudioPlayer::new();
    let mut music = MusicPlayer::new(playlist, mock.clone(), PathBuf::from("/srv/music"));

    music.select(4).unwrap();

    assert_eq!(music.current_track().artist, "Mozart");
    assert_eq!(
        mock.played_paths(),
        vec![PathBuf::from("/srv/music/Music/music5.mp3")]
    );
}

#[test]
fn dropping_controller_releases_player() {
    let library = create_library(&["a.mp3"]);
    let (mut music, mock) = create_music(library.path());
    music.toggle_play().unwrap();

    drop(music);

    assert_eq!(mock.calls().last(), Some(&PlayerCall::Stop));
}

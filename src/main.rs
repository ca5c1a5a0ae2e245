//! IntelliCube - study timer and study music for the terminal
//!
//! The timer alternates between a study period and a break:
//! - 20 to 180 minutes of study
//! - 5 to 30 minutes of break
//! - counting down once per second, switching modes at zero

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Duration, MissedTickBehavior};

use intellicube::cli::{Cli, Commands, Display, MusicArgs, MusicInput, TimerArgs, TimerInput};
use intellicube::sound::{
    default_catalog, scan_directory, try_create_player, MusicPlayer, Playlist, RodioAudioPlayer,
    SoundError, Track,
};
use intellicube::timer::{TimerEvent, TimerHandle};

/// How often the music loop checks for a finished track.
const MUSIC_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over the verbose flag.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Timer(args)) => run_timer(args).await?,
        Some(Commands::Music(args)) => run_music(args).await?,
        Some(Commands::Tracks(args)) => {
            let tracks = load_tracks(&args)?;
            Display::show_tracks(&tracks, None);
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

// ============================================================================
// Timer
// ============================================================================

/// Whether an input loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the timer in the foreground until `q`, end of input or Ctrl-C.
async fn run_timer(args: TimerArgs) -> Result<()> {
    let chime = if args.no_sound {
        None
    } else {
        try_create_player()
    };

    let (timer, mut events) = TimerHandle::spawn(args.settings());
    if args.autostart {
        timer.start_or_pause()?;
    }

    if !args.json {
        Display::show_timer_help();
    }
    Display::show_snapshot(&timer.current_state(), args.json);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    tracing::debug!("End of input, stopping timer");
                    break;
                };
                if handle_timer_input(&timer, &line, args.json)? == Flow::Quit {
                    break;
                }
            }
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                render_timer_event(&timer, &event, args.json, chime.as_ref());
            }
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    timer.shutdown().await;
    Ok(())
}

fn handle_timer_input(timer: &TimerHandle, line: &str, json: bool) -> Result<Flow> {
    let input = match TimerInput::parse(line) {
        Ok(Some(input)) => input,
        Ok(None) => return Ok(Flow::Continue),
        Err(e) => {
            Display::show_error(&e.to_string());
            return Ok(Flow::Continue);
        }
    };

    match input {
        TimerInput::StartOrPause => timer.start_or_pause()?,
        TimerInput::Reset => timer.reset()?,
        TimerInput::Configure {
            study_minutes,
            break_minutes,
        } => timer.configure(study_minutes, break_minutes)?,
        TimerInput::Status => Display::show_snapshot(&timer.current_state(), json),
        TimerInput::Help => Display::show_timer_help(),
        TimerInput::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn render_timer_event(
    timer: &TimerHandle,
    event: &TimerEvent,
    json: bool,
    chime: Option<&RodioAudioPlayer>,
) {
    if let (TimerEvent::ModeSwitched { .. }, Some(player)) = (event, chime) {
        if let Err(e) = player.play_chime() {
            tracing::warn!("Failed to play chime: {}", e);
        }
    }

    if !json {
        if let Some(message) = Display::event_message(event) {
            println!("{}", message);
        }
    }
    Display::show_snapshot(&timer.current_state(), json);
}

// ============================================================================
// Music
// ============================================================================

/// Returns the playlist tracks: the bundled catalog, or the files in the
/// music directory with `--scan`.
fn load_tracks(args: &MusicArgs) -> Result<Vec<Track>> {
    if args.scan {
        let dir = args.library_dir();
        scan_directory(&dir).with_context(|| format!("failed to scan {}", dir.display()))
    } else {
        Ok(default_catalog())
    }
}

/// Runs the music player until `q`, end of input or Ctrl-C.
async fn run_music(args: MusicArgs) -> Result<()> {
    let library_dir = args.library_dir();
    let playlist = Playlist::new(load_tracks(&args)?)
        .with_context(|| format!("no audio files in {}", library_dir.display()))?;
    let player = RodioAudioPlayer::new().context("music needs an audio output device")?;
    let mut music = MusicPlayer::new(playlist, player, library_dir);

    tracing::info!(dir = %music.library_dir().display(), "Music library");
    Display::show_music_help();
    Display::show_tracks(music.playlist().tracks(), Some(music.playlist().index()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut poll = interval(MUSIC_POLL_INTERVAL);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                if handle_music_input(&mut music, &line) == Flow::Quit {
                    break;
                }
            }
            _ = poll.tick() => {
                let before = (music.playlist().index(), music.is_playing());
                report(music.poll());
                if (music.playlist().index(), music.is_playing()) != before {
                    show_state(&music);
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    Ok(())
}

fn handle_music_input(music: &mut MusicPlayer<RodioAudioPlayer>, line: &str) -> Flow {
    let input = match MusicInput::parse(line) {
        Ok(Some(input)) => input,
        Ok(None) => return Flow::Continue,
        Err(e) => {
            Display::show_error(&e.to_string());
            return Flow::Continue;
        }
    };

    match input {
        MusicInput::TogglePlay => report(music.toggle_play()),
        MusicInput::Next => report(music.next()),
        MusicInput::Previous => report(music.previous()),
        MusicInput::Select(index) => report(music.select(index)),
        MusicInput::List => {
            Display::show_tracks(music.playlist().tracks(), Some(music.playlist().index()));
            return Flow::Continue;
        }
        MusicInput::Help => {
            Display::show_music_help();
            return Flow::Continue;
        }
        MusicInput::Quit => return Flow::Quit,
    }

    show_state(music);
    Flow::Continue
}

fn show_state(music: &MusicPlayer<RodioAudioPlayer>) {
    Display::show_now_playing(music.current_track(), music.is_playing());
}

/// Shows playback errors without ending the session.
fn report(result: std::result::Result<(), SoundError>) {
    if let Err(e) = result {
        Display::show_sound_error(&e);
    }
}

// ============================================================================
// Completions
// ============================================================================

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

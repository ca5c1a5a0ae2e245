//! Parsing of interactive stdin commands.
//!
//! Lines are trimmed and matched case-insensitively. Blank lines parse to
//! `None` so the caller can ignore them.

use thiserror::Error;

/// Errors produced while parsing an input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The command word is not known.
    #[error("unknown command '{0}' (type 'h' for help)")]
    UnknownCommand(String),

    /// The command is missing arguments or has malformed ones.
    #[error("usage: {0}")]
    Usage(&'static str),
}

// ============================================================================
// Timer Input
// ============================================================================

/// Commands accepted by the `timer` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerInput {
    /// Start or pause the countdown
    StartOrPause,
    /// Stop and restore the full duration
    Reset,
    /// Set both durations, in minutes
    Configure {
        /// Study duration in minutes
        study_minutes: u32,
        /// Break duration in minutes
        break_minutes: u32,
    },
    /// Print the current state
    Status,
    /// Print the command list
    Help,
    /// Exit
    Quit,
}

const CONFIGURE_USAGE: &str = "c <study minutes> <break minutes>";

impl TimerInput {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Option<Self>, InputError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(None);
        };

        let input = match command.to_lowercase().as_str() {
            "s" | "start" | "p" | "pause" => Self::StartOrPause,
            "r" | "reset" => Self::Reset,
            "c" | "set" => {
                let study_minutes = parse_minutes(words.next())?;
                let break_minutes = parse_minutes(words.next())?;
                if words.next().is_some() {
                    return Err(InputError::Usage(CONFIGURE_USAGE));
                }
                Self::Configure {
                    study_minutes,
                    break_minutes,
                }
            }
            "status" => Self::Status,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(InputError::UnknownCommand(command.to_string())),
        };
        Ok(Some(input))
    }
}

fn parse_minutes(word: Option<&str>) -> Result<u32, InputError> {
    word.and_then(|w| w.parse().ok())
        .ok_or(InputError::Usage(CONFIGURE_USAGE))
}

// ============================================================================
// Music Input
// ============================================================================

/// Commands accepted by the `music` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicInput {
    /// Play or pause
    TogglePlay,
    /// Next track
    Next,
    /// Previous track
    Previous,
    /// Play the track at this zero-based index
    Select(usize),
    /// Print the track list
    List,
    /// Print the command list
    Help,
    /// Exit
    Quit,
}

impl MusicInput {
    /// Parses one input line. Track numbers are 1-based.
    pub fn parse(line: &str) -> Result<Option<Self>, InputError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Ok(number) = line.parse::<usize>() {
            return match number.checked_sub(1) {
                Some(index) => Ok(Some(Self::Select(index))),
                None => Err(InputError::Usage("track numbers start at 1")),
            };
        }

        let input = match line.to_lowercase().as_str() {
            "p" | "play" | "pause" => Self::TogglePlay,
            "n" | "next" => Self::Next,
            "b" | "back" | "prev" => Self::Previous,
            "l" | "list" => Self::List,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(InputError::UnknownCommand(line.to_string())),
        };
        Ok(Some(input))
    }
}

// ============================================================================
// Tests
// ============================================================================

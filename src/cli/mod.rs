//! CLI module for IntelliCube.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Parsing of interactive stdin commands
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{default_library_dir, Cli, Commands, MusicArgs, TimerArgs};
pub use display::Display;
pub use input::{InputError, MusicInput, TimerInput};

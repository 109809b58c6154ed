//! pomodoro - a focus/break countdown timer for the terminal
//!
//! This crate provides the timer engine, its persisted settings and session
//! counter, and the command line and terminal front ends built on them.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomodoroError;
pub use features::focus::{Configuration, Pomodoro, TimerEngine};

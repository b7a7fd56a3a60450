#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

//! # tint
//!
//! Command-line front end for [`tincture`].
//!
//! The binary is a thin wrapper: argument parsing lives in [`cli`], the
//! optional TOML config in [`config`] and command execution in [`commands`],
//! so every command can be driven from tests without spawning a process.

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command, LogLevel};
pub use commands::run;
pub use config::{Config, ConfigError};

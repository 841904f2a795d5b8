//! CLI command implementations.
//!
//! Each submodule owns one subcommand: its clap argument struct and a
//! `run` function returning `Result<(), CliError>`.

pub mod info;
pub mod inspect;
pub mod search;

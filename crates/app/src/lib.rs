//! Till command-line application: configuration, logging and the `till` subcommands.

pub mod cli;
pub mod config;
pub mod context;
pub mod errors;
pub mod logging;

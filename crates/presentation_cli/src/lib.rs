//! Zustellkarte CLI
//!
//! Command-line front end for the address parser, the geocoding resolver
//! and the position filter.

#![allow(clippy::print_stdout)]

pub mod cli;
pub mod commands;
pub mod output;

pub use cli::{Cli, Commands, log_filter_from_verbosity};

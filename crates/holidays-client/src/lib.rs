//! Command-line front end for holiday lookups.
//!
//! This crate provides the `holidays` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};

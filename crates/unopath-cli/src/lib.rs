//! Command-line front end for `unopath-core`.
//!
//! The binary in `main.rs` wires the parser, logging, and Ctrl-C handling
//! together; everything testable lives here.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by main.rs only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod runner;

pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;

//! CLI argument model for the AMR relay binary.
//!
//! Parses flags and environment fallbacks and converts them into the explicit
//! configuration values consumed by the relay server.

pub mod cli_args;

pub use cli_args::Cli;

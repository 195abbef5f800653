//! sqlfn CLI library.
//!
//! This module exposes internal types for testing purposes.
//! The main entry point is the `sqlfn` binary.

pub mod cli;
pub mod config;
pub mod input;
pub mod output;
pub mod register;

// Re-export commonly used types
pub use cli::Args;

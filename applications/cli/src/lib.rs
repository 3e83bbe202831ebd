//! Tunebox CLI Library
//!
//! Terminal front end for a Tunebox playback session: configuration loading,
//! command parsing and plain-text rendering.
//!
//! This library exposes the core components for testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

// Re-export commonly used types for convenience
pub use commands::{execute, parse_command, Flow, ReplCommand};
pub use self::config::AppConfig;
pub use error::{CliError, Result};

//! Error types for URI resolution, configuration and launching

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by the stage that detects them
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Resolution Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed URI: {uri}")]
    InvalidUri { uri: String },

    #[error("No local path for URI: {uri}")]
    UnresolvablePath { uri: String },

    #[error("Path cannot be placed in a command line: {path:?}")]
    UnquotablePath { path: PathBuf },

    #[error("Command line access is locked down")]
    PolicyDenied,

    // ─────────────────────────────────────────────────────────────
    // Launch Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Empty command line")]
    EmptyCommand,

    #[error("Could not launch `{command}`: {reason}")]
    LaunchFailure { command: String, reason: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri { uri: uri.into() }
    }

    pub fn unresolvable(uri: impl Into<String>) -> Self {
        Self::UnresolvablePath { uri: uri.into() }
    }

    pub fn unquotable(path: impl Into<PathBuf>) -> Self {
        Self::UnquotablePath { path: path.into() }
    }

    pub fn launch_failure(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LaunchFailure {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is absorbed at the provider boundary.
    ///
    /// Silent errors turn into "offer nothing" or "log and continue"; the host
    /// never sees them.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Error::UnresolvablePath { .. }
                | Error::InvalidUri { .. }
                | Error::UnquotablePath { .. }
                | Error::PolicyDenied
                | Error::LaunchFailure { .. }
                | Error::EmptyCommand
        )
    }
}

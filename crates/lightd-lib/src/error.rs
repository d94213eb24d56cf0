//! Unified error type for the lightd-lib crate.
//!
//! [`LightdError`] covers I/O and domain-specific error kinds (`Config`,
//! `Color`, `Request`). `From` impls allow `?` to propagate across module
//! boundaries. Sysfs write failures on the hot path never reach this type —
//! the controller drops them by design (see [`crate::controller`]).

use std::fmt;

/// Unified error type for lightd-lib operations.
#[derive(Debug)]
pub enum LightdError {
    /// Standard I/O error (config persistence, capability read).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
    /// Malformed dispatcher request line.
    Request(String),
}

impl fmt::Display for LightdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightdError::Io(e) => write!(f, "I/O error: {e}"),
            LightdError::Config(e) => write!(f, "Config error: {e}"),
            LightdError::Color(e) => write!(f, "Color error: {e}"),
            LightdError::Request(e) => write!(f, "Request error: {e}"),
        }
    }
}

impl std::error::Error for LightdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LightdError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LightdError {
    fn from(e: std::io::Error) -> Self {
        LightdError::Io(e)
    }
}

/// Crate-level Result alias using [`LightdError`].
pub type Result<T> = std::result::Result<T, LightdError>;

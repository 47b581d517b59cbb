// SPDX-License-Identifier: MPL-2.0
//! Crate error type and result alias.
//!
//! A hand-rolled error enum with `Display` and `From` conversions, matching
//! the teacher's `error.rs` idiom (no `thiserror`/`anyhow`).

use std::fmt;

/// Errors surfaced across the crate's public boundary.
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid configuration (zero display time, invalid time unit/value,
    /// capacity 0).
    Config(String),
    /// Malformed hex color input.
    Style(String),
    /// Config file I/O and (de)serialization failures.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Style(e) => write!(f, "Style Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

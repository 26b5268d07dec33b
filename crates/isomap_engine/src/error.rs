//! # Engine Error Types
//!
//! Errors only exist at configuration time. Drawing never fails: a missing
//! asset or a malformed frame degrades to a skipped draw call.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::RenderConfig`].
    #[error("malformed config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// An object override carries a regex that does not compile.
    #[error("invalid override regex `{pattern}`: {source}")]
    InvalidRegex {
        /// The offending pattern.
        pattern: String,
        /// Compiler error.
        source: regex::Error,
    },

    /// Semantically invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

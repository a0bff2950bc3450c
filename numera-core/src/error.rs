//! Error types for the resolution engine

use thiserror::Error;

/// Errors raised while building configurations or parsers.
///
/// Parsing itself never fails with an error: a span a parser cannot resolve
/// comes back as `None` so the rest of an extraction stream keeps flowing.
#[derive(Debug, Error)]
pub enum NumeraError {
    /// Configuration loading or parsing error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unsupported culture requested
    #[error("Unsupported culture: {0}")]
    UnsupportedCulture(String),

    /// The factory cannot build the requested parser for this culture
    #[error("Unsupported parser target {target} for culture {culture}")]
    UnsupportedTarget { target: String, culture: String },
}

/// Result type for construction-time operations
pub type Result<T> = std::result::Result<T, NumeraError>;

//! Common error types for moodcast

use thiserror::Error;

/// Common result type for moodcast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the shared moodcast crates.
///
/// The upstream clients carry their own error enums; only configuration
/// resolution fails at this layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

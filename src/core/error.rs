//! Error types for the widget core

use thiserror::Error;

/// Errors raised while building a widget tree
///
/// Only composition can fail. Every other core operation degrades to a
/// no-op on inputs it cannot act on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two nodes in one description share an id
    #[error("duplicate widget id: {0:?}")]
    DuplicateId(String),

    /// An id was set to the empty string
    #[error("widget id must not be empty")]
    EmptyId,
}

/// Result type for core composition
pub type Result<T> = std::result::Result<T, ConfigurationError>;

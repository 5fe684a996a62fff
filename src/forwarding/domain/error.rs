//! Error types for forwarding domain validation.

use thiserror::Error;

/// Errors returned while constructing forwarding domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForwardingDomainError {
    /// A game channel name is empty after trimming.
    #[error("game channel name must not be empty")]
    EmptyGameChannelName,

    /// A game channel name contains whitespace.
    #[error("game channel name '{0}' must not contain whitespace")]
    InvalidGameChannelName(String),
}

//! Template formatting port.

use crate::forwarding::domain::{MessageTemplate, Placeholders, RenderedMessage};
use std::sync::Arc;
use thiserror::Error;

/// Result type for template formatting.
pub type FormatResult<T> = Result<T, FormatError>;

/// Substitutes placeholder values into a message template.
pub trait MessageFormatter: Send + Sync {
    /// Renders `template`.
    ///
    /// Returns `Ok(None)` when the template renders to an empty message.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] when the formatting engine fails.
    fn format(
        &self,
        template: &MessageTemplate,
        placeholders: &Placeholders,
    ) -> FormatResult<Option<RenderedMessage>>;
}

/// Errors returned by formatter adapters.
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// The template is malformed.
    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    /// The formatting engine failed.
    #[error("formatting engine failed: {0}")]
    Engine(Arc<dyn std::error::Error + Send + Sync>),
}

impl FormatError {
    /// Wraps an engine error.
    pub fn engine(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Engine(Arc::new(err))
    }
}

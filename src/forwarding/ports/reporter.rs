//! Out-of-band diagnostics for failed sends.

use super::SendError;

/// Receives delivery failures for diagnostics. Must not panic.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    /// Reports `error`, with `context` describing the failed operation.
    fn report(&self, context: &str, error: &SendError);
}

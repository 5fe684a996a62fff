//! Error reporter that writes delivery failures to the tracing log.

use crate::forwarding::ports::{ErrorReporter, SendError};

/// Logs every reported failure at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: &str, error: &SendError) {
        tracing::error!(context, error = %error, "message delivery failed");
    }
}

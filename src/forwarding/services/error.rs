//! Errors raised while forwarding one channel configuration.

use crate::forwarding::ports::{FormatError, ResolveError};
use crate::mention::domain::MentionError;
use crate::platform::GuildId;
use thiserror::Error;

/// Failure of one channel configuration's forward.
///
/// These never escape [`super::ForwardingPipeline::process`]; they are
/// logged and recorded in the [`super::ForwardReport`].
#[derive(Debug, Clone, Error)]
pub enum ForwardError {
    /// Destination resolution failed outright.
    #[error("destination resolution failed: {0}")]
    Resolution(#[from] ResolveError),

    /// The template could not be formatted.
    #[error("message formatting failed: {0}")]
    Format(#[from] FormatError),

    /// Mention rewriting or mass-mention neutralization failed.
    #[error(transparent)]
    Mention(#[from] MentionError),

    /// Message construction failed in every guild of a guild-scoped
    /// forward.
    #[error("message construction failed in {} guilds: {}", .0.len(), describe_guilds(.0))]
    Guilds(Vec<(Option<GuildId>, ForwardError)>),

    /// A debounced forward task did not complete.
    #[error("debounced forward was lost: {0}")]
    Scheduling(String),
}

fn describe_guilds(failures: &[(Option<GuildId>, ForwardError)]) -> String {
    failures
        .iter()
        .map(|(guild_id, err)| match guild_id {
            Some(guild) => format!("guild {guild}: {err}"),
            None => err.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

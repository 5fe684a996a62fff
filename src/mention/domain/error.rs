//! Error types for mention lookup and rewriting.

use crate::mention::ports::GuildDirectoryError;
use thiserror::Error;

/// Errors raised while resolving or rewriting mentions.
#[derive(Debug, Clone, Error)]
pub enum MentionError {
    /// The platform directory could not be queried.
    #[error(transparent)]
    Directory(#[from] GuildDirectoryError),

    /// The mention search automaton could not be built.
    #[error("could not build mention matcher: {0}")]
    Matcher(String),

    /// Everyone-neutralization left a trigger literal in the output.
    ///
    /// This is a programming error: the output must never be delivered.
    #[error("everyone-mention neutralization left a trigger in: {0:?}")]
    NeutralizationFailed(String),
}

//! Domain model for mention rewriting.

mod allowed;
mod descriptor;
mod error;
mod event;
mod permission;

pub use allowed::{AllowedMentionSet, ZERO_WIDTH_SPACE, neutralize_everyone};
pub use descriptor::{MentionDescriptor, MentionKind};
pub use error::MentionError;
pub use event::MentionCacheEvent;
pub use permission::{MentionPermission, MentionToggles};

//! Mention cache, permission gate, and text rewriting.

mod cache;
mod gate;
mod rewriter;

pub use cache::{GuildMentions, MentionCache};
pub use gate::MentionGate;
pub use rewriter::{MentionRewrite, rewrite};

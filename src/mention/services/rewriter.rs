//! Rewrites literal `@name`/`#name` tokens into native mentions.

use super::MentionGate;
use crate::mention::domain::{
    AllowedMentionSet, MentionDescriptor, MentionError, MentionPermission, neutralize_everyone,
};
use aho_corasick::{AhoCorasick, MatchKind};

/// Result of rewriting one piece of text for one guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionRewrite {
    content: String,
    rewritten: Vec<MentionDescriptor>,
    allowed: AllowedMentionSet,
}

impl MentionRewrite {
    /// Returns the rewritten text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the descriptors that were rendered as live mentions.
    #[must_use]
    pub fn rewritten(&self) -> &[MentionDescriptor] {
        &self.rewritten
    }

    /// Returns the allowed-mention declaration for the message.
    #[must_use]
    pub const fn allowed(&self) -> &AllowedMentionSet {
        &self.allowed
    }

    /// Splits the rewrite into its text and allowed-mention declaration.
    #[must_use]
    pub fn into_parts(self) -> (String, AllowedMentionSet) {
        (self.content, self.allowed)
    }
}

/// Rewrites every cached mention the gate allows.
///
/// Only descriptors the gate allows are searched for, so a denied name never
/// hides an allowed one with the same text. Matching is ASCII
/// case-insensitive and leftmost-longest, so `@Alice` wins over `@Ali`.
/// Denied names are left as literal text, and a match running into further
/// name characters is ignored. Unless the gate
/// allows mass mentions, `@everyone`/`@here` are defused afterwards.
///
/// # Errors
///
/// Returns [`MentionError::Matcher`] if the search automaton cannot be built
/// and [`MentionError::NeutralizationFailed`] if a mass-mention trigger
/// survives.
pub fn rewrite<F>(
    text: &str,
    descriptors: &[MentionDescriptor],
    gate: &MentionGate<F>,
) -> Result<MentionRewrite, MentionError>
where
    F: Fn(&MentionPermission) -> bool,
{
    let permitted: Vec<&MentionDescriptor> = descriptors
        .iter()
        .filter(|descriptor| gate.allows(descriptor))
        .collect();
    let mut rendered = String::with_capacity(text.len());
    let mut rewritten = Vec::new();

    if permitted.is_empty() {
        rendered.push_str(text);
    } else {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(permitted.iter().map(|descriptor| descriptor.search_text()))
            .map_err(|err| MentionError::Matcher(err.to_string()))?;

        let mut cursor = 0;
        for found in matcher.find_iter(text) {
            let Some(descriptor) = permitted.get(found.pattern().as_usize()) else {
                continue;
            };
            if continues_name(text, found.end()) {
                continue;
            }
            rendered.push_str(text.get(cursor..found.start()).unwrap_or_default());
            rendered.push_str(descriptor.rendered_mention());
            cursor = found.end();
            rewritten.push((*descriptor).clone());
        }
        rendered.push_str(text.get(cursor..).unwrap_or_default());
    }

    let everyone = gate.allows_everyone();
    let content = if everyone {
        rendered
    } else {
        neutralize_everyone(&rendered)?
    };
    let allowed = AllowedMentionSet::from_rewrite(
        &rewritten,
        gate.allows_all_users(),
        gate.allows_all_roles(),
        everyone,
    );

    Ok(MentionRewrite {
        content,
        rewritten,
        allowed,
    })
}

fn continues_name(text: &str, end: usize) -> bool {
    text.get(end..)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|next| next.is_alphanumeric() || next == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::domain::MentionToggles;
    use crate::platform::{ChannelId, RoleId, UserId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn descriptors() -> Vec<MentionDescriptor> {
        vec![
            MentionDescriptor::user(UserId::new(1), "Ali"),
            MentionDescriptor::user(UserId::new(2), "Alice"),
            MentionDescriptor::role(RoleId::new(3), "Staff", true),
            MentionDescriptor::channel(ChannelId::new(4), "general"),
        ]
    }

    fn permitting(
        granted: Vec<MentionPermission>,
    ) -> MentionGate<impl Fn(&MentionPermission) -> bool> {
        MentionGate::new(MentionToggles::default(), move |permission: &MentionPermission| {
            granted.contains(permission)
        })
    }

    #[rstest]
    fn longest_name_wins(descriptors: Vec<MentionDescriptor>) {
        let gate = permitting(vec![MentionPermission::AllUsers]);

        let result = rewrite("hi @Alice and @ali", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "hi <@2> and <@1>");
        assert!(result.allowed().all_users());
    }

    #[rstest]
    fn denied_mention_stays_literal(descriptors: Vec<MentionDescriptor>) {
        let gate = permitting(vec![MentionPermission::User(UserId::new(1))]);

        let result = rewrite("hello @Alice", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "hello @Alice");
        assert!(result.rewritten().is_empty());
        assert!(!result.allowed().allows_user(UserId::new(2)));
    }

    #[rstest]
    fn specific_permission_only_covers_that_user(descriptors: Vec<MentionDescriptor>) {
        let gate = permitting(vec![MentionPermission::User(UserId::new(2))]);

        let result = rewrite("@Alice @Ali", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "<@2> @Ali");
        assert!(result.allowed().allows_user(UserId::new(2)));
        assert!(!result.allowed().allows_user(UserId::new(1)));
    }

    #[rstest]
    fn mentionable_role_and_channel_are_rewritten(descriptors: Vec<MentionDescriptor>) {
        let gate = permitting(vec![MentionPermission::MentionableRoles]);

        let result = rewrite("@staff see #general", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "<@&3> see <#4>");
        assert!(result.allowed().allows_role(RoleId::new(3)));
    }

    #[rstest]
    fn partial_name_is_not_rewritten(descriptors: Vec<MentionDescriptor>) {
        let gate = permitting(vec![MentionPermission::AllUsers]);

        let result = rewrite("@Alicent", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "@Alicent");
    }

    #[rstest]
    fn everyone_is_defused_without_permission(descriptors: Vec<MentionDescriptor>) {
        let gate = permitting(vec![MentionPermission::AllUsers]);

        let result = rewrite("@everyone look", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "@\u{200B}everyone look");
        assert!(!result.allowed().everyone());
    }

    #[rstest]
    fn everyone_passes_with_toggle_and_permission(descriptors: Vec<MentionDescriptor>) {
        let toggles = MentionToggles {
            everyone: true,
            ..MentionToggles::default()
        };
        let gate = MentionGate::new(toggles, |permission: &MentionPermission| {
            *permission == MentionPermission::Everyone
        });

        let result = rewrite("@here now", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "@here now");
        assert!(result.allowed().everyone());
    }

    #[rstest]
    fn denied_user_does_not_hide_role_with_same_name() {
        let descriptors = vec![
            MentionDescriptor::user(UserId::new(5), "Staff"),
            MentionDescriptor::role(RoleId::new(3), "Staff", false),
        ];
        let gate = permitting(vec![MentionPermission::AllRoles]);

        let result = rewrite("ping @Staff", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "ping <@&3>");
        assert!(result.allowed().allows_role(RoleId::new(3)));
    }

    #[rstest]
    fn duplicate_names_resolve_to_the_permitted_user() {
        let descriptors = vec![
            MentionDescriptor::user(UserId::new(1), "Alex"),
            MentionDescriptor::user(UserId::new(2), "Alex"),
        ];
        let gate = permitting(vec![MentionPermission::User(UserId::new(2))]);

        let result = rewrite("hi @Alex", &descriptors, &gate).expect("rewrite");

        assert_eq!(result.content(), "hi <@2>");
        assert!(result.allowed().allows_user(UserId::new(2)));
        assert!(!result.allowed().allows_user(UserId::new(1)));
    }

    #[rstest]
    fn empty_cache_leaves_text_untouched() {
        let gate = permitting(vec![MentionPermission::AllUsers]);

        let result = rewrite("hello @Alice", &[], &gate).expect("rewrite");

        assert_eq!(result.content(), "hello @Alice");
    }
}

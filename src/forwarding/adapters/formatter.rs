//! `%name%` placeholder substitution.

use crate::forwarding::domain::{MessageTemplate, Placeholders, RenderedMessage};
use crate::forwarding::ports::{FormatResult, MessageFormatter};
use std::borrow::Cow;

/// Formatter replacing `%name%` tokens with placeholder values.
///
/// Tokens without a registered value are left as written, so a literal
/// `100%` or an unknown `%token%` survives formatting. Scanning resumes after
/// the closing `%` of an unknown token.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentPlaceholderFormatter;

impl PercentPlaceholderFormatter {
    /// Creates the formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn substitute(text: &str, placeholders: &Placeholders) -> String {
        let mut output = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('%') {
            output.push_str(rest.get(..open).unwrap_or_default());
            let after_open = rest.get(open + 1..).unwrap_or_default();
            let Some((name, after_close)) = after_open
                .split_once('%')
                .filter(|(candidate, _)| is_placeholder_name(candidate))
            else {
                output.push('%');
                rest = after_open;
                continue;
            };
            let value = placeholders
                .resolve(name)
                .map_or_else(|| format!("%{name}%"), Cow::into_owned);
            output.push_str(&value);
            rest = after_close;
        }
        output.push_str(rest);
        output
    }

    fn substitute_optional(text: Option<&str>, placeholders: &Placeholders) -> Option<String> {
        text.map(|value| Self::substitute(value, placeholders))
            .filter(|value| !value.trim().is_empty())
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '_')
}

impl MessageFormatter for PercentPlaceholderFormatter {
    fn format(
        &self,
        template: &MessageTemplate,
        placeholders: &Placeholders,
    ) -> FormatResult<Option<RenderedMessage>> {
        let content = Self::substitute(template.content(), placeholders);
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(RenderedMessage {
            content,
            webhook_username: Self::substitute_optional(template.webhook_username(), placeholders),
            webhook_avatar_url: Self::substitute_optional(
                template.webhook_avatar_url(),
                placeholders,
            ),
        }))
    }
}

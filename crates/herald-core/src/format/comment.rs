//! Comment formatting arm.
//!
//! Comments get a truncated body preview and two detection passes over the
//! raw body text: agent mentions (case-sensitive, registry order) and
//! orchestration keywords (case-insensitive via upper-casing). The keyword
//! pass runs second and overrides the agent title and color while keeping
//! the agent field.

use super::{non_empty, EmbedParts, ALERT_COLOR, BRAND_COLOR};
use crate::event::CommentPayload;
use crate::message::EmbedField;
use crate::registry::AgentRegistry;

/// Maximum number of characters of comment body shown in the embed.
pub const COMMENT_PREVIEW_LIMIT: usize = 300;

/// Keywords that mark a comment as orchestration chatter. Stored upper-case;
/// the body is upper-cased before matching.
const ORCHESTRATION_KEYWORDS: [&str; 4] =
    ["ORCHESTRATING", "PHASE", "VERIFICATION", "STRATEGIC ANALYSIS"];

pub(super) fn build(
    comment: &CommentPayload,
    action: &str,
    type_emoji: &str,
    action_emoji: &str,
    registry: &AgentRegistry,
) -> EmbedParts {
    let body = comment.body.as_deref().unwrap_or("");

    let mut description = match non_empty(Some(body)) {
        Some(text) => truncate_chars(text, COMMENT_PREVIEW_LIMIT),
        None => "No content".to_string(),
    };
    if let Some(user) = comment
        .user
        .as_ref()
        .and_then(|user| non_empty(user.name.as_deref()))
    {
        description = format!("**{user}:** {description}");
    }

    let mut title = format!("{type_emoji} {action_emoji} Comment {action}d");
    let mut color = BRAND_COLOR;
    let mut fields = Vec::new();

    if let Some(agent) = registry.detect(body) {
        color = agent.color;
        title = format!("{} {} Agent Activity: {}", agent.emoji, action_emoji, agent.name);
        fields.push(EmbedField::new(
            "Agent Detected",
            registry.info_block(agent.name),
            false,
        ));
    }

    let upper_body = body.to_uppercase();
    if ORCHESTRATION_KEYWORDS
        .iter()
        .any(|keyword| upper_body.contains(keyword))
    {
        color = ALERT_COLOR;
        title = format!("🧠 {action_emoji} Orchestration Update");
    }

    EmbedParts {
        title,
        description,
        color,
        url: comment
            .issue
            .as_ref()
            .and_then(|issue| issue.url.clone())
            .unwrap_or_default(),
        fields,
    }
}

/// Hard character-boundary truncation, no ellipsis.
fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;

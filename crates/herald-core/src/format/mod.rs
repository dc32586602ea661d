//! Event-to-embed formatting.
//!
//! [`format_event`] is the heart of the relay: a pure function from an
//! inbound [`WebhookEvent`] and the read-only [`AgentRegistry`] to the
//! Discord payload. Each entity type has its own arm (issues and comments
//! carry enough branching to live in their own modules); everything else
//! flows through a generic arm that still renders a title line.
//!
//! No I/O, no clock reads: the embed timestamp is the event's own
//! `createdAt`, passed through verbatim.

use crate::event::{EventData, ProjectPayload, WebhookEvent};
use crate::message::{Embed, EmbedField, EmbedFooter, OutgoingMessage};
use crate::registry::AgentRegistry;

mod comment;
mod issue;

pub use comment::COMMENT_PREVIEW_LIMIT;

// ============================================================================
// Shared constants
// ============================================================================

/// Default embed accent color.
pub const BRAND_COLOR: u32 = 0x5E6AD2;

/// Accent color for orchestration activity.
pub const ALERT_COLOR: u32 = 0xFF6B6B;

/// Marker token the orchestrator leaves in issue descriptions.
pub const ORCHESTRATION_MARKER: &str = "MENDICANT_BIAS";

const FOOTER_TEXT: &str = "Linear Webhook • MENDICANT_BIAS Orchestration";
const FOOTER_ICON_URL: &str = "https://asset.brandfetch.io/idarKiKkI-/idYW07k6CS.png";

fn type_emoji(event_type: &str) -> &'static str {
    match event_type {
        "Issue" => "📋",
        "Comment" => "💬",
        "Project" => "📊",
        "IssueLabel" => "🏷️",
        _ => "📌",
    }
}

fn action_emoji(action: &str) -> &'static str {
    match action {
        "create" => "✨",
        "update" => "🔄",
        "remove" => "🗑️",
        _ => "•",
    }
}

/// Treat the empty string like an absent value, mirroring the tracker's
/// habit of sending either omitted or empty fields interchangeably.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Intermediate output of a formatting arm, before final embed assembly.
pub(crate) struct EmbedParts {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub url: String,
    pub fields: Vec<EmbedField>,
}

// ============================================================================
// format_event
// ============================================================================

/// Transform one inbound event into the Discord payload.
pub fn format_event(event: &WebhookEvent, registry: &AgentRegistry) -> OutgoingMessage {
    let action = event.action.as_deref().unwrap_or("");
    let type_tag = event.event_type.as_deref().unwrap_or("");
    let type_emoji = type_emoji(type_tag);
    let action_emoji = action_emoji(action);

    let parts = match &event.data {
        EventData::Issue(issue) => issue::build(issue, action, type_emoji, action_emoji, registry),
        EventData::Comment(comment) => {
            comment::build(comment, action, type_emoji, action_emoji, registry)
        }
        EventData::Project(project) => build_project(project, action, type_emoji, action_emoji),
        EventData::Other(_) => EmbedParts {
            title: format!("{type_emoji} {action_emoji} {action}"),
            description: String::new(),
            color: BRAND_COLOR,
            url: String::new(),
            fields: Vec::new(),
        },
    };

    let url = non_empty(Some(parts.url.as_str())).map(str::to_owned);

    OutgoingMessage::single(Embed {
        title: parts.title,
        description: parts.description,
        color: parts.color,
        url,
        timestamp: event.created_at.clone(),
        footer: EmbedFooter {
            text: FOOTER_TEXT.to_string(),
            icon_url: FOOTER_ICON_URL.to_string(),
        },
        fields: parts.fields,
    })
}

fn build_project(
    project: &ProjectPayload,
    action: &str,
    type_emoji: &str,
    action_emoji: &str,
) -> EmbedParts {
    EmbedParts {
        title: format!("{type_emoji} {action_emoji} Project {action}d"),
        description: non_empty(project.name.as_deref())
            .unwrap_or("No name")
            .to_string(),
        color: BRAND_COLOR,
        url: project.url.clone().unwrap_or_default(),
        fields: Vec::new(),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

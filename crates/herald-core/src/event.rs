//! Inbound webhook event model.
//!
//! Linear delivers a JSON envelope of the form
//! `{ "action": ..., "type": ..., "data": ..., "createdAt": ... }` where the
//! shape of `data` depends on `type`. This module parses the envelope into
//! [`WebhookEvent`] with a typed [`EventData`] union so that the formatter can
//! match exhaustively instead of probing a loose map.
//!
//! Every payload field is optional: Linear omits fields freely depending on
//! the entity and the action, and the formatter treats absence as "skip the
//! corresponding output".

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while decoding an inbound webhook body.
#[derive(Debug, Error)]
pub enum EventError {
    /// The body is not valid JSON or a payload field has the wrong shape.
    #[error("invalid event payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// The envelope names a structured entity type but carries no `data`.
    #[error("missing data payload for {event_type} event")]
    MissingData { event_type: String },
}

// ============================================================================
// Envelope
// ============================================================================

/// A single webhook delivery, decoded from the raw request body.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Action verb as sent by the tracker (`create`, `update`, `remove`).
    pub action: Option<String>,
    /// Entity type tag as sent by the tracker (`Issue`, `Comment`, ...).
    pub event_type: Option<String>,
    /// Event creation time, passed through verbatim into the outbound embed.
    pub created_at: Option<String>,
    /// The entity payload, shaped by `event_type`.
    pub data: EventData,
}

/// Wire shape of the envelope before `data` is resolved against the type tag.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    action: Option<String>,
    #[serde(default, rename = "type")]
    event_type: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<String>,
}

impl WebhookEvent {
    /// Decode an event from the raw request body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidPayload`] when the body is not a JSON
    /// object or a `data` field does not match the shape its type tag
    /// demands, and [`EventError::MissingData`] when a structured type tag
    /// arrives without any `data` at all.
    pub fn from_slice(raw: &[u8]) -> Result<Self, EventError> {
        let envelope: RawEvent = serde_json::from_slice(raw)?;
        let data = EventData::from_parts(envelope.event_type.as_deref(), envelope.data)?;

        Ok(Self {
            action: envelope.action,
            event_type: envelope.event_type,
            created_at: envelope.created_at,
            data,
        })
    }
}

// ============================================================================
// Entity payloads
// ============================================================================

/// The `data` payload, resolved against the envelope's type tag.
///
/// Tags without a structured shape (`IssueLabel` included) land in
/// [`EventData::Other`] and are formatted by the generic fallback arm.
#[derive(Debug, Clone)]
pub enum EventData {
    Issue(IssuePayload),
    Comment(CommentPayload),
    Project(ProjectPayload),
    Other(Value),
}

impl EventData {
    /// Resolve a raw `data` value against the envelope type tag.
    ///
    /// # Errors
    ///
    /// See [`WebhookEvent::from_slice`].
    pub fn from_parts(event_type: Option<&str>, data: Option<Value>) -> Result<Self, EventError> {
        match event_type {
            Some("Issue") => Ok(EventData::Issue(serde_json::from_value(required(
                data, "Issue",
            )?)?)),
            Some("Comment") => Ok(EventData::Comment(serde_json::from_value(required(
                data, "Comment",
            )?)?)),
            Some("Project") => Ok(EventData::Project(serde_json::from_value(required(
                data, "Project",
            )?)?)),
            _ => Ok(EventData::Other(data.unwrap_or(Value::Null))),
        }
    }
}

fn required(data: Option<Value>, event_type: &str) -> Result<Value, EventError> {
    data.ok_or_else(|| EventError::MissingData {
        event_type: event_type.to_string(),
    })
}

/// Issue entity fields used by the formatter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssuePayload {
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub state: Option<WorkflowState>,
    pub priority: Option<i64>,
    pub assignee: Option<NamedRef>,
    pub labels: Vec<LabelRef>,
    pub due_date: Option<String>,
    pub delegate: Option<NamedRef>,
    pub parent: Option<ParentRef>,
    pub project: Option<ProjectRef>,
    pub created_by: Option<NamedRef>,
    pub updated_by: Option<NamedRef>,
}

/// Comment entity fields used by the formatter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentPayload {
    pub body: Option<String>,
    pub user: Option<NamedRef>,
    pub issue: Option<IssueRef>,
}

/// Project entity fields used by the formatter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectPayload {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Workflow state reference embedded in an issue payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkflowState {
    pub name: Option<String>,
}

/// A person or agent reference carrying only a display name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedRef {
    pub name: Option<String>,
}

/// Label reference embedded in an issue payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelRef {
    pub name: Option<String>,
}

/// Parent issue reference for sub-tasks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParentRef {
    pub identifier: Option<String>,
    pub title: Option<String>,
}

/// Project reference embedded in an issue payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectRef {
    pub name: Option<String>,
}

/// Parent issue reference embedded in a comment payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueRef {
    pub url: Option<String>,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

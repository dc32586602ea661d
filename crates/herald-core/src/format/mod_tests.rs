//! Tests for event dispatch and final embed assembly.

use super::*;
use crate::event::{IssuePayload, ProjectPayload};
use serde_json::json;

// ============================================================================
// Helpers
// ============================================================================

fn registry() -> AgentRegistry {
    AgentRegistry::with_default_profiles()
}

fn event(action: &str, event_type: &str, data: EventData) -> WebhookEvent {
    WebhookEvent {
        action: Some(action.to_string()),
        event_type: Some(event_type.to_string()),
        created_at: Some("2025-01-15T10:30:00.000Z".to_string()),
        data,
    }
}

// ============================================================================
// Assembly tests
// ============================================================================

mod assembly_tests {
    use super::*;

    /// Every embed carries the static footer.
    #[test]
    fn test_footer_is_static() {
        let message = format_event(
            &event("create", "Issue", EventData::Issue(IssuePayload::default())),
            &registry(),
        );
        let embed = &message.embeds[0];

        assert_eq!(embed.footer.text, "Linear Webhook • MENDICANT_BIAS Orchestration");
        assert_eq!(
            embed.footer.icon_url,
            "https://asset.brandfetch.io/idarKiKkI-/idYW07k6CS.png"
        );
    }

    /// The event timestamp passes through verbatim; absence omits it.
    #[test]
    fn test_timestamp_passthrough() {
        let mut with_timestamp = event("create", "Issue", EventData::Issue(IssuePayload::default()));
        with_timestamp.created_at = Some("2024-12-31T23:59:59.999Z".to_string());
        let message = format_event(&with_timestamp, &registry());
        assert_eq!(
            message.embeds[0].timestamp.as_deref(),
            Some("2024-12-31T23:59:59.999Z")
        );

        let mut without_timestamp = with_timestamp.clone();
        without_timestamp.created_at = None;
        let message = format_event(&without_timestamp, &registry());
        assert!(message.embeds[0].timestamp.is_none());
    }

    /// An empty arm url is dropped from the embed instead of serialized
    /// as an empty string.
    #[test]
    fn test_empty_url_omitted() {
        let message = format_event(
            &event("create", "Issue", EventData::Issue(IssuePayload::default())),
            &registry(),
        );

        assert!(message.embeds[0].url.is_none());
    }

    /// A present url is carried into the embed.
    #[test]
    fn test_url_carried_through() {
        let issue = IssuePayload {
            url: Some("https://linear.app/team/issue/ORC-9".to_string()),
            ..Default::default()
        };
        let message = format_event(&event("create", "Issue", EventData::Issue(issue)), &registry());

        assert_eq!(
            message.embeds[0].url.as_deref(),
            Some("https://linear.app/team/issue/ORC-9")
        );
    }

    /// Formatting is deterministic: same input, same output.
    #[test]
    fn test_format_is_deterministic() {
        let issue = IssuePayload {
            identifier: Some("ORC-11".to_string()),
            title: Some("Deterministic output".to_string()),
            priority: Some(3),
            ..Default::default()
        };
        let event = event("update", "Issue", EventData::Issue(issue));

        let first = format_event(&event, &registry());
        let second = format_event(&event, &registry());

        assert_eq!(first, second);
    }

    /// Exactly one embed per event.
    #[test]
    fn test_single_embed_envelope() {
        let message = format_event(
            &event("remove", "Project", EventData::Project(ProjectPayload::default())),
            &registry(),
        );

        assert_eq!(message.embeds.len(), 1);
    }
}

// ============================================================================
// Project arm tests
// ============================================================================

mod project_tests {
    use super::*;

    /// Projects render name as description with their own emoji and url.
    #[test]
    fn test_project_event() {
        let project = ProjectPayload {
            name: Some("Orchestrator".to_string()),
            url: Some("https://linear.app/team/project/orc".to_string()),
        };
        let message = format_event(
            &event("update", "Project", EventData::Project(project)),
            &registry(),
        );
        let embed = &message.embeds[0];

        assert_eq!(embed.title, "📊 🔄 Project updated");
        assert_eq!(embed.description, "Orchestrator");
        assert_eq!(embed.color, BRAND_COLOR);
        assert_eq!(embed.url.as_deref(), Some("https://linear.app/team/project/orc"));
        assert!(embed.fields.is_empty());
    }

    /// A nameless project renders the placeholder description.
    #[test]
    fn test_project_without_name() {
        let message = format_event(
            &event("create", "Project", EventData::Project(ProjectPayload::default())),
            &registry(),
        );

        assert_eq!(message.embeds[0].description, "No name");
    }
}

// ============================================================================
// Generic arm tests
// ============================================================================

mod generic_arm_tests {
    use super::*;

    /// IssueLabel keeps its own type emoji through the generic arm.
    #[test]
    fn test_issue_label_event() {
        let message = format_event(
            &event("create", "IssueLabel", EventData::Other(json!({"name": "bug"}))),
            &registry(),
        );
        let embed = &message.embeds[0];

        assert_eq!(embed.title, "🏷️ ✨ create");
        assert_eq!(embed.description, "");
        assert_eq!(embed.color, BRAND_COLOR);
        assert!(embed.fields.is_empty());
        assert!(embed.url.is_none());
    }

    /// Unknown types fall back to the pin emoji and the raw action string.
    #[test]
    fn test_unknown_type_event() {
        let message = format_event(
            &event("archive", "Cycle", EventData::Other(json!({}))),
            &registry(),
        );

        assert_eq!(message.embeds[0].title, "📌 • archive");
    }

    /// Unrecognized actions fall back to the bullet emoji everywhere.
    #[test]
    fn test_unknown_action_emoji() {
        let issue = IssuePayload {
            identifier: Some("ORC-2".to_string()),
            ..Default::default()
        };
        let message = format_event(&event("restore", "Issue", EventData::Issue(issue)), &registry());

        assert_eq!(message.embeds[0].title, "📋 • Issue restored: ORC-2");
    }

    /// A fully empty envelope still formats.
    #[test]
    fn test_empty_envelope_formats() {
        let bare = WebhookEvent {
            action: None,
            event_type: None,
            created_at: None,
            data: EventData::Other(serde_json::Value::Null),
        };

        let message = format_event(&bare, &registry());
        let embed = &message.embeds[0];

        assert_eq!(embed.title, "📌 • ");
        assert_eq!(embed.description, "");
        assert!(embed.timestamp.is_none());
    }
}

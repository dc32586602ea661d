//! Issue formatting arm.
//!
//! Issues carry the richest payload: a status/priority/assignee block, the
//! delegate attribution, label partitioning, and the orchestration
//! detection that retitles the embed and switches it to the alert color.

use chrono::{DateTime, Datelike, NaiveDate};

use super::{non_empty, EmbedParts, ALERT_COLOR, BRAND_COLOR, ORCHESTRATION_MARKER};
use crate::event::{IssuePayload, LabelRef};
use crate::message::EmbedField;
use crate::registry::AgentRegistry;

/// Label names the orchestrator uses to tag automated workflow activity.
/// Rendered with a 🔶 prefix and listed before ordinary labels.
const ORCHESTRATION_LABELS: [&str; 5] = [
    "speculative-execution",
    "emergent-collaboration",
    "strategy-shift",
    "failure-pattern",
    "adaptive-selection",
];

const PRIORITY_LABELS: [&str; 5] = ["None", "🔥 Urgent", "⬆️ High", "➡️ Normal", "⬇️ Low"];

pub(super) fn build(
    issue: &IssuePayload,
    action: &str,
    type_emoji: &str,
    action_emoji: &str,
    registry: &AgentRegistry,
) -> EmbedParts {
    let identifier = issue.identifier.as_deref().unwrap_or("");
    let description_text = issue.description.as_deref().unwrap_or("");

    let delegate_name = issue
        .delegate
        .as_ref()
        .and_then(|delegate| non_empty(delegate.name.as_deref()));
    let delegate_profile = delegate_name.and_then(|name| registry.get(name));

    // Orchestration: the marker token in the description, or a delegate
    // drawn from the agent roster.
    let is_orchestration =
        description_text.contains(ORCHESTRATION_MARKER) || delegate_profile.is_some();

    let title = if is_orchestration {
        match detect_phase(issue) {
            Some((phase, phase_emoji)) => {
                format!("{phase_emoji} {action_emoji} {phase}: {identifier}")
            }
            None => format!("🧠 {action_emoji} Orchestration: {identifier}"),
        }
    } else {
        format!("{type_emoji} {action_emoji} Issue {action}d: {identifier}")
    };

    let mut color = if is_orchestration {
        ALERT_COLOR
    } else {
        BRAND_COLOR
    };

    let mut fields = Vec::new();

    if let Some(state_name) = issue
        .state
        .as_ref()
        .and_then(|state| non_empty(state.name.as_deref()))
    {
        fields.push(EmbedField::new(
            "Status",
            format!("{} {}", status_emoji(state_name), state_name),
            true,
        ));
    }

    if let Some(priority) = issue.priority {
        fields.push(EmbedField::new("Priority", priority_label(priority), true));
    }

    if let Some(name) = issue
        .assignee
        .as_ref()
        .and_then(|assignee| non_empty(assignee.name.as_deref()))
    {
        fields.push(EmbedField::new("Assignee", format!("👤 {name}"), true));
    }

    if let Some(name) = delegate_name {
        fields.push(EmbedField::new(
            "Agent Assigned",
            registry.info_block(name),
            false,
        ));
        // A registered agent's color outranks the orchestration alert.
        if let Some(profile) = delegate_profile {
            color = profile.color;
        }
    }

    if let Some(summary) = label_summary(&issue.labels) {
        fields.push(EmbedField::new("Labels", summary, false));
    }

    if let Some(raw) = non_empty(issue.due_date.as_deref()) {
        fields.push(EmbedField::new(
            "Due Date",
            format!("📅 {}", render_due_date(raw)),
            true,
        ));
    }

    match action {
        "update" => {
            if let Some(name) = issue
                .updated_by
                .as_ref()
                .and_then(|by| non_empty(by.name.as_deref()))
            {
                fields.push(EmbedField::new("Updated By", format!("✏️ {name}"), true));
            }
        }
        "create" => {
            if let Some(name) = issue
                .created_by
                .as_ref()
                .and_then(|by| non_empty(by.name.as_deref()))
            {
                fields.push(EmbedField::new("Created By", format!("✨ {name}"), true));
            }
        }
        _ => {}
    }

    if let Some(parent_id) = issue
        .parent
        .as_ref()
        .and_then(|parent| non_empty(parent.identifier.as_deref()))
    {
        let parent_title = issue
            .parent
            .as_ref()
            .and_then(|parent| non_empty(parent.title.as_deref()))
            .unwrap_or("No title");
        fields.push(EmbedField::new(
            "Parent Issue",
            format!("↗️ {parent_id}: {parent_title}"),
            false,
        ));
    }

    if let Some(name) = issue
        .project
        .as_ref()
        .and_then(|project| non_empty(project.name.as_deref()))
    {
        fields.push(EmbedField::new("Project", format!("📊 {name}"), true));
    }

    EmbedParts {
        title,
        description: format!(
            "**{}**",
            non_empty(issue.title.as_deref()).unwrap_or("No title")
        ),
        color,
        url: issue.url.clone().unwrap_or_default(),
        fields,
    }
}

/// Classify the workflow phase from the issue text, first match wins.
///
/// The scan runs over `title + ' ' + description`, lowercased, so phase
/// words match regardless of casing or which of the two fields carries
/// them.
fn detect_phase(issue: &IssuePayload) -> Option<(&'static str, &'static str)> {
    let title = issue.title.as_deref().unwrap_or("").to_lowercase();
    let description = issue.description.as_deref().unwrap_or("").to_lowercase();
    let combined = format!("{title} {description}");

    if combined.contains("planning") || combined.contains("strategic analysis") {
        Some(("Planning", "📋"))
    } else if combined.contains("implementation") || combined.contains("coding") {
        Some(("Implementation", "⚙️"))
    } else if combined.contains("verification") || combined.contains("testing") {
        Some(("Verification", "✅"))
    } else if combined.contains("deployment") || combined.contains("release") {
        Some(("Deployment", "🚀"))
    } else if combined.contains("iteration") || combined.contains("fix") {
        Some(("Iteration", "🔄"))
    } else {
        None
    }
}

fn status_emoji(state_name: &str) -> &'static str {
    match state_name {
        "Todo" => "⏳",
        "In Progress" => "🔄",
        "Done" => "✅",
        "Canceled" => "❌",
        "Backlog" => "📝",
        _ => "•",
    }
}

/// Bounds-checked lookup into the fixed priority scale.
fn priority_label(priority: i64) -> &'static str {
    usize::try_from(priority)
        .ok()
        .and_then(|index| PRIORITY_LABELS.get(index))
        .copied()
        .unwrap_or("Unknown")
}

/// Partition labels into orchestration tags and ordinary ones, tags first.
fn label_summary(labels: &[LabelRef]) -> Option<String> {
    if labels.is_empty() {
        return None;
    }

    let mut special = Vec::new();
    let mut regular = Vec::new();
    for label in labels {
        let name = label.name.as_deref().unwrap_or("");
        if ORCHESTRATION_LABELS.contains(&name) {
            special.push(format!("🔶 {name}"));
        } else {
            regular.push(name.to_string());
        }
    }

    let joined = special
        .into_iter()
        .chain(regular)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Render a due date as `M/D/YYYY`; unparsable values pass through raw.
fn render_due_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match date {
        Some(date) => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        None => raw.to_string(),
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;

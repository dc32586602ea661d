//! Outbound Discord message types.
//!
//! A formatted event becomes one [`OutgoingMessage`] carrying a single
//! embed. Serialization follows Discord's webhook-execution payload:
//! optional parts (`url`, `timestamp`, `fields`) are omitted from the JSON
//! entirely rather than sent as `null` or an empty list.

use serde::{Deserialize, Serialize};

/// The payload posted to the Discord webhook URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub embeds: Vec<Embed>,
}

impl OutgoingMessage {
    /// Wrap a single embed, the only shape this relay produces.
    pub fn single(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
        }
    }
}

/// One rich-message card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    /// 24-bit RGB color of the card's accent stripe.
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Event timestamp, passed through verbatim from the inbound envelope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub footer: EmbedFooter,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

/// Static footer attached to every embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

/// A name/value pair rendered inside the embed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

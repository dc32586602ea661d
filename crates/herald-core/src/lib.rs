//! # Herald Core
//!
//! Core business logic for the Herald webhook relay.
//!
//! This crate contains the domain logic for the Linear-to-Discord bridge:
//! verifying webhook signatures, decoding tracker events, and formatting
//! them into Discord embed payloads.
//!
//! ## Architecture
//!
//! The core is deliberately free of I/O:
//! - [`SignatureVerifier`] checks the HMAC of a raw request body
//! - [`WebhookEvent`] decodes the tracker payload into typed event data
//! - [`format_event`] is a pure function from event to outgoing message
//! - [`AgentRegistry`] is immutable after construction and injected by
//!   the hosting service
//!
//! Transport, configuration, and delivery live in the API crate.
//!
//! ## Usage
//!
//! ```rust
//! use herald_core::{format_event, AgentRegistry, WebhookEvent};
//!
//! let raw = br#"{"action":"create","type":"Issue","data":{"identifier":"ORC-1"}}"#;
//! let event = WebhookEvent::from_slice(raw).unwrap();
//! let message = format_event(&event, &AgentRegistry::with_default_profiles());
//! assert_eq!(message.embeds.len(), 1);
//! ```

pub mod event;
pub mod format;
pub mod message;
pub mod registry;
pub mod signature;

// Re-export the types most callers need
pub use event::{EventData, EventError, WebhookEvent};
pub use format::{format_event, ALERT_COLOR, BRAND_COLOR, COMMENT_PREVIEW_LIMIT};
pub use message::{Embed, EmbedField, EmbedFooter, OutgoingMessage};
pub use registry::{AgentProfile, AgentRegistry};
pub use signature::SignatureVerifier;

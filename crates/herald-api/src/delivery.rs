//! # Message Delivery Module
//!
//! Forwards formatted messages to the configured Discord webhook.
//!
//! Delivery hides behind the [`MessageDeliverer`] trait so the HTTP layer
//! never touches a concrete transport: production wires in
//! [`DiscordForwarder`], an unconfigured deployment gets [`NullDeliverer`],
//! and tests inject recording doubles.
//!
//! The relay keeps no retry queue. A failed delivery surfaces as an error
//! from the intake endpoint and the sender's redelivery policy takes over.

use async_trait::async_trait;
use herald_core::OutgoingMessage;
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

/// Upper bound on one delivery attempt, connection setup included.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Errors
// ============================================================================

/// Failures while forwarding a message downstream
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The request could not be sent or timed out
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Discord answered with a non-success status
    #[error("Discord rejected the message: HTTP {status}")]
    Rejected { status: u16 },
}

impl DeliveryError {
    /// Whether a retry of the same message could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            Self::Rejected { status } => *status == 429 || *status >= 500,
        }
    }
}

// ============================================================================
// Deliverer trait
// ============================================================================

/// Transport for forwarding formatted messages downstream
#[async_trait]
pub trait MessageDeliverer: Send + Sync {
    /// Deliver one message to the configured target.
    async fn deliver(&self, message: &OutgoingMessage) -> Result<(), DeliveryError>;
}

// ============================================================================
// Discord forwarder
// ============================================================================

/// Delivers messages to a Discord webhook endpoint
pub struct DiscordForwarder {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordForwarder {
    /// Build a forwarder targeting `webhook_url`.
    pub fn new(webhook_url: String) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            webhook_url,
        })
    }
}

#[async_trait]
impl MessageDeliverer for DiscordForwarder {
    async fn deliver(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                body = %body,
                "Discord rejected the message"
            );
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
            });
        }

        info!(status = status.as_u16(), "Message forwarded to Discord");
        Ok(())
    }
}

impl fmt::Debug for DiscordForwarder {
    // The webhook URL embeds a Discord token.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordForwarder")
            .field("webhook_url", &"<REDACTED>")
            .finish()
    }
}

// ============================================================================
// Null deliverer
// ============================================================================

/// Drop-everything deliverer used when no forward URL is configured
///
/// Accepts every message so the intake path still acknowledges webhooks,
/// and warns about the drop.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDeliverer;

#[async_trait]
impl MessageDeliverer for NullDeliverer {
    async fn deliver(&self, _message: &OutgoingMessage) -> Result<(), DeliveryError> {
        warn!("Discord webhook URL not configured, skipping send");
        Ok(())
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;

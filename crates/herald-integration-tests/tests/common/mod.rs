//! Common test utilities for herald-api integration tests
//!
//! This module provides:
//! - A mock MessageDeliverer that records forwarded messages
//! - Helper functions for creating test application state
//! - Signed Linear webhook payload builders

use axum::http::{HeaderMap, HeaderValue};
use herald_api::{AppState, DeliveryError, MessageDeliverer, ServiceConfig};
use herald_core::{AgentRegistry, OutgoingMessage, SignatureVerifier};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::{Arc, Mutex};

/// Signing secret shared by every signed-request helper in this module.
#[allow(dead_code)]
pub const SECRET: &str = "lin_wh_integration_secret";

// ============================================================================
// Mock Message Deliverer
// ============================================================================

/// Mock deliverer that records messages instead of posting them to Discord
#[derive(Clone)]
#[allow(dead_code)]
pub struct MockDeliverer {
    deliver_calls: Arc<Mutex<Vec<OutgoingMessage>>>,
    fail_status: Arc<Mutex<Option<u16>>>,
}

impl MockDeliverer {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            deliver_calls: Arc::new(Mutex::new(Vec::new())),
            fail_status: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every subsequent deliver call fail as a rejection with `status`.
    #[allow(dead_code)]
    pub fn set_error(&self, status: u16) {
        *self.fail_status.lock().unwrap() = Some(status);
    }

    #[allow(dead_code)]
    pub fn get_calls(&self) -> Vec<OutgoingMessage> {
        self.deliver_calls.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.deliver_calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl MessageDeliverer for MockDeliverer {
    async fn deliver(&self, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        // Record the call
        self.deliver_calls.lock().unwrap().push(message.clone());

        match *self.fail_status.lock().unwrap() {
            Some(status) => Err(DeliveryError::Rejected { status }),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Test Fixture Builders
// ============================================================================

/// Create a test AppState with signature verification enabled
#[allow(dead_code)]
pub fn create_test_app_state() -> AppState {
    create_test_app_state_with_deliverer(Arc::new(MockDeliverer::new()))
}

/// Create a test AppState around a specific deliverer
#[allow(dead_code)]
pub fn create_test_app_state_with_deliverer(deliverer: Arc<dyn MessageDeliverer>) -> AppState {
    let mut config = ServiceConfig::default();
    config.webhook.signing_secret = Some(SECRET.to_string());
    config.webhook.forward_url =
        Some("https://discord.example/api/webhooks/1/token".to_string());
    create_app_state_with_config(config, deliverer)
}

/// Create a test AppState from an explicit config
#[allow(dead_code)]
pub fn create_app_state_with_config(
    config: ServiceConfig,
    deliverer: Arc<dyn MessageDeliverer>,
) -> AppState {
    let verifier = Arc::new(SignatureVerifier::new(config.webhook.signing_secret.clone()));
    let registry = Arc::new(AgentRegistry::with_default_profiles());
    AppState::new(config, verifier, registry, deliverer)
}

/// Read a response body as JSON
#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Hex-encode the HMAC-SHA256 of `body` under `secret`
#[allow(dead_code)]
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Create webhook headers carrying a valid signature for `body`
#[allow(dead_code)]
pub fn signed_webhook_headers(body: &[u8]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert(
        "linear-signature",
        HeaderValue::from_str(&sign(SECRET, body)).unwrap(),
    );
    headers
}

// ============================================================================
// Event Payload Builders
// ============================================================================

/// Issue event payload in the shape Linear posts
#[allow(dead_code)]
pub fn issue_event_body(action: &str, identifier: &str, title: &str) -> Vec<u8> {
    serde_json::json!({
        "action": action,
        "type": "Issue",
        "createdAt": "2025-01-15T10:30:00.000Z",
        "data": {
            "identifier": identifier,
            "title": title,
            "url": format!("https://linear.app/orchestrator/issue/{identifier}"),
            "state": { "name": "Todo" },
            "priority": 2
        }
    })
    .to_string()
    .into_bytes()
}

/// Comment event payload carrying the given author and body text
#[allow(dead_code)]
pub fn comment_event_body(author: &str, text: &str) -> Vec<u8> {
    serde_json::json!({
        "action": "create",
        "type": "Comment",
        "createdAt": "2025-01-15T10:30:00.000Z",
        "data": {
            "body": text,
            "user": { "name": author },
            "issue": { "url": "https://linear.app/orchestrator/issue/ORC-7" }
        }
    })
    .to_string()
    .into_bytes()
}

/// Project event payload
#[allow(dead_code)]
pub fn project_event_body(action: &str, name: &str) -> Vec<u8> {
    serde_json::json!({
        "action": action,
        "type": "Project",
        "createdAt": "2025-01-15T10:30:00.000Z",
        "data": {
            "name": name,
            "url": "https://linear.app/orchestrator/project/overview"
        }
    })
    .to_string()
    .into_bytes()
}

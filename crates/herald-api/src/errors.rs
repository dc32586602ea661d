//! Error types for the HTTP service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use herald_core::EventError;
use tracing::{error, warn};

use crate::delivery::DeliveryError;

/// Webhook handler errors with HTTP status code mapping
///
/// Inbound deliveries either fail authentication or fail somewhere past it,
/// and the two classes map to fixed responses:
///
/// - `401 Unauthorized`: the request carried no signature header, or the
///   signature did not match the raw body digest
/// - `500 Internal Server Error`: everything after authentication (payload
///   decoding, downstream delivery)
///
/// # Security Considerations
///
/// Response bodies carry a fixed message per class and never echo request
/// content. Details are logged server-side with the request's correlation ID.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Request arrived without a `linear-signature` header
    ///
    /// Maps to: `401 Unauthorized`
    ///
    /// Rejected before the open-mode check, so an unsigned request is
    /// refused even when no secret is configured.
    #[error("No signature provided")]
    MissingSignature,

    /// Signature header did not match the digest of the raw body
    ///
    /// Maps to: `401 Unauthorized`
    ///
    /// Common causes:
    /// - Mismatched secret between Linear and this service
    /// - A proxy rewriting the body before it reaches intake
    #[error("Invalid signature")]
    InvalidSignature,

    /// Request body failed to decode into a webhook event
    ///
    /// Maps to: `500 Internal Server Error`
    ///
    /// The signature already proved the sender holds the secret, so a
    /// malformed body is a contract drift between Linear and this service
    /// rather than client error.
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] EventError),

    /// Forwarding the formatted message downstream failed
    ///
    /// Maps to: `500 Internal Server Error`
    ///
    /// The relay is stateless and keeps no retry queue; surfacing the
    /// failure lets the sender's own retry policy drive redelivery.
    #[error("Delivery failed: {0}")]
    DeliveryFailed(#[from] DeliveryError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingSignature => {
                warn!("Rejected webhook without signature header");
                (StatusCode::UNAUTHORIZED, "No signature provided")
            }
            Self::InvalidSignature => {
                warn!("Rejected webhook with invalid signature");
                (StatusCode::UNAUTHORIZED, "Invalid signature")
            }
            Self::InvalidPayload(ref e) => {
                error!(error = %e, "Failed to decode webhook payload");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::DeliveryFailed(ref e) => {
                error!(
                    error = %e,
                    transient = e.is_transient(),
                    "Failed to forward message to Discord"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = serde_json::json!({ "error": message });

        (status, Json(body)).into_response()
    }
}

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

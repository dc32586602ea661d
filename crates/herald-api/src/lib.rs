//! # Herald HTTP Service
//!
//! HTTP server for receiving Linear webhooks and relaying them to Discord.
//!
//! This service provides:
//! - Webhook intake endpoint with signature verification over the raw body
//! - Status endpoint reporting configuration presence (never values)
//! - Outbound delivery to a configured Discord webhook
//!
//! The pipeline is strictly verify, decode, format, forward: nothing is
//! persisted and nothing is retried here.

pub mod config;
pub mod delivery;
pub mod errors;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use herald_core::{format_event, AgentRegistry, SignatureVerifier, WebhookEvent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, instrument, warn};

pub use config::{LoggingConfig, ServerConfig, ServiceConfig, WebhookConfig};
pub use delivery::{DeliveryError, DiscordForwarder, MessageDeliverer, NullDeliverer};
pub use errors::{ConfigError, ServiceError, WebhookError};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration for the service
    pub config: ServiceConfig,

    /// Verifier for inbound webhook signatures
    pub verifier: Arc<SignatureVerifier>,

    /// Agent roster consulted during formatting
    pub registry: Arc<AgentRegistry>,

    /// Transport for outbound messages
    pub deliverer: Arc<dyn MessageDeliverer>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: ServiceConfig,
        verifier: Arc<SignatureVerifier>,
        registry: Arc<AgentRegistry>,
        deliverer: Arc<dyn MessageDeliverer>,
    ) -> Self {
        Self {
            config,
            verifier,
            registry,
            deliverer,
        }
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create HTTP router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_status))
        .route("/webhook", post(handle_webhook))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_logging_middleware))
                .into_inner(),
        )
        .with_state(state)
}

/// Start HTTP server
///
/// Builds the verifier, agent roster, and delivery client from `config`,
/// then serves until SIGINT or SIGTERM.
pub async fn start_server(config: ServiceConfig) -> Result<(), ServiceError> {
    let verifier = Arc::new(SignatureVerifier::new(config.webhook.signing_secret.clone()));
    let registry = Arc::new(AgentRegistry::with_default_profiles());

    let deliverer: Arc<dyn MessageDeliverer> = match &config.webhook.forward_url {
        Some(url) if !url.is_empty() => {
            let forwarder = DiscordForwarder::new(url.clone()).map_err(|e| {
                ServiceError::Configuration(ConfigError::Invalid {
                    message: format!("Failed to initialize delivery client: {}", e),
                })
            })?;
            Arc::new(forwarder)
        }
        _ => {
            warn!("No Discord webhook URL configured; events will be acknowledged but not forwarded");
            Arc::new(NullDeliverer)
        }
    };

    let state = AppState::new(config.clone(), verifier, registry, deliverer);
    let app = create_router(state);

    let address = format!("{}:{}", config.server.host, config.server.port);
    let listener =
        tokio::net::TcpListener::bind(&address)
            .await
            .map_err(|e| ServiceError::BindFailed {
                address: address.clone(),
                message: e.to_string(),
            })?;

    info!("Starting HTTP server on {}", address);

    let shutdown_signal = async {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C signal handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
            },
            _ = terminate => {
                info!("Received SIGTERM, initiating graceful shutdown");
            },
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// Service status endpoint
///
/// Reports liveness plus which credentials are configured. Only booleans
/// leave the process; secret and URL values never appear here.
#[instrument(skip(state))]
async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
        message: "Linear to Discord webhook bridge is active".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        config: ConfigSummary {
            has_signing_secret: state.config.has_signing_secret(),
            has_discord_webhook: state.config.has_forward_url(),
        },
    })
}

/// Webhook intake endpoint
///
/// The signature is checked over the raw body bytes before any parsing.
/// A request without the `linear-signature` header is refused even in
/// open mode; everything that fails after authentication maps to 500.
#[instrument(skip(state, headers, body))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, WebhookError> {
    let Some(raw_signature) = headers.get("linear-signature") else {
        return Err(WebhookError::MissingSignature);
    };
    let signature = raw_signature.to_str().unwrap_or("");

    if !state.verifier.verify(&body, signature) {
        return Err(WebhookError::InvalidSignature);
    }

    let event = WebhookEvent::from_slice(&body)?;

    info!(
        action = event.action.as_deref().unwrap_or(""),
        event_type = event.event_type.as_deref().unwrap_or(""),
        "Received Linear webhook"
    );

    let message = format_event(&event, &state.registry);
    state.deliverer.deliver(&message).await?;

    Ok(Json(WebhookAck { received: true }))
}

// ============================================================================
// Response Types
// ============================================================================

/// Status endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub config: ConfigSummary,
}

/// Presence summary of the two credentials, as booleans only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub has_signing_secret: bool,
    pub has_discord_webhook: bool,
}

/// Webhook intake acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

// ============================================================================
// Middleware
// ============================================================================

/// Request logging middleware with correlation ID tracking
///
/// This middleware:
/// - Extracts or generates correlation IDs for request tracking
/// - Logs request start and completion with structured fields
/// - Propagates correlation ID through response headers
#[instrument(skip(request, next), fields(
    method = %request.method(),
    uri = %request.uri(),
    correlation_id
))]
async fn request_logging_middleware(
    mut request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let correlation_id = request
        .headers()
        .get("x-correlation-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    tracing::Span::current().record("correlation_id", correlation_id.as_str());

    // Make the ID available to downstream handlers
    request.extensions_mut().insert(correlation_id.clone());

    let mut response = next.run(request).await;
    let duration = start.elapsed();

    if let Ok(header_value) = correlation_id.parse() {
        response
            .headers_mut()
            .insert("x-correlation-id", header_value);
    }

    let status = response.status();

    // Log at appropriate level based on status code
    if status.is_server_error() {
        error!(
            correlation_id = %correlation_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request completed with server error"
        );
    } else if status.is_client_error() {
        warn!(
            correlation_id = %correlation_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request completed with client error"
        );
    } else {
        info!(
            correlation_id = %correlation_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration.as_millis(),
            "Request completed successfully"
        );
    }

    response
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

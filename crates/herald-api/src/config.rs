//! Configuration types for the HTTP service

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConfigError;

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Webhook intake and forwarding settings
    pub webhook: WebhookConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Check the configuration for values that cannot work at runtime.
    ///
    /// Absent secrets and forward targets are valid (the service runs in
    /// open mode and drops messages respectively, both with a WARN at
    /// startup); malformed values are not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid {
                message: "server.host must not be empty".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                message: "server.port must be non-zero".to_string(),
            });
        }

        if let Some(url) = &self.webhook.forward_url {
            if !url.is_empty() && !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(ConfigError::Invalid {
                    message: "webhook.forward_url must be an http(s) URL".to_string(),
                });
            }
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::Invalid {
                    message: format!(
                        "logging.level '{other}' is not one of trace, debug, info, warn, error"
                    ),
                });
            }
        }

        Ok(())
    }

    /// Whether a non-empty signing secret is configured.
    pub fn has_signing_secret(&self) -> bool {
        self.webhook
            .signing_secret
            .as_deref()
            .is_some_and(|secret| !secret.is_empty())
    }

    /// Whether a non-empty forward URL is configured.
    pub fn has_forward_url(&self) -> bool {
        self.webhook
            .forward_url
            .as_deref()
            .is_some_and(|url| !url.is_empty())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Webhook intake and forwarding configuration
#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WebhookConfig {
    /// Shared secret for inbound signature verification
    ///
    /// Absent or empty disables verification (open mode).
    pub signing_secret: Option<String>,

    /// Discord webhook URL to forward formatted messages to
    ///
    /// Absent or empty disables forwarding; events are still acknowledged.
    pub forward_url: Option<String>,
}

impl fmt::Debug for WebhookConfig {
    // The secret must never reach logs; the forward URL embeds a Discord
    // token, so it gets the same treatment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field(
                "signing_secret",
                &self.signing_secret.as_ref().map(|_| "<REDACTED>"),
            )
            .field(
                "forward_url",
                &self.forward_url.as_ref().map(|_| "<REDACTED>"),
            )
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

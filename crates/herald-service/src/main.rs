//! # Herald Service
//!
//! Binary entry point for the Herald HTTP service.
//!
//! This executable:
//! - Loads configuration from files and environment
//! - Initializes logging
//! - Starts the HTTP server from herald-api

use herald_api::{start_server, ServiceConfig, ServiceError};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // -------------------------------------------------------------------------
    // Load configuration
    //
    // Sources (applied in order, later sources override earlier ones):
    //  1. ./config/default.yaml               deployment defaults
    //  2. ./config/local.yaml                 local override, not committed
    //  3. Path given by HERALD_CONFIG_FILE    operator-specified file
    //  4. Environment variables prefixed HERALD__ (double-underscore
    //     separator), e.g. HERALD__SERVER__PORT=8080 sets server.port
    //
    // Every field carries a serde default, so an entirely unconfigured
    // environment produces a valid config: open-mode verification, no
    // forward target, port 3000. A malformed file or an environment value
    // that cannot be coerced IS a hard error because it indicates
    // deliberate-but-broken operator configuration.
    //
    // Failures here print to stderr: the log subscriber is configured from
    // the loaded config, so it is not up yet.
    // -------------------------------------------------------------------------
    let mut config_builder = config::Config::builder()
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Yaml),
        )
        .add_source(
            config::File::with_name("config/local")
                .required(false)
                .format(config::FileFormat::Yaml),
        );

    // Optional explicit path supplied by the operator.
    if let Ok(explicit_path) = std::env::var("HERALD_CONFIG_FILE") {
        if !explicit_path.is_empty() {
            config_builder = config_builder.add_source(
                config::File::with_name(&explicit_path)
                    .required(true)
                    .format(config::FileFormat::Yaml),
            );
        }
    }

    let config = match config_builder
        .add_source(config::Environment::with_prefix("HERALD").separator("__"))
        .build()
    {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to build configuration; aborting: {e}");
            std::process::exit(3);
        }
    };

    let service_config: ServiceConfig = match config.try_deserialize() {
        Ok(sc) => sc,
        Err(e) => {
            eprintln!(
                "Could not deserialize service configuration; aborting. \
                 Fix the configuration and restart: {e}"
            );
            std::process::exit(3);
        }
    };

    if let Err(e) = service_config.validate() {
        eprintln!("Service configuration is invalid; aborting: {e}");
        std::process::exit(3);
    }

    // -------------------------------------------------------------------------
    // Initialize logging
    //
    // RUST_LOG takes precedence when set; otherwise the configured level
    // applies to the herald crates with the HTTP plumbing kept at info.
    // -------------------------------------------------------------------------
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &service_config.logging.level;
        tracing_subscriber::EnvFilter::new(format!(
            "herald_service={level},herald_api={level},herald_core={level},tower_http=info"
        ))
    });

    if service_config.logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Presence booleans only; secret and URL values stay out of the logs.
    info!(
        port = service_config.server.port,
        signature_verification = if service_config.has_signing_secret() {
            "enabled"
        } else {
            "DISABLED"
        },
        discord_forwarding = if service_config.has_forward_url() {
            "configured"
        } else {
            "NOT CONFIGURED"
        },
        "Starting Herald service"
    );

    if let Err(e) = start_server(service_config).await {
        error!("Failed to start server: {}", e);

        let exit_code = match e {
            ServiceError::BindFailed { .. } => 1,
            ServiceError::ServerFailed { .. } => 2,
            ServiceError::Configuration(_) => 3,
        };

        std::process::exit(exit_code);
    }

    Ok(())
}

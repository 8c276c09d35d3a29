use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::auth::{ServerAuthConfig, ServerState};
use crate::routes;
use crate::store::RecordStore;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration from config.toml or env vars, with sensible fallbacks
fn load_config() -> configs::AppConfig {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            // A missing file is the normal env-only setup; a file that exists
            // but fails to load or validate must not be swallowed silently.
            let path = configs::config_path();
            if std::path::Path::new(&path).exists() {
                warn!(%path, error = %e, "config file present but unusable, falling back to env/defaults");
            }
            let mut cfg = configs::AppConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                cfg.server.host = host;
            }
            if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                cfg.server.port = port;
            }
            cfg.auth.normalize_from_env();
            cfg
        }
    }
}

fn load_bind_addr(cfg: &configs::AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Resolve on Ctrl+C; `axum::serve` then stops accepting new connections
/// and lets in-flight requests finish.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received, draining connections"),
        Err(e) => error!(error = %e, "failed to listen for shutdown signal"),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config();

    // Store is constructed here and injected; no process-wide singleton
    let state = ServerState {
        store: RecordStore::new(),
        auth: ServerAuthConfig { api_key: cfg.auth.api_key.clone() },
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    // Bind and serve
    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting record server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_config_file_falls_back_to_defaults() {
        let tmp = std::env::temp_dir()
            .join(format!("record_api_bad_config_{}.toml", std::process::id()));
        std::fs::write(&tmp, "[server]\nhost = \"0.0.0.0\"\nport = 0\n").unwrap();
        std::env::set_var("CONFIG_PATH", tmp.to_str().unwrap());

        // port = 0 fails validation; the fallback must still yield a usable config
        let cfg = load_config();
        assert_eq!(cfg.server.port, 8080);
        assert!(!cfg.auth.api_key.is_empty());

        std::env::remove_var("CONFIG_PATH");
        let _ = std::fs::remove_file(&tmp);
    }
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the echo handler
//! - Wire up middleware (tracing, request ID, timeout, forwarded-for)
//! - Serve with connect info so the peer address is observable
//! - Apply trust set reloads while running

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::ConnectInfo,
    http::{HeaderMap, HeaderName},
    middleware,
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::extract::ClientAddr;
use crate::http::middleware::{forwarded_for_middleware, ForwardedState};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::trust::ConfigError;

/// Error building the server from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid trusted proxy configuration: {0}")]
    Trust(#[from] ConfigError),

    #[error("invalid forwarded header name '{0}'")]
    HeaderName(String),
}

/// Body returned by the echo handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoResponse {
    /// Resolved client address.
    pub remote_addr: String,
    /// Directly connected peer.
    pub peer_addr: String,
    /// Where `remote_addr` came from.
    pub source: String,
    /// Address seen through `ConnectInfo` after the middleware ran.
    pub connect_info: String,
    pub request_id: Option<String>,
}

/// HTTP server reporting the resolved client address of each request.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    forwarded: ForwardedState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self, ServerError> {
        let trust = config.trust.trust_set()?;
        let header = HeaderName::from_bytes(config.trust.header.as_bytes())
            .map_err(|_| ServerError::HeaderName(config.trust.header.clone()))?;

        if trust.is_empty() {
            tracing::warn!(
                header = %header,
                "No trusted proxies configured, every forwarded hop will be trusted"
            );
        } else {
            tracing::info!(
                header = %header,
                trusted_proxies = ?trust.to_strings(),
                "Trusted proxies loaded"
            );
        }

        let forwarded = ForwardedState::new(
            trust,
            header,
            config.trust.peer_policy(),
            config.trust.rewrite_connect_info,
        );

        let router = Self::build_router(&config, forwarded.clone());
        Ok(Self {
            router,
            config,
            forwarded,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, forwarded: ForwardedState) -> Router {
        Router::new()
            .route("/", any(echo_handler))
            .route("/{*path}", any(echo_handler))
            .layer(middleware::from_fn_with_state(forwarded, forwarded_for_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Configurations received on `config_updates` replace the trust set; a
    /// closed channel just stops reloads.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let forwarded = self.forwarded.clone();
        let reloads = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                match forwarded.reload(&config.trust) {
                    Ok(()) => {
                        metrics::record_config_reload(true);
                        tracing::info!(
                            trusted_proxies = ?forwarded.trust().to_strings(),
                            "Trusted proxies reloaded"
                        );
                    }
                    Err(e) => {
                        metrics::record_config_reload(false);
                        tracing::error!(error = %e, "Rejected trusted proxy reload, keeping current set");
                    }
                }
            }
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        reloads.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Shared middleware state, including the live trust set.
    pub fn forwarded(&self) -> &ForwardedState {
        &self.forwarded
    }
}

/// Echo the resolved client address back to the caller.
async fn echo_handler(
    ClientAddr(resolution): ClientAddr,
    ConnectInfo(connect_info): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<EchoResponse> {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Json(EchoResponse {
        remote_addr: resolution.addr,
        peer_addr: resolution.peer,
        source: resolution.source.as_str().to_string(),
        connect_info: connect_info.to_string(),
        request_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_trusted_proxy() {
        let mut config = ServiceConfig::default();
        config.trust.trusted_proxies = vec!["error".into()];
        assert!(matches!(HttpServer::new(config), Err(ServerError::Trust(_))));
    }

    #[test]
    fn rejects_invalid_header_name() {
        let mut config = ServiceConfig::default();
        config.trust.header = "not a header".into();
        assert!(matches!(HttpServer::new(config), Err(ServerError::HeaderName(_))));
    }

    #[test]
    fn builds_from_preset() {
        let mut config = ServiceConfig::default();
        config.trust.preset = Some(crate::trust::Preset::Loopback);
        let server = HttpServer::new(config).unwrap();
        assert_eq!(server.forwarded().trust().len(), 2);
        assert_eq!(server.forwarded().header().as_str(), "x-forwarded-for");
    }
}

//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use xff_resolver::config::ServiceConfig;
use xff_resolver::http::server::EchoResponse;
use xff_resolver::{HttpServer, Shutdown};

/// A resolver service running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub updates: mpsc::UnboundedSender<ServiceConfig>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
    client: reqwest::Client,
}

/// Start the service with `config`, ignoring its bind address.
pub async fn start_server(config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (updates, config_updates) = mpsc::unbounded_channel();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();

    let handle = tokio::spawn(async move { server.run(listener, config_updates, server_shutdown).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    TestServer {
        addr,
        updates,
        shutdown,
        handle,
        client,
    }
}

impl TestServer {
    /// GET `/` with the given forwarded header values.
    pub async fn echo(&self, forwarded_for: &[&str]) -> EchoResponse {
        let mut request = self.client.get(format!("http://{}/", self.addr));
        for value in forwarded_for {
            request = request.header("x-forwarded-for", *value);
        }
        let res = request.send().await.expect("server unreachable");
        assert_eq!(res.status(), 200);
        res.json().await.expect("echo body")
    }
}

/// Port part of a "host:port" or "[host]:port" string.
pub fn port_of(addr: &str) -> &str {
    addr.rsplit(':').next().unwrap()
}

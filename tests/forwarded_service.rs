//! End-to-end tests for the resolver service.

use std::time::Duration;

use xff_resolver::config::ServiceConfig;
use xff_resolver::Preset;

mod common;

use common::{port_of, start_server};

fn trusting(cidrs: &[&str]) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.trust.trusted_proxies = cidrs.iter().map(|c| c.to_string()).collect();
    config
}

#[tokio::test]
async fn test_no_header_keeps_peer() {
    let server = start_server(ServiceConfig::default()).await;

    let echo = server.echo(&[]).await;
    assert_eq!(echo.remote_addr, echo.peer_addr);
    assert_eq!(echo.connect_info, echo.peer_addr);
    assert_eq!(echo.source, "no_header");
    assert!(echo.peer_addr.starts_with("127.0.0.1:"));
}

#[tokio::test]
async fn test_forwarded_ipv4_keeps_peer_port() {
    let server = start_server(ServiceConfig::default()).await;

    let echo = server.echo(&["100.0.0.1"]).await;
    assert_eq!(echo.source, "forwarded");
    assert_eq!(echo.remote_addr, format!("100.0.0.1:{}", port_of(&echo.peer_addr)));
    assert_eq!(echo.connect_info, echo.remote_addr);
    assert!(echo.request_id.is_some(), "request id should be set");
}

#[tokio::test]
async fn test_forwarded_ipv6_is_bracketed() {
    let server = start_server(ServiceConfig::default()).await;

    let echo = server.echo(&["2001:db8:0:1:1:1:1:1"]).await;
    assert_eq!(
        echo.remote_addr,
        format!("[2001:db8:0:1:1:1:1:1]:{}", port_of(&echo.peer_addr))
    );
}

#[tokio::test]
async fn test_stops_at_first_untrusted_hop() {
    let server = start_server(trusting(&["127.0.0.0/16"])).await;

    let echo = server.echo(&["1.1.1.1, 8.8.8.8, 127.0.0.1, 127.0.0.2"]).await;
    assert!(echo.remote_addr.starts_with("8.8.8.8:"), "got {}", echo.remote_addr);

    let echo = server.echo(&["1.1.1.1, 127.0.0.1", "127.0.0.2, 127.0.0.3"]).await;
    assert!(echo.remote_addr.starts_with("1.1.1.1:"), "got {}", echo.remote_addr);
}

#[tokio::test]
async fn test_malformed_chain_falls_back_to_peer() {
    let server = start_server(ServiceConfig::default()).await;

    let echo = server.echo(&["190.57.149.90, 123#1#2#3"]).await;
    assert_eq!(echo.remote_addr, echo.peer_addr);
    assert_eq!(echo.source, "unresolved");
}

#[tokio::test]
async fn test_untrusted_peer_header_ignored() {
    let mut config = trusting(&["10.0.0.0/8"]);
    config.trust.require_trusted_peer = true;
    let server = start_server(config).await;

    let echo = server.echo(&["1.1.1.1"]).await;
    assert_eq!(echo.remote_addr, echo.peer_addr);
    assert_eq!(echo.source, "untrusted_peer");
}

#[tokio::test]
async fn test_loopback_preset_with_trusted_peer() {
    let mut config = ServiceConfig::default();
    config.trust.preset = Some(Preset::Loopback);
    config.trust.require_trusted_peer = true;
    let server = start_server(config).await;

    let echo = server.echo(&["203.0.113.7, 127.0.0.1"]).await;
    assert!(echo.remote_addr.starts_with("203.0.113.7:"), "got {}", echo.remote_addr);
}

#[tokio::test]
async fn test_trust_set_hot_reload() {
    let server = start_server(trusting(&["10.0.0.0/8"])).await;

    let echo = server.echo(&["1.1.1.1, 127.0.0.1"]).await;
    assert!(echo.remote_addr.starts_with("127.0.0.1:"), "got {}", echo.remote_addr);

    // An invalid reload must leave the current set in place.
    server.updates.send(trusting(&["error"])).unwrap();
    server.updates.send(trusting(&["127.0.0.0/8"])).unwrap();

    let mut reloaded = false;
    for _ in 0..50 {
        let echo = server.echo(&["1.1.1.1, 127.0.0.1"]).await;
        if echo.remote_addr.starts_with("1.1.1.1:") {
            reloaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(reloaded, "trust set reload was not applied");
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let server = start_server(ServiceConfig::default()).await;
    let _ = server.echo(&[]).await;

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}

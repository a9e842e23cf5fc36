//! Metrics collection and exposition.
//!
//! # Metrics
//! - `xff_resolutions_total` (counter): resolved requests by `source`
//! - `xff_config_reloads_total` (counter): reload attempts by `result`

use std::net::SocketAddr;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::resolver::Source;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!(
        "xff_resolutions_total",
        "Remote address resolutions, labelled by where the address came from"
    );
    describe_counter!(
        "xff_config_reloads_total",
        "Configuration reload attempts, labelled by result"
    );

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_resolution(source: Source) {
    counter!("xff_resolutions_total", "source" => source.as_str()).increment(1);
}

pub fn record_config_reload(ok: bool) {
    let result = if ok { "success" } else { "failure" };
    counter!("xff_config_reloads_total", "result" => result).increment(1);
}

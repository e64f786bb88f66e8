//! One probe run against a vCenter server.

use tracing::{info, warn};
use vsprobe_adapters::vsphere::VsphereAdapter;

use crate::checks;
use crate::config::ProbeConfig;
use crate::data::EvaluationResult;
use crate::error::ProbeError;

/// Connect, run the configured check and log out.
///
/// The session is opened once and used for every query of the check. A
/// failed logout is logged but does not change the result.
pub async fn probe(config: &ProbeConfig) -> Result<EvaluationResult, ProbeError> {
    let adapter = VsphereAdapter::builder()
        .endpoint(&config.server)
        .credentials(&config.username, &config.password)
        .timeout(config.timeout)
        .accept_invalid_certs(config.insecure)
        .build()
        .map_err(ProbeError::Connection)?;

    let session = adapter.connect().await.map_err(ProbeError::Connection)?;
    info!(endpoint = adapter.endpoint(), "connected to vCenter");

    let result = checks::run(&session, config).await;

    if let Err(e) = session.logout().await {
        warn!(error = %e, "failed to close vCenter session");
    }

    result
}

//! Host CPU and memory usage.

use tracing::debug;
use vsprobe_adapters::Session;
use vsprobe_types::{Counter, EntityRef, MetricSample};

use crate::error::{InvalidMetric, ProbeError};

/// Usage counters are reported in hundredths of a percent.
const HUNDREDTHS: f64 = 100.0;

pub(super) async fn collect(
    session: &dyn Session,
    esxhost: Option<&str>,
    counter: Counter,
) -> Result<Vec<MetricSample>, ProbeError> {
    let hosts = session.list_hosts(esxhost).await?;
    debug!(filter = ?esxhost, count = hosts.len(), "listed hosts");

    let mut samples = Vec::with_capacity(hosts.len());
    for host in hosts {
        let raw = session
            .get_statistic(&EntityRef::host(&host.id), counter)
            .await?
            .ok_or_else(|| {
                InvalidMetric::new(&host.name, format!("no {} data point", counter))
            })?;

        samples.push(MetricSample::new(host.name, raw / HUNDREDTHS));
    }

    Ok(samples)
}

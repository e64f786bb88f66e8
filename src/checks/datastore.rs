//! Datastore disk usage.

use tracing::debug;
use vsprobe_adapters::Session;
use vsprobe_types::{DatastoreSummary, MetricSample, Provisioning};

use crate::data::format::round1;
use crate::error::{InvalidMetric, ProbeError};

/// Datastore name tag for an ESX host.
///
/// Local datastores are named after their host's first two DNS labels, so
/// `esx01.dc1.example.com` maps to `esx01dc1`. A single-label name is used
/// as is.
pub fn datastore_tag(esxhost: &str) -> String {
    esxhost.split('.').take(2).collect()
}

pub(super) async fn collect(
    session: &dyn Session,
    esxhost: Option<&str>,
) -> Result<Vec<MetricSample>, ProbeError> {
    let tag = esxhost.map(datastore_tag);
    let datastores = session.list_datastores(tag.as_deref()).await?;
    debug!(tag = ?tag, count = datastores.len(), "listed datastores");

    datastores
        .iter()
        .map(|ds| to_sample(ds).map_err(ProbeError::from))
        .collect()
}

fn to_sample(ds: &DatastoreSummary) -> Result<MetricSample, InvalidMetric> {
    let capacity = ds
        .capacity
        .ok_or_else(|| InvalidMetric::new(&ds.name, "capacity not reported"))?;
    let free = ds
        .free_space
        .ok_or_else(|| InvalidMetric::new(&ds.name, "free space not reported"))?;

    if capacity == 0 {
        return Err(InvalidMetric::new(
            &ds.name,
            "datastore reports zero capacity",
        ));
    }

    let used = capacity.abs_diff(free);
    let used_percent = round1(used as f64 / capacity as f64 * 100.0);

    let sample = MetricSample::new(&ds.name, used_percent);
    Ok(match ds.uncommitted {
        Some(uncommitted) => {
            sample.with_provisioning(Provisioning::new(capacity, used, uncommitted))
        }
        None => sample,
    })
}

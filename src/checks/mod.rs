//! The individual checks and their dispatch.
//!
//! Each check turns inventory and counters from a [`Session`] into an ordered
//! list of [`MetricSample`]s; evaluation is shared and lives in
//! [`crate::data`].
//!
//! | test       | entities          | value                               |
//! |------------|-------------------|-------------------------------------|
//! | `dsusage`  | datastores        | used space, percent of capacity     |
//! | `cpuusage` | ESX hosts         | CPU usage, percent                  |
//! | `memusage` | ESX hosts         | memory usage, percent               |
//! | `dsio`     | powered-on VMs    | worst virtual disk latency, ms      |

mod datastore;
mod host;
mod latency;

#[cfg(test)]
pub(crate) mod mock;

pub use datastore::datastore_tag;

use std::fmt;
use std::str::FromStr;

use tracing::info;
use vsprobe_adapters::Session;
use vsprobe_types::{Counter, MetricSample};

use crate::config::ProbeConfig;
use crate::data::{CheckProfile, EvaluationResult};
use crate::error::{ConfigError, ProbeError};

/// Which check to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    DatastoreUsage,
    CpuUsage,
    MemoryUsage,
    DiskLatency,
}

impl CheckKind {
    /// Name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::DatastoreUsage => "dsusage",
            CheckKind::CpuUsage => "cpuusage",
            CheckKind::MemoryUsage => "memusage",
            CheckKind::DiskLatency => "dsio",
        }
    }

    /// Output wording and unit.
    pub fn profile(&self) -> &'static CheckProfile {
        match self {
            CheckKind::DatastoreUsage => &DATASTORE_PROFILE,
            CheckKind::CpuUsage => &CPU_PROFILE,
            CheckKind::MemoryUsage => &MEMORY_PROFILE,
            CheckKind::DiskLatency => &LATENCY_PROFILE,
        }
    }

    /// Whether `--esxhost` narrows this check.
    pub fn honours_esxhost(&self) -> bool {
        !matches!(self, CheckKind::DiskLatency)
    }
}

impl FromStr for CheckKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dsusage" => Ok(CheckKind::DatastoreUsage),
            "cpuusage" => Ok(CheckKind::CpuUsage),
            "memusage" => Ok(CheckKind::MemoryUsage),
            "dsio" => Ok(CheckKind::DiskLatency),
            other => Err(ConfigError::UnknownTest(other.to_string())),
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const DATASTORE_PROFILE: CheckProfile = CheckProfile {
    unit: "%",
    critical_headline: "High disk usage on datastore",
    warning_headline: "High disk usage on datastore",
    ok_headline: "Datastore disk usages are normal",
};

const CPU_PROFILE: CheckProfile = CheckProfile {
    unit: "%",
    critical_headline: "High CPU usage",
    warning_headline: "High CPU usage",
    ok_headline: "CPU usages are normal",
};

const MEMORY_PROFILE: CheckProfile = CheckProfile {
    unit: "%",
    critical_headline: "High memory usage",
    warning_headline: "High memory usage",
    ok_headline: "Memory usages are normal",
};

const LATENCY_PROFILE: CheckProfile = CheckProfile {
    unit: "ms",
    critical_headline: "High virtual disk latency",
    warning_headline: "High virtual disk latency",
    ok_headline: "Virtual disk latencies are normal",
};

/// Fetch the samples for the configured check.
pub async fn collect(
    session: &dyn Session,
    config: &ProbeConfig,
) -> Result<Vec<MetricSample>, ProbeError> {
    let esxhost = config.esxhost.as_deref();

    match config.check {
        CheckKind::DatastoreUsage => datastore::collect(session, esxhost).await,
        CheckKind::CpuUsage => host::collect(session, esxhost, Counter::CpuUsage).await,
        CheckKind::MemoryUsage => host::collect(session, esxhost, Counter::MemUsage).await,
        CheckKind::DiskLatency => latency::collect(session).await,
    }
}

/// Run the configured check on an open session.
pub async fn run(
    session: &dyn Session,
    config: &ProbeConfig,
) -> Result<EvaluationResult, ProbeError> {
    let samples = collect(session, config).await?;
    info!(
        check = %config.check,
        source = session.description(),
        entities = samples.len(),
        "collected samples"
    );

    let result =
        EvaluationResult::from_samples(&samples, &config.thresholds, config.check.profile())?;
    Ok(result)
}

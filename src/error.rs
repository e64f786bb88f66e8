//! Error types for the probe.
//!
//! Every error here ends the run with an UNKNOWN status; they differ in where
//! they are reported. Configuration errors go to stderr before any remote
//! call is made, everything else is printed as the plugin output line.

use thiserror::Error;
use vsprobe_adapters::AdapterError;
use vsprobe_types::{InvalidThresholds, PluginStatus};

/// Invalid or incomplete configuration, detected before connecting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("vSphere server not defined")]
    MissingServer,

    #[error("vSphere username not defined")]
    MissingUsername,

    #[error("vSphere password not defined")]
    MissingPassword,

    #[error("Critical threshold not defined")]
    MissingCritical,

    #[error("Warning threshold not defined")]
    MissingWarning,

    #[error(transparent)]
    Thresholds(#[from] InvalidThresholds),

    #[error("incorrect test defined: '{0}' (dsusage|memusage|cpuusage|dsio are accepted)")]
    UnknownTest(String),

    #[error("Timeout must be at least one second")]
    ZeroTimeout,

    #[error("Failed to read environment: {0}")]
    Environment(#[from] config::ConfigError),
}

impl ConfigError {
    /// Plugin status for a run stopped by this error.
    pub fn status(&self) -> PluginStatus {
        PluginStatus::Unknown
    }
}

/// A fetched metric that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid metric for '{subject}': {reason}")]
pub struct InvalidMetric {
    /// Entity (or response) the metric belongs to.
    pub subject: String,
    pub reason: String,
}

impl InvalidMetric {
    pub fn new(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

/// Failures after configuration was accepted.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Authentication or transport failure while opening the session.
    #[error("Failed to connect to vSphere server: {0}")]
    Connection(#[source] AdapterError),

    /// A query on an open session failed.
    #[error("vSphere query failed: {0}")]
    Query(#[source] AdapterError),

    #[error(transparent)]
    InvalidMetric(#[from] InvalidMetric),
}

impl ProbeError {
    /// Plugin status for a run stopped by this error.
    pub fn status(&self) -> PluginStatus {
        match self {
            ProbeError::Connection(_) | ProbeError::Query(_) | ProbeError::InvalidMetric(_) => {
                PluginStatus::Unknown
            }
        }
    }
}

impl From<AdapterError> for ProbeError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Parse(reason) => {
                ProbeError::InvalidMetric(InvalidMetric::new("vSphere response", reason))
            }
            other => ProbeError::Query(other),
        }
    }
}

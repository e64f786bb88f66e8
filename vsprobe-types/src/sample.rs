//! Metric samples handed to the evaluator.

/// One observation of one metric for one entity (datastore, host or VM).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricSample {
    /// Display name of the entity, used verbatim in performance data.
    pub entity_name: String,

    /// Observed value, already scaled to the unit of the check.
    pub value: f64,

    /// Provisioning figures, present only for datastores whose uncommitted
    /// space is reported by the server.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub provisioning: Option<Provisioning>,
}

impl MetricSample {
    /// Create a sample without provisioning data.
    pub fn new(entity_name: impl Into<String>, value: f64) -> Self {
        Self {
            entity_name: entity_name.into(),
            value,
            provisioning: None,
        }
    }

    /// Attach provisioning figures to the sample.
    pub fn with_provisioning(mut self, provisioning: Provisioning) -> Self {
        self.provisioning = Some(provisioning);
        self
    }
}

/// Thin-provisioning figures for a datastore, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Provisioning {
    pub capacity: u64,
    pub used: u64,
    pub uncommitted: u64,
}

impl Provisioning {
    pub fn new(capacity: u64, used: u64, uncommitted: u64) -> Self {
        Self {
            capacity,
            used,
            uncommitted,
        }
    }

    /// `(used + uncommitted) * 100 / capacity`.
    ///
    /// Returns `None` for a zero capacity.
    pub fn overprovisioned_percent(&self) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        let provisioned = self.used as f64 + self.uncommitted as f64;
        Some(provisioned * 100.0 / self.capacity as f64)
    }
}

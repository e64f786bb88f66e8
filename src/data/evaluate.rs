//! Threshold evaluation and status aggregation.
//!
//! This module turns an ordered list of [`MetricSample`]s into one
//! [`EvaluationResult`]: every entity is classified against the thresholds,
//! the worst status wins, and each entity contributes a performance data
//! entry in input order.

use std::fmt;

use tracing::debug;
use vsprobe_types::{MetricSample, StatusLevel, ThresholdPair};

use super::format::format_value;
use crate::error::InvalidMetric;

/// Over-provisioning above this percentage forces at least a warning.
pub const OVERCOMMIT_WARNING_PERCENT: f64 = 100.0;
/// Over-provisioning above this percentage forces a critical.
pub const OVERCOMMIT_CRITICAL_PERCENT: f64 = 150.0;

const OVERCOMMIT_WARNING_HEADLINE: &str = "A datastore is over-committed";
const OVERCOMMIT_CRITICAL_HEADLINE: &str = "A datastore is REALLY over-committed";

/// Wording and unit of a check's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckProfile {
    /// Unit appended to each value in the performance data.
    pub unit: &'static str,
    /// Headline when the worst entity is critical.
    pub critical_headline: &'static str,
    /// Headline when the worst entity is in warning.
    pub warning_headline: &'static str,
    /// Headline when every entity is within thresholds.
    pub ok_headline: &'static str,
}

/// Outcome of evaluating one check.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub overall_status: StatusLevel,
    pub headline: String,
    /// `"<entity>: <value><unit>"` entries, in the order samples were given.
    pub per_entity_detail: Vec<String>,
}

impl EvaluationResult {
    /// Evaluate `samples` against `thresholds`.
    ///
    /// An empty sample list is a valid input and yields `Ok`. Fails only on
    /// samples that cannot be classified (non-finite values, zero capacity).
    pub fn from_samples(
        samples: &[MetricSample],
        thresholds: &ThresholdPair,
        profile: &CheckProfile,
    ) -> Result<Self, InvalidMetric> {
        let mut overall_status = StatusLevel::Ok;
        let mut headline = profile.ok_headline;
        let mut per_entity_detail = Vec::with_capacity(samples.len());

        for sample in samples {
            let (status, candidate) = Self::classify_sample(sample, thresholds, profile)?;
            debug!(
                entity = %sample.entity_name,
                value = sample.value,
                status = %status,
                "evaluated entity"
            );

            // Only a strictly worse status replaces the headline, so the
            // first entity to reach the final level names it.
            if status > overall_status {
                overall_status = status;
                headline = candidate;
            }

            per_entity_detail.push(format!(
                "{}: {}{}",
                sample.entity_name,
                format_value(sample.value),
                profile.unit
            ));
        }

        Ok(Self {
            overall_status,
            headline: headline.to_string(),
            per_entity_detail,
        })
    }

    fn classify_sample(
        sample: &MetricSample,
        thresholds: &ThresholdPair,
        profile: &CheckProfile,
    ) -> Result<(StatusLevel, &'static str), InvalidMetric> {
        if !sample.value.is_finite() {
            return Err(InvalidMetric::new(
                &sample.entity_name,
                format!("value {} is not a finite number", sample.value),
            ));
        }

        let usage_status = thresholds.classify(sample.value);
        let usage_headline = match usage_status {
            StatusLevel::Critical => profile.critical_headline,
            StatusLevel::Warning => profile.warning_headline,
            StatusLevel::Ok => profile.ok_headline,
        };

        let Some(provisioning) = sample.provisioning else {
            return Ok((usage_status, usage_headline));
        };

        let percent = provisioning.overprovisioned_percent().ok_or_else(|| {
            InvalidMetric::new(&sample.entity_name, "datastore reports zero capacity")
        })?;

        let overcommit = if percent > OVERCOMMIT_CRITICAL_PERCENT {
            Some((StatusLevel::Critical, OVERCOMMIT_CRITICAL_HEADLINE))
        } else if percent > OVERCOMMIT_WARNING_PERCENT {
            Some((StatusLevel::Warning, OVERCOMMIT_WARNING_HEADLINE))
        } else {
            None
        };

        match overcommit {
            Some((status, headline)) if status >= usage_status => {
                debug!(entity = %sample.entity_name, percent, "datastore over-committed");
                Ok((status, headline))
            }
            _ => Ok((usage_status, usage_headline)),
        }
    }

    /// Performance data suffix, entries separated by spaces.
    pub fn perfdata(&self) -> String {
        self.per_entity_detail.join(" ")
    }
}

/// Renders the single plugin output line,
/// `<STATUS>: <headline> | <perfdata>`.
impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.overall_status, self.headline)?;
        if !self.per_entity_detail.is_empty() {
            write!(f, " | {}", self.perfdata())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsprobe_types::Provisioning;

    const DISK: CheckProfile = CheckProfile {
        unit: "%",
        critical_headline: "High disk usage on datastore",
        warning_headline: "High disk usage on datastore",
        ok_headline: "Datastore disk usages are normal",
    };

    const CPU: CheckProfile = CheckProfile {
        unit: "%",
        critical_headline: "Critical CPU usage",
        warning_headline: "High CPU usage",
        ok_headline: "CPU usages are normal",
    };

    fn thresholds(warning: f64, critical: f64) -> ThresholdPair {
        ThresholdPair::new(warning, critical).unwrap()
    }

    fn samples(values: &[(&str, f64)]) -> Vec<MetricSample> {
        values
            .iter()
            .map(|(name, value)| MetricSample::new(*name, *value))
            .collect()
    }

    #[test]
    fn test_empty_samples_are_ok() {
        let result = EvaluationResult::from_samples(&[], &thresholds(85.0, 95.0), &DISK).unwrap();
        assert_eq!(result.overall_status, StatusLevel::Ok);
        assert!(result.per_entity_detail.is_empty());
        assert_eq!(result.to_string(), "OK: Datastore disk usages are normal");
    }

    #[test]
    fn test_critical_datastore() {
        let input = samples(&[("ds1", 80.0), ("ds2", 96.0)]);
        let result =
            EvaluationResult::from_samples(&input, &thresholds(85.0, 95.0), &DISK).unwrap();

        assert_eq!(result.overall_status, StatusLevel::Critical);
        assert_eq!(result.per_entity_detail, vec!["ds1: 80.0%", "ds2: 96.0%"]);
        assert_eq!(
            result.to_string(),
            "CRITICAL: High disk usage on datastore | ds1: 80.0% ds2: 96.0%"
        );
    }

    #[test]
    fn test_single_host_ok() {
        let input = samples(&[("host1", 50.0)]);
        let result = EvaluationResult::from_samples(&input, &thresholds(70.0, 90.0), &CPU).unwrap();
        assert_eq!(result.overall_status, StatusLevel::Ok);
        assert_eq!(result.to_string(), "OK: CPU usages are normal | host1: 50.0%");
    }

    #[test]
    fn test_threshold_boundaries() {
        let t = thresholds(70.0, 90.0);
        let status = |v: f64| {
            EvaluationResult::from_samples(&samples(&[("h", v)]), &t, &CPU)
                .unwrap()
                .overall_status
        };
        assert_eq!(status(90.0), StatusLevel::Critical);
        assert_eq!(status(70.0), StatusLevel::Warning);
        assert_eq!(status(69.0), StatusLevel::Ok);
    }

    #[test]
    fn test_overall_is_worst_entity() {
        let t = thresholds(70.0, 90.0);
        let cases: &[(&[(&str, f64)], StatusLevel)] = &[
            (&[("a", 10.0), ("b", 75.0)], StatusLevel::Warning),
            (&[("a", 75.0), ("b", 10.0)], StatusLevel::Warning),
            (&[("a", 95.0), ("b", 75.0), ("c", 10.0)], StatusLevel::Critical),
            (&[("a", 10.0), ("b", 20.0)], StatusLevel::Ok),
        ];

        for (input, expected) in cases {
            let result = EvaluationResult::from_samples(&samples(input), &t, &CPU).unwrap();
            assert_eq!(result.overall_status, *expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_warning_after_critical_keeps_critical_headline() {
        let input = samples(&[("h1", 95.0), ("h2", 75.0)]);
        let result = EvaluationResult::from_samples(&input, &thresholds(70.0, 90.0), &CPU).unwrap();

        assert_eq!(result.overall_status, StatusLevel::Critical);
        assert_eq!(result.headline, "Critical CPU usage");
        assert_eq!(result.per_entity_detail, vec!["h1: 95.0%", "h2: 75.0%"]);
    }

    #[test]
    fn test_warning_then_critical_upgrades_headline() {
        let input = samples(&[("h1", 75.0), ("h2", 95.0)]);
        let result = EvaluationResult::from_samples(&input, &thresholds(70.0, 90.0), &CPU).unwrap();
        assert_eq!(result.headline, "Critical CPU usage");
    }

    #[test]
    fn test_overcommit_forces_warning() {
        let input = vec![
            MetricSample::new("ds1", 60.0).with_provisioning(Provisioning::new(100, 60, 50)),
        ];
        let result =
            EvaluationResult::from_samples(&input, &thresholds(85.0, 95.0), &DISK).unwrap();

        assert_eq!(result.overall_status, StatusLevel::Warning);
        assert_eq!(result.headline, "A datastore is over-committed");
        assert_eq!(result.per_entity_detail, vec!["ds1: 60.0%"]);
    }

    #[test]
    fn test_heavy_overcommit_forces_critical() {
        let input = vec![
            MetricSample::new("ds1", 60.0).with_provisioning(Provisioning::new(100, 60, 100)),
        ];
        let result =
            EvaluationResult::from_samples(&input, &thresholds(85.0, 95.0), &DISK).unwrap();
        assert_eq!(result.overall_status, StatusLevel::Critical);
        assert_eq!(result.headline, "A datastore is REALLY over-committed");
    }

    #[test]
    fn test_overcommit_does_not_stop_evaluation() {
        let input = vec![
            MetricSample::new("ds1", 60.0).with_provisioning(Provisioning::new(100, 60, 50)),
            MetricSample::new("ds2", 97.0),
            MetricSample::new("ds3", 10.0),
        ];
        let result =
            EvaluationResult::from_samples(&input, &thresholds(85.0, 95.0), &DISK).unwrap();

        assert_eq!(result.overall_status, StatusLevel::Critical);
        assert_eq!(result.headline, "High disk usage on datastore");
        assert_eq!(result.per_entity_detail.len(), 3);
    }

    #[test]
    fn test_overcommit_never_downgrades_usage() {
        let input = vec![
            MetricSample::new("ds1", 97.0).with_provisioning(Provisioning::new(100, 97, 10)),
        ];
        let result =
            EvaluationResult::from_samples(&input, &thresholds(85.0, 95.0), &DISK).unwrap();
        assert_eq!(result.overall_status, StatusLevel::Critical);
        assert_eq!(result.headline, "High disk usage on datastore");
    }

    #[test]
    fn test_provisioning_within_capacity_uses_plain_path() {
        let input = vec![
            MetricSample::new("ds1", 40.0).with_provisioning(Provisioning::new(100, 40, 20)),
        ];
        let result =
            EvaluationResult::from_samples(&input, &thresholds(85.0, 95.0), &DISK).unwrap();
        assert_eq!(result.overall_status, StatusLevel::Ok);
    }

    #[test]
    fn test_non_finite_value_is_invalid() {
        let input = samples(&[("h1", 10.0), ("h2", f64::NAN)]);
        let err =
            EvaluationResult::from_samples(&input, &thresholds(70.0, 90.0), &CPU).unwrap_err();
        assert_eq!(err.subject, "h2");
    }

    #[test]
    fn test_zero_capacity_provisioning_is_invalid() {
        let input =
            vec![MetricSample::new("ds1", 0.0).with_provisioning(Provisioning::new(0, 0, 5))];
        assert!(EvaluationResult::from_samples(&input, &thresholds(85.0, 95.0), &DISK).is_err());
    }
}

//! # vsprobe
//!
//! A monitoring plugin that checks vCenter datastore and host health and
//! reports it in the standard plugin format: one output line and an exit
//! code of 0 (OK), 1 (WARNING), 2 (CRITICAL) or 3 (UNKNOWN).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         check_vsphere                        │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐  │
//! │  │ config  │───▶│  checks  │───▶│   data   │───▶│ stdout  │  │
//! │  │(validate)    │ (samples)│    │(evaluate)│    │ + exit  │  │
//! │  └─────────┘    └────┬─────┘    └──────────┘    └─────────┘  │
//! │                      │                                       │
//! │                      ▼                                       │
//! │               ┌─────────────┐                                │
//! │               │   Session   │◀── VsphereSession (REST API)   │
//! │               └─────────────┘                                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: Merges command-line values with the `VI_*` environment and
//!   validates them into a [`ProbeConfig`]
//! - **[`checks`]**: Turns inventory and counters from a [`Session`] into
//!   ordered [`MetricSample`]s for the selected test
//! - **[`data`]**: Worst-status-wins threshold evaluation and output rendering
//! - **[`runner`]**: Opens the vCenter session, runs the check, logs out
//!
//! ## Usage
//!
//! ```bash
//! check_vsphere -H vcenter.example.com -U monitor@vsphere.local -P secret \
//!     -T dsusage -W 85 -C 95
//! # CRITICAL: High disk usage on datastore | ds1: 80.0% ds2: 96.0%
//! ```
//!
//! ### As a library
//!
//! ```
//! use vsprobe::{CheckKind, EvaluationResult};
//! use vsprobe_types::{MetricSample, StatusLevel, ThresholdPair};
//!
//! let samples = vec![MetricSample::new("ds1", 80.0), MetricSample::new("ds2", 96.0)];
//! let thresholds = ThresholdPair::new(85.0, 95.0).unwrap();
//! let profile = CheckKind::DatastoreUsage.profile();
//!
//! let result = EvaluationResult::from_samples(&samples, &thresholds, profile).unwrap();
//! assert_eq!(result.overall_status, StatusLevel::Critical);
//! ```
//!
//! [`Session`]: vsprobe_adapters::Session
//! [`MetricSample`]: vsprobe_types::MetricSample

pub mod checks;
pub mod config;
pub mod data;
pub mod error;
pub mod runner;

// Re-export main types for convenience
pub use checks::CheckKind;
pub use config::{CliOverrides, ProbeConfig};
pub use data::{CheckProfile, EvaluationResult};
pub use error::{ConfigError, InvalidMetric, ProbeError};
pub use runner::probe;

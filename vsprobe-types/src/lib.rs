//! # vsprobe-types
//!
//! Core types shared by the vsprobe crates. This crate defines the vocabulary
//! that flows between the vCenter adapters and the threshold evaluator:
//! what a sample looks like, how thresholds are expressed, and how statuses
//! order against each other.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to serialize samples and statuses
//! - **Valid by construction**: A [`ThresholdPair`] cannot exist with `critical <= warning`
//!
//! ## Example
//!
//! ```rust
//! use vsprobe_types::{MetricSample, StatusLevel, ThresholdPair};
//!
//! let thresholds = ThresholdPair::new(85.0, 95.0).unwrap();
//! let sample = MetricSample::new("datastore1", 96.0);
//!
//! assert_eq!(thresholds.classify(sample.value), StatusLevel::Critical);
//! ```

mod inventory;
mod sample;
mod status;
mod thresholds;

pub use inventory::*;
pub use sample::*;
pub use status::*;
pub use thresholds::*;

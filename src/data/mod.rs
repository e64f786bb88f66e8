//! Threshold evaluation and output rendering.
//!
//! ## Submodules
//!
//! - [`evaluate`]: Worst-status-wins evaluation ([`EvaluationResult`], [`CheckProfile`])
//! - [`format`]: Number formatting for performance data
//!
//! ## Data Flow
//!
//! ```text
//! Vec<MetricSample> (from a check)
//!        │
//!        ▼
//! EvaluationResult::from_samples()  ◀── ThresholdPair, CheckProfile
//!        │
//!        ▼
//! "<STATUS>: <headline> | <entity>: <value><unit> ..."
//! ```

pub mod evaluate;
pub mod format;

pub use evaluate::{CheckProfile, EvaluationResult};

//! The three client-side orchestration units.
//!
//! Each workflow owns one asynchronous task's state machine: classification
//! submission, dataset listing/append, and metrics retrieval with the
//! training trigger. They share nothing with each other beyond the injected
//! [`NewsApi`](crate::api::NewsApi) capability.

pub mod classify;
pub mod dataset;
pub mod metrics;

pub use classify::{ClassifyState, ClassifyWorkflow};
pub use dataset::{DatasetState, DatasetSummary, DatasetWorkflow};
pub use metrics::{MetricsState, MetricsWorkflow, TRAIN_REFRESH_DELAY};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// A training cycle, including its delayed metrics refresh, is still
    /// pending. Only one may be in flight at a time.
    #[error("a training run is already in progress")]
    TrainingInFlight,
}

/// Required-field check used by the input validations: a field counts as
/// empty when it is blank after trimming, but payloads are always sent as
/// entered.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

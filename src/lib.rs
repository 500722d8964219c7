// Newscheck library - client-side orchestration for the fake-news
// classification service. Exposes the workflows and API boundary for the
// CLI and for integration tests.

pub mod api;
pub mod config;
pub mod telemetry;
pub mod workflows;

// Re-export key types for easy access
pub use api::{
    ApiClient, ApiError, ClassificationResult, ModelMetrics, NewsApi, NewsItem, NewsLabel,
    PredictedLabel,
};
pub use config::{config, init_config, NewscheckConfig};
pub use telemetry::init_telemetry;
pub use workflows::{
    ClassifyState, ClassifyWorkflow, DatasetState, DatasetSummary, DatasetWorkflow, MetricsState,
    MetricsWorkflow, WorkflowError, TRAIN_REFRESH_DELAY,
};

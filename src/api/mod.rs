//! HTTP boundary to the remote classification service.
//!
//! Everything the workflows know about the network lives behind the
//! [`NewsApi`] trait; [`ApiClient`] is the reqwest implementation of it.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{ApiClient, NewsApi};
pub use errors::ApiError;
pub use types::{
    ClassificationResult, ClassifyRequest, DatasetResponse, ModelMetrics, NewDatasetItem, NewsItem,
    NewsLabel, PredictedLabel,
};

#[cfg(test)]
pub use client::MockNewsApi;

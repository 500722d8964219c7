use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::errors::ApiError;
use super::types::{
    ClassificationResult, ClassifyRequest, DatasetResponse, ModelMetrics, NewDatasetItem, NewsItem,
};

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// The classification service operations, as a trait so workflows can be
/// tested against mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsApi: Send + Sync {
    async fn classify(&self, title: &str, text: &str) -> Result<ClassificationResult, ApiError>;
    async fn list_dataset(&self) -> Result<Vec<NewsItem>, ApiError>;
    async fn append_item(&self, item: NewDatasetItem) -> Result<(), ApiError>;
    async fn fetch_metrics(&self) -> Result<ModelMetrics, ApiError>;
    async fn trigger_training(&self) -> Result<(), ApiError>;
}

/// HTTP client for the classification service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into `ApiError::Service`, salvaging the
    /// `detail` field from the error body when one is present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        debug!(status = status.as_u16(), ?detail, "service returned an error");
        Err(ApiError::Service {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl NewsApi for ApiClient {
    async fn classify(&self, title: &str, text: &str) -> Result<ClassificationResult, ApiError> {
        let request = ClassifyRequest {
            title: title.to_string(),
            text: text.to_string(),
        };
        let response = self
            .http
            .post(self.url("/classify"))
            .json(&request)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn list_dataset(&self) -> Result<Vec<NewsItem>, ApiError> {
        let response = self.http.get(self.url("/dataset")).send().await?;
        let response = Self::check(response).await?;
        let body: DatasetResponse = response.json().await?;
        Ok(body.items)
    }

    async fn append_item(&self, item: NewDatasetItem) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/dataset"))
            .json(&item)
            .send()
            .await?;
        // The created-item body is unspecified beyond its id and the caller
        // reloads the full list anyway, so only the status matters here.
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_metrics(&self) -> Result<ModelMetrics, ApiError> {
        let response = self.http.get(self.url("/metrics")).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn trigger_training(&self) -> Result<(), ApiError> {
        let response = self.http.post(self.url("/train")).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

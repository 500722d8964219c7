//! Dataset listing and append workflow.
//!
//! The item list is only ever replaced wholesale by a load; an append goes
//! through `Appending` while keeping the previously loaded items visible,
//! and a successful append re-invokes the load so the list (including the
//! server-assigned id of the new item) stays authoritative.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{NewDatasetItem, NewsApi, NewsItem, NewsLabel};
use crate::workflows::is_blank;

pub const MSG_LOAD_FAILED: &str = "Could not load dataset.";
pub const MSG_APPEND_REQUIRED: &str = "Title and text are required.";
pub const MSG_APPEND_FAILED: &str = "Could not add the item to the dataset.";

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetState {
    Idle,
    Loading,
    Ready { items: Vec<NewsItem> },
    /// An append is in flight; `items` is the last loaded list, kept as the
    /// fallback display value until the append settles.
    Appending { items: Vec<NewsItem> },
    LoadFailed(String),
    /// An append was rejected or failed; the previously loaded list stays
    /// intact alongside the message.
    AppendFailed { items: Vec<NewsItem>, message: String },
}

/// Counts derived from the loaded items. Recomputed on every read so they
/// can never diverge from the list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub total: usize,
    pub real: usize,
    pub fake: usize,
}

pub struct DatasetWorkflow<A> {
    api: Arc<A>,
    state: DatasetState,
}

impl<A: NewsApi> DatasetWorkflow<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: DatasetState::Idle,
        }
    }

    pub fn state(&self) -> &DatasetState {
        &self.state
    }

    /// Items currently available for display, regardless of phase.
    pub fn items(&self) -> &[NewsItem] {
        match &self.state {
            DatasetState::Ready { items }
            | DatasetState::Appending { items }
            | DatasetState::AppendFailed { items, .. } => items,
            _ => &[],
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        let items = self.items();
        let real = items
            .iter()
            .filter(|item| item.label == NewsLabel::Real)
            .count();
        let fake = items
            .iter()
            .filter(|item| item.label == NewsLabel::Fake)
            .count();
        DatasetSummary {
            total: items.len(),
            real,
            fake,
        }
    }

    /// Fetch the dataset, replacing any previously loaded list in full.
    pub async fn load(&mut self) -> &DatasetState {
        self.state = DatasetState::Loading;
        match self.api.list_dataset().await {
            Ok(items) => {
                debug!(count = items.len(), "dataset loaded");
                self.state = DatasetState::Ready { items };
            }
            Err(err) => {
                warn!(error = %err, "dataset load failed");
                self.state = DatasetState::LoadFailed(MSG_LOAD_FAILED.to_string());
            }
        }
        &self.state
    }

    /// Validate and append a new labeled item, then reload the authoritative
    /// list on success. Title and text must both be non-blank after
    /// trimming; the payload is sent as entered.
    pub async fn append(&mut self, title: &str, text: &str, label: NewsLabel) -> &DatasetState {
        if is_blank(title) || is_blank(text) {
            warn!("dataset append rejected: missing title or text");
            self.state = DatasetState::AppendFailed {
                items: self.take_items(),
                message: MSG_APPEND_REQUIRED.to_string(),
            };
            return &self.state;
        }

        self.state = DatasetState::Appending {
            items: self.take_items(),
        };
        let item = NewDatasetItem {
            title: title.to_string(),
            text: text.to_string(),
            label,
        };
        match self.api.append_item(item).await {
            Ok(()) => {
                debug!(%label, "dataset item appended, reloading");
                self.load().await
            }
            Err(err) => {
                warn!(error = %err, "dataset append failed");
                self.state = DatasetState::AppendFailed {
                    items: self.take_items(),
                    message: err.user_message(MSG_APPEND_FAILED),
                };
                &self.state
            }
        }
    }

    fn take_items(&mut self) -> Vec<NewsItem> {
        match std::mem::replace(&mut self.state, DatasetState::Idle) {
            DatasetState::Ready { items }
            | DatasetState::Appending { items }
            | DatasetState::AppendFailed { items, .. } => items,
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockNewsApi};

    fn item(id: u64, label: NewsLabel) -> NewsItem {
        NewsItem {
            id,
            title: format!("Title {id}"),
            text: format!("Text {id}"),
            label,
        }
    }

    fn sample_items(real: usize, fake: usize) -> Vec<NewsItem> {
        let mut items: Vec<NewsItem> = (0..real)
            .map(|i| item(i as u64, NewsLabel::Real))
            .collect();
        items.extend((0..fake).map(|i| item((real + i) as u64, NewsLabel::Fake)));
        items
    }

    #[tokio::test]
    async fn load_replaces_the_list_and_counts_add_up() {
        let mut api = MockNewsApi::new();
        api.expect_list_dataset()
            .returning(|| Ok(sample_items(6, 4)));
        let mut workflow = DatasetWorkflow::new(Arc::new(api));

        workflow.load().await;

        let summary = workflow.summary();
        assert_eq!(summary.total, 10);
        assert_eq!(summary.real, 6);
        assert_eq!(summary.fake, 4);
        assert_eq!(summary.real + summary.fake, workflow.items().len());
    }

    #[tokio::test]
    async fn load_failure_uses_the_fixed_message() {
        let mut api = MockNewsApi::new();
        api.expect_list_dataset().returning(|| {
            Err(ApiError::Service {
                status: 500,
                detail: Some("internal detail that load ignores".to_string()),
            })
        });
        let mut workflow = DatasetWorkflow::new(Arc::new(api));

        workflow.load().await;

        assert_eq!(
            workflow.state(),
            &DatasetState::LoadFailed(MSG_LOAD_FAILED.to_string())
        );
        assert!(workflow.items().is_empty());
    }

    #[tokio::test]
    async fn append_with_blank_fields_never_reaches_the_service() {
        let mut api = MockNewsApi::new();
        api.expect_list_dataset()
            .times(1)
            .returning(|| Ok(sample_items(2, 1)));
        api.expect_append_item().times(0);
        let mut workflow = DatasetWorkflow::new(Arc::new(api));
        workflow.load().await;

        workflow.append("  ", "some text", NewsLabel::Fake).await;

        match workflow.state() {
            DatasetState::AppendFailed { items, message } => {
                assert_eq!(items.len(), 3);
                assert_eq!(message, MSG_APPEND_REQUIRED);
            }
            other => panic!("expected AppendFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_append_reloads_the_authoritative_list() {
        let before = sample_items(6, 4);
        let mut after = before.clone();
        after.push(NewsItem {
            id: 11,
            title: "Test title".to_string(),
            text: "Test body".to_string(),
            label: NewsLabel::Fake,
        });

        let mut api = MockNewsApi::new();
        let first = before.clone();
        api.expect_list_dataset()
            .times(1)
            .returning(move || Ok(first.clone()));
        api.expect_append_item()
            .withf(|item| item.title == "Test title" && item.label == NewsLabel::Fake)
            .times(1)
            .returning(|_| Ok(()));
        let second = after.clone();
        api.expect_list_dataset()
            .times(1)
            .returning(move || Ok(second.clone()));
        let mut workflow = DatasetWorkflow::new(Arc::new(api));

        workflow.load().await;
        let fake_before = workflow.summary().fake;

        workflow.append("Test title", "Test body", NewsLabel::Fake).await;

        let summary = workflow.summary();
        assert_eq!(summary.total, before.len() + 1);
        assert_eq!(summary.fake, fake_before + 1);
        assert!(workflow
            .items()
            .iter()
            .any(|i| i.title == "Test title" && i.text == "Test body"));
    }

    #[tokio::test]
    async fn failed_append_keeps_the_loaded_list_intact() {
        let mut api = MockNewsApi::new();
        api.expect_list_dataset()
            .times(1)
            .returning(|| Ok(sample_items(3, 2)));
        api.expect_append_item().times(1).returning(|_| {
            Err(ApiError::Service {
                status: 409,
                detail: Some("Duplicate item.".to_string()),
            })
        });
        let mut workflow = DatasetWorkflow::new(Arc::new(api));
        workflow.load().await;

        workflow.append("Title", "Text", NewsLabel::Real).await;

        match workflow.state() {
            DatasetState::AppendFailed { items, message } => {
                assert_eq!(items.len(), 5);
                assert_eq!(message, "Duplicate item.");
            }
            other => panic!("expected AppendFailed, got {other:?}"),
        }
        assert_eq!(workflow.summary().total, 5);
    }
}

//! Single-item classification workflow.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{ClassificationResult, NewsApi};
use crate::workflows::is_blank;

pub const MSG_EMPTY_SUBMISSION: &str = "Enter at least a title or text.";
pub const MSG_CLASSIFY_FAILED: &str = "Could not reach the classification service.";

/// Lifecycle of one classification submission. `Classified` and `Failed` are
/// both re-enterable: a new submission moves back through `Submitting`.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyState {
    Idle,
    Submitting,
    Classified(ClassificationResult),
    Failed(String),
}

pub struct ClassifyWorkflow<A> {
    api: Arc<A>,
    state: ClassifyState,
}

impl<A: NewsApi> ClassifyWorkflow<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            state: ClassifyState::Idle,
        }
    }

    pub fn state(&self) -> &ClassifyState {
        &self.state
    }

    /// Validate and submit a title/text pair for classification.
    ///
    /// When both fields are blank after trimming, no request is issued and
    /// the workflow fails with a validation message. The payload itself is
    /// sent exactly as entered.
    pub async fn submit(&mut self, title: &str, text: &str) -> &ClassifyState {
        if is_blank(title) && is_blank(text) {
            warn!("classification submitted without title or text");
            self.state = ClassifyState::Failed(MSG_EMPTY_SUBMISSION.to_string());
            return &self.state;
        }

        self.state = ClassifyState::Submitting;
        match self.api.classify(title, text).await {
            Ok(result) => {
                debug!(label = %result.label, probability = result.probability, "classification settled");
                self.state = ClassifyState::Classified(result);
            }
            Err(err) => {
                warn!(error = %err, "classification request failed");
                self.state = ClassifyState::Failed(err.user_message(MSG_CLASSIFY_FAILED));
            }
        }
        &self.state
    }
}

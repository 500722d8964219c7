//! Model metrics workflow: load, training trigger, delayed refresh.
//!
//! Training completion is not signaled synchronously by the service, so a
//! successful trigger schedules a metrics reload after a fixed delay. The
//! `training` flag spans the entire window, from the moment the trigger is
//! issued until the delayed reload has settled, and the pending refresh task
//! is aborted if the workflow is dropped first.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, ModelMetrics, NewsApi};
use crate::workflows::WorkflowError;

/// How long to wait after a training trigger before re-polling metrics.
/// A stand-in for a real job-completion signal from the service.
pub const TRAIN_REFRESH_DELAY: Duration = Duration::from_secs(2);

pub const MSG_NOT_TRAINED: &str = "No metrics available. Train the model first.";
pub const MSG_METRICS_FAILED: &str = "Could not load model metrics.";
pub const MSG_TRAIN_FAILED: &str = "Training request failed.";

/// Load state of the metrics view. `NotTrained` is the distinct terminal
/// state for a 404, meaning no model has been trained yet.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricsState {
    Idle,
    Loading,
    Ready(ModelMetrics),
    NotTrained,
    Failed(String),
}

struct Shared {
    state: MetricsState,
    training: bool,
}

pub struct MetricsWorkflow<A> {
    api: Arc<A>,
    shared: Arc<Mutex<Shared>>,
    refresh_delay: Duration,
    refresh: Mutex<Option<JoinHandle<()>>>,
}

impl<A: NewsApi + 'static> MetricsWorkflow<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_refresh_delay(api, TRAIN_REFRESH_DELAY)
    }

    /// Same workflow with a non-default post-training refresh delay.
    pub fn with_refresh_delay(api: Arc<A>, refresh_delay: Duration) -> Self {
        Self {
            api,
            shared: Arc::new(Mutex::new(Shared {
                state: MetricsState::Idle,
                training: false,
            })),
            refresh_delay,
            refresh: Mutex::new(None),
        }
    }

    pub fn state(&self) -> MetricsState {
        self.shared.lock().unwrap().state.clone()
    }

    /// Whether a training cycle (trigger or its pending delayed refresh) is
    /// in flight. The triggering surface is expected to stay disabled while
    /// this is true.
    pub fn is_training(&self) -> bool {
        self.shared.lock().unwrap().training
    }

    /// Fetch current metrics.
    pub async fn load(&self) -> MetricsState {
        self.shared.lock().unwrap().state = MetricsState::Loading;
        Self::load_into(&self.api, &self.shared).await;
        self.state()
    }

    async fn load_into(api: &Arc<A>, shared: &Arc<Mutex<Shared>>) {
        let state = match api.fetch_metrics().await {
            Ok(metrics) => {
                debug!(model = %metrics.model_type, "metrics loaded");
                MetricsState::Ready(metrics)
            }
            Err(ApiError::Service {
                status: 404,
                ..
            }) => {
                debug!("no trained model yet");
                MetricsState::NotTrained
            }
            Err(err) => {
                warn!(error = %err, "metrics load failed");
                MetricsState::Failed(MSG_METRICS_FAILED.to_string())
            }
        };
        shared.lock().unwrap().state = state;
    }

    /// Trigger a training run.
    ///
    /// On a rejected trigger the service's `detail` (or a generic fallback)
    /// lands in `Failed` and the training flag clears immediately, with no
    /// refresh. On an accepted trigger a reload is scheduled after the
    /// refresh delay and the flag clears only once that reload has settled.
    pub async fn train(&self) -> Result<(), WorkflowError> {
        {
            let mut shared = self.shared.lock().unwrap();
            if shared.training {
                return Err(WorkflowError::TrainingInFlight);
            }
            shared.training = true;
        }

        if let Err(err) = self.api.trigger_training().await {
            warn!(error = %err, "training trigger failed");
            let mut shared = self.shared.lock().unwrap();
            shared.state = MetricsState::Failed(err.user_message(MSG_TRAIN_FAILED));
            shared.training = false;
            return Ok(());
        }

        info!(delay_ms = self.refresh_delay.as_millis() as u64, "training triggered, refresh scheduled");
        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.shared);
        let delay = self.refresh_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Self::load_into(&api, &shared).await;
            shared.lock().unwrap().training = false;
        });
        *self.refresh.lock().unwrap() = Some(handle);
        Ok(())
    }

    /// Wait for a pending post-training refresh, if any, to settle.
    pub async fn refresh_settled(&self) {
        let handle = self.refresh.lock().unwrap().take();
        if let Some(handle) = handle {
            // An aborted refresh just means the flag was left to the abort
            // site; nothing to surface here.
            let _ = handle.await;
        }
    }
}

impl<A> Drop for MetricsWorkflow<A> {
    fn drop(&mut self) {
        if let Ok(mut refresh) = self.refresh.lock() {
            if let Some(handle) = refresh.take() {
                handle.abort();
            }
        }
    }
}

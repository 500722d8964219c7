use serde::{Deserialize, Serialize};

/// Binary veracity label used by the dataset endpoints.
///
/// The service encodes this as a bare integer: `0` for real news, `1` for
/// fake news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NewsLabel {
    Real,
    Fake,
}

impl TryFrom<u8> for NewsLabel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(NewsLabel::Real),
            1 => Ok(NewsLabel::Fake),
            other => Err(format!("label must be 0 or 1, got {other}")),
        }
    }
}

impl From<NewsLabel> for u8 {
    fn from(label: NewsLabel) -> u8 {
        match label {
            NewsLabel::Real => 0,
            NewsLabel::Fake => 1,
        }
    }
}

impl std::fmt::Display for NewsLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsLabel::Real => write!(f, "REAL"),
            NewsLabel::Fake => write!(f, "FAKE"),
        }
    }
}

/// One labeled dataset entry. Created by the service on append; the client
/// never mutates or deletes items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u64,
    pub title: String,
    pub text: String,
    pub label: NewsLabel,
}

/// Label predicted by the classifier, reported as a string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictedLabel {
    #[serde(rename = "REAL")]
    Real,
    #[serde(rename = "FAKE")]
    Fake,
}

impl std::fmt::Display for PredictedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictedLabel::Real => write!(f, "REAL"),
            PredictedLabel::Fake => write!(f, "FAKE"),
        }
    }
}

/// Response of `POST /classify`. `probability` is the probability that the
/// submitted item is fake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: PredictedLabel,
    pub probability: f64,
    pub confidence: f64,
    pub explanation: String,
}

impl ClassificationResult {
    /// Share of the probability mass assigned to FAKE.
    pub fn fake_share(&self) -> f64 {
        self.probability
    }

    /// Share assigned to REAL. Always the exact complement of
    /// [`fake_share`](Self::fake_share); the service is never queried twice
    /// for the same split.
    pub fn real_share(&self) -> f64 {
        1.0 - self.probability
    }
}

/// Body of `POST /classify`. Fields are sent exactly as entered, untrimmed.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyRequest {
    pub title: String,
    pub text: String,
}

/// Body of `POST /dataset`.
#[derive(Debug, Clone, Serialize)]
pub struct NewDatasetItem {
    pub title: String,
    pub text: String,
    pub label: NewsLabel,
}

/// Response of `GET /dataset`. A missing `items` field is treated as an
/// empty dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetResponse {
    #[serde(default)]
    pub items: Vec<NewsItem>,
}

/// Response of `GET /metrics`. The client trusts the service on the
/// `train_size + test_size <= total_samples` relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub model_type: String,
    pub total_samples: u64,
    pub train_size: u64,
    pub test_size: u64,
}

//! Score and label types shared by every stage of the fusion pipeline.

use serde::{Deserialize, Serialize};

/// A polarity in `[-1.0, 1.0]`, or `None` when a modality produced no evidence.
///
/// `Some(0.0)` is a neutral reading and must stay distinguishable from `None`.
pub type SentimentScore = Option<f32>;

/// Clamp a polarity into `[-1.0, 1.0]`. NaN maps to `None`.
#[must_use]
pub fn clamp_score(value: f32) -> SentimentScore {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(-1.0, 1.0))
    }
}

/// The input channels a message can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Emoji,
    Text,
    Image,
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Emoji => write!(f, "emoji"),
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Coarse bucket for a fused score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    /// Bucket a score. Thresholds are exclusive lower bounds:
    /// `> 0.5`, `> 0.2`, `> -0.2`, `> -0.5`, everything else.
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        if score > 0.5 {
            Self::VeryPositive
        } else if score > 0.2 {
            Self::Positive
        } else if score > -0.2 {
            Self::Neutral
        } else if score > -0.5 {
            Self::Negative
        } else {
            Self::VeryNegative
        }
    }

    /// `None` when there is no score to bucket.
    #[must_use]
    pub fn from_optional(score: SentimentScore) -> Option<Self> {
        score.map(Self::from_score)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryPositive => "Very Positive",
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::VeryNegative => "Very Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

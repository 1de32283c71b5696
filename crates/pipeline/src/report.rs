use {emofuse_common::SentimentLabel, emofuse_media::ParsedMessage, serde::Serialize};

/// Per-modality scores before fusion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ModalityScores {
    pub emoji: Option<f32>,
    pub image: Option<f32>,
    pub text: Option<f32>,
}

/// Everything the pipeline knows about one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageSentiment {
    pub message: String,
    pub parsed: ParsedMessage,
    pub scores: ModalityScores,
    /// Output of fusion, before smoothing.
    pub fused: Option<f32>,
    /// Final score.
    pub score: Option<f32>,
    /// Whether the soft-negation rule changed the fused score.
    pub smoothed: bool,
    pub label: Option<SentimentLabel>,
}

impl MessageSentiment {
    /// Human-readable label, or "No sentiment detected".
    #[must_use]
    pub fn label_text(&self) -> &'static str {
        self.label
            .as_ref()
            .map_or("No sentiment detected", SentimentLabel::as_str)
    }
}

//! External sentiment models.
//!
//! The pipeline only sees scores: each classifier takes a batch of inputs and
//! returns one polarity in `[-1, 1]` per input, in the same order. Anything
//! else (an error, a short or long result) makes the pipeline drop that
//! modality for the batch.

use {anyhow::Result, async_trait::async_trait};

/// Scores residual message text.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classifier identifier (e.g., "roberta-sentiment"), used in logs.
    fn id(&self) -> &str;

    /// One score per text, same order.
    async fn classify(&self, texts: &[String]) -> Result<Vec<f32>>;
}

/// Scores images by reference (usually a URL).
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Classifier identifier, used in logs.
    fn id(&self) -> &str;

    /// One score per image reference, same order.
    async fn classify(&self, image_refs: &[String]) -> Result<Vec<f32>>;
}

/// Scores every image as neutral. Stands in when no image model is wired up
/// but image-bearing messages should still get a score.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralImageClassifier;

#[async_trait]
impl ImageClassifier for NeutralImageClassifier {
    fn id(&self) -> &str {
        "neutral"
    }

    async fn classify(&self, image_refs: &[String]) -> Result<Vec<f32>> {
        Ok(vec![0.0; image_refs.len()])
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn neutral_classifier_scores_each_reference() {
        let refs = vec!["a.png".to_string(), "b.png".to_string()];
        let scores = NeutralImageClassifier.classify(&refs).await.unwrap();
        assert_eq!(scores, vec![0.0, 0.0]);
        assert!(NeutralImageClassifier.classify(&[]).await.unwrap().is_empty());
    }
}

use std::sync::Arc;

use {
    emofuse_common::{Modality, SentimentLabel, clamp_score},
    emofuse_config::{EmofuseConfig, FusionConfig, ImageFallback, SmoothingConfig},
    emofuse_emoji::EmojiResolver,
    emofuse_fusion::{fuse, smooth_detailed},
    emofuse_media::{ParsedMessage, segment_batch},
    tracing::{debug, warn},
};

use crate::{
    classifier::{ImageClassifier, NeutralImageClassifier, TextClassifier},
    error::{Context, Error, Result},
    report::{MessageSentiment, ModalityScores},
};

/// Drives one batch of messages from raw text to labelled scores.
///
/// Holds no per-batch state; one instance can serve any number of batches.
#[derive(Clone)]
pub struct SentimentPipeline {
    resolver: EmojiResolver,
    text_classifier: Option<Arc<dyn TextClassifier>>,
    image_classifier: Option<Arc<dyn ImageClassifier>>,
    fusion: FusionConfig,
    smoothing: SmoothingConfig,
}

impl Default for SentimentPipeline {
    fn default() -> Self {
        Self::new(EmojiResolver::builtin())
    }
}

impl SentimentPipeline {
    /// Pipeline with default tunables and no classifiers.
    #[must_use]
    pub fn new(resolver: EmojiResolver) -> Self {
        Self {
            resolver,
            text_classifier: None,
            image_classifier: None,
            fusion: FusionConfig::default(),
            smoothing: SmoothingConfig::default(),
        }
    }

    /// Pipeline configured from `config`. With `image_fallback = "neutral"`
    /// images are scored 0.0 until a real image classifier is attached.
    pub fn from_config(config: &EmofuseConfig) -> Result<Self> {
        let resolver = EmojiResolver::from_config(&config.lexicon)
            .context("failed to load emoji tables")?;
        let mut pipeline = Self::new(resolver)
            .with_fusion(config.fusion)
            .with_smoothing(config.smoothing);
        if config.pipeline.image_fallback == ImageFallback::Neutral {
            pipeline = pipeline.with_image_classifier(Arc::new(NeutralImageClassifier));
        }
        Ok(pipeline)
    }

    #[must_use]
    pub fn with_text_classifier(mut self, classifier: Arc<dyn TextClassifier>) -> Self {
        self.text_classifier = Some(classifier);
        self
    }

    #[must_use]
    pub fn with_image_classifier(mut self, classifier: Arc<dyn ImageClassifier>) -> Self {
        self.image_classifier = Some(classifier);
        self
    }

    #[must_use]
    pub fn with_fusion(mut self, fusion: FusionConfig) -> Self {
        self.fusion = fusion;
        self
    }

    #[must_use]
    pub fn with_smoothing(mut self, smoothing: SmoothingConfig) -> Self {
        self.smoothing = smoothing;
        self
    }

    #[must_use]
    pub fn resolver(&self) -> &EmojiResolver {
        &self.resolver
    }

    /// Analyse a batch. Output has one entry per message, in input order.
    ///
    /// Classifier failures degrade the affected modality to absent for the
    /// whole batch; only an internal shape mismatch is an error.
    pub async fn analyze(&self, messages: &[String]) -> Result<Vec<MessageSentiment>> {
        let parsed = segment_batch(messages);

        let (text_idx, texts) = compact(&parsed, |p| p.residual_text.as_ref());
        let (image_idx, image_refs) = compact(&parsed, |p| p.image_ref.as_ref());
        debug!(
            messages = messages.len(),
            texts = texts.len(),
            images = image_refs.len(),
            "analyzing batch"
        );

        let (text_scores, image_scores) =
            tokio::join!(self.classify_texts(&texts), self.classify_images(&image_refs));

        let text_scores = scatter(parsed.len(), &text_idx, text_scores);
        let image_scores = scatter(parsed.len(), &image_idx, image_scores);
        self.score_parsed(messages, parsed, &text_scores, &image_scores)
    }

    /// The synchronous tail of [`analyze`](Self::analyze): resolve emoji,
    /// fuse with the given text and image scores, smooth and label.
    ///
    /// `text_scores` and `image_scores` are indexed like `messages`.
    pub fn score_parsed(
        &self,
        messages: &[String],
        parsed: Vec<ParsedMessage>,
        text_scores: &[Option<f32>],
        image_scores: &[Option<f32>],
    ) -> Result<Vec<MessageSentiment>> {
        if messages.len() != parsed.len() {
            return Err(Error::BatchMismatch {
                messages: messages.len(),
                parsed: parsed.len(),
            });
        }

        let emoji_scores: Vec<Option<f32>> = parsed
            .iter()
            .map(|p| self.resolver.resolve_sequence(p.emojis()))
            .collect();
        let fused = fuse(&emoji_scores, image_scores, text_scores, &self.fusion)?;

        let residual: Vec<Option<String>> = parsed.iter().map(|p| p.residual_text.clone()).collect();
        let sequences: Vec<_> = parsed.iter().map(|p| p.emoji_sequence.clone()).collect();
        let smoothed = smooth_detailed(&fused, &residual, &sequences, &self.smoothing);

        Ok(messages
            .iter()
            .zip(parsed)
            .enumerate()
            .map(|(i, (message, parsed))| {
                let final_score = smoothed[i].score;
                MessageSentiment {
                    message: message.clone(),
                    parsed,
                    scores: ModalityScores {
                        emoji: emoji_scores[i],
                        image: image_scores[i],
                        text: text_scores[i],
                    },
                    fused: fused[i],
                    score: final_score,
                    smoothed: smoothed[i].adjusted,
                    label: SentimentLabel::from_optional(final_score),
                }
            })
            .collect())
    }

    async fn classify_texts(&self, texts: &[String]) -> Option<Vec<Option<f32>>> {
        let classifier = self.text_classifier.as_ref()?;
        if texts.is_empty() {
            return Some(Vec::new());
        }
        let result = classifier.classify(texts).await;
        checked_scores(Modality::Text, classifier.id(), texts.len(), result)
    }

    async fn classify_images(&self, image_refs: &[String]) -> Option<Vec<Option<f32>>> {
        let classifier = self.image_classifier.as_ref()?;
        if image_refs.is_empty() {
            return Some(Vec::new());
        }
        let result = classifier.classify(image_refs).await;
        checked_scores(Modality::Image, classifier.id(), image_refs.len(), result)
    }
}

/// Indices and values of the messages that carry a given part.
fn compact<'a>(
    parsed: &'a [ParsedMessage],
    part: impl Fn(&'a ParsedMessage) -> Option<&'a String>,
) -> (Vec<usize>, Vec<String>) {
    parsed
        .iter()
        .enumerate()
        .filter_map(|(i, p)| part(p).map(|v| (i, v.clone())))
        .unzip()
}

/// Place compacted scores back at their message indices.
fn scatter(len: usize, indices: &[usize], scores: Option<Vec<Option<f32>>>) -> Vec<Option<f32>> {
    let mut out = vec![None; len];
    if let Some(scores) = scores {
        for (&i, score) in indices.iter().zip(scores) {
            out[i] = score;
        }
    }
    out
}

fn checked_scores(
    modality: Modality,
    classifier: &str,
    expected: usize,
    result: anyhow::Result<Vec<f32>>,
) -> Option<Vec<Option<f32>>> {
    match result {
        Ok(scores) if scores.len() == expected => {
            Some(scores.into_iter().map(clamp_score).collect())
        },
        Ok(scores) => {
            warn!(
                %modality,
                classifier,
                expected,
                got = scores.len(),
                "classifier returned wrong number of scores, dropping modality"
            );
            None
        },
        Err(e) => {
            warn!(%modality, classifier, error = %e, "classifier failed, dropping modality");
            None
        },
    }
}

use {emofuse_config::FusionConfig, tracing::warn};

use crate::error::{Error, Result};

/// Combine one message's modality scores.
///
/// Priority: emoji with text (weighted), emoji alone, text alone, image
/// alone. The image score only counts when neither emoji nor text is present.
#[must_use]
pub fn fuse_one(
    emoji: Option<f32>,
    image: Option<f32>,
    text: Option<f32>,
    config: &FusionConfig,
) -> Option<f32> {
    match (emoji, text, image) {
        (Some(e), Some(t), _) => {
            let w = config.emoji_weight;
            Some(w * e + (1.0 - w) * t)
        },
        (Some(e), None, _) => Some(e),
        (None, Some(t), _) => Some(t),
        (None, None, image) => image,
    }
}

/// Fuse a batch. All three lists must have one entry per message.
///
/// `config.emoji_weight` is assumed to be validated already (see
/// `emofuse_config::validate`).
pub fn fuse(
    emoji: &[Option<f32>],
    image: &[Option<f32>],
    text: &[Option<f32>],
    config: &FusionConfig,
) -> Result<Vec<Option<f32>>> {
    if emoji.len() != image.len() || emoji.len() != text.len() {
        let err = Error::ShapeMismatch {
            emoji: emoji.len(),
            image: image.len(),
            text: text.len(),
        };
        warn!(error = %err, "refusing to fuse batch");
        return Err(err);
    }

    Ok(emoji
        .iter()
        .zip(image)
        .zip(text)
        .map(|((e, i), t)| fuse_one(*e, *i, *t, config))
        .collect())
}

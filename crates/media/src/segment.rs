use std::sync::LazyLock;

use {
    emofuse_emoji::Emoji,
    regex::Regex,
    serde::Serialize,
    tracing::debug,
    unicode_segmentation::UnicodeSegmentation,
};

#[allow(clippy::expect_used)] // static pattern, known to compile
static IMAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<img>(.*?)</img>").expect("valid image tag regex"));

/// One message split into its modalities. Any part may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedMessage {
    /// Emoji in left-to-right order, `None` when the message has none.
    pub emoji_sequence: Option<Vec<Emoji>>,
    /// Body of the first `<img>…</img>` tag.
    pub image_ref: Option<String>,
    /// What is left once emoji and the image tag are removed, `None` if blank.
    pub residual_text: Option<String>,
}

impl ParsedMessage {
    #[must_use]
    pub fn emojis(&self) -> &[Emoji] {
        self.emoji_sequence.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emoji_sequence.is_none() && self.image_ref.is_none() && self.residual_text.is_none()
    }
}

/// Split a single message.
///
/// Only the first image tag is honoured; later tags stay in the residual text.
/// Emoji are looked for after the image tag has been removed.
#[must_use]
pub fn segment(message: &str) -> ParsedMessage {
    let (image_ref, without_image) = split_image(message);

    let mut emojis = Vec::new();
    let mut residual = String::with_capacity(without_image.len());
    for grapheme in without_image.graphemes(true) {
        match Emoji::detect(grapheme) {
            Some(emoji) => emojis.push(emoji),
            None => residual.push_str(grapheme),
        }
    }

    let residual = residual.trim();
    ParsedMessage {
        emoji_sequence: (!emojis.is_empty()).then_some(emojis),
        image_ref,
        residual_text: (!residual.is_empty()).then(|| residual.to_string()),
    }
}

/// Remove the first image tag, returning its trimmed body and the rest.
fn split_image(message: &str) -> (Option<String>, String) {
    let Some(caps) = IMAGE_TAG.captures(message) else {
        return (None, message.to_string());
    };
    let (Some(tag), Some(body)) = (caps.get(0), caps.get(1)) else {
        return (None, message.to_string());
    };
    let mut rest = String::with_capacity(message.len() - tag.len());
    rest.push_str(&message[..tag.start()]);
    rest.push_str(&message[tag.end()..]);
    let body = body.as_str().trim();
    ((!body.is_empty()).then(|| body.to_string()), rest)
}

/// Split every message, preserving order.
#[must_use]
pub fn segment_batch(messages: &[String]) -> Vec<ParsedMessage> {
    let parsed: Vec<ParsedMessage> = messages.iter().map(|m| segment(m)).collect();
    debug!(
        messages = parsed.len(),
        with_emoji = parsed.iter().filter(|p| p.emoji_sequence.is_some()).count(),
        with_image = parsed.iter().filter(|p| p.image_ref.is_some()).count(),
        "segmented batch"
    );
    parsed
}

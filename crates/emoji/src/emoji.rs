use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Emoji presentation selector. Dropped from the canonical form so `❤️` and
/// `❤` share table entries.
const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Fitzpatrick modifiers, light to dark. Dropped so `👍🏽` shares `👍`'s entries.
const SKIN_TONES: std::ops::RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

fn is_modifier(c: char) -> bool {
    c == VARIATION_SELECTOR_16 || SKIN_TONES.contains(&c)
}

/// A single grapheme recognised as an emoji. Identity is the raw grapheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emoji(String);

impl Emoji {
    /// Wrap a raw grapheme without checking it against the emoji set.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Recognise a grapheme as an emoji, or `None` if it is not one.
    #[must_use]
    pub fn detect(grapheme: &str) -> Option<Self> {
        lookup(grapheme).map(|_| Self(grapheme.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The grapheme with presentation selectors and skin tones removed.
    #[must_use]
    pub fn canonical(&self) -> Cow<'_, str> {
        canonicalize(&self.0)
    }

    /// Lowercase CLDR name (e.g. `"crying face"`), or `None` when the
    /// grapheme is not in the emoji set.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        lookup(&self.0).map(|e| e.name().to_lowercase())
    }
}

impl std::fmt::Display for Emoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Emoji {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Strip presentation selectors and skin-tone modifiers from a grapheme.
#[must_use]
pub fn canonicalize(raw: &str) -> Cow<'_, str> {
    if raw.chars().any(is_modifier) {
        Cow::Owned(raw.chars().filter(|c| !is_modifier(*c)).collect())
    } else {
        Cow::Borrowed(raw)
    }
}

fn lookup(grapheme: &str) -> Option<&'static emojis::Emoji> {
    emojis::get(grapheme).or_else(|| {
        let canonical = canonicalize(grapheme);
        match canonical {
            Cow::Owned(ref stripped) if !stripped.is_empty() => emojis::get(stripped),
            _ => None,
        }
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_emoji_graphemes() {
        assert!(Emoji::detect("😢").is_some());
        assert!(Emoji::detect("❤️").is_some());
        assert!(Emoji::detect("👍🏽").is_some());
        assert!(Emoji::detect("a").is_none());
        assert!(Emoji::detect(" ").is_none());
        assert!(Emoji::detect("").is_none());
    }

    #[test]
    fn canonical_strips_presentation_selector() {
        assert_eq!(Emoji::new("❤️").canonical(), "❤");
        assert!(matches!(Emoji::new("🙂").canonical(), Cow::Borrowed("🙂")));
    }

    #[test]
    fn canonical_strips_skin_tones() {
        assert_eq!(Emoji::new("👍🏽").canonical(), "👍");
        assert_eq!(Emoji::new("👋🏻").canonical(), "👋");
        assert_eq!(Emoji::new("👍🏿").canonical(), Emoji::new("👍").canonical());
    }

    #[test]
    fn names_are_lowercase_cldr() {
        assert_eq!(Emoji::new("😢").name().as_deref(), Some("crying face"));
        assert_eq!(
            Emoji::new("😭").name().as_deref(),
            Some("loudly crying face")
        );
        assert_eq!(Emoji::new("x").name(), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![Emoji::new("🙂"), Emoji::new("🎉")]).unwrap();
        assert_eq!(json, r#"["🙂","🎉"]"#);
    }
}

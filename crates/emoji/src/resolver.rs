//! Emoji sequence → polarity.

use std::sync::Arc;

use {
    emofuse_config::LexiconConfig,
    serde::Serialize,
    tracing::debug,
};

use crate::{
    emoji::Emoji,
    error::Result,
    keywords::{
        FALLBACK_NEGATIVE, FALLBACK_POSITIVE, NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS,
        STRONG_NEGATIVE_FLOOR, STRONG_NEGATIVE_KEYWORDS, contains_any,
    },
    tables::EmojiTables,
};

/// Which step of the cascade produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Override,
    Lexicon,
    KeywordFallback,
}

/// A cascade value together with the scale it lives on. Ratios are mapped to
/// polarities exactly once, in [`RawScore::normalize`].
#[derive(Debug, Clone, Copy, PartialEq)]
enum RawScore {
    /// Fraction of positive usages, `[0, 1]`.
    Ratio(f32),
    /// Already a polarity, `[-1, 1]`.
    Polarity(f32),
}

impl RawScore {
    fn value(self) -> f32 {
        match self {
            Self::Ratio(v) | Self::Polarity(v) => v,
        }
    }

    fn normalize(self) -> f32 {
        match self {
            Self::Ratio(r) => r * 2.0 - 1.0,
            Self::Polarity(p) => p,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Strategy {
    Override,
    Lexicon,
    KeywordFallback,
}

/// Evaluated in order; the first definite value wins.
const CASCADE: [Strategy; 3] = [
    Strategy::Override,
    Strategy::Lexicon,
    Strategy::KeywordFallback,
];

impl Strategy {
    fn source(self) -> ScoreSource {
        match self {
            Self::Override => ScoreSource::Override,
            Self::Lexicon => ScoreSource::Lexicon,
            Self::KeywordFallback => ScoreSource::KeywordFallback,
        }
    }

    fn evaluate(
        self,
        tables: &EmojiTables,
        emoji: &Emoji,
        name: Option<&str>,
    ) -> Option<RawScore> {
        match self {
            Self::Override => tables.override_for(emoji).map(RawScore::Polarity),
            Self::Lexicon => tables.ratio_for(emoji).map(RawScore::Ratio),
            Self::KeywordFallback => {
                let name = name?;
                let score = if contains_any(name, POSITIVE_KEYWORDS) {
                    FALLBACK_POSITIVE
                } else if contains_any(name, NEGATIVE_KEYWORDS) {
                    FALLBACK_NEGATIVE
                } else {
                    0.0
                };
                Some(RawScore::Polarity(score))
            },
        }
    }
}

/// How one emoji was scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmojiResolution {
    pub emoji: Emoji,
    /// Canonical name, when the emoji is in the Unicode emoji set.
    pub name: Option<String>,
    pub source: ScoreSource,
    /// Value produced by the cascade, before the post-passes.
    pub raw: f32,
    /// Whether the strong-negative safety net replaced the cascade value.
    pub forced_negative: bool,
    /// Final polarity in `[-1, 1]`.
    pub score: f32,
}

/// Resolves emoji sequences against a read-only pair of tables.
#[derive(Debug, Clone)]
pub struct EmojiResolver {
    tables: Arc<EmojiTables>,
}

impl Default for EmojiResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EmojiResolver {
    #[must_use]
    pub fn new(tables: Arc<EmojiTables>) -> Self {
        Self { tables }
    }

    /// Resolver over the bundled tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(EmojiTables::builtin())
    }

    /// Resolver over the configured tables (bundled unless a path is set).
    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        match config.path {
            Some(ref path) => Ok(Self::new(Arc::new(EmojiTables::load(path)?))),
            None => Ok(Self::builtin()),
        }
    }

    #[must_use]
    pub fn tables(&self) -> &EmojiTables {
        &self.tables
    }

    /// Score a single emoji, or `None` when no strategy yields a value.
    #[must_use]
    pub fn resolve_emoji(&self, emoji: &Emoji) -> Option<EmojiResolution> {
        let name = emoji.name();

        let (strategy, raw) = CASCADE.iter().find_map(|s| {
            s.evaluate(&self.tables, emoji, name.as_deref())
                .map(|raw| (*s, raw))
        })?;
        let source = strategy.source();

        // Curated overrides are final; everything else passes the safety net.
        let forced_negative = source != ScoreSource::Override
            && name
                .as_deref()
                .is_some_and(|n| contains_any(n, STRONG_NEGATIVE_KEYWORDS));
        let adjusted = if forced_negative {
            RawScore::Polarity(STRONG_NEGATIVE_FLOOR)
        } else {
            raw
        };

        Some(EmojiResolution {
            emoji: emoji.clone(),
            name,
            source,
            raw: raw.value(),
            forced_negative,
            score: adjusted.normalize(),
        })
    }

    /// Mean of the resolved per-emoji scores; `None` when nothing resolved.
    #[must_use]
    pub fn resolve_sequence(&self, emojis: &[Emoji]) -> Option<f32> {
        let mut total = 0.0_f32;
        let mut count = 0_u32;
        for emoji in emojis {
            match self.resolve_emoji(emoji) {
                Some(resolution) => {
                    total += resolution.score;
                    count += 1;
                },
                None => debug!(emoji = %emoji, "emoji could not be resolved"),
            }
        }
        (count > 0).then(|| total / count as f32)
    }

    /// One score per input sequence, in input order.
    #[must_use]
    pub fn resolve(&self, sequences: &[Vec<Emoji>]) -> Vec<Option<f32>> {
        sequences
            .iter()
            .map(|seq| self.resolve_sequence(seq))
            .collect()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn seq(emojis: &[&str]) -> Vec<Emoji> {
        emojis.iter().map(|e| Emoji::new(*e)).collect()
    }

    #[test]
    fn overrides_are_returned_exactly() {
        let resolver = EmojiResolver::builtin();
        let overrides: Vec<(String, f32)> = resolver
            .tables()
            .overrides()
            .map(|(e, v)| (e.to_string(), v))
            .collect();
        assert!(!overrides.is_empty());
        for (emoji, value) in overrides {
            let scores = resolver.resolve(&[seq(&[emoji.as_str()])]);
            assert_eq!(scores, vec![Some(value)], "override for {emoji}");
        }
    }

    #[rstest]
    #[case("😞")]
    #[case("😠")]
    #[case("💔")]
    #[case("☹️")]
    #[case("😿")]
    #[case("😂")]
    fn strong_negative_names_floor_at_minus_half(#[case] emoji: &str) {
        let resolver = EmojiResolver::builtin();
        let resolution = resolver.resolve_emoji(&Emoji::new(emoji)).unwrap();
        assert!(resolution.forced_negative, "{resolution:?}");
        assert!(resolution.score <= -0.5, "{resolution:?}");
    }

    #[test]
    fn lexicon_ratio_is_rescaled_once() {
        let resolver = EmojiResolver::builtin();
        let r = resolver.resolve_emoji(&Emoji::new("🎉")).unwrap();
        assert_eq!(r.source, ScoreSource::Lexicon);
        assert!(approx(r.raw, 0.66));
        assert!(approx(r.score, 0.32), "{r:?}");
    }

    #[test]
    fn custom_ratio_bounds_map_to_polarity_bounds() {
        let tables = EmojiTables::from_entries(
            Vec::new(),
            [("🐍".to_string(), 0.0), ("🦄".to_string(), 1.0)],
        )
        .unwrap();
        let resolver = EmojiResolver::new(Arc::new(tables));
        assert_eq!(
            resolver.resolve(&[seq(&["🐍"]), seq(&["🦄"])]),
            vec![Some(-1.0), Some(1.0)]
        );
    }

    #[test]
    fn override_inside_unit_interval_is_not_rescaled() {
        let tables = EmojiTables::from_entries([("🙂".to_string(), 0.5)], Vec::new()).unwrap();
        let resolver = EmojiResolver::new(Arc::new(tables));
        assert_eq!(resolver.resolve_sequence(&seq(&["🙂"])), Some(0.5));
    }

    #[rstest]
    #[case("🏆", 0.3)]
    #[case("😟", -0.3)]
    #[case("🚗", 0.0)]
    fn keyword_fallback_for_unlisted_emoji(#[case] emoji: &str, #[case] expected: f32) {
        let resolver = EmojiResolver::builtin();
        let r = resolver.resolve_emoji(&Emoji::new(emoji)).unwrap();
        assert_eq!(r.source, ScoreSource::KeywordFallback);
        assert!(!r.forced_negative);
        assert_eq!(r.score, expected);
    }

    #[test]
    fn skin_tone_resolves_like_base_emoji() {
        let resolver = EmojiResolver::builtin();
        let base = resolver.resolve_emoji(&Emoji::new("👍")).unwrap();
        let toned = resolver.resolve_emoji(&Emoji::new("👍🏽")).unwrap();
        assert_eq!(toned.source, ScoreSource::Lexicon);
        assert_eq!(toned.score, base.score);
        assert!(approx(toned.score, 0.2), "{toned:?}");
    }

    #[rstest]
    #[case("🏆", 0.3)]
    #[case("🚗", 0.0)]
    fn fallback_values_are_polarities_not_ratios(#[case] emoji: &str, #[case] expected: f32) {
        let resolver = EmojiResolver::builtin();
        let r = resolver.resolve_emoji(&Emoji::new(emoji)).unwrap();
        assert_eq!(r.source, ScoreSource::KeywordFallback);
        // Same value before and after normalization: no 2r - 1 mapping.
        assert_eq!(r.raw, expected);
        assert_eq!(r.score, expected);
        assert_ne!(r.score, expected * 2.0 - 1.0);
    }

    #[test]
    fn unnamed_graphemes_yield_no_score() {
        let resolver = EmojiResolver::builtin();
        assert!(resolver.resolve_emoji(&Emoji::new("x")).is_none());
        assert_eq!(resolver.resolve_sequence(&seq(&["x", "y"])), None);
        assert_eq!(resolver.resolve_sequence(&[]), None);
    }

    #[test]
    fn sequence_averages_resolved_scores_only() {
        let resolver = EmojiResolver::builtin();
        let score = resolver.resolve_sequence(&seq(&["🎉", "x", "🏆"])).unwrap();
        assert!(approx(score, (0.32 + 0.3) / 2.0), "{score}");
    }

    #[test]
    fn batch_preserves_order_and_length() {
        let resolver = EmojiResolver::builtin();
        let scores = resolver.resolve(&[seq(&["😢"]), Vec::new(), seq(&["🚗"])]);
        assert_eq!(scores, vec![Some(-0.8), None, Some(0.0)]);
    }

    #[test]
    fn from_config_without_path_uses_builtin() {
        let resolver = EmojiResolver::from_config(&LexiconConfig::default()).unwrap();
        assert_eq!(
            resolver.tables().override_for(&Emoji::new("😭")),
            Some(-0.8)
        );
    }
}

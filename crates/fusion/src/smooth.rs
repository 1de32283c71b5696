//! Soft-negation smoothing.
//!
//! A message like "I'm not that sad 🙂" tends to come out of fusion mildly
//! negative: the text model latches onto "sad" and the positive emoji only
//! carries a small weight. When a moderately negative score coincides with a
//! negated negative phrase and a positive emoji, the score is pulled towards
//! neutral.

use std::sync::LazyLock;

use {
    emofuse_config::SmoothingConfig,
    emofuse_emoji::{Emoji, emoji::canonicalize},
    regex::Regex,
    serde::Serialize,
    tracing::debug,
};

#[allow(clippy::expect_used)] // static pattern, known to compile
static NEGATED_NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bnot\s+(?:that\s+|so\s+|really\s+|very\s+|too\s+)?(sad|upset|depressed|angry|mad|unhappy|down|bad)",
    )
    .expect("valid negation regex")
});

const POSITIVE_EMOJI: &[&str] = &[
    "😁", "😀", "😊", "🙂", "😃", "😄", "😆", "😎", "😍", "🤗", "👍", "🎉", "❤️", "💕", "💖", "✨",
    "🥳", "😺", "😸",
];

/// One smoother output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Smoothed {
    pub score: Option<f32>,
    /// Whether the rule fired for this message.
    pub adjusted: bool,
}

/// Whether `text` contains a negated negative phrase such as "not so sad".
#[must_use]
pub fn has_negated_negative(text: &str) -> bool {
    NEGATED_NEGATIVE.is_match(text)
}

/// Whether any emoji in `emojis` is on the positive list.
#[must_use]
pub fn has_positive_emoji(emojis: &[Emoji]) -> bool {
    emojis.iter().any(|e| {
        let canonical = e.canonical();
        POSITIVE_EMOJI
            .iter()
            .any(|p| canonicalize(p) == canonical.as_ref())
    })
}

fn smooth_one(
    score: Option<f32>,
    text: Option<&str>,
    emojis: Option<&[Emoji]>,
    config: &SmoothingConfig,
) -> Smoothed {
    let passthrough = Smoothed {
        score,
        adjusted: false,
    };
    let Some(s) = score else {
        return passthrough;
    };
    if !config.enabled || !config.in_band(s) {
        return passthrough;
    }
    if !text.is_some_and(has_negated_negative) || !emojis.is_some_and(has_positive_emoji) {
        return passthrough;
    }

    let smoothed = (s * config.factor + config.bias).clamp(-1.0, 1.0);
    debug!(before = s, after = smoothed, "softened negated negative");
    Smoothed {
        score: Some(smoothed),
        adjusted: true,
    }
}

/// Smooth fused scores, reporting for each message whether the rule fired.
///
/// `residual_texts` and `emoji_sequences` may be shorter than `fused`;
/// missing entries count as absent.
#[must_use]
pub fn smooth_detailed(
    fused: &[Option<f32>],
    residual_texts: &[Option<String>],
    emoji_sequences: &[Option<Vec<Emoji>>],
    config: &SmoothingConfig,
) -> Vec<Smoothed> {
    fused
        .iter()
        .enumerate()
        .map(|(i, score)| {
            let text = residual_texts.get(i).and_then(Option::as_deref);
            let emojis = emoji_sequences.get(i).and_then(Option::as_deref);
            smooth_one(*score, text, emojis, config)
        })
        .collect()
}

/// Smooth fused scores.
#[must_use]
pub fn smooth(
    fused: &[Option<f32>],
    residual_texts: &[Option<String>],
    emoji_sequences: &[Option<Vec<Emoji>>],
    config: &SmoothingConfig,
) -> Vec<Option<f32>> {
    smooth_detailed(fused, residual_texts, emoji_sequences, config)
        .into_iter()
        .map(|s| s.score)
        .collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn text(s: &str) -> Vec<Option<String>> {
        vec![Some(s.to_string())]
    }

    fn emojis(list: &[&str]) -> Vec<Option<Vec<Emoji>>> {
        vec![Some(list.iter().map(|e| Emoji::new(*e)).collect())]
    }

    #[test]
    fn softens_negated_sadness_with_positive_emoji() {
        let out = smooth(
            &[Some(-0.3)],
            &text("I'm not that sad"),
            &emojis(&["🙂"]),
            &SmoothingConfig::default(),
        );
        assert!((out[0].unwrap() - -0.02).abs() < 1e-6, "{out:?}");
    }

    #[rstest]
    #[case(-0.7)]
    #[case(-0.6)]
    #[case(-0.05)]
    #[case(0.2)]
    fn scores_outside_band_are_unchanged(#[case] score: f32) {
        let out = smooth_detailed(
            &[Some(score)],
            &text("I'm not that sad"),
            &emojis(&["🙂"]),
            &SmoothingConfig::default(),
        );
        assert_eq!(out, vec![Smoothed {
            score: Some(score),
            adjusted: false
        }]);
    }

    #[rstest]
    #[case("not sad", true)]
    #[case("NOT SO UPSET really", true)]
    #[case("I am not too bad", true)]
    #[case("not really down", true)]
    #[case("so sad", false)]
    #[case("cannot sadly", false)]
    #[case("not at all sad", false)]
    fn negation_pattern(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(has_negated_negative(input), expected);
    }

    #[test]
    fn heart_matches_with_or_without_selector() {
        assert!(has_positive_emoji(&[Emoji::new("❤")]));
        assert!(has_positive_emoji(&[Emoji::new("❤️")]));
        assert!(!has_positive_emoji(&[Emoji::new("😢")]));
    }

    #[test]
    fn skin_toned_positive_emoji_triggers_softening() {
        let cfg = SmoothingConfig::default();
        let plain = smooth_detailed(
            &[Some(-0.3)],
            &text("I'm not that sad"),
            &emojis(&["👍"]),
            &cfg,
        );
        let toned = smooth_detailed(
            &[Some(-0.3)],
            &text("I'm not that sad"),
            &emojis(&["👍🏽"]),
            &cfg,
        );
        assert!(toned[0].adjusted);
        assert_eq!(toned, plain);
        assert!((toned[0].score.unwrap() - -0.02).abs() < 1e-6, "{toned:?}");
    }

    #[test]
    fn requires_both_text_and_emoji_conditions() {
        let cfg = SmoothingConfig::default();
        let no_positive = smooth(&[Some(-0.3)], &text("not sad"), &emojis(&["😢"]), &cfg);
        assert_eq!(no_positive, vec![Some(-0.3)]);

        let no_negation = smooth(&[Some(-0.3)], &text("so sad"), &emojis(&["🙂"]), &cfg);
        assert_eq!(no_negation, vec![Some(-0.3)]);
    }

    #[test]
    fn disabled_rule_is_identity() {
        let cfg = SmoothingConfig {
            enabled: false,
            ..SmoothingConfig::default()
        };
        let out = smooth(&[Some(-0.3)], &text("not sad"), &emojis(&["🙂"]), &cfg);
        assert_eq!(out, vec![Some(-0.3)]);
    }

    #[test]
    fn short_side_lists_count_as_absent() {
        let out = smooth_detailed(
            &[Some(-0.3), Some(-0.3), None],
            &text("not sad"),
            &emojis(&["🙂"]),
            &SmoothingConfig::default(),
        );
        assert_eq!(out.len(), 3);
        assert!(out[0].adjusted);
        assert_eq!(out[1], Smoothed {
            score: Some(-0.3),
            adjusted: false
        });
        assert_eq!(out[2].score, None);
    }

    #[test]
    fn result_is_clamped() {
        let cfg = SmoothingConfig {
            factor: 1.0,
            bias: -0.9,
            ..SmoothingConfig::default()
        };
        let out = smooth(&[Some(-0.5)], &text("not sad"), &emojis(&["🙂"]), &cfg);
        assert_eq!(out, vec![Some(-1.0)]);
    }
}

//! Grid search for the emoji weight against labelled, pre-scored samples.

use {
    emofuse_common::ensure_in_range,
    emofuse_config::{FusionConfig, SmoothingConfig},
    emofuse_emoji::Emoji,
    serde::Serialize,
    tracing::{debug, info},
};

use crate::{
    error::{Error, Result},
    fuse::fuse,
    smooth::smooth,
};

/// Grid spacing used when none is given.
pub const DEFAULT_STEP: f32 = 0.1;

/// A message whose modality scores are already known, with its gold label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepSample {
    pub emoji_score: Option<f32>,
    pub image_score: Option<f32>,
    pub text_score: Option<f32>,
    pub residual_text: Option<String>,
    pub emoji_sequence: Option<Vec<Emoji>>,
    /// `true` for a positive message.
    pub positive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightAccuracy {
    pub weight: f32,
    pub accuracy: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub samples: usize,
    pub results: Vec<WeightAccuracy>,
    pub best_weight: f32,
    pub best_accuracy: f32,
}

/// `0.0, 0.1, …, 1.0`.
#[must_use]
pub fn default_grid() -> Vec<f32> {
    (0..=10).map(|i| i as f32 / 10.0).collect()
}

/// Evenly spaced weights from 0 to 1 inclusive of 0, and of 1 when `step`
/// divides it.
pub fn weight_grid(step: f32) -> Result<Vec<f32>> {
    let step = ensure_in_range("sweep step", step, 0.001, 1.0)?;
    let n = (1.0 / step + 1e-4).floor() as u32;
    // Round to four places so 0.1 * 3 prints as 0.3.
    Ok((0..=n)
        .map(|i| ((i as f32 * step) * 1e4).round() / 1e4)
        .filter(|w| *w <= 1.0)
        .collect())
}

/// Score every candidate weight by binary accuracy after fusion and
/// smoothing. A message without any score is predicted positive. Ties keep
/// the earliest weight.
pub fn sweep_weights(
    samples: &[SweepSample],
    weights: &[f32],
    smoothing: &SmoothingConfig,
) -> Result<SweepReport> {
    if samples.is_empty() {
        return Err(Error::NoSamples);
    }
    if weights.is_empty() {
        return Err(Error::NoWeights);
    }

    let emoji: Vec<_> = samples.iter().map(|s| s.emoji_score).collect();
    let image: Vec<_> = samples.iter().map(|s| s.image_score).collect();
    let text: Vec<_> = samples.iter().map(|s| s.text_score).collect();
    let residual: Vec<_> = samples.iter().map(|s| s.residual_text.clone()).collect();
    let sequences: Vec<_> = samples.iter().map(|s| s.emoji_sequence.clone()).collect();

    let mut results = Vec::with_capacity(weights.len());
    for &weight in weights {
        let weight = ensure_in_range("emoji weight", weight, 0.0, 1.0)?;
        let fused = fuse(&emoji, &image, &text, &FusionConfig::with_emoji_weight(weight))?;
        let scores = smooth(&fused, &residual, &sequences, smoothing);

        let correct = scores
            .iter()
            .zip(samples)
            .filter(|(score, sample)| score.is_none_or(|s| s > 0.0) == sample.positive)
            .count();
        let accuracy = correct as f32 / samples.len() as f32;
        debug!(weight, accuracy, "evaluated weight");
        results.push(WeightAccuracy { weight, accuracy });
    }

    let best = results
        .iter()
        .copied()
        .reduce(|best, r| if r.accuracy > best.accuracy { r } else { best })
        .ok_or(Error::NoWeights)?;
    info!(
        samples = samples.len(),
        best_weight = best.weight,
        best_accuracy = best.accuracy,
        "weight sweep finished"
    );

    Ok(SweepReport {
        samples: samples.len(),
        results,
        best_weight: best.weight,
        best_accuracy: best.accuracy,
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn sample(emoji: Option<f32>, text: Option<f32>, positive: bool) -> SweepSample {
        SweepSample {
            emoji_score: emoji,
            text_score: text,
            positive,
            ..SweepSample::default()
        }
    }

    #[test]
    fn default_grid_has_eleven_points() {
        let grid = default_grid();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[3], 0.3);
        assert_eq!(grid[10], 1.0);
    }

    #[test]
    fn custom_grid_matches_default_for_tenth_step() {
        assert_eq!(weight_grid(0.1).unwrap(), default_grid());
        assert_eq!(weight_grid(0.25).unwrap(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(weight_grid(0.4).unwrap(), vec![0.0, 0.4, 0.8]);
    }

    #[test]
    fn grid_rejects_non_positive_step() {
        assert!(matches!(weight_grid(0.0), Err(Error::OutOfRange(_))));
        assert!(weight_grid(1.5).is_err());
    }

    #[test]
    fn picks_weight_that_trusts_the_right_modality() {
        // Emoji are right, text is wrong: only a heavy emoji weight wins both.
        let samples = vec![
            sample(Some(0.9), Some(-0.2), true),
            sample(Some(-0.9), Some(0.2), false),
        ];
        let report =
            sweep_weights(&samples, &[0.0, 0.5, 1.0], &SmoothingConfig::default()).unwrap();
        assert_eq!(report.samples, 2);
        assert_eq!(report.results[0].accuracy, 0.0);
        assert_eq!(report.results[1].accuracy, 1.0);
        assert_eq!(report.best_weight, 0.5);
        assert_eq!(report.best_accuracy, 1.0);
    }

    #[test]
    fn ties_keep_first_weight() {
        let samples = vec![sample(None, Some(0.5), true)];
        let report = sweep_weights(&samples, &default_grid(), &SmoothingConfig::default()).unwrap();
        assert!(report.results.iter().all(|r| r.accuracy == 1.0));
        assert_eq!(report.best_weight, 0.0);
    }

    #[test]
    fn unscored_message_counts_as_positive() {
        let samples = vec![sample(None, None, true), sample(None, None, false)];
        let report = sweep_weights(&samples, &[0.2], &SmoothingConfig::default()).unwrap();
        assert_eq!(report.best_accuracy, 0.5);
    }

    #[test]
    fn empty_inputs_are_errors() {
        let smoothing = SmoothingConfig::default();
        assert!(matches!(
            sweep_weights(&[], &[0.2], &smoothing),
            Err(Error::NoSamples)
        ));
        assert!(matches!(
            sweep_weights(&[sample(None, None, true)], &[], &smoothing),
            Err(Error::NoWeights)
        ));
    }

    #[test]
    fn out_of_range_weight_is_rejected() {
        let err = sweep_weights(&[sample(None, None, true)], &[1.2], &SmoothingConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));
    }

    #[test]
    fn report_serializes() {
        let report = sweep_weights(
            &[sample(Some(0.5), None, true)],
            &[0.2],
            &SmoothingConfig::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["samples"], 1);
        assert!(json["results"].as_array().is_some_and(|r| r.len() == 1));
    }
}

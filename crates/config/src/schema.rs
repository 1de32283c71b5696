//! Config schema types (fusion weight, smoothing rule, lexicon source, pipeline policy).
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmofuseConfig {
    pub fusion: FusionConfig,
    pub smoothing: SmoothingConfig,
    pub lexicon: LexiconConfig,
    pub pipeline: PipelineConfig,
}

/// Score fusion tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Weight of the emoji score when emoji and text are both present
    /// (0.0–1.0). Text gets `1 - emoji_weight`. Defaults to 0.2.
    pub emoji_weight: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self { emoji_weight: 0.2 }
    }
}

impl FusionConfig {
    #[must_use]
    pub fn with_emoji_weight(emoji_weight: f32) -> Self {
        Self { emoji_weight }
    }
}

/// Soft-negation smoothing rule applied after fusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Whether the rule runs at all. Defaults to true.
    pub enabled: bool,
    /// Exclusive lower bound of the "moderately negative" band. Defaults to -0.6.
    pub band_lower: f32,
    /// Exclusive upper bound of the band. Defaults to -0.05.
    pub band_upper: f32,
    /// Multiplier applied to a triggering score. Defaults to 0.4.
    pub factor: f32,
    /// Offset added after scaling. Defaults to 0.1.
    pub bias: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            band_lower: -0.6,
            band_upper: -0.05,
            factor: 0.4,
            bias: 0.1,
        }
    }
}

impl SmoothingConfig {
    /// Whether `score` lies strictly inside the trigger band.
    #[must_use]
    pub fn in_band(&self, score: f32) -> bool {
        self.band_lower < score && score < self.band_upper
    }
}

/// Where the emoji tables come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// JSON file with `overrides` and `ratios` maps replacing the bundled
    /// tables. Relative paths resolve against the working directory.
    pub path: Option<PathBuf>,
}

/// What to do with image references when no image classifier is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFallback {
    /// Leave the image modality absent.
    #[default]
    Omit,
    /// Score every image reference as neutral (0.0).
    Neutral,
}

/// Batch pipeline policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub image_fallback: ImageFallback,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = EmofuseConfig::default();
        assert_eq!(cfg.fusion.emoji_weight, 0.2);
        assert!(cfg.smoothing.enabled);
        assert_eq!(cfg.smoothing.band_lower, -0.6);
        assert_eq!(cfg.smoothing.band_upper, -0.05);
        assert_eq!(cfg.pipeline.image_fallback, ImageFallback::Omit);
        assert!(cfg.lexicon.path.is_none());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg: EmofuseConfig = toml::from_str("[fusion]\nemoji_weight = 0.5\n").unwrap();
        assert_eq!(cfg.fusion.emoji_weight, 0.5);
        assert_eq!(cfg.smoothing, SmoothingConfig::default());
    }

    #[test]
    fn band_is_open_on_both_ends() {
        let s = SmoothingConfig::default();
        assert!(s.in_band(-0.3));
        assert!(!s.in_band(-0.6));
        assert!(!s.in_band(-0.05));
        assert!(!s.in_band(-0.7));
    }

    #[test]
    fn image_fallback_parses_lowercase() {
        let cfg: PipelineConfig = toml::from_str("image_fallback = \"neutral\"").unwrap();
        assert_eq!(cfg.image_fallback, ImageFallback::Neutral);
    }
}

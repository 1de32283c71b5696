//! Default configuration template with all options documented.
//!
//! Written by `emofuse config init`. Every option is present with its default
//! value so users can see what is tunable without reading the source.

/// The documented default config, in TOML.
#[must_use]
pub fn default_config_template() -> String {
    r##"# emofuse configuration
# =====================
# Every option below is shown with its default value.
#
# Environment variable substitution is supported: ${ENV_VAR}
# Example: path = "${EMOFUSE_LEXICON}"

# ══════════════════════════════════════════════════════════════════════════════
# FUSION
# ══════════════════════════════════════════════════════════════════════════════

[fusion]
emoji_weight = 0.2                # Weight of the emoji score when a message has
                                  # both emoji and text (0.0–1.0). Text gets the rest.
                                  # Tune with `emofuse sweep`.

# ══════════════════════════════════════════════════════════════════════════════
# SOFT-NEGATION SMOOTHING
# ══════════════════════════════════════════════════════════════════════════════
# Pulls a moderately negative score towards neutral when the text negates a
# negative word ("not that sad") and the message carries a positive emoji.

[smoothing]
enabled = true
band_lower = -0.6                 # Rule fires for scores strictly between
band_upper = -0.05                # band_lower and band_upper
factor = 0.4                      # new = score * factor + bias
bias = 0.1

# ══════════════════════════════════════════════════════════════════════════════
# EMOJI TABLES
# ══════════════════════════════════════════════════════════════════════════════

[lexicon]
# path = "emoji-tables.json"      # JSON with "overrides" (emoji → -1..1) and
                                  # "ratios" (emoji → 0..1) replacing the bundled tables

# ══════════════════════════════════════════════════════════════════════════════
# PIPELINE
# ══════════════════════════════════════════════════════════════════════════════

[pipeline]
image_fallback = "omit"           # No image classifier: "omit" drops the image
                                  # modality, "neutral" scores every image 0.0
"##
    .to_string()
}

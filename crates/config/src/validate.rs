//! Configuration validation engine.
//!
//! Validates configuration files against the known schema, detects
//! unknown/misspelled fields, and checks that every tunable lies in the range
//! the fusion and smoothing stages expect.

use std::{collections::HashMap, path::Path};

use crate::{loader, schema::EmofuseConfig};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "unknown-field", "type-error", "range", "file-ref"
    pub category: &'static str,
    /// Dotted path, e.g. "fusion.emoji_weight"
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        category: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a configuration file.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
    pub config_path: Option<std::path::PathBuf>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Section name → field names. Every field is a scalar.
fn known_fields() -> HashMap<&'static str, &'static [&'static str]> {
    HashMap::from([
        ("fusion", &["emoji_weight"][..]),
        (
            "smoothing",
            &["enabled", "band_lower", "band_upper", "factor", "bias"][..],
        ),
        ("lexicon", &["path"][..]),
        ("pipeline", &["image_fallback"][..]),
    ])
}

// ── Levenshtein distance ────────────────────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut curr = Vec::with_capacity(prev.len());
        curr.push(i + 1);
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != *cb);
            curr.push(substitution.min(prev[j + 1] + 1).min(curr[j] + 1));
        }
        prev = curr;
    }
    prev[b_chars.len()]
}

/// Closest candidate within `max_distance` edits, if any.
fn suggest<'a>(needle: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (*c, levenshtein(needle, c)))
        .filter(|(_, d)| *d > 0 && *d <= max_distance)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c)
}

fn unknown_field(path: String, key: &str, candidates: &[&str]) -> Diagnostic {
    let message = match suggest(key, candidates, 3) {
        Some(s) => format!("unknown field (did you mean \"{s}\"?)"),
        None => "unknown field".to_string(),
    };
    Diagnostic::new(Severity::Error, "unknown-field", path, message)
}

// ── Core validation ─────────────────────────────────────────────────────────

/// Validate a config file at the given path, or discover the default config
/// file location if `path` is `None`.
#[must_use]
pub fn validate(path: Option<&Path>) -> ValidationResult {
    let config_path = path
        .map(Path::to_path_buf)
        .or_else(loader::find_config_file);

    let Some(ref actual_path) = config_path else {
        return ValidationResult {
            diagnostics: vec![Diagnostic::new(
                Severity::Info,
                "file-ref",
                "",
                "no config file found; using defaults",
            )],
            config_path: None,
        };
    };

    let mut result = match loader::load_config_value(actual_path) {
        Ok(value) => validate_value(&value),
        Err(e) => ValidationResult {
            diagnostics: vec![Diagnostic::new(
                Severity::Error,
                "syntax",
                "",
                format!("failed to parse config file: {e}"),
            )],
            config_path: None,
        },
    };
    result.config_path = Some(actual_path.clone());
    result
}

/// Validate an already-parsed config tree.
#[must_use]
pub fn validate_value(value: &serde_json::Value) -> ValidationResult {
    let mut diagnostics = Vec::new();

    // 1. Unknown fields
    check_unknown_fields(value, &mut diagnostics);

    // 2. Type check: attempt full deserialization
    match serde_json::from_value::<EmofuseConfig>(value.clone()) {
        Ok(config) => diagnostics.extend(check_semantics(&config)),
        Err(e) => diagnostics.push(Diagnostic::new(
            Severity::Error,
            "type-error",
            "",
            format!("type error: {e}"),
        )),
    }

    diagnostics.sort_by_key(|d| d.severity);
    ValidationResult {
        diagnostics,
        config_path: None,
    }
}

/// Validate a TOML string without file-system side effects.
#[must_use]
pub fn validate_toml_str(toml_str: &str) -> ValidationResult {
    let parsed = toml::from_str::<toml::Value>(toml_str)
        .map_err(|e| format!("TOML syntax error: {e}"))
        .and_then(|v| serde_json::to_value(v).map_err(|e| e.to_string()));

    match parsed {
        Ok(value) => validate_value(&value),
        Err(message) => ValidationResult {
            diagnostics: vec![Diagnostic::new(Severity::Error, "syntax", "", message)],
            config_path: None,
        },
    }
}

fn check_unknown_fields(value: &serde_json::Value, diagnostics: &mut Vec<Diagnostic>) {
    let Some(root) = value.as_object() else {
        return;
    };
    let sections = known_fields();
    let section_names: Vec<&str> = sections.keys().copied().collect();

    for (key, child) in root {
        let Some(fields) = sections.get(key.as_str()) else {
            diagnostics.push(unknown_field(key.clone(), key, &section_names));
            continue;
        };
        let Some(table) = child.as_object() else {
            continue;
        };
        for field in table.keys() {
            if !fields.contains(&field.as_str()) {
                diagnostics.push(unknown_field(format!("{key}.{field}"), field, fields));
            }
        }
    }
}

fn range_error(path: &str, value: f32, expected: &str) -> Diagnostic {
    Diagnostic::new(
        Severity::Error,
        "range",
        path,
        format!("{value} is outside {expected}"),
    )
}

/// Range and consistency checks on a deserialized config.
#[must_use]
pub fn check_semantics(config: &EmofuseConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let unit = 0.0..=1.0;
    let polarity = -1.0..=1.0;

    let w = config.fusion.emoji_weight;
    if !unit.contains(&w) {
        diagnostics.push(range_error("fusion.emoji_weight", w, "[0, 1]"));
    }

    let s = &config.smoothing;
    for (path, v) in [
        ("smoothing.band_lower", s.band_lower),
        ("smoothing.band_upper", s.band_upper),
        ("smoothing.bias", s.bias),
    ] {
        if !polarity.contains(&v) {
            diagnostics.push(range_error(path, v, "[-1, 1]"));
        }
    }
    if !unit.contains(&s.factor) {
        diagnostics.push(range_error("smoothing.factor", s.factor, "[0, 1]"));
    }
    if s.band_lower >= s.band_upper {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "range",
            "smoothing.band_lower",
            format!(
                "band_lower ({}) must be below band_upper ({})",
                s.band_lower, s.band_upper
            ),
        ));
    }
    if s.band_upper > 0.0 {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "range",
            "smoothing.band_upper",
            "smoothing band reaches into positive scores",
        ));
    }

    if let Some(ref path) = config.lexicon.path
        && !path.exists()
    {
        diagnostics.push(Diagnostic::new(
            Severity::Error,
            "file-ref",
            "lexicon.path",
            format!("lexicon file not found: {}", path.display()),
        ));
    }

    diagnostics
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "", 0)]
    #[case("abc", "", 3)]
    #[case("fusion", "fusion", 0)]
    #[case("fuson", "fusion", 1)]
    #[case("emoji_wieght", "emoji_weight", 2)]
    fn levenshtein_distances(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        assert_eq!(levenshtein(a, b), expected);
    }

    #[test]
    fn empty_config_is_valid() {
        let result = validate_toml_str("");
        assert!(!result.has_errors(), "{:?}", result.diagnostics);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn full_valid_config_no_diagnostics() {
        let toml = r#"
[fusion]
emoji_weight = 0.3

[smoothing]
enabled = true
band_lower = -0.6
band_upper = -0.05
factor = 0.4
bias = 0.1

[pipeline]
image_fallback = "neutral"
"#;
        let result = validate_toml_str(toml);
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    }

    #[test]
    fn unknown_top_level_key_with_suggestion() {
        let result = validate_toml_str("[fuson]\nemoji_weight = 0.2\n");
        let d = &result.diagnostics[0];
        assert_eq!(d.category, "unknown-field");
        assert_eq!(d.path, "fuson");
        assert!(d.message.contains("did you mean \"fusion\""), "{}", d.message);
    }

    #[test]
    fn unknown_nested_key_with_suggestion() {
        let result = validate_toml_str("[fusion]\nemoji_wieght = 0.2\n");
        let d = result
            .diagnostics
            .iter()
            .find(|d| d.category == "unknown-field")
            .unwrap();
        assert_eq!(d.path, "fusion.emoji_wieght");
        assert!(d.message.contains("emoji_weight"));
    }

    #[test]
    fn syntax_error_detected() {
        let result = validate_toml_str("[fusion\nemoji_weight = ");
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].category, "syntax");
    }

    #[test]
    fn bad_enum_value_is_type_error() {
        let result = validate_toml_str("[pipeline]\nimage_fallback = \"guess\"\n");
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| d.category == "type-error")
        );
    }

    #[test]
    fn out_of_range_weight_is_error() {
        let result = validate_toml_str("[fusion]\nemoji_weight = -0.1\n");
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].path, "fusion.emoji_weight");
    }

    #[test]
    fn inverted_band_is_error() {
        let result = validate_toml_str("[smoothing]\nband_lower = -0.1\nband_upper = -0.5\n");
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| d.path == "smoothing.band_lower" && d.severity == Severity::Error)
        );
    }

    #[test]
    fn positive_band_is_warning_only() {
        let result = validate_toml_str("[smoothing]\nband_upper = 0.1\n");
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Warning), 1);
    }

    #[test]
    fn missing_lexicon_file_is_error() {
        let result = validate_toml_str("[lexicon]\npath = \"/nonexistent/lexicon.json\"\n");
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| d.category == "file-ref" && d.path == "lexicon.path")
        );
    }
}

//! Line-oriented input for `score` and `sweep`.

use std::path::Path;

use {
    anyhow::{Context, Result},
    serde::Deserialize,
};

/// One input line. Plain-text lines become a record with only `message` set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub message: String,
    #[serde(default)]
    pub text_score: Option<f32>,
    #[serde(default)]
    pub image_score: Option<f32>,
    #[serde(default)]
    pub label: Option<u8>,
}

/// Parse one non-empty line.
pub fn parse_line(line: &str) -> Result<Record> {
    let trimmed = line.trim();
    if trimmed.starts_with('{') {
        Ok(serde_json::from_str(trimmed)?)
    } else {
        Ok(Record {
            message: line.to_string(),
            ..Record::default()
        })
    }
}

/// Parse every non-blank line; errors name the 1-based line number.
pub fn parse_records(raw: &str) -> Result<Vec<Record>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_line(line).with_context(|| format!("line {}", i + 1)))
        .collect()
}

/// Read records from `path`, or from stdin when `None`.
pub fn read_records(path: Option<&Path>) -> Result<Vec<Record>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?,
    };
    parse_records(&raw)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, std::io::Write};

    #[test]
    fn json_and_plain_lines_mix() {
        let raw = "{\"message\": \"hi 🙂\", \"text_score\": 0.4}\n\n  \nplain message\n";
        let records = parse_records(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "hi 🙂");
        assert_eq!(records[0].text_score, Some(0.4));
        assert_eq!(records[1].message, "plain message");
        assert_eq!(records[1].label, None);
    }

    #[test]
    fn null_scores_are_absent() {
        let r = parse_line(r#"{"message": "x", "text_score": null, "label": 1}"#).unwrap();
        assert_eq!(r.text_score, None);
        assert_eq!(r.label, Some(1));
    }

    #[test]
    fn bad_json_reports_line_number() {
        let err = parse_records("ok\n{\"message\": 3}\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_line(r#"{"message": "x", "txt_score": 0.1}"#).is_err());
    }

    #[test]
    fn reads_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "first").unwrap();
        writeln!(f, "second").unwrap();
        let records = read_records(Some(f.path())).unwrap();
        assert_eq!(records.len(), 2);
    }
}

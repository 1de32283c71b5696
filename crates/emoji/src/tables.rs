//! Curated override table and dataset-derived lexicon.
//!
//! Both are read-only after construction. The bundled tables are built once
//! per process; a replacement can be loaded from a JSON file of the form
//! `{ "overrides": { "😢": -0.8 }, "ratios": { "😂": 0.47 } }`.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, LazyLock},
};

use {
    emofuse_common::ensure_in_range,
    serde::Deserialize,
    tracing::debug,
};

use crate::{
    emoji::{Emoji, canonicalize},
    error::{Error, Result},
};

/// Hand-picked polarities correcting known dataset mismatches. Final values
/// in `[-1, 1]`.
const BUILTIN_OVERRIDES: &[(&str, f32)] = &[
    ("😢", -0.8),
    ("😭", -0.8),
    ("😥", -0.6),
    ("😓", -0.6),
    ("😩", -0.6),
];

/// Fraction of positive usages per emoji in the reference corpus, `[0, 1]`.
const BUILTIN_RATIOS: &[(&str, f32)] = &[
    ("😂", 0.47),
    ("❤", 0.75),
    ("♥", 0.66),
    ("😍", 0.68),
    ("😘", 0.70),
    ("😊", 0.70),
    ("👌", 0.56),
    ("💕", 0.71),
    ("👏", 0.59),
    ("😁", 0.56),
    ("☺", 0.67),
    ("😉", 0.61),
    ("👍", 0.60),
    ("🙏", 0.57),
    ("😌", 0.62),
    ("😏", 0.48),
    ("😔", 0.24),
    ("😒", 0.23),
    ("💔", 0.24),
    ("🙌", 0.55),
    ("😎", 0.61),
    ("😅", 0.46),
    ("😜", 0.55),
    ("✨", 0.59),
    ("💙", 0.72),
    ("😃", 0.66),
    ("😑", 0.25),
    ("😄", 0.64),
    ("😆", 0.48),
    ("🎉", 0.66),
    ("💜", 0.68),
    ("😋", 0.61),
    ("💖", 0.71),
    ("😀", 0.58),
    ("😞", 0.23),
    ("😫", 0.26),
    ("🙂", 0.58),
    ("😐", 0.38),
    ("😡", 0.20),
    ("😠", 0.22),
    ("😤", 0.30),
    ("😕", 0.27),
    ("🙁", 0.25),
    ("☹", 0.20),
    ("😖", 0.25),
    ("😣", 0.27),
    ("😪", 0.33),
    ("😴", 0.42),
    ("😷", 0.35),
    ("😱", 0.37),
    ("😨", 0.27),
    ("😰", 0.28),
    ("😳", 0.42),
    ("😬", 0.40),
    ("🤔", 0.45),
    ("🙄", 0.30),
    ("😇", 0.65),
    ("😻", 0.67),
    ("😺", 0.60),
    ("😸", 0.60),
    ("😹", 0.50),
    ("😿", 0.28),
    ("😾", 0.25),
    ("🤗", 0.68),
    ("🥳", 0.72),
    ("🤩", 0.70),
    ("🤣", 0.55),
    ("😝", 0.52),
    ("😛", 0.54),
    ("😚", 0.66),
    ("😙", 0.63),
    ("😶", 0.40),
    ("😯", 0.40),
    ("😮", 0.42),
    ("😲", 0.43),
    ("🤢", 0.25),
    ("🤮", 0.22),
    ("🤬", 0.15),
    ("💗", 0.70),
    ("💓", 0.68),
    ("💛", 0.72),
    ("💚", 0.69),
    ("💋", 0.66),
    ("💯", 0.63),
    ("🔥", 0.55),
    ("🌹", 0.67),
    ("🌸", 0.64),
    ("🌞", 0.62),
    ("☀", 0.62),
    ("⭐", 0.60),
    ("🌟", 0.64),
    ("🍀", 0.62),
    ("🎂", 0.72),
    ("🎁", 0.68),
    ("🎶", 0.58),
    ("🍻", 0.61),
    ("😈", 0.50),
    ("👀", 0.45),
    ("💀", 0.38),
    ("💩", 0.35),
    ("👎", 0.22),
    ("✌", 0.60),
    ("👋", 0.55),
    ("💪", 0.60),
    ("🙈", 0.55),
];

static BUILTIN: LazyLock<Arc<EmojiTables>> = LazyLock::new(|| {
    let to_map = |entries: &[(&str, f32)]| {
        entries
            .iter()
            .map(|(e, v)| (canonicalize(e).into_owned(), *v))
            .collect::<HashMap<_, _>>()
    };
    Arc::new(EmojiTables {
        overrides: to_map(BUILTIN_OVERRIDES),
        ratios: to_map(BUILTIN_RATIOS),
    })
});

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TablesFile {
    overrides: HashMap<String, f32>,
    ratios: HashMap<String, f32>,
}

/// Override table (`Emoji → [-1, 1]`) and lexicon (`Emoji → [0, 1]`), keyed
/// by canonical emoji.
#[derive(Debug, Clone, Default)]
pub struct EmojiTables {
    overrides: HashMap<String, f32>,
    ratios: HashMap<String, f32>,
}

impl EmojiTables {
    /// The tables shipped with the crate.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Build tables from raw entries, rejecting out-of-range values.
    pub fn from_entries(
        overrides: impl IntoIterator<Item = (String, f32)>,
        ratios: impl IntoIterator<Item = (String, f32)>,
    ) -> Result<Self> {
        Ok(Self {
            overrides: checked_table("override", overrides, -1.0)?,
            ratios: checked_table("lexicon", ratios, 0.0)?,
        })
    }

    /// Load replacement tables from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: TablesFile = serde_json::from_str(&raw).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_entries(file.overrides, file.ratios)?;
        debug!(
            path = %path.display(),
            overrides = tables.overrides.len(),
            ratios = tables.ratios.len(),
            "loaded emoji tables"
        );
        Ok(tables)
    }

    #[must_use]
    pub fn override_for(&self, emoji: &Emoji) -> Option<f32> {
        self.overrides.get(emoji.canonical().as_ref()).copied()
    }

    #[must_use]
    pub fn ratio_for(&self, emoji: &Emoji) -> Option<f32> {
        self.ratios.get(emoji.canonical().as_ref()).copied()
    }

    /// Override entries, in no particular order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, f32)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Lexicon entries, in no particular order.
    pub fn ratios(&self) -> impl Iterator<Item = (&str, f32)> {
        self.ratios.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Range-check `entries` and key them by canonical emoji. Two entries that
/// canonicalize to the same key are rejected.
fn checked_table(
    table: &'static str,
    entries: impl IntoIterator<Item = (String, f32)>,
    min: f32,
) -> Result<HashMap<String, f32>> {
    let mut out = HashMap::new();
    for (emoji, value) in entries {
        let value = match ensure_in_range(&format!("{table} value"), value, min, 1.0) {
            Ok(v) => v,
            Err(source) => {
                return Err(Error::InvalidEntry {
                    table,
                    emoji,
                    source,
                });
            },
        };
        let key = canonicalize(&emoji).into_owned();
        if out.insert(key, value).is_some() {
            return Err(Error::DuplicateEntry { table, emoji });
        }
    }
    Ok(out)
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read emoji tables from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid emoji tables in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A table entry whose value lies outside the range its table allows.
    #[error("invalid {table} entry for {emoji:?}: {source}")]
    InvalidEntry {
        table: &'static str,
        emoji: String,
        #[source]
        source: emofuse_common::Error,
    },

    /// Two entries of one table that share a canonical emoji, e.g. `❤` and `❤️`.
    #[error("duplicate {table} entry for {emoji:?}")]
    DuplicateEntry { table: &'static str, emoji: String },
}

pub type Result<T> = std::result::Result<T, Error>;

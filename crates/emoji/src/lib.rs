//! Emoji identity, the bundled emoji sentiment tables, and the resolver that
//! turns an emoji sequence into one polarity.
//!
//! Per-emoji cascade (first definite value wins):
//! 1. Curated override table
//! 2. Lexicon ratio
//! 3. Keyword fallback on the emoji's canonical name
//!
//! followed by the strong-negative safety net and ratio normalization.

pub mod emoji;
pub mod error;
pub mod keywords;
pub mod resolver;
pub mod tables;

pub use {
    emoji::Emoji,
    error::{Error, Result},
    resolver::{EmojiResolution, EmojiResolver, ScoreSource},
    tables::EmojiTables,
};

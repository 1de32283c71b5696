//! Shared types, error definitions, and utilities used across all emofuse crates.

pub mod error;
pub mod types;

pub use {
    error::{Error, FromMessage, Result, ensure_in_range},
    types::{Modality, SentimentLabel, SentimentScore, clamp_score},
};

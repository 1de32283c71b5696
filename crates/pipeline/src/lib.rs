//! Batch sentiment pipeline: segmentation, emoji resolution, the external text
//! and image classifiers, fusion, and smoothing.

pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod report;

pub use {
    classifier::{ImageClassifier, NeutralImageClassifier, TextClassifier},
    error::{Error, Result},
    pipeline::SentimentPipeline,
    report::{MessageSentiment, ModalityScores},
};

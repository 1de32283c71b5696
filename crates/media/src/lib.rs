//! Media segmentation: split a raw chat message into its emoji sequence, image
//! reference, and residual text.

pub mod segment;

pub use segment::{ParsedMessage, segment, segment_batch};

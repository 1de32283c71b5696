#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The per-modality lists do not describe the same batch.
    #[error("modality lists differ in length (emoji={emoji}, image={image}, text={text})")]
    ShapeMismatch {
        emoji: usize,
        image: usize,
        text: usize,
    },

    #[error("weight sweep needs at least one labelled sample")]
    NoSamples,

    #[error("weight sweep needs at least one candidate weight")]
    NoWeights,

    #[error(transparent)]
    OutOfRange(#[from] emofuse_common::Error),
}

pub type FusionError = Error;
pub type Result<T> = std::result::Result<T, Error>;

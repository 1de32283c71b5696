use emofuse_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fusion(#[from] emofuse_fusion::Error),

    /// Parsed parts handed to the pipeline do not line up with the messages.
    #[error("{messages} messages but {parsed} parsed entries")]
    BatchMismatch { messages: usize, parsed: usize },

    #[error("{0}")]
    Message(String),
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

emofuse_common::impl_context!();

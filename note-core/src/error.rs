use thiserror::Error;

/// Errors surfaced by the codec and the platform ports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("malformed share parameter: {0}")]
    Decode(String),

    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    #[error("image encoder failed: {0}")]
    ImageEncoder(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("browser api error: {0}")]
    Browser(String),
}

pub type Result<T> = std::result::Result<T, NoteError>;

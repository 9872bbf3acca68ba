use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or running a text-to-speech conversion.
#[derive(Error, Debug)]
pub enum SpeechError {
    /// A mandatory setting (subscription key, endpoint) is absent.
    #[error("Missing configuration: {0}")]
    ConfigMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Text file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The provider did not complete the synthesis. `detail` is whatever the
    /// provider reported, or a placeholder when it gave nothing.
    #[error("Speech synthesis failed for {}: {detail}", .path.display())]
    SynthesisFailed { path: PathBuf, detail: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for SpeechError {
    fn from(err: config::ConfigError) -> Self {
        SpeechError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SpeechError>;

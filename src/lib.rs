pub mod backends;
pub mod config_loader;
pub mod converter;
pub mod error;
pub mod format;
pub mod ssml;

pub use converter::TextToSpeechConverter;
pub use error::{Result, SpeechError};

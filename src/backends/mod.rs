pub mod azure;

use crate::format::AudioFormat;
use std::path::Path;

pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Represents a text-to-speech voice
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
}

/// A synthesis the provider did not complete. `detail` is the provider's own
/// explanation, when it gave one.
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("{}", .detail.as_deref().unwrap_or(UNKNOWN_ERROR))]
pub struct ProviderFailure {
    pub detail: Option<String>,
}

impl ProviderFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Trait that all speech synthesis providers must implement.
/// The converter only talks to this, so it can run against a fake.
pub trait SpeechBackend: Send + Sync {
    /// Returns the unique ID of the backend (e.g., "azure")
    fn id(&self) -> &'static str;

    /// Encoding written by `synthesize`; decides the output file extension.
    fn output_format(&self) -> AudioFormat;

    /// Speak `text` with `voice` and write the audio to `destination`.
    /// Blocks until the provider finishes.
    fn synthesize(&self, text: &str, voice: &str, destination: &Path) -> Result<(), ProviderFailure>;

    /// Returns a list of supported voices
    fn list_voices(&self) -> Result<Vec<Voice>, ProviderFailure>;
}

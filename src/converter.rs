//! Text file to audio file conversion.
//!
//! A script at `<scripts root>/a/b.txt` is spoken into
//! `<audio root>/a/b.<ext>`, where the extension follows the backend's output
//! format.

use crate::backends::{SpeechBackend, UNKNOWN_ERROR};
use crate::config_loader::Settings;
use crate::error::{Result, SpeechError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct TextToSpeechConverter {
    backend: Box<dyn SpeechBackend>,
    scripts_root: PathBuf,
    audio_root: PathBuf,
}

impl TextToSpeechConverter {
    pub fn new(
        backend: Box<dyn SpeechBackend>,
        scripts_root: impl Into<PathBuf>,
        audio_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            backend,
            scripts_root: scripts_root.into(),
            audio_root: audio_root.into(),
        }
    }

    pub fn from_settings(settings: &Settings, backend: Box<dyn SpeechBackend>) -> Result<Self> {
        Ok(Self::new(backend, settings.scripts_root()?, settings.audio_root()))
    }

    pub fn scripts_root(&self) -> &Path {
        &self.scripts_root
    }

    pub fn audio_root(&self) -> &Path {
        &self.audio_root
    }

    /// Generate an audio file for `text_file` spoken with `voice_name`.
    ///
    /// Returns the written audio path. Checks run in order: voice present,
    /// file exists, file under the scripts root.
    pub fn synthesize(&self, text_file: impl AsRef<Path>, voice_name: &str) -> Result<PathBuf> {
        let text_path = text_file.as_ref();

        if voice_name.trim().is_empty() {
            return Err(SpeechError::InvalidArgument(
                "Voice name must be provided for speech synthesis.".to_string(),
            ));
        }

        if !text_path.exists() {
            return Err(SpeechError::NotFound(text_path.to_path_buf()));
        }

        let destination = self.output_path_for(text_path)?;
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let text_content = fs::read_to_string(text_path)?;
        if text_content.trim().is_empty() {
            warn!(file = %text_path.display(), "Text file is empty");
        }

        info!(
            file = %text_path.display(),
            voice = voice_name,
            destination = %destination.display(),
            backend = self.backend.id(),
            "Synthesizing"
        );

        match self.backend.synthesize(&text_content, voice_name, &destination) {
            Ok(()) => Ok(destination),
            Err(failure) => {
                let detail = failure.detail.unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                warn!(file = %text_path.display(), %detail, "Speech synthesis failed");
                Err(SpeechError::SynthesisFailed {
                    path: text_path.to_path_buf(),
                    detail,
                })
            }
        }
    }

    /// Mirrored audio path for an existing text file under the scripts root.
    ///
    /// Only the parent directory is resolved, so a symlinked script keeps its
    /// own name in the audio tree while `..` segments still cannot escape.
    pub fn output_path_for(&self, text_file: &Path) -> Result<PathBuf> {
        if !text_file.exists() {
            return Err(SpeechError::NotFound(text_file.to_path_buf()));
        }

        if text_file.is_dir() {
            return Err(SpeechError::InvalidArgument(format!(
                "{} is a directory, not a text file.",
                text_file.display()
            )));
        }

        let file_name = text_file
            .file_name()
            .ok_or_else(|| self.out_of_scope(text_file))?;
        let parent = match text_file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let text_path = parent.canonicalize()?.join(file_name);

        // A missing scripts root contains nothing
        let root = self
            .scripts_root
            .canonicalize()
            .map_err(|_| self.out_of_scope(text_file))?;
        let relative = text_path
            .strip_prefix(&root)
            .map_err(|_| self.out_of_scope(text_file))?;

        Ok(self
            .audio_root
            .join(relative)
            .with_extension(self.backend.output_format().extension()))
    }

    fn out_of_scope(&self, text_file: &Path) -> SpeechError {
        SpeechError::InvalidArgument(format!(
            "Text file {} must be located under the {} directory.",
            text_file.display(),
            self.scripts_root.display()
        ))
    }
}

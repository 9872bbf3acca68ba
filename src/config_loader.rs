use crate::error::{Result, SpeechError};
use crate::format::AudioFormat;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const APP_NAME: &str = "txt2speech";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // Provider credentials (mandatory, checked by ProviderConfig)
    pub speech_key: Option<String>,
    pub endpoint_url: Option<String>,
    // Input / output layout
    pub text_directory: Option<String>, // takes precedence over scripts_root
    pub scripts_root: String,
    pub audio_root: String,
    // Synthesis
    pub speech_voice: Option<String>,
    pub speech_output_format: String,
    pub speech_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speech_key: None,
            endpoint_url: None,
            text_directory: None,
            scripts_root: "scripts".to_string(),
            audio_root: "audio".to_string(),
            speech_voice: None,
            speech_output_format: AudioFormat::default().header_value().to_string(),
            speech_timeout_secs: 60,
        }
    }
}

impl Settings {
    /// Load from the default config files and the process environment.
    pub fn new() -> Result<Self> {
        Self::from_files(&default_config_files())
    }

    /// Load from the given config files (all optional) and the process environment.
    pub fn from_files(files: &[PathBuf]) -> Result<Self> {
        Self::load(files, None)
    }

    /// Load from the given config files (all optional) and an explicit set of
    /// environment variables instead of the process environment.
    pub fn from_env_map(files: &[PathBuf], vars: HashMap<String, String>) -> Result<Self> {
        Self::load(files, Some(vars))
    }

    fn load(files: &[PathBuf], vars: Option<HashMap<String, String>>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("scripts_root", defaults.scripts_root)?
            .set_default("audio_root", defaults.audio_root)?
            .set_default("speech_output_format", defaults.speech_output_format)?
            .set_default("speech_timeout_secs", defaults.speech_timeout_secs)?;

        for file in files {
            builder = builder.add_source(File::from(file.as_path()).required(false));
        }

        // Variables are taken by their plain names (SPEECH_KEY, ENDPOINT_URL,
        // TEXT_DIRECTORY, ...), lowercased into setting keys.
        builder = builder.add_source(
            Environment::default()
                .ignore_empty(true)
                .source(vars.map(|v| v.into_iter().collect())),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.speech_timeout_secs == 0 {
            return Err(SpeechError::Config(
                "speech_timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.output_format()?;
        Ok(())
    }

    pub fn output_format(&self) -> Result<AudioFormat> {
        self.speech_output_format
            .parse::<AudioFormat>()
            .map_err(SpeechError::Config)
    }

    /// Scripts directory as an absolute path. A relative setting is resolved
    /// against the current working directory.
    pub fn scripts_root(&self) -> Result<PathBuf> {
        let configured = self
            .text_directory
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.scripts_root);
        let base = PathBuf::from(configured);
        if base.is_absolute() {
            Ok(base)
        } else {
            Ok(std::env::current_dir()?.join(base))
        }
    }

    /// Audio directory exactly as configured.
    pub fn audio_root(&self) -> PathBuf {
        PathBuf::from(&self.audio_root)
    }

    pub fn default_voice(&self) -> Option<&str> {
        self.speech_voice
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// `txt2speech.*` in the working directory, then in the user config directory.
pub fn default_config_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from(APP_NAME)];
    if let Some(dir) = dirs::config_dir() {
        files.push(dir.join(APP_NAME).join(APP_NAME));
    }
    files
        .into_iter()
        .flat_map(|stem| {
            ["toml", "yaml", "json"]
                .into_iter()
                .map(move |ext| stem.with_extension(ext))
        })
        .collect()
}

/// Validated connection settings for the remote provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub subscription_key: String,
    pub endpoint: Url,
    pub output_format: AudioFormat,
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Fails fast when the key or endpoint is absent or unusable.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let subscription_key = required(settings.speech_key.as_deref(), "SPEECH_KEY")?;
        let endpoint_url = required(settings.endpoint_url.as_deref(), "ENDPOINT_URL")?;

        let endpoint = Url::parse(&endpoint_url)
            .map_err(|e| SpeechError::Config(format!("Invalid ENDPOINT_URL '{}': {}", endpoint_url, e)))?;
        match endpoint.scheme() {
            "http" | "https" | "ws" | "wss" => {}
            scheme => {
                return Err(SpeechError::Config(format!(
                    "Unsupported ENDPOINT_URL scheme: {}. Use https:// or wss://",
                    scheme
                )))
            }
        }

        Ok(Self {
            subscription_key,
            endpoint,
            output_format: settings.output_format()?,
            request_timeout: Duration::from_secs(settings.speech_timeout_secs),
        })
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("subscription_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("output_format", &self.output_format)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn required(value: Option<&str>, name: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SpeechError::ConfigMissing(format!(
            "Please set the {} environment variable.",
            name
        ))),
    }
}

//! Azure Speech REST backend.
//!
//! Posts an SSML document to the regional `cognitiveservices/v1` endpoint and
//! writes the returned audio straight to the destination file.

use super::{ProviderFailure, SpeechBackend, Voice};
use crate::config_loader::ProviderConfig;
use crate::error::SpeechError;
use crate::format::AudioFormat;
use crate::ssml;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const SSML_CONTENT_TYPE: &str = "application/ssml+xml";
const USER_AGENT: &str = concat!("txt2speech/", env!("CARGO_PKG_VERSION"));

pub struct AzureBackend {
    client: Client,
    subscription_key: String,
    synthesis_url: Url,
    voices_url: Url,
    format: AudioFormat,
}

/// Voice entry as returned by `voices/list`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AzureVoice {
    short_name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    local_name: Option<String>,
    #[serde(default)]
    locale: Option<String>,
}

impl AzureBackend {
    pub fn new(config: &ProviderConfig) -> Result<Self, SpeechError> {
        let synthesis_url = synthesis_url(&config.endpoint)?;
        let voices_url = voices_url(&synthesis_url)?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SpeechError::Http(format!("Failed to build HTTP client: {}", e)))?;

        debug!(%synthesis_url, %voices_url, format = %config.output_format, "Azure backend ready");

        Ok(Self {
            client,
            subscription_key: config.subscription_key.clone(),
            synthesis_url,
            voices_url,
            format: config.output_format,
        })
    }
}

impl SpeechBackend for AzureBackend {
    fn id(&self) -> &'static str {
        "azure"
    }

    fn output_format(&self) -> AudioFormat {
        self.format
    }

    fn synthesize(&self, text: &str, voice: &str, destination: &Path) -> Result<(), ProviderFailure> {
        let body = ssml::build(text, voice);
        debug!(url = %self.synthesis_url, ssml_bytes = body.len(), "Posting SSML");

        let response = self
            .client
            .post(self.synthesis_url.clone())
            .header(KEY_HEADER, &self.subscription_key)
            .header(CONTENT_TYPE, SSML_CONTENT_TYPE)
            .header(FORMAT_HEADER, self.format.header_value())
            .body(body)
            .send()
            .map_err(transport_failure)?;

        if !response.status().is_success() {
            return Err(status_failure(response));
        }

        let audio = response.bytes().map_err(transport_failure)?;
        if audio.is_empty() {
            return Err(ProviderFailure::new("Provider returned no audio"));
        }

        // RIFF payloads must at least carry a readable WAV header
        if self.format.is_riff() {
            hound::WavReader::new(Cursor::new(&audio[..])).map_err(|e| {
                ProviderFailure::new(format!("Provider returned malformed WAV audio: {}", e))
            })?;
        }

        std::fs::write(destination, &audio).map_err(|e| {
            ProviderFailure::new(format!("Failed to write {}: {}", destination.display(), e))
        })?;
        debug!(destination = %destination.display(), audio_bytes = audio.len(), "Audio written");

        Ok(())
    }

    fn list_voices(&self) -> Result<Vec<Voice>, ProviderFailure> {
        let response = self
            .client
            .get(self.voices_url.clone())
            .header(KEY_HEADER, &self.subscription_key)
            .send()
            .map_err(transport_failure)?;

        if !response.status().is_success() {
            return Err(status_failure(response));
        }

        let listed: Vec<AzureVoice> = response.json().map_err(|e| {
            ProviderFailure::new(format!("Failed to parse voices list: {}", e))
        })?;

        let mut voices: Vec<Voice> = listed
            .into_iter()
            .map(|v| Voice {
                name: v
                    .display_name
                    .or(v.local_name)
                    .unwrap_or_else(|| v.short_name.clone()),
                language: v.locale.unwrap_or_else(|| "unknown".to_string()),
                id: v.short_name,
            })
            .collect();

        // Sort by language then id
        voices.sort_by(|a, b| a.language.cmp(&b.language).then(a.id.cmp(&b.id)));
        Ok(voices)
    }
}

/// REST synthesis URL for a configured endpoint.
///
/// `ws`/`wss` map to `http`/`https`. A bare host gets `cognitiveservices/v1`,
/// and the websocket path `.../websocket/v1` becomes `.../v1`. Any other path
/// is used as given.
pub fn synthesis_url(endpoint: &Url) -> Result<Url, SpeechError> {
    let mut url = endpoint.clone();

    let scheme = match url.scheme() {
        "wss" => Some("https"),
        "ws" => Some("http"),
        _ => None,
    };
    if let Some(scheme) = scheme {
        url.set_scheme(scheme).map_err(|_| {
            SpeechError::Config(format!("Cannot use endpoint {} over {}", endpoint, scheme))
        })?;
    }

    let path = url.path().trim_end_matches('/').to_string();
    if path.is_empty() {
        url.set_path("/cognitiveservices/v1");
    } else if let Some(prefix) = path.strip_suffix("/websocket/v1") {
        url.set_path(&format!("{}/v1", prefix));
    }

    Ok(url)
}

/// Voices list URL, a sibling of the synthesis path.
pub fn voices_url(synthesis_url: &Url) -> Result<Url, SpeechError> {
    synthesis_url
        .join("voices/list")
        .map_err(|e| SpeechError::Config(format!("Cannot derive voices URL: {}", e)))
}

fn transport_failure(err: reqwest::Error) -> ProviderFailure {
    warn!("Provider request failed: {}", err);
    if err.is_timeout() {
        ProviderFailure::new("network timeout")
    } else if err.is_connect() {
        ProviderFailure::new(format!("connection failed: {}", err))
    } else {
        ProviderFailure::new(err.to_string())
    }
}

fn status_failure(response: Response) -> ProviderFailure {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    let body = body.trim();
    warn!(%status, "Provider rejected request");
    if body.is_empty() {
        ProviderFailure::new(format!("HTTP {}", status))
    } else {
        ProviderFailure::new(format!("HTTP {}: {}", status, body))
    }
}

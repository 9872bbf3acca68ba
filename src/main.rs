//! txt2speech - turn script text files into speech audio
//!
//! Reads a text file under the scripts directory, sends it to the configured
//! speech provider and writes the audio under the audio directory.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use txt2speech::backends::azure::AzureBackend;
use txt2speech::backends::{SpeechBackend, Voice};
use txt2speech::config_loader::{default_config_files, ProviderConfig, Settings};
use txt2speech::{SpeechError, TextToSpeechConverter};

/// Convert plain-text scripts into speech audio
#[derive(Parser)]
#[command(name = "txt2speech")]
#[command(version)]
#[command(about = "Convert plain-text script files into speech audio", long_about = None)]
struct Cli {
    /// Additional config file (toml, yaml or json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize one text file into an audio file
    Synthesize {
        /// Text file located under the scripts directory
        file: PathBuf,
        /// Voice to use (falls back to SPEECH_VOICE)
        #[arg(short, long)]
        voice: Option<String>,
    },

    /// List voices offered by the provider
    Voices {
        /// Only show voices whose locale starts with this (e.g. en-US)
        #[arg(short, long)]
        locale: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), SpeechError> {
    let mut files = default_config_files();
    if let Some(path) = cli.config {
        if !path.is_file() {
            return Err(SpeechError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        files.push(path);
    }

    let settings = Settings::from_files(&files)?;
    let provider = ProviderConfig::from_settings(&settings)?;
    let backend = AzureBackend::new(&provider)?;

    match cli.command {
        Commands::Synthesize { file, voice } => {
            let voice = resolve_voice(voice, &settings);
            let converter = TextToSpeechConverter::from_settings(&settings, Box::new(backend))?;
            let destination = converter.synthesize(&file, &voice)?;
            println!("{}", destination.display());
        }

        Commands::Voices { locale } => {
            let voices = backend
                .list_voices()
                .map_err(|e| SpeechError::Http(format!("Failed to list voices: {}", e)))?;
            for voice in voices
                .iter()
                .filter(|v| matches_locale(v, locale.as_deref()))
            {
                println!("{}\t{} [{}]", voice.id, voice.name, voice.language);
            }
        }
    }

    Ok(())
}

/// `--voice` wins, then `SPEECH_VOICE`. An empty result is left for the
/// converter to reject.
fn resolve_voice(cli_voice: Option<String>, settings: &Settings) -> String {
    cli_voice
        .or_else(|| settings.default_voice().map(str::to_string))
        .unwrap_or_default()
}

/// Case-insensitive locale prefix match; no filter matches everything.
fn matches_locale(voice: &Voice, locale: Option<&str>) -> bool {
    locale.map_or(true, |l| {
        voice
            .language
            .to_ascii_lowercase()
            .starts_with(&l.to_ascii_lowercase())
    })
}

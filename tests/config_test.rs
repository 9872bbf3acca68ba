use serial_test::serial;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::tempdir;
use txt2speech::config_loader::{ProviderConfig, Settings};
use txt2speech::format::AudioFormat;
use txt2speech::SpeechError;

const VARS: [&str; 4] = ["SPEECH_KEY", "ENDPOINT_URL", "TEXT_DIRECTORY", "SPEECH_VOICE"];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_process_environment_is_read() {
    clear_env();
    std::env::set_var("SPEECH_KEY", "env-key");
    std::env::set_var("ENDPOINT_URL", "https://eastus.tts.speech.microsoft.com/");
    std::env::set_var("TEXT_DIRECTORY", "/srv/podcast/scripts");
    std::env::set_var("SPEECH_VOICE", "en-US-JennyNeural");

    let settings = Settings::from_files(&[]);
    clear_env();

    let settings = settings.unwrap();
    assert_eq!(settings.scripts_root().unwrap(), PathBuf::from("/srv/podcast/scripts"));
    assert_eq!(settings.default_voice(), Some("en-US-JennyNeural"));

    let provider = ProviderConfig::from_settings(&settings).unwrap();
    assert_eq!(provider.subscription_key, "env-key");
    assert_eq!(provider.endpoint.host_str(), Some("eastus.tts.speech.microsoft.com"));
}

#[test]
#[serial]
fn test_missing_credentials_fail_fast() {
    clear_env();
    let settings = Settings::from_files(&[]).unwrap();
    assert!(matches!(
        ProviderConfig::from_settings(&settings),
        Err(SpeechError::ConfigMissing(_))
    ));
}

#[test]
fn test_config_file_overridden_by_environment() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("txt2speech.toml");
    std::fs::write(
        &file,
        r#"
speech_key = "file-key"
endpoint_url = "https://westeurope.tts.speech.microsoft.com/"
audio_root = "out/audio"
speech_output_format = "ogg-24khz-16bit-mono-opus"
"#,
    )
    .unwrap();

    let mut vars = HashMap::new();
    vars.insert("SPEECH_KEY".to_string(), "env-key".to_string());

    let settings = Settings::from_env_map(&[file], vars).unwrap();
    assert_eq!(settings.audio_root(), PathBuf::from("out/audio"));
    assert_eq!(settings.output_format().unwrap(), AudioFormat::Ogg24Khz16BitMonoOpus);

    let provider = ProviderConfig::from_settings(&settings).unwrap();
    assert_eq!(provider.subscription_key, "env-key");
    assert_eq!(provider.endpoint.host_str(), Some("westeurope.tts.speech.microsoft.com"));
}

#[test]
fn test_missing_config_file_is_ignored() {
    let dir = tempdir().unwrap();
    let settings = Settings::from_env_map(&[dir.path().join("absent.toml")], HashMap::new()).unwrap();
    assert_eq!(settings.audio_root(), PathBuf::from("audio"));
}

#[test]
fn test_blank_key_counts_as_missing() {
    let mut vars = HashMap::new();
    vars.insert("SPEECH_KEY".to_string(), "   ".to_string());
    vars.insert("ENDPOINT_URL".to_string(), "https://eastus.tts.speech.microsoft.com".to_string());

    let settings = Settings::from_env_map(&[], vars).unwrap();
    match ProviderConfig::from_settings(&settings) {
        Err(SpeechError::ConfigMissing(msg)) => assert!(msg.contains("SPEECH_KEY")),
        other => panic!("Expected ConfigMissing, got {:?}", other),
    }
}

#[test]
fn test_invalid_endpoint_url() {
    let mut vars = HashMap::new();
    vars.insert("SPEECH_KEY".to_string(), "k".to_string());
    vars.insert("ENDPOINT_URL".to_string(), "not a url".to_string());

    let settings = Settings::from_env_map(&[], vars).unwrap();
    assert!(matches!(
        ProviderConfig::from_settings(&settings),
        Err(SpeechError::Config(_))
    ));
}

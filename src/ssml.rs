//! SSML request documents for the synthesis endpoint.

const FALLBACK_LOCALE: &str = "en-US";

/// Escape XML special characters for use in element text or attribute values.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Locale prefix of a voice name, e.g. `en-US` for `en-US-JennyNeural`.
pub fn voice_locale(voice: &str) -> String {
    let mut parts = voice.split('-');
    match (parts.next(), parts.next()) {
        (Some(lang), Some(region))
            if (2..=3).contains(&lang.len())
                && lang.chars().all(|c| c.is_ascii_alphabetic())
                && !region.is_empty()
                && region.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!("{}-{}", lang, region)
        }
        _ => FALLBACK_LOCALE.to_string(),
    }
}

/// Build the SSML body speaking `text` with `voice`.
pub fn build(text: &str, voice: &str) -> String {
    format!(
        "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
        escape(&voice_locale(voice)),
        escape(voice),
        escape(text)
    )
}

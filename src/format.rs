use std::fmt;
use std::str::FromStr;

/// Audio encodings the provider can return.
///
/// The string form is the provider's own identifier, sent verbatim in the
/// `X-Microsoft-OutputFormat` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioFormat {
    #[default]
    Riff16Khz16BitMonoPcm,
    Riff24Khz16BitMonoPcm,
    Riff48Khz16BitMonoPcm,
    Audio16Khz32KBitRateMonoMp3,
    Audio24Khz48KBitRateMonoMp3,
    Audio48Khz96KBitRateMonoMp3,
    Ogg16Khz16BitMonoOpus,
    Ogg24Khz16BitMonoOpus,
    Ogg48Khz16BitMonoOpus,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 9] = [
        AudioFormat::Riff16Khz16BitMonoPcm,
        AudioFormat::Riff24Khz16BitMonoPcm,
        AudioFormat::Riff48Khz16BitMonoPcm,
        AudioFormat::Audio16Khz32KBitRateMonoMp3,
        AudioFormat::Audio24Khz48KBitRateMonoMp3,
        AudioFormat::Audio48Khz96KBitRateMonoMp3,
        AudioFormat::Ogg16Khz16BitMonoOpus,
        AudioFormat::Ogg24Khz16BitMonoOpus,
        AudioFormat::Ogg48Khz16BitMonoOpus,
    ];

    pub fn header_value(&self) -> &'static str {
        match self {
            AudioFormat::Riff16Khz16BitMonoPcm => "riff-16khz-16bit-mono-pcm",
            AudioFormat::Riff24Khz16BitMonoPcm => "riff-24khz-16bit-mono-pcm",
            AudioFormat::Riff48Khz16BitMonoPcm => "riff-48khz-16bit-mono-pcm",
            AudioFormat::Audio16Khz32KBitRateMonoMp3 => "audio-16khz-32kbitrate-mono-mp3",
            AudioFormat::Audio24Khz48KBitRateMonoMp3 => "audio-24khz-48kbitrate-mono-mp3",
            AudioFormat::Audio48Khz96KBitRateMonoMp3 => "audio-48khz-96kbitrate-mono-mp3",
            AudioFormat::Ogg16Khz16BitMonoOpus => "ogg-16khz-16bit-mono-opus",
            AudioFormat::Ogg24Khz16BitMonoOpus => "ogg-24khz-16bit-mono-opus",
            AudioFormat::Ogg48Khz16BitMonoOpus => "ogg-48khz-16bit-mono-opus",
        }
    }

    /// File extension (without the dot) for files holding this encoding.
    pub fn extension(&self) -> &'static str {
        if self.is_riff() {
            "wav"
        } else if self.header_value().ends_with("mp3") {
            "mp3"
        } else {
            "ogg"
        }
    }

    /// RIFF formats carry a WAV header that can be checked before writing.
    pub fn is_riff(&self) -> bool {
        self.header_value().starts_with("riff-")
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_value())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AudioFormat::ALL
            .iter()
            .copied()
            .find(|f| f.header_value() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = AudioFormat::ALL.iter().map(|f| f.header_value()).collect();
                format!("Unknown output format '{}'. Supported: {}", s, known.join(", "))
            })
    }
}

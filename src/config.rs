use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::KaraokeError;
use crate::types::AlignmentResult;

/// Language of the lyrics; picks how words are split into syllables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Romanized Japanese, split by the phonetic rule table.
    #[default]
    Japanese,
    /// Dictionary hyphenation (en-US patterns).
    English,
    /// Dictionary hyphenation (French patterns).
    French,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::Japanese => "jp",
            Self::English => "en",
            Self::French => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jp" | "ja" => Ok(Self::Japanese),
            "en" => Ok(Self::English),
            "fr" => Ok(Self::French),
            other => Err(format!("unsupported language {other:?} (expected jp, en or fr)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KaraokeConfig {
    /// JSON vocabulary (`{"label": id}`); the built-in MMS label set is used when unset.
    pub vocab_path: Option<String>,
    pub expected_sample_rate_hz: u32,
    pub language: Language,
    /// Stamped into the subtitle script as its timing origin.
    pub identifier: String,
}

impl KaraokeConfig {
    pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 16_000;

    pub fn default_identifier() -> String {
        format!(
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_REPOSITORY")
        )
    }
}

impl Default for KaraokeConfig {
    fn default() -> Self {
        Self {
            vocab_path: None,
            expected_sample_rate_hz: Self::DEFAULT_SAMPLE_RATE_HZ,
            language: Language::default(),
            identifier: Self::default_identifier(),
        }
    }
}

impl AlignmentResult {
    pub fn load(path: &Path) -> Result<Self, KaraokeError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| KaraokeError::io("read alignment json", e))?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self, KaraokeError> {
        serde_json::from_str(data).map_err(|e| KaraokeError::json("parse alignment json", e))
    }
}

use hyphenation::{Hyphenator, Load, Standard};

use crate::config::Language;
use crate::error::KaraokeError;

/// Pattern-based hyphenation with a dictionary embedded in the binary.
pub struct Hyphenation {
    language: Language,
    dictionary: Standard,
}

impl Hyphenation {
    pub fn embedded(language: Language) -> Result<Self, KaraokeError> {
        let dictionary_language = match language {
            Language::English => hyphenation::Language::EnglishUS,
            Language::French => hyphenation::Language::French,
            Language::Japanese => {
                return Err(KaraokeError::invalid_input(
                    "no hyphenation dictionary for jp; it uses the rule syllabifier",
                ))
            }
        };
        let dictionary = Standard::from_embedded(dictionary_language).map_err(|e| {
            KaraokeError::Hyphenation {
                language: language.code(),
                message: e.to_string(),
            }
        })?;
        tracing::debug!(language = language.code(), "hyphenation: dictionary loaded");
        Ok(Self {
            language,
            dictionary,
        })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Split `word` at every hyphenation point. Words too short to hyphenate
    /// come back whole.
    pub fn split(&self, word: &str) -> Vec<String> {
        let hyphenated = self.dictionary.hyphenate(word);
        let mut syllables = Vec::with_capacity(hyphenated.breaks.len() + 1);
        let mut from = 0;
        for &to in hyphenated.breaks.iter().chain(std::iter::once(&word.len())) {
            if let Some(part) = word.get(from..to).filter(|part| !part.is_empty()) {
                syllables.push(part.to_string());
            }
            from = to;
        }
        syllables
    }
}

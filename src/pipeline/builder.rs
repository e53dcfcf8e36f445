use std::path::Path;

use crate::alignment::tokenization::Vocabulary;
use crate::config::KaraokeConfig;
use crate::error::KaraokeError;
use crate::pipeline::defaults::{syllabifier_for, VocabularyTokenizer};
use crate::pipeline::runtime::{KaraokeTimer, KaraokeTimerParts};
use crate::pipeline::traits::{Syllabifier, Tokenizer};

pub struct KaraokeTimerBuilder {
    config: KaraokeConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
    syllabifier: Option<Box<dyn Syllabifier>>,
}

impl KaraokeTimerBuilder {
    pub fn new(config: KaraokeConfig) -> Self {
        Self {
            config,
            tokenizer: None,
            syllabifier: None,
        }
    }

    /// Replaces the vocabulary tokenizer; `vocab_path` is then ignored.
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Replaces the syllabifier `language` would pick.
    pub fn with_syllabifier(mut self, syllabifier: Box<dyn Syllabifier>) -> Self {
        self.syllabifier = Some(syllabifier);
        self
    }

    pub fn build(self) -> Result<KaraokeTimer, KaraokeError> {
        let expected_sample_rate_hz = if self.config.expected_sample_rate_hz == 0 {
            KaraokeConfig::DEFAULT_SAMPLE_RATE_HZ
        } else {
            self.config.expected_sample_rate_hz
        };

        let tokenizer = match self.tokenizer {
            Some(tokenizer) => tokenizer,
            None => {
                let vocab = match self.config.vocab_path.as_deref() {
                    Some(path) => Vocabulary::load(Path::new(path))?,
                    None => Vocabulary::mms(),
                };
                if vocab.is_empty() {
                    return Err(KaraokeError::invalid_input(
                        "vocabulary has no single-character labels",
                    ));
                }
                Box::new(VocabularyTokenizer::new(vocab)) as Box<dyn Tokenizer>
            }
        };

        let syllabifier = match self.syllabifier {
            Some(syllabifier) => syllabifier,
            None => syllabifier_for(self.config.language)?,
        };
        tracing::debug!(language = self.config.language.code(), "builder: syllabifier ready");

        Ok(KaraokeTimer::from_parts(KaraokeTimerParts {
            tokenizer,
            syllabifier,
            identifier: self.config.identifier,
            expected_sample_rate_hz,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use crate::types::{AlignmentResult, TokenSpan};

    struct WholeWordSyllabifier;

    impl Syllabifier for WholeWordSyllabifier {
        fn syllabify(&self, word: &str) -> Vec<String> {
            vec![word.to_string()]
        }
    }

    fn alignment(word_spans: Vec<Vec<TokenSpan>>) -> AlignmentResult {
        AlignmentResult {
            waveform_sample_count: 16_000,
            emission_frame_count: 50,
            sample_rate: 16_000,
            word_spans,
        }
    }

    #[test]
    fn build_with_defaults() {
        let timer = KaraokeTimerBuilder::new(KaraokeConfig::default())
            .build()
            .expect("build should succeed");
        assert!(timer.identifier().starts_with("karaoke-sync"));
        let lyrics = timer.load_lyrics("Ai").unwrap();
        assert_eq!(timer.transcript_tokens(&lyrics), vec![vec![1, 2]]);
    }

    #[test]
    fn identifier_is_passed_through() {
        let config = KaraokeConfig {
            identifier: "custom 1.0".to_string(),
            ..KaraokeConfig::default()
        };
        let timer = KaraokeTimerBuilder::new(config).build().unwrap();
        let lyrics = timer.load_lyrics("a").unwrap();
        let script = timer
            .make_script(&lyrics, &alignment(vec![vec![TokenSpan::new(1, 3)]]))
            .unwrap();
        assert_eq!(script.identifier, "custom 1.0");
        assert_eq!(script.lines.len(), 1);
    }

    #[test]
    fn custom_syllabifier_is_used() {
        let timer = KaraokeTimerBuilder::new(KaraokeConfig::default())
            .with_syllabifier(Box::new(WholeWordSyllabifier))
            .build()
            .unwrap();
        let lyrics = timer.load_lyrics("chikara").unwrap();
        assert_eq!(lyrics.lines()[0].words()[0].syllables(), ["chikara"]);
    }

    #[test]
    fn language_selects_syllabifier() {
        let config = KaraokeConfig {
            language: Language::English,
            ..KaraokeConfig::default()
        };
        let timer = KaraokeTimerBuilder::new(config).build().unwrap();
        let lyrics = timer.load_lyrics("Hyphenation").unwrap();
        assert_eq!(
            lyrics.lines()[0].words()[0].syllables(),
            ["hy", "phen", "a", "tion"]
        );

        let config = KaraokeConfig {
            language: Language::French,
            ..KaraokeConfig::default()
        };
        let timer = KaraokeTimerBuilder::new(config).build().unwrap();
        let lyrics = timer.load_lyrics("Ordinateur").unwrap();
        let syllables = lyrics.lines()[0].words()[0].syllables();
        assert!(syllables.len() > 1);
        assert_eq!(syllables.concat(), "ordinateur");
    }

    #[test]
    fn build_fails_on_invalid_vocab_path() {
        let config = KaraokeConfig {
            vocab_path: Some("/nonexistent/vocab.json".to_string()),
            ..KaraokeConfig::default()
        };
        let result = KaraokeTimerBuilder::new(config).build();
        assert!(matches!(result, Err(KaraokeError::Io { .. })));
    }

    #[test]
    fn build_fails_on_vocab_without_char_labels() {
        let vocab_path = std::env::temp_dir().join("karaoke_sync_builder_vocab_multi.json");
        std::fs::write(&vocab_path, r#"{"<pad>": 0, "<s>": 1}"#).expect("write vocab");
        let config = KaraokeConfig {
            vocab_path: Some(vocab_path.to_string_lossy().to_string()),
            ..KaraokeConfig::default()
        };
        let result = KaraokeTimerBuilder::new(config).build();
        assert!(matches!(result, Err(KaraokeError::InvalidInput { .. })));
        let _ = std::fs::remove_file(&vocab_path);
    }

    #[test]
    fn build_uses_vocab_file() {
        let vocab_path = std::env::temp_dir().join("karaoke_sync_builder_vocab.json");
        std::fs::write(&vocab_path, r#"{"a": 7, "i": 9}"#).expect("write vocab");
        let config = KaraokeConfig {
            vocab_path: Some(vocab_path.to_string_lossy().to_string()),
            ..KaraokeConfig::default()
        };
        let timer = KaraokeTimerBuilder::new(config).build().unwrap();
        let lyrics = timer.load_lyrics("ai").unwrap();
        assert_eq!(timer.transcript_tokens(&lyrics), vec![vec![7, 9]]);
        let _ = std::fs::remove_file(&vocab_path);
    }
}

use crate::alignment::tokenization::Vocabulary;
use crate::config::Language;
use crate::error::KaraokeError;
use crate::lyrics::hyphenate::Hyphenation;
use crate::lyrics::syllabify::split_syllables;
use crate::pipeline::traits::{Syllabifier, Tokenizer};

/// One token per character known to the vocabulary.
#[derive(Debug, Clone, Default)]
pub struct VocabularyTokenizer {
    vocab: Vocabulary,
}

impl VocabularyTokenizer {
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }
}

impl Tokenizer for VocabularyTokenizer {
    fn tokenize(&self, text: &str) -> Vec<usize> {
        self.vocab.encode_word(text)
    }
}

pub struct RuleSyllabifier;

impl Syllabifier for RuleSyllabifier {
    fn syllabify(&self, word: &str) -> Vec<String> {
        split_syllables(word)
    }
}

/// Dictionary hyphenation for languages the rule table does not fit.
pub struct DictionarySyllabifier {
    hyphenation: Hyphenation,
}

impl DictionarySyllabifier {
    pub fn embedded(language: Language) -> Result<Self, KaraokeError> {
        Ok(Self {
            hyphenation: Hyphenation::embedded(language)?,
        })
    }
}

impl Syllabifier for DictionarySyllabifier {
    fn syllabify(&self, word: &str) -> Vec<String> {
        self.hyphenation.split(word)
    }
}

/// The rule table for Japanese, dictionary hyphenation otherwise.
pub fn syllabifier_for(language: Language) -> Result<Box<dyn Syllabifier>, KaraokeError> {
    match language {
        Language::Japanese => Ok(Box::new(RuleSyllabifier)),
        Language::English | Language::French => {
            Ok(Box::new(DictionarySyllabifier::embedded(language)?))
        }
    }
}

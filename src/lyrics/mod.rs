pub mod hyphenate;
pub mod normalize;
pub mod syllabify;

use crate::error::KaraokeError;
use crate::pipeline::traits::Syllabifier;

pub use normalize::normalize;
pub use syllabify::split_syllables;

/// Song lyrics split into lines, words and syllables.
///
/// Lines keep reading order. Input lines that normalize to nothing never
/// become a [`Line`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lyrics {
    raw: String,
    lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    raw: String,
    normalized: String,
    words: Vec<Word>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    raw: String,
    syllables: Vec<String>,
}

impl Lyrics {
    pub fn parse(raw: &str, syllabifier: &dyn Syllabifier) -> Result<Self, KaraokeError> {
        let mut lines = Vec::new();
        for (line_idx, raw_line) in raw.lines().enumerate() {
            if raw_line.is_empty() {
                continue;
            }
            match Line::parse(raw_line, syllabifier)? {
                Some(line) => lines.push(line),
                None => tracing::warn!(
                    line = line_idx + 1,
                    raw = raw_line,
                    "lyrics: dropping line with no alignable characters"
                ),
            }
        }
        Ok(Self {
            raw: raw.to_string(),
            lines,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All words in document order, across lines.
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|line| line.words.iter())
    }

    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| line.words.len()).sum()
    }

    /// The word list handed to the forced aligner; one span list is expected
    /// back for each entry.
    pub fn transcript(&self) -> Vec<&str> {
        self.words().map(Word::raw).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Line {
    fn parse(raw: &str, syllabifier: &dyn Syllabifier) -> Result<Option<Self>, KaraokeError> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Ok(None);
        }
        let words = normalized
            .split_whitespace()
            .map(|token| Word::parse(token, syllabifier))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Self {
            raw: raw.to_string(),
            normalized,
            words,
        }))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl Word {
    fn parse(token: &str, syllabifier: &dyn Syllabifier) -> Result<Self, KaraokeError> {
        let syllables = syllabifier.syllabify(token);
        if syllables.is_empty() || syllables.iter().any(String::is_empty) {
            return Err(KaraokeError::invalid_input(format!(
                "syllabifier produced an empty syllable for {token:?}"
            )));
        }
        if syllables.concat() != token {
            return Err(KaraokeError::invalid_input(format!(
                "syllables {syllables:?} do not reassemble word {token:?}"
            )));
        }
        Ok(Self {
            raw: token.to_string(),
            syllables,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn syllables(&self) -> &[String] {
        &self.syllables
    }
}

use std::collections::HashMap;
use std::path::Path;

use crate::error::KaraokeError;

/// Label set of the MMS multilingual forced-alignment model, in id order.
/// `-` is the CTC blank and `*` the star token.
pub const MMS_LABELS: [char; 29] = [
    '-', 'a', 'i', 'e', 'n', 'o', 'u', 't', 's', 'r', 'm', 'k', 'l', 'd', 'g', 'h', 'y', 'b', 'p',
    'w', 'c', 'v', 'j', 'z', 'f', '\'', 'q', 'x', '*',
];

/// Character-level vocabulary of the alignment model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    ids: HashMap<char, usize>,
}

impl Vocabulary {
    pub fn mms() -> Self {
        Self {
            ids: MMS_LABELS
                .iter()
                .enumerate()
                .map(|(id, &c)| (c, id))
                .collect(),
        }
    }

    /// Keeps single-character labels only.
    pub fn from_labels(raw: HashMap<String, usize>) -> Self {
        let ids = raw
            .into_iter()
            .filter_map(|(label, id)| {
                let mut it = label.chars();
                let c = it.next()?;
                if it.next().is_some() {
                    return None;
                }
                Some((c, id))
            })
            .collect();
        Self { ids }
    }

    pub fn load(path: &Path) -> Result<Self, KaraokeError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| KaraokeError::io("read vocab.json", e))?;
        let raw: HashMap<String, usize> =
            serde_json::from_str(&data).map_err(|e| KaraokeError::json("parse vocab.json", e))?;
        Ok(Self::from_labels(raw))
    }

    pub fn id(&self, c: char) -> Option<usize> {
        self.ids.get(&c).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Token ids for one word. Characters outside the vocabulary produce no token.
    pub fn encode_word(&self, word: &str) -> Vec<usize> {
        word.chars().filter_map(|c| self.id(c)).collect()
    }

    /// Per-word token lists, the shape the forced aligner consumes.
    pub fn encode_transcript(&self, words: &[&str]) -> Vec<Vec<usize>> {
        words.iter().map(|word| self.encode_word(word)).collect()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::mms()
    }
}

use crate::error::KaraokeError;
use crate::lyrics::Lyrics;
use crate::pipeline::traits::{Syllabifier, Tokenizer};
use crate::subtitles::events::build_karaoke_lines;
use crate::types::{AlignmentResult, KaraokeScript};

/// Turns lyrics plus an external forced alignment into a karaoke script.
pub struct KaraokeTimer {
    tokenizer: Box<dyn Tokenizer>,
    syllabifier: Box<dyn Syllabifier>,
    identifier: String,
    expected_sample_rate_hz: u32,
}

pub(crate) struct KaraokeTimerParts {
    pub tokenizer: Box<dyn Tokenizer>,
    pub syllabifier: Box<dyn Syllabifier>,
    pub identifier: String,
    pub expected_sample_rate_hz: u32,
}

impl KaraokeTimer {
    pub(crate) fn from_parts(parts: KaraokeTimerParts) -> Self {
        Self {
            tokenizer: parts.tokenizer,
            syllabifier: parts.syllabifier,
            identifier: parts.identifier,
            expected_sample_rate_hz: parts.expected_sample_rate_hz,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn load_lyrics(&self, raw: &str) -> Result<Lyrics, KaraokeError> {
        let lyrics = Lyrics::parse(raw, self.syllabifier.as_ref())?;
        tracing::info!(
            lines = lyrics.lines().len(),
            words = lyrics.word_count(),
            "lyrics loaded"
        );
        Ok(lyrics)
    }

    /// Token ids for every transcript word, the aligner's input.
    pub fn transcript_tokens(&self, lyrics: &Lyrics) -> Vec<Vec<usize>> {
        lyrics
            .words()
            .map(|word| self.tokenizer.tokenize(word.raw()))
            .collect()
    }

    pub fn make_script(
        &self,
        lyrics: &Lyrics,
        alignment: &AlignmentResult,
    ) -> Result<KaraokeScript, KaraokeError> {
        if alignment.sample_rate != self.expected_sample_rate_hz {
            tracing::warn!(
                expected_rate_hz = self.expected_sample_rate_hz,
                actual_rate_hz = alignment.sample_rate,
                "alignment sample rate differs from the configured one; timings use the alignment's"
            );
        }

        let lines = build_karaoke_lines(lyrics, alignment, self.tokenizer.as_ref())?;
        tracing::info!(lines = lines.len(), "karaoke subtitles generated");
        Ok(KaraokeScript {
            identifier: self.identifier.clone(),
            lines,
        })
    }
}

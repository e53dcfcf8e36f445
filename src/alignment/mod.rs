pub mod partition;
pub mod timing;
pub mod tokenization;

use crate::error::KaraokeError;
use crate::lyrics::Word;
use crate::pipeline::traits::Tokenizer;
use crate::types::{TimedSyllable, TokenSpan};

use self::timing::FrameClock;

/// Partition a word's spans across its syllables and time each run.
pub fn time_word(
    word: &Word,
    spans: &[TokenSpan],
    tokenizer: &dyn Tokenizer,
    clock: &FrameClock,
) -> Result<Vec<TimedSyllable>, KaraokeError> {
    let runs = partition::partition_spans(word, spans.len(), tokenizer)?;
    timing::time_syllables(word.syllables(), spans, &runs, clock)
}

use std::ops::Range;

use crate::error::KaraokeError;
use crate::lyrics::Word;
use crate::pipeline::traits::Tokenizer;

/// Split a word's span list into one contiguous run per syllable.
///
/// Each syllable is retokenized on its own; its token count is the number of
/// spans it owns. The runs must cover the span list exactly. Anything else
/// means the syllabifier and the aligner's tokenizer disagree, which is
/// reported as [`KaraokeError::SpanCountMismatch`].
pub fn partition_spans(
    word: &Word,
    span_count: usize,
    tokenizer: &dyn Tokenizer,
) -> Result<Vec<Range<usize>>, KaraokeError> {
    let mut counts = Vec::with_capacity(word.syllables().len());
    for syllable in word.syllables() {
        let n_tokens = tokenizer.count_tokens(syllable);
        if n_tokens == 0 {
            return Err(KaraokeError::EmptySyllable {
                word: word.raw().to_string(),
                syllable: syllable.clone(),
            });
        }
        counts.push(n_tokens);
    }

    let required: usize = counts.iter().sum();
    if required != span_count {
        return Err(KaraokeError::SpanCountMismatch {
            word: word.raw().to_string(),
            required,
            available: span_count,
        });
    }

    let mut cursor = 0;
    let runs = counts
        .into_iter()
        .map(|n_tokens| {
            let run = cursor..cursor + n_tokens;
            cursor = run.end;
            run
        })
        .collect();
    Ok(runs)
}

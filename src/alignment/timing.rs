use std::ops::Range;

use crate::error::KaraokeError;
use crate::types::{AlignmentResult, TimedSyllable, TokenSpan};

/// Converts emission frame indices into seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Waveform samples per emission frame.
    ratio: f64,
    sample_rate: f64,
}

impl FrameClock {
    pub fn new(
        waveform_sample_count: usize,
        emission_frame_count: usize,
        sample_rate: u32,
    ) -> Result<Self, KaraokeError> {
        if emission_frame_count == 0 {
            return Err(KaraokeError::invalid_input("emission has no frames"));
        }
        if sample_rate == 0 {
            return Err(KaraokeError::invalid_input("sample rate must be non-zero"));
        }
        Ok(Self {
            ratio: waveform_sample_count as f64 / emission_frame_count as f64,
            sample_rate: sample_rate as f64,
        })
    }

    pub fn from_alignment(alignment: &AlignmentResult) -> Result<Self, KaraokeError> {
        Self::new(
            alignment.waveform_sample_count,
            alignment.emission_frame_count,
            alignment.sample_rate,
        )
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn seconds(&self, frame: usize) -> f64 {
        self.ratio * frame as f64 / self.sample_rate
    }
}

/// Time each syllable of a word from its span run.
///
/// When another span follows a run inside the same word, the displayed end is
/// pulled to that span's start so consecutive syllables leave no gap. The last
/// syllable of the word keeps its own end.
pub fn time_syllables(
    syllables: &[String],
    spans: &[TokenSpan],
    runs: &[Range<usize>],
    clock: &FrameClock,
) -> Result<Vec<TimedSyllable>, KaraokeError> {
    if let Some(span) = spans.iter().find(|span| span.end < span.start) {
        return Err(KaraokeError::invalid_input(format!(
            "token span ends before it starts: {}..{}",
            span.start, span.end
        )));
    }

    let mut timed = Vec::with_capacity(syllables.len());
    for (syllable, run) in syllables.iter().zip(runs) {
        let first = spans.get(run.start);
        let last = run.end.checked_sub(1).and_then(|idx| spans.get(idx));
        let (false, Some(first), Some(last)) = (run.is_empty(), first, last) else {
            return Err(KaraokeError::invalid_input(format!(
                "span run {}..{} out of bounds for {} spans",
                run.start,
                run.end,
                spans.len()
            )));
        };
        let start_s = clock.seconds(first.start);
        let end_s = clock.seconds(last.end);
        let display_end_s = spans
            .get(run.end)
            .map_or(end_s, |next| clock.seconds(next.start));

        tracing::debug!(
            syllable = syllable.as_str(),
            start_frame = first.start,
            end_frame = last.end,
            start_s = format!("{:.3}", start_s),
            end_s = format!("{:.3}", end_s),
            display_end_s = format!("{:.3}", display_end_s),
            "timing: syllable"
        );
        timed.push(TimedSyllable {
            text: syllable.clone(),
            start_s,
            end_s,
            display_end_s,
        });
    }
    Ok(timed)
}

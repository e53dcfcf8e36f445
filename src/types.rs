use serde::{Deserialize, Serialize};

/// Frame boundaries of one alignment token, as indices into the aligner's
/// emission grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Output of the external forced aligner for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// Length of the waveform the aligner consumed, in samples.
    pub waveform_sample_count: usize,
    /// Number of frames in the aligner's emission matrix.
    pub emission_frame_count: usize,
    pub sample_rate: u32,
    /// One span list per lyric word, in document order.
    pub word_spans: Vec<Vec<TokenSpan>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimedSyllable {
    pub text: String,
    pub start_s: f64,
    /// End of the syllable's own span run.
    pub end_s: f64,
    /// End used for display: snapped to the next span's start when the word
    /// continues, otherwise equal to `end_s`.
    pub display_end_s: f64,
}

impl TimedSyllable {
    /// Highlight duration in centiseconds.
    pub fn k_duration_cs(&self) -> i64 {
        round_half_even((self.display_end_s - self.start_s) * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Comment,
    Dialogue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KaraokeSegment {
    pub duration_cs: u32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleEvent {
    pub kind: EventKind,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

/// A finalized lyric line: the untagged comment and the karaoke event share
/// the same timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KaraokeLine {
    pub comment: SubtitleEvent,
    pub event: SubtitleEvent,
    pub segments: Vec<KaraokeSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KaraokeScript {
    /// Written as the `Original Timing` script field.
    pub identifier: String,
    pub lines: Vec<KaraokeLine>,
}

/// Rounds half-way cases to the nearest even integer.
pub(crate) fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

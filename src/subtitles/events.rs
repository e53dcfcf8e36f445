use crate::alignment::time_word;
use crate::alignment::timing::FrameClock;
use crate::error::KaraokeError;
use crate::lyrics::Lyrics;
use crate::pipeline::traits::Tokenizer;
use crate::types::{
    round_half_even, AlignmentResult, EventKind, KaraokeLine, KaraokeSegment, SubtitleEvent,
    TimedSyllable,
};

/// Time every syllable of `lyrics` and assemble one karaoke line per lyric line.
///
/// `alignment.word_spans` must hold exactly one span list per lyric word.
/// Any span mismatch aborts the whole document; no partial output is returned.
pub fn build_karaoke_lines(
    lyrics: &Lyrics,
    alignment: &AlignmentResult,
    tokenizer: &dyn Tokenizer,
) -> Result<Vec<KaraokeLine>, KaraokeError> {
    let word_count = lyrics.word_count();
    if word_count != alignment.word_spans.len() {
        return Err(KaraokeError::SpanListCountMismatch {
            words: word_count,
            span_lists: alignment.word_spans.len(),
        });
    }
    let clock = FrameClock::from_alignment(alignment)?;

    let mut builder = KaraokeEventBuilder::new();
    let mut span_cursor = 0;
    for line in lyrics.lines() {
        for word in line.words() {
            let spans = alignment.word_spans.get(span_cursor).ok_or(
                KaraokeError::SpanListCountMismatch {
                    words: word_count,
                    span_lists: alignment.word_spans.len(),
                },
            )?;
            span_cursor += 1;
            let timed = time_word(word, spans, tokenizer, &clock)?;
            builder.push_word(&timed);
        }
        builder.finish_line(line.raw());
    }
    builder.finish()
}

/// Accumulates timed syllables into karaoke events, one line at a time.
///
/// No open event means the next syllable starts a new line. The most recent
/// word is held back until the next word of the line arrives, so its last
/// syllable can stay highlighted until that word starts. Every duration after
/// an inter-word gap is measured against the time the line has already
/// displayed, so per-tag rounding does not add up along a line.
#[derive(Debug, Default)]
pub struct KaraokeEventBuilder {
    pending_word: Vec<TimedSyllable>,
    open: Option<OpenEvent>,
    lines: Vec<KaraokeLine>,
}

#[derive(Debug)]
struct OpenEvent {
    start_ms: u64,
    end_ms: u64,
    /// Centiseconds already covered by emitted segments.
    cumulative_cs: i64,
    segments: Vec<KaraokeSegment>,
}

impl OpenEvent {
    fn starting_at(start_s: f64) -> Self {
        let start_ms = seconds_to_ms(start_s);
        Self {
            start_ms,
            end_ms: start_ms,
            cumulative_cs: 0,
            segments: Vec::new(),
        }
    }

    /// Space segment before a word. With the previous word snapped to this
    /// word's start it only carries the rounding residual.
    fn push_word_gap(&mut self, next_start_s: f64) {
        let gap_cs = round_half_even(
            next_start_s * 100.0 - self.start_ms as f64 / 10.0 - self.cumulative_cs as f64,
        )
        .max(0);
        self.cumulative_cs += gap_cs;
        self.segments.push(KaraokeSegment {
            duration_cs: clamp_cs(gap_cs),
            content: " ".to_string(),
        });
    }

    fn push_syllable(&mut self, syllable: &TimedSyllable) {
        let k_duration_cs = syllable.k_duration_cs().max(0);
        self.cumulative_cs += k_duration_cs;
        self.segments.push(KaraokeSegment {
            duration_cs: clamp_cs(k_duration_cs),
            content: syllable.text.clone(),
        });
        self.end_ms = seconds_to_ms(syllable.display_end_s);
    }
}

impl KaraokeEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next word of the current line. The previously queued word
    /// is emitted with its last syllable snapped to this word's start.
    pub fn push_word(&mut self, syllables: &[TimedSyllable]) {
        let Some(next_start_s) = syllables.first().map(|syllable| syllable.start_s) else {
            return;
        };
        if let Some(last) = self.pending_word.last_mut() {
            last.display_end_s = next_start_s;
        }
        self.flush_pending_word();
        self.pending_word = syllables.to_vec();
    }

    fn flush_pending_word(&mut self) {
        let word = std::mem::take(&mut self.pending_word);
        let Some(first) = word.first() else {
            return;
        };
        let continues_line = self.open.is_some();
        let event = self
            .open
            .get_or_insert_with(|| OpenEvent::starting_at(first.start_s));
        if continues_line {
            event.push_word_gap(first.start_s);
        }
        for syllable in &word {
            event.push_syllable(syllable);
        }
    }

    /// Close the current line. A line that received no syllables emits nothing.
    pub fn finish_line(&mut self, raw_line: &str) {
        self.flush_pending_word();
        let Some(open) = self.open.take() else {
            return;
        };
        let text = render_karaoke_text(&open.segments);
        tracing::debug!(
            start_ms = open.start_ms,
            end_ms = open.end_ms,
            text = text.as_str(),
            "events: line finalized"
        );
        self.lines.push(KaraokeLine {
            comment: SubtitleEvent {
                kind: EventKind::Comment,
                start_ms: open.start_ms,
                end_ms: open.end_ms,
                text: raw_line.to_string(),
            },
            event: SubtitleEvent {
                kind: EventKind::Dialogue,
                start_ms: open.start_ms,
                end_ms: open.end_ms,
                text,
            },
            segments: open.segments,
        });
    }

    /// Returns every finalized line. Words pushed after the last
    /// [`finish_line`](Self::finish_line) have no raw text to comment with
    /// and are rejected.
    pub fn finish(self) -> Result<Vec<KaraokeLine>, KaraokeError> {
        if !self.pending_word.is_empty() || self.open.is_some() {
            return Err(KaraokeError::invalid_input(
                "karaoke line left open without finish_line",
            ));
        }
        Ok(self.lines)
    }
}

/// `{\k<cs>}<content>` for each segment, trimmed.
pub fn render_karaoke_text(segments: &[KaraokeSegment]) -> String {
    let text: String = segments
        .iter()
        .map(|segment| format!("{{\\k{}}}{}", segment.duration_cs, segment.content))
        .collect();
    text.trim().to_string()
}

fn seconds_to_ms(seconds: f64) -> u64 {
    round_half_even(seconds * 1000.0).max(0) as u64
}

fn clamp_cs(cs: i64) -> u32 {
    u32::try_from(cs.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::defaults::{RuleSyllabifier, VocabularyTokenizer};
    use crate::types::TokenSpan;

    fn lyrics(raw: &str) -> Lyrics {
        Lyrics::parse(raw, &RuleSyllabifier).expect("parse lyrics")
    }

    fn alignment(
        ratio_samples: usize,
        sample_rate: u32,
        spans: &[&[(usize, usize)]],
    ) -> AlignmentResult {
        AlignmentResult {
            waveform_sample_count: ratio_samples,
            emission_frame_count: 1,
            sample_rate,
            word_spans: spans
                .iter()
                .map(|word| word.iter().map(|&(s, e)| TokenSpan::new(s, e)).collect())
                .collect(),
        }
    }

    fn build(raw: &str, alignment: &AlignmentResult) -> Result<Vec<KaraokeLine>, KaraokeError> {
        build_karaoke_lines(&lyrics(raw), alignment, &VocabularyTokenizer::default())
    }

    fn timed(text: &str, start_s: f64, end_s: f64) -> TimedSyllable {
        TimedSyllable {
            text: text.to_string(),
            start_s,
            end_s,
            display_end_s: end_s,
        }
    }

    #[test]
    fn single_syllable_line() {
        let lines = build("O", &alignment(2, 100, &[&[(0, 50)]])).unwrap();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.event.start_ms, 0);
        assert_eq!(line.event.end_ms, 1000);
        assert_eq!(line.event.text, "{\\k100}o");
        assert_eq!(line.event.kind, EventKind::Dialogue);
        assert_eq!(line.comment.kind, EventKind::Comment);
        assert_eq!(line.comment.text, "O");
        assert_eq!(line.comment.start_ms, line.event.start_ms);
        assert_eq!(line.comment.end_ms, line.event.end_ms);
    }

    #[test]
    fn word_end_snaps_to_next_word_start() {
        let lines = build("a e", &alignment(1, 100, &[&[(0, 10)], &[(15, 25)]])).unwrap();
        let line = &lines[0];
        // "a" stays lit until "e" starts at 0.15s; the space only keeps the
        // rounding residual.
        assert_eq!(line.segments[0].duration_cs, 15);
        assert_eq!(line.event.text, "{\\k15}a{\\k0} {\\k10}e");
        assert_eq!(line.event.start_ms, 0);
        assert_eq!(line.event.end_ms, 250);
        let contents: Vec<&str> = line.segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, ["a", " ", "e"]);
    }

    #[test]
    fn last_word_of_line_keeps_its_own_end() {
        let lines = build("a\ne", &alignment(1, 100, &[&[(0, 10)], &[(15, 25)]])).unwrap();
        assert_eq!(lines[0].event.text, "{\\k10}a");
        assert_eq!(lines[0].event.end_ms, 100);
        assert_eq!(lines[1].event.text, "{\\k10}e");
        assert_eq!(lines[1].event.start_ms, 150);
    }

    #[test]
    fn span_count_mismatch_aborts_document() {
        let err = build("ai\nka", &alignment(1, 100, &[&[(0, 1), (2, 3)], &[(4, 5)]])).unwrap_err();
        assert!(matches!(
            err,
            KaraokeError::SpanCountMismatch { ref word, required: 2, available: 1 } if word == "ka"
        ));
    }

    #[test]
    fn span_list_count_mismatch_aborts_document() {
        let err = build("a e", &alignment(1, 100, &[&[(0, 10)]])).unwrap_err();
        assert!(matches!(
            err,
            KaraokeError::SpanListCountMismatch {
                words: 2,
                span_lists: 1
            }
        ));

        let err = build("a", &alignment(1, 100, &[&[(0, 10)], &[(12, 20)]])).unwrap_err();
        assert!(matches!(
            err,
            KaraokeError::SpanListCountMismatch {
                words: 1,
                span_lists: 2
            }
        ));
    }

    #[test]
    fn each_line_gets_its_own_event() {
        let lines = build(
            "Sora\n\n!!!\nUmi",
            &alignment(
                1,
                100,
                &[
                    &[(10, 12), (13, 20), (21, 25), (26, 30)],
                    &[(100, 110), (111, 120), (125, 140)],
                ],
            ),
        )
        .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].comment.text, "Sora");
        // so | ra: "so" ends at the start of "r"
        assert_eq!(lines[0].event.text, "{\\k11}so{\\k9}ra");
        assert_eq!(lines[0].event.start_ms, 100);
        assert_eq!(lines[0].event.end_ms, 300);
        assert_eq!(lines[1].comment.text, "Umi");
        // u | mi
        assert_eq!(lines[1].event.text, "{\\k11}u{\\k29}mi");
        assert_eq!(lines[1].event.start_ms, 1000);
        assert_eq!(lines[1].event.end_ms, 1400);
    }

    #[test]
    fn segment_text_reassembles_normalized_line() {
        let raw = "Kimi no na wa, shinjiteru!";
        let doc = lyrics(raw);
        let mut frame = 0;
        let spans: Vec<Vec<TokenSpan>> = doc
            .words()
            .map(|word| {
                let spans = word
                    .raw()
                    .chars()
                    .map(|_| {
                        let span = TokenSpan::new(frame, frame + 3);
                        frame += 5;
                        span
                    })
                    .collect();
                frame += 7;
                spans
            })
            .collect();
        let alignment = AlignmentResult {
            waveform_sample_count: 320,
            emission_frame_count: 1,
            sample_rate: 16_000,
            word_spans: spans,
        };
        let lines = build_karaoke_lines(&doc, &alignment, &VocabularyTokenizer::default()).unwrap();
        let text: String = lines[0].segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(text, doc.lines()[0].normalized());
    }

    #[test]
    fn gaps_absorb_rounding_drift() {
        // Ten one-token words, each 104 ms long, starting every 107 ms.
        let spans: Vec<Vec<(usize, usize)>> =
            (0..10).map(|i| vec![(107 * i, 107 * i + 104)]).collect();
        let span_refs: Vec<&[(usize, usize)]> = spans.iter().map(Vec::as_slice).collect();
        let lines = build("a i u e o a i u e o", &alignment(1, 1000, &span_refs)).unwrap();
        let line = &lines[0];

        let displayed_cs: u32 = line.segments.iter().map(|s| s.duration_cs).sum();
        let wall_clock_cs = (line.event.end_ms - line.event.start_ms) as f64 / 10.0;
        assert!(
            (displayed_cs as f64 - wall_clock_cs).abs() <= 1.0,
            "displayed {displayed_cs} cs vs wall clock {wall_clock_cs} cs"
        );
    }

    #[test]
    fn builder_opens_and_closes_events() {
        let mut builder = KaraokeEventBuilder::new();
        builder.push_word(&[timed("ka", 1.0, 1.2), timed("ze", 1.2, 1.5)]);
        builder.push_word(&[timed("ga", 1.75, 2.0)]);
        builder.finish_line("Kaze ga");
        builder.finish_line("nothing open");
        builder.push_word(&[timed("fu", 3.0, 3.25)]);
        builder.finish_line("Fu");
        let lines = builder.finish().unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].event.text, "{\\k20}ka{\\k55}ze{\\k0} {\\k25}ga");
        assert_eq!(lines[0].event.start_ms, 1000);
        assert_eq!(lines[0].event.end_ms, 2000);
        assert_eq!(lines[1].event.text, "{\\k25}fu");
        assert_eq!(lines[1].comment.text, "Fu");
    }

    #[test]
    fn finish_rejects_unfinished_line() {
        let mut builder = KaraokeEventBuilder::new();
        builder.push_word(&[timed("fu", 3.0, 3.25)]);
        let err = builder.finish().unwrap_err();
        assert!(matches!(err, KaraokeError::InvalidInput { .. }));
    }

    #[test]
    fn word_starting_before_previous_syllable_clamps_to_zero() {
        let mut builder = KaraokeEventBuilder::new();
        builder.push_word(&[timed("ka", 0.0, 0.2), timed("ze", 0.2, 0.5)]);
        builder.push_word(&[timed("i", 0.1, 0.6)]);
        builder.finish_line("kaze i");
        let lines = builder.finish().unwrap();
        assert_eq!(lines[0].event.text, "{\\k20}ka{\\k0}ze{\\k0} {\\k50}i");
    }

    #[test]
    fn render_trims_outer_whitespace() {
        let segments = vec![
            KaraokeSegment {
                duration_cs: 12,
                content: "la".to_string(),
            },
            KaraokeSegment {
                duration_cs: 3,
                content: " ".to_string(),
            },
        ];
        assert_eq!(render_karaoke_text(&segments), "{\\k12}la{\\k3}");
    }
}

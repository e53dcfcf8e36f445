pub mod alignment;
pub mod config;
pub mod error;
pub mod lyrics;
pub mod pipeline;
pub mod subtitles;
pub mod types;

pub use alignment::tokenization::Vocabulary;
pub use config::{KaraokeConfig, Language};
pub use error::KaraokeError;
pub use lyrics::{Line, Lyrics, Word};
pub use pipeline::builder::KaraokeTimerBuilder;
pub use pipeline::runtime::KaraokeTimer;
pub use pipeline::traits::{Syllabifier, Tokenizer};
pub use subtitles::{write_ass, AssDocument};
pub use types::{
    AlignmentResult, EventKind, KaraokeLine, KaraokeScript, KaraokeSegment, SubtitleEvent,
    TimedSyllable, TokenSpan,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KaraokeError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The syllables of `word` retokenize to a different number of tokens
    /// than the aligner produced spans for.
    #[error(
        "span count mismatch for word {word:?}: syllables need {required} tokens, \
         alignment supplied {available} spans"
    )]
    SpanCountMismatch {
        word: String,
        required: usize,
        available: usize,
    },
    #[error("span list count mismatch: lyrics have {words} words, alignment has {span_lists} span lists")]
    SpanListCountMismatch { words: usize, span_lists: usize },
    #[error("syllable {syllable:?} of word {word:?} produced no alignment tokens")]
    EmptySyllable { word: String, syllable: String },
    #[error("hyphenation dictionary for {language} failed to load: {message}")]
    Hyphenation {
        language: &'static str,
        message: String,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl KaraokeError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

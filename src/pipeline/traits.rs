/// Alignment-model tokenizer. Only the number of tokens matters to the
/// timing engine; the ids are forwarded to the aligner as its transcript.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<usize>;

    fn count_tokens(&self, text: &str) -> usize {
        self.tokenize(text).len()
    }
}

/// Splits one normalized word into syllables whose concatenation is the word.
pub trait Syllabifier: Send + Sync {
    fn syllabify(&self, word: &str) -> Vec<String>;
}

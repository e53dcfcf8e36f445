//! Dictionary-free syllable splitting for romanized lyrics.
//!
//! A cursor walks the word left to right. At each position the rule table is
//! scanned in order and the first rule whose pattern matches the upcoming
//! characters consumes them as one syllable. Patterns that would read past the
//! end of the word simply do not match, so a shorter rule further down the
//! table takes over.

const VOWELS: &str = "aeiouō";

#[derive(Debug, Clone, Copy)]
enum Lead {
    OneOf(&'static str),
    Vowel,
    Consonant,
    Any,
}

impl Lead {
    fn matches(self, c: char) -> bool {
        match self {
            Self::OneOf(set) => set.contains(c),
            Self::Vowel => is_vowel(c),
            Self::Consonant => c.is_alphabetic() && !is_vowel(c),
            Self::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Follow {
    OneOf(&'static str),
    Char(char),
    Any,
}

impl Follow {
    fn matches(self, c: char) -> bool {
        match self {
            Self::OneOf(set) => set.contains(c),
            Self::Char(expected) => c == expected,
            Self::Any => true,
        }
    }
}

#[derive(Debug)]
struct Rule {
    lead: Lead,
    follow: &'static [Follow],
}

impl Rule {
    const fn new(lead: Lead, follow: &'static [Follow]) -> Self {
        Self { lead, follow }
    }

    fn len(&self) -> usize {
        1 + self.follow.len()
    }

    fn matches(&self, chars: &[char], at: usize) -> bool {
        self.lead.matches(chars[at])
            && self.follow.iter().enumerate().all(|(offset, follow)| {
                chars
                    .get(at + 1 + offset)
                    .is_some_and(|&c| follow.matches(c))
            })
    }
}

/// Priority-ordered; the final catch-all guarantees progress.
const RULES: &[Rule] = &[
    Rule::new(Lead::OneOf("rymnhk"), &[Follow::OneOf(VOWELS)]),
    Rule::new(Lead::OneOf("rymnhk"), &[]),
    Rule::new(Lead::OneOf("w"), &[Follow::OneOf("aoō")]),
    Rule::new(Lead::OneOf("w"), &[]),
    Rule::new(Lead::OneOf("t"), &[Follow::OneOf("aeoō")]),
    Rule::new(Lead::OneOf("t"), &[Follow::Char('s'), Follow::Any]),
    Rule::new(Lead::OneOf("t"), &[]),
    Rule::new(Lead::OneOf("c"), &[Follow::Char('h'), Follow::Any]),
    Rule::new(Lead::OneOf("c"), &[Follow::Any]),
    Rule::new(Lead::OneOf("c"), &[]),
    Rule::new(Lead::OneOf("s"), &[Follow::OneOf("aueoō")]),
    Rule::new(Lead::OneOf("s"), &[Follow::Char('h'), Follow::Any]),
    Rule::new(Lead::OneOf("s"), &[]),
    Rule::new(Lead::OneOf("f"), &[Follow::Char('u')]),
    Rule::new(Lead::OneOf("f"), &[]),
    Rule::new(Lead::Vowel, &[]),
    Rule::new(Lead::Consonant, &[Follow::OneOf(VOWELS)]),
    Rule::new(Lead::Any, &[]),
];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Split a normalized word into syllables.
///
/// Concatenating the result always reproduces `word`; an empty word yields no
/// syllables.
pub fn split_syllables(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut syllables = Vec::new();
    let mut cursor = 0;
    while cursor < chars.len() {
        let consumed = RULES
            .iter()
            .find(|rule| rule.matches(&chars, cursor))
            .map_or(1, Rule::len);
        let end = (cursor + consumed).min(chars.len());
        syllables.push(chars[cursor..end].iter().collect());
        cursor = end;
    }
    syllables
}

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z'\n ]").expect("disallowed-char pattern is valid"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[\n ]+").expect("blank-line pattern is valid"));
static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("space-run pattern is valid"));

/// Reduce arbitrary text to the alphabet the aligner understands.
///
/// The result only contains `a-z`, `'`, spaces and newlines. Characters outside
/// that set become spaces, runs of blank lines collapse to one newline, runs of
/// spaces collapse to one space and the ends are trimmed. The function is
/// total and idempotent.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    let filtered = DISALLOWED.replace_all(&lowered, " ");
    let collapsed_lines = BLANK_LINES.replace_all(&filtered, "\n");
    let collapsed_spaces = SPACE_RUNS.replace_all(&collapsed_lines, " ");
    collapsed_spaces.trim().to_string()
}

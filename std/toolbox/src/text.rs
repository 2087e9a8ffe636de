//! Pure text tools: `echo` and `summarize`.

/// Upper bound on `echo` repetitions.
pub const MAX_REPEAT: i64 = 10;
/// Upper bound on `echo` output length, in characters.
pub const MAX_ECHO_CHARS: usize = 2000;
/// Default number of sentences kept by `summarize`.
pub const DEFAULT_MAX_SENTENCES: i64 = 3;

/// Repeat `text` `repeat` times, separated by single spaces.
///
/// `repeat` is clamped to `1..=MAX_REPEAT` and the output is cut to
/// [`MAX_ECHO_CHARS`] characters.
pub fn echo(text: &str, repeat: i64) -> String {
    let repeat = repeat.clamp(1, MAX_REPEAT) as usize;
    let out = vec![text; repeat].join(" ");
    truncate_chars(out, MAX_ECHO_CHARS)
}

/// Keep the first `max_sentences` period-delimited sentences of `text`.
///
/// Sentences are trimmed and empty ones dropped before counting. The kept
/// sentences are rejoined with `". "` and closed with a final period.
pub fn summarize(text: &str, max_sentences: i64) -> String {
    let max_sentences = max_sentences.max(1) as usize;
    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(max_sentences)
        .collect();
    if sentences.is_empty() {
        return String::new();
    }
    let mut out = sentences.join(". ");
    out.push('.');
    out
}

/// Cut `s` to at most `max` characters.
pub(crate) fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}

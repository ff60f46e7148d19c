//! Text segmentation for incremental synthesis
//!
//! Splits input text into prosody-sized segments that can be synthesized
//! and streamed one at a time. Segments break at sentence terminators,
//! at commas once a soft word threshold is reached, and unconditionally at
//! a hard word threshold so comma-free text can never buffer without bound.
//!
//! Segmentation is pure and total: it never fails, and in the worst case
//! returns a single segment holding the whole trimmed input.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that always terminate a segment.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Runs of sentence/clause punctuation; kept as their own tokens so no
/// punctuation is lost across segment boundaries.
static PUNCT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.,!?;]+").expect("punctuation regex is valid"));

/// Word-count thresholds controlling when a segment is flushed.
#[derive(Debug, Clone, Copy)]
pub struct SegmenterConfig {
    /// Flush at a comma once this many words have accumulated.
    pub soft_limit: usize,
    /// Flush unconditionally at this many words.
    pub hard_limit: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            soft_limit: 5,
            hard_limit: 10,
        }
    }
}

/// A contiguous, trimmed run of text scheduled for synthesis.
///
/// `index` is the segment's position in emission order and is preserved
/// end-to-end through synthesis and delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub index: usize,
    pub text: String,
}

/// Whether trimmed text contains no alphanumeric character at all.
///
/// Punctuation-only segments are never spoken standalone; they get appended
/// to the previous segment instead.
fn is_punctuation_only(text: &str) -> bool {
    !text.chars().any(char::is_alphanumeric)
}

/// Split `text` into interleaved text and punctuation-run tokens.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in PUNCT_RUN_RE.find_iter(text) {
        if m.start() > last {
            tokens.push(&text[last..m.start()]);
        }
        tokens.push(m.as_str());
        last = m.end();
    }
    if last < text.len() {
        tokens.push(&text[last..]);
    }
    tokens
}

/// Segment `text` into an ordered sequence of [`TextSegment`]s.
///
/// Empty or whitespace-only input yields an empty sequence.
pub fn segment(text: &str, config: SegmenterConfig) -> Vec<TextSegment> {
    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut word_count = 0usize;

    for token in tokenize(text) {
        if token.trim().is_empty() {
            continue;
        }
        current.push_str(token);
        word_count += token.split_whitespace().count();

        let ends_sentence = token.contains(SENTENCE_TERMINATORS);
        let has_comma = token.contains(',');

        let should_flush = ends_sentence
            || (word_count >= config.soft_limit && has_comma)
            || word_count >= config.hard_limit;

        if should_flush {
            flush(&mut segments, &current);
            current.clear();
            word_count = 0;
        }
    }

    if !current.trim().is_empty() {
        flush(&mut segments, &current);
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextSegment { index, text })
        .collect()
}

/// Emit a finished buffer, folding punctuation-only content into the
/// previous segment when one exists.
fn flush(segments: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return;
    }
    if is_punctuation_only(trimmed) {
        if let Some(prev) = segments.last_mut() {
            prev.push_str(trimmed);
            return;
        }
    }
    segments.push(trimmed.to_string());
}

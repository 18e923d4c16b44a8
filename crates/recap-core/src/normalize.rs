use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Segment;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Capture-pipeline residue: runs of the ">>" speaker-change marker and runs
// of bolded "**Label:**" prefixes.
static MARKER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:>>\s*){2,}").unwrap());
static BOLD_LABEL_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\*\*[^*\n]{1,60}(?::\*\*|\*\*:)\s*)(?:\*\*[^*\n]{1,60}(?::\*\*|\*\*:)\s*)+").unwrap()
});

static KEY_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

const MAX_PHRASE_WORDS: usize = 10;
const MIN_PHRASE_WORDS: usize = 2;
const MIN_UNIT_CHARS: usize = 8;
const MIN_DEDUP_KEY_CHARS: usize = 10;

/// Strip caption markup and asides: HTML-like tags, `[sound cues]`,
/// `(parentheticals)`, then collapse whitespace.
pub fn clean_caption_text(text: &str) -> String {
    let text = HTML_TAG.replace_all(text, " ");
    let text = BRACKETED.replace_all(&text, " ");
    let text = PARENTHETICAL.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Remove repeated transcription artifacts from the segment stream while
/// preserving chronological order.
///
/// Works on the concatenation of all segment text, then remaps surviving
/// sentence units back onto the original segment timings positionally. When
/// more units survive than segments existed, the excess units are dropped;
/// the timing drift this introduces is an accepted approximation.
pub fn deduplicate_segments(segments: &[Segment]) -> Vec<Segment> {
    if segments.is_empty() {
        return Vec::new();
    }

    let joined = segments.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join(" ");
    let text = MARKER_RUN.replace_all(&joined, ">> ");
    let text = BOLD_LABEL_RUN.replace_all(&text, "${1}");

    let mut words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    // Longest phrases first so sub-phrases are not collapsed prematurely.
    for len in (MIN_PHRASE_WORDS..=MAX_PHRASE_WORDS).rev() {
        words = collapse_phrase_runs(words, len);
    }
    let words = collapse_repeated_words(words);
    let text = words.join(" ");

    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for unit in split_sentence_units(&text) {
        let key = normalized_key(&unit);
        if key.chars().count() > MIN_DEDUP_KEY_CHARS && !seen.insert(key) {
            continue;
        }
        kept.push(unit);
    }

    kept.into_iter()
        .zip(segments.iter())
        .map(|(text, original)| Segment {
            text,
            start: original.start,
            duration: original.duration,
            speaker: original.speaker.clone(),
        })
        .collect()
}

/// Collapse 2+ consecutive repetitions of the same `len`-word phrase into a
/// single occurrence, case-insensitively. The `regex` crate has no
/// backreferences, so this is a token-window scan.
fn collapse_phrase_runs(words: Vec<String>, len: usize) -> Vec<String> {
    if words.len() < len * 2 {
        return words;
    }
    let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let mut out = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        if i + 2 * len <= words.len() && lower[i..i + len] == lower[i + len..i + 2 * len] {
            out.extend_from_slice(&words[i..i + len]);
            let phrase = &lower[i..i + len];
            let mut next = i + len;
            while next + len <= words.len() && lower[next..next + len] == *phrase {
                next += len;
            }
            i = next;
        } else {
            out.push(words[i].clone());
            i += 1;
        }
    }
    out
}

fn collapse_repeated_words(words: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        if out.last().is_some_and(|prev| prev.to_lowercase() == word.to_lowercase()) {
            continue;
        }
        out.push(word);
    }
    out
}

/// Split on sentence punctuation runs, keeping the punctuation attached to
/// its unit. Retaining the terminator is what makes a second pass over the
/// output a no-op.
fn split_sentence_units(text: &str) -> Vec<String> {
    let mut units = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            while matches!(chars.peek(), Some(&('.' | '!' | '?'))) {
                current.push(chars.next().unwrap_or_default());
            }
            flush_unit(&mut units, &mut current);
        }
    }
    flush_unit(&mut units, &mut current);
    units
}

fn flush_unit(units: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if trimmed.chars().count() >= MIN_UNIT_CHARS {
        units.push(trimmed.to_string());
    }
    current.clear();
}

fn normalized_key(unit: &str) -> String {
    let stripped = KEY_PUNCTUATION.replace_all(unit, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_lowercase()
}

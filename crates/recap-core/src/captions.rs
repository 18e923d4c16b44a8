use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::clean_caption_text;
use crate::types::Segment;

static TIMESTAMP_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{1,2}:\d{2}:\d{2}(?:[,.]\d{1,3})?)\s*-->\s*(\d{1,2}:\d{2}:\d{2}(?:[,.]\d{1,3})?)").unwrap()
});

static SEQUENCE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\s*$").unwrap());

// Blocks whose raw text is shorter than this are transcription noise.
const MIN_BLOCK_CHARS: usize = 5;

/// Parse a subtitle timestamp (`HH:MM:SS,mmm`, `HH:MM:SS.mmm`, or bare
/// `HH:MM:SS`) into seconds.
pub fn parse_srt_timestamp(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let (hms, millis) = match raw.split_once([',', '.']) {
        Some((hms, ms)) => (hms, ms.trim().parse::<u32>().ok()?),
        None => (raw, 0),
    };
    let mut parts = hms.split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let mins: u32 = parts.next()?.trim().parse().ok()?;
    let secs: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || mins > 59 || secs > 59 {
        return None;
    }
    Some(f64::from(hours) * 3600.0 + f64::from(mins) * 60.0 + f64::from(secs) + f64::from(millis) / 1000.0)
}

/// Parse a raw caption document (SRT block format) into timed segments.
///
/// Malformed blocks are dropped individually; an empty or fully malformed
/// document yields an empty vector rather than an error.
pub fn parse_transcript(document: &str) -> Vec<Segment> {
    let normalized = document.replace("\r\n", "\n");
    let mut segments = Vec::new();

    for block in blocks(&normalized) {
        if let Some(segment) = parse_block(&block) {
            segments.push(segment);
        }
    }
    segments
}

fn blocks(document: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for line in document.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn parse_block(lines: &[&str]) -> Option<Segment> {
    // Sequence number, timestamp pair, and at least one text line.
    if lines.len() < 3 {
        return None;
    }

    let captures = TIMESTAMP_LINE.captures(lines[1])?;
    let start = parse_srt_timestamp(captures.get(1)?.as_str())?;
    let end = parse_srt_timestamp(captures.get(2)?.as_str())?;

    // Caption pipelines sometimes restate the sequence number or timestamp
    // inside the text body.
    let raw_text = lines[2..]
        .iter()
        .filter(|line| !SEQUENCE_LINE.is_match(line) && !TIMESTAMP_LINE.is_match(line))
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ");

    if raw_text.chars().count() < MIN_BLOCK_CHARS {
        return None;
    }

    let text = clean_caption_text(&raw_text);
    if text.is_empty() {
        tracing::trace!("dropping caption block that cleaned to nothing");
        return None;
    }

    Some(Segment::new(text, start, (end - start).max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_srt_timestamp;

    const DOC: &str = "\
1
00:00:01,000 --> 00:00:04,500
Hello everyone and welcome back.

2
00:00:04,500 --> 00:00:08,000
Today we are talking about <b>Rust</b> [applause]
and its ecosystem.
";

    #[test]
    fn parses_comma_and_dot_milliseconds() {
        assert_eq!(parse_srt_timestamp("00:01:02,500"), Some(62.5));
        assert_eq!(parse_srt_timestamp("00:01:02.500"), Some(62.5));
    }

    #[test]
    fn parses_bare_hms_fallback() {
        assert_eq!(parse_srt_timestamp("01:02:03"), Some(3723.0));
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert_eq!(parse_srt_timestamp("not a time"), None);
        assert_eq!(parse_srt_timestamp("00:99:00"), None);
        assert_eq!(parse_srt_timestamp("00:00:00:00"), None);
    }

    #[test]
    fn srt_timestamps_round_trip() {
        for &(h, m, s, ms) in &[(0u32, 0u32, 0u32, 0u32), (0, 1, 2, 500), (1, 59, 59, 999), (12, 30, 0, 42)] {
            let seconds =
                f64::from(h) * 3600.0 + f64::from(m) * 60.0 + f64::from(s) + f64::from(ms) / 1000.0;
            let formatted = format_srt_timestamp(seconds);
            let parsed = parse_srt_timestamp(&formatted).unwrap();
            assert!((parsed - seconds).abs() < 1e-9, "{formatted} round-tripped to {parsed}");
        }
    }

    #[test]
    fn empty_document_is_empty_success() {
        assert!(parse_transcript("").is_empty());
        assert!(parse_transcript("   \n\n  \n").is_empty());
    }

    #[test]
    fn parses_well_formed_blocks() {
        let segments = parse_transcript(DOC);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Hello everyone and welcome back.");
        assert_eq!(segments[0].start, 1.0);
        assert_eq!(segments[0].duration, 3.5);
        // Tags and bracketed asides stripped, multi-line text joined.
        assert_eq!(segments[1].text, "Today we are talking about Rust and its ecosystem.");
    }

    #[test]
    fn skips_block_with_unparseable_timestamp() {
        let doc = "1\nbroken --> line\nSome caption text here.\n\n2\n00:00:05,000 --> 00:00:06,000\nStill works fine.\n";
        let segments = parse_transcript(doc);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Still works fine.");
    }

    #[test]
    fn skips_short_blocks() {
        let doc = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:02,000 --> 00:00:03,000\nHm.\n";
        assert!(parse_transcript(doc).is_empty());
    }

    #[test]
    fn drops_blocks_that_clean_to_nothing() {
        let doc = "1\n00:00:01,000 --> 00:00:02,000\n[Music playing]\n";
        assert!(parse_transcript(doc).is_empty());
    }

    #[test]
    fn filters_restated_sequence_and_timestamp_lines() {
        let doc = "1\n00:00:01,000 --> 00:00:02,000\n2\n00:00:01,000 --> 00:00:02,000\nActual caption text.\n";
        let segments = parse_transcript(doc);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Actual caption text.");
    }

    #[test]
    fn clamps_out_of_order_timestamps_to_zero_duration() {
        let doc = "1\n00:00:10,000 --> 00:00:05,000\nTime went backwards here.\n";
        let segments = parse_transcript(doc);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].duration, 0.0);
    }
}

use crate::normalize::{clean_caption_text, deduplicate_segments};
use crate::speaker::SpeakerAttributor;
use crate::types::{ProcessedTranscript, Segment};

/// Toggles for the processing stages. Everything defaults to on.
#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions {
    pub speaker_detection: bool,
    pub deduplication: bool,
    pub normalize_text: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            speaker_detection: true,
            deduplication: true,
            normalize_text: true,
        }
    }
}

/// Run the processing pipeline: text cleanup, deduplication, speaker
/// attribution, then aggregate into a [`ProcessedTranscript`].
pub fn process_transcript(segments: Vec<Segment>, options: &ProcessOptions) -> ProcessedTranscript {
    let mut segments = segments;

    if options.normalize_text {
        segments = segments
            .into_iter()
            .map(|mut segment| {
                segment.text = clean_caption_text(&segment.text);
                segment
            })
            .collect();
    }
    if options.deduplication {
        segments = deduplicate_segments(&segments);
    }
    if options.speaker_detection {
        segments = SpeakerAttributor::attribute(segments);
    }

    let word_count = segments.iter().map(|s| segment_word_count(&s.text)).sum();
    let total_duration = segments.iter().map(|s| s.duration).sum();
    let speakers = segments.iter().filter_map(|s| s.speaker.clone()).collect();

    ProcessedTranscript {
        segments,
        speakers,
        total_duration,
        word_count,
    }
}

// An empty segment text still contributes one token to the word count,
// matching the split semantics of the upstream capture pipeline.
fn segment_word_count(text: &str) -> usize {
    if text.is_empty() {
        1
    } else {
        text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, start: f64, duration: f64) -> Segment {
        Segment::new(text, start, duration)
    }

    #[test]
    fn aggregates_counts_and_durations() {
        let segments = vec![
            seg("Welcome to the show, I'm Claire.", 0.0, 3.0),
            seg("We are going to talk about parsers today.", 3.0, 4.0),
        ];
        let transcript = process_transcript(segments, &ProcessOptions::default());
        assert_eq!(transcript.total_duration, 7.0);
        assert_eq!(transcript.word_count, 14);
        assert!(transcript.speakers.contains("Host"));
    }

    #[test]
    fn empty_segment_text_counts_as_one_token() {
        assert_eq!(segment_word_count(""), 1);
        assert_eq!(segment_word_count("hello world"), 2);
    }

    #[test]
    fn deduplication_can_be_disabled() {
        let segments = vec![
            seg("Hello world.", 0.0, 2.0),
            seg("Hello world.", 2.0, 2.0),
        ];
        let options = ProcessOptions {
            deduplication: false,
            speaker_detection: false,
            normalize_text: true,
        };
        let transcript = process_transcript(segments, &options);
        assert_eq!(transcript.segments.len(), 2);
    }

    #[test]
    fn cleanup_strips_markup_when_enabled() {
        let segments = vec![seg("Some <i>styled</i> caption [noise] line here.", 0.0, 2.0)];
        let options = ProcessOptions {
            deduplication: false,
            speaker_detection: false,
            normalize_text: true,
        };
        let transcript = process_transcript(segments, &options);
        assert_eq!(transcript.segments[0].text, "Some styled caption line here.");
    }

    #[test]
    fn speakers_set_is_empty_without_detection() {
        let segments = vec![seg("Welcome to the show, I'm Claire.", 0.0, 3.0)];
        let options = ProcessOptions {
            speaker_detection: false,
            ..ProcessOptions::default()
        };
        let transcript = process_transcript(segments, &options);
        assert!(transcript.speakers.is_empty());
    }
}

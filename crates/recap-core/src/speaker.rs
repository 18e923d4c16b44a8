use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Segment;

/// Role labels the heuristic classifier can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Host,
    Guest,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Host => "Host",
            Speaker::Guest => "Guest",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single matcher in a pattern table. Tables are plain data so the
/// classification function stays pure and the sets can grow without
/// touching control flow.
pub enum SpeakerPattern {
    Phrase(&'static str),
    Pattern(Regex),
}

impl SpeakerPattern {
    fn matches(&self, lowercased: &str) -> bool {
        match self {
            SpeakerPattern::Phrase(phrase) => lowercased.contains(phrase),
            SpeakerPattern::Pattern(regex) => regex.is_match(lowercased),
        }
    }
}

static HOST_PATTERNS: Lazy<Vec<SpeakerPattern>> = Lazy::new(|| {
    vec![
        SpeakerPattern::Phrase("welcome to the show"),
        SpeakerPattern::Phrase("welcome back to"),
        SpeakerPattern::Phrase("thanks for tuning in"),
        SpeakerPattern::Phrase("thanks for joining us"),
        SpeakerPattern::Phrase("joining us today"),
        SpeakerPattern::Phrase("my guest today"),
        SpeakerPattern::Phrase("our guest today"),
        SpeakerPattern::Phrase("let's welcome"),
        SpeakerPattern::Pattern(
            Regex::new(r"\bi'?m \w+,? (?:and )?(?:this is|welcome to|you'?re listening to)")
                .unwrap(),
        ),
        SpeakerPattern::Pattern(Regex::new(r"\bmy name is \w+ and (?:this is|welcome|today)").unwrap()),
    ]
});

static GUEST_PATTERNS: Lazy<Vec<SpeakerPattern>> = Lazy::new(|| {
    vec![
        SpeakerPattern::Phrase("thanks for having me"),
        SpeakerPattern::Phrase("thank you for having me"),
        SpeakerPattern::Phrase("thanks for inviting me"),
        SpeakerPattern::Phrase("thanks for the invitation"),
        SpeakerPattern::Phrase("glad to be here"),
        SpeakerPattern::Phrase("happy to be here"),
        SpeakerPattern::Phrase("great to be here"),
        SpeakerPattern::Phrase("pleasure to be here"),
        SpeakerPattern::Phrase("in my experience"),
        SpeakerPattern::Phrase("when i first started"),
    ]
});

// Hosts open episodes with short, less distinctive lines, so the first
// segments get a more permissive cue set.
static INTRO_CUES: Lazy<Vec<SpeakerPattern>> = Lazy::new(|| {
    vec![
        SpeakerPattern::Phrase("welcome"),
        SpeakerPattern::Phrase("hello everyone"),
        SpeakerPattern::Phrase("hello everybody"),
        SpeakerPattern::Phrase("hey everyone"),
        SpeakerPattern::Phrase("hi everyone"),
        SpeakerPattern::Phrase("i'm your host"),
        SpeakerPattern::Phrase("your host"),
        SpeakerPattern::Phrase("my name is"),
        SpeakerPattern::Phrase("on today's show"),
        SpeakerPattern::Phrase("in today's episode"),
    ]
});

static WELCOME_TO_SHOW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"welcome to (?:the |this |our )?[\w' -]+ (?:show|podcast|episode)").unwrap()
});
static GUEST_INTRODUCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btoday (?:i|we) have\b").unwrap());
static TOPIC_TRANSITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\blet'?s (?:dive|get|start)\b").unwrap());

const EARLY_WINDOW: usize = 20;

/// Classify one segment's cleaned text. `index` is the segment's position
/// within the whole transcript; early segments get the permissive intro
/// cues. Host patterns win over Guest patterns, first match wins.
pub fn classify_speaker(text: &str, index: usize) -> Option<Speaker> {
    let lowercased = text.to_lowercase();

    if HOST_PATTERNS.iter().any(|p| p.matches(&lowercased)) {
        return Some(Speaker::Host);
    }
    if GUEST_PATTERNS.iter().any(|p| p.matches(&lowercased)) {
        return Some(Speaker::Guest);
    }
    if WELCOME_TO_SHOW.is_match(&lowercased)
        || GUEST_INTRODUCTION.is_match(&lowercased)
        || TOPIC_TRANSITION.is_match(&lowercased)
    {
        return Some(Speaker::Host);
    }
    if index < EARLY_WINDOW && INTRO_CUES.iter().any(|p| p.matches(&lowercased)) {
        return Some(Speaker::Host);
    }
    None
}

/// Streaming attributor. Segments buffer until the first speaker is found;
/// a Host first-detection retroactively folds the buffered opening into a
/// single attributed block.
pub struct SpeakerAttributor {
    pending: Vec<Segment>,
    detected: bool,
    index: usize,
}

impl Default for SpeakerAttributor {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeakerAttributor {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            detected: false,
            index: 0,
        }
    }

    /// Run the full state machine over a segment sequence.
    pub fn attribute(segments: Vec<Segment>) -> Vec<Segment> {
        let mut attributor = Self::new();
        let mut out = Vec::with_capacity(segments.len());
        for segment in segments {
            out.extend(attributor.push(segment));
        }
        out.extend(attributor.finish());
        out
    }

    /// Feed one segment; returns the segments finalized by this step.
    pub fn push(&mut self, mut segment: Segment) -> Vec<Segment> {
        let speaker = classify_speaker(&segment.text, self.index);
        self.index += 1;

        if self.detected {
            segment.speaker = speaker.map(|s| s.as_str().to_string());
            return vec![segment];
        }

        self.pending.push(segment);
        match speaker {
            Some(Speaker::Host) => {
                self.detected = true;
                vec![join_block(std::mem::take(&mut self.pending), Speaker::Host)]
            }
            Some(Speaker::Guest) => {
                // A guest speaking first means the buffered opening was not
                // the host's introduction; emit it unattributed.
                self.detected = true;
                let mut pending = std::mem::take(&mut self.pending);
                if let Some(last) = pending.last_mut() {
                    last.speaker = Some(Speaker::Guest.as_str().to_string());
                }
                pending
            }
            None => Vec::new(),
        }
    }

    /// Flush the buffer at end of transcript. An opening that reads like a
    /// host introduction is still attributed even when no pattern fired on
    /// any single segment.
    pub fn finish(&mut self) -> Vec<Segment> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        let pending = std::mem::take(&mut self.pending);
        let opening = pending
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if INTRO_CUES.iter().any(|p| p.matches(&opening)) {
            vec![join_block(pending, Speaker::Host)]
        } else {
            pending
        }
    }
}

fn join_block(segments: Vec<Segment>, speaker: Speaker) -> Segment {
    let start = segments.first().map(|s| s.start).unwrap_or(0.0);
    let duration = segments.iter().map(|s| s.duration).sum();
    let text = segments
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join(" ");
    Segment {
        text,
        start,
        duration,
        speaker: Some(speaker.as_str().to_string()),
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::SummaryStyle;

/// Template sections routed to the behavioral (system) part of a split
/// prompt. Everything else is task content.
const SYSTEM_SECTIONS: [&str; 6] = [
    "role",
    "critical rules",
    "context",
    "constraints",
    "quality checklist",
    "final reminder",
];

static INLINE_TIMESTAMP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d{2}:\d{2}:\d{2})\]").unwrap());

/// Whether a provider takes one combined prompt or separate system and user
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Combined,
    Split,
}

/// A provider-ready prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    Combined(String),
    Split { system: String, user: String },
}

impl Prompt {
    /// Collapse to a single string for providers that take one prompt.
    pub fn combined_text(&self) -> String {
        match self {
            Prompt::Combined(text) => text.clone(),
            Prompt::Split { system, user } => format!("{system}\n\n{user}"),
        }
    }

    /// System and user halves; a combined prompt has an empty system half.
    pub fn split_parts(&self) -> (String, String) {
        match self {
            Prompt::Combined(text) => (String::new(), text.clone()),
            Prompt::Split { system, user } => (system.clone(), user.clone()),
        }
    }
}

/// Build a provider-ready prompt from a template and transcript text.
///
/// For the bullets style the canonical video URL is appended to the
/// template so the provider can emit timestamp-linked citations. If the
/// transcript carries inline `[HH:MM:SS]` markers, a coverage instruction
/// spanning the first and last marker is appended to counteract the
/// summarize-only-the-opening failure mode.
pub fn build_prompt(
    template: &str,
    transcript_text: &str,
    style: SummaryStyle,
    video_url: Option<&str>,
    mode: PromptMode,
) -> Prompt {
    let mut template = template.trim().to_string();
    if style == SummaryStyle::Bullets {
        if let Some(url) = video_url {
            template.push_str("\n\nVideo URL: ");
            template.push_str(url);
        }
    }

    let trailing = trailing_instruction(style);
    let coverage = coverage_instruction(transcript_text);

    match mode {
        PromptMode::Combined => {
            let mut prompt = format!("{template}\n\nTranscript:\n{transcript_text}\n\n{trailing}");
            if let Some(coverage) = coverage {
                prompt.push_str("\n\n");
                prompt.push_str(&coverage);
            }
            Prompt::Combined(prompt)
        }
        PromptMode::Split => {
            let (system, task) = split_sections(&template);
            let mut user = if task.is_empty() {
                format!("Transcript:\n{transcript_text}\n\n{trailing}")
            } else {
                format!("{task}\n\nTranscript:\n{transcript_text}\n\n{trailing}")
            };
            if let Some(coverage) = coverage {
                user.push_str("\n\n");
                user.push_str(&coverage);
            }
            Prompt::Split { system, user }
        }
    }
}

fn trailing_instruction(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Bullets => "Summarize the transcript above as timestamped bullet points.",
        SummaryStyle::Narrative => "Summarize the transcript above as a flowing narrative.",
        SummaryStyle::Technical => "Summarize the transcript above using the numbered sections.",
    }
}

fn coverage_instruction(transcript_text: &str) -> Option<String> {
    let mut markers = INLINE_TIMESTAMP.captures_iter(transcript_text);
    let first = markers.next()?.get(1)?.as_str().to_string();
    let last = markers
        .last()
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| first.clone());
    Some(format!(
        "The transcript spans [{first}] through [{last}]. Cover the entire range in ascending \
         timestamp order; do not stop after the opening minutes."
    ))
}

/// Route `## Name` sections to system or user halves. Headings outside the
/// allow-list, and any preamble before the first heading, are task content.
fn split_sections(template: &str) -> (String, String) {
    let mut system = String::new();
    let mut user = String::new();
    let mut routing_to_system = false;

    for line in template.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            routing_to_system = is_system_section(heading);
        }
        let target = if routing_to_system { &mut system } else { &mut user };
        target.push_str(line);
        target.push('\n');
    }
    (system.trim().to_string(), user.trim().to_string())
}

fn is_system_section(heading: &str) -> bool {
    let heading = heading.trim().to_lowercase();
    SYSTEM_SECTIONS.iter().any(|name| *name == heading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::default_template;

    const TRANSCRIPT: &str = "[00:00:05] Welcome back everyone.\n[00:14:10] That wraps it up.";

    #[test]
    fn combined_prompt_contains_template_transcript_and_instruction() {
        let prompt = build_prompt(
            default_template(SummaryStyle::Narrative),
            TRANSCRIPT,
            SummaryStyle::Narrative,
            None,
            PromptMode::Combined,
        );
        let Prompt::Combined(text) = prompt else {
            panic!("expected a combined prompt");
        };
        assert!(text.contains("## Role"));
        assert!(text.contains("Welcome back everyone."));
        assert!(text.contains("flowing narrative"));
    }

    #[test]
    fn split_prompt_routes_behavioral_sections_to_system() {
        let prompt = build_prompt(
            default_template(SummaryStyle::Narrative),
            TRANSCRIPT,
            SummaryStyle::Narrative,
            None,
            PromptMode::Split,
        );
        let Prompt::Split { system, user } = prompt else {
            panic!("expected a split prompt");
        };
        assert!(system.contains("## Role"));
        assert!(system.contains("## Critical Rules"));
        assert!(!system.contains("Transcript:"));
        assert!(user.contains("## Task"));
        assert!(user.contains("Welcome back everyone."));
    }

    #[test]
    fn sectionless_fallback_template_goes_entirely_to_user() {
        let prompt = build_prompt(
            "Summarize the following video transcript.",
            TRANSCRIPT,
            SummaryStyle::Narrative,
            None,
            PromptMode::Split,
        );
        let Prompt::Split { system, user } = prompt else {
            panic!("expected a split prompt");
        };
        assert!(system.is_empty());
        assert!(user.contains("Summarize the following video transcript."));
        assert!(user.contains("Transcript:"));
    }

    #[test]
    fn coverage_instruction_spans_first_and_last_marker() {
        let prompt = build_prompt(
            default_template(SummaryStyle::Bullets),
            TRANSCRIPT,
            SummaryStyle::Bullets,
            None,
            PromptMode::Combined,
        );
        let text = prompt.combined_text();
        assert!(text.contains("[00:00:05] through [00:14:10]"));
        assert!(text.contains("ascending"));
    }

    #[test]
    fn no_markers_means_no_coverage_instruction() {
        let prompt = build_prompt(
            default_template(SummaryStyle::Bullets),
            "A transcript without any timing markers at all.",
            SummaryStyle::Bullets,
            None,
            PromptMode::Combined,
        );
        assert!(!prompt.combined_text().contains("ascending"));
    }

    #[test]
    fn video_url_is_injected_for_bullets_only() {
        let url = Some("https://example.com/watch?v=abc123");
        let bullets = build_prompt(
            default_template(SummaryStyle::Bullets),
            TRANSCRIPT,
            SummaryStyle::Bullets,
            url,
            PromptMode::Combined,
        );
        assert!(bullets.combined_text().contains("https://example.com/watch?v=abc123"));

        let narrative = build_prompt(
            default_template(SummaryStyle::Narrative),
            TRANSCRIPT,
            SummaryStyle::Narrative,
            url,
            PromptMode::Combined,
        );
        assert!(!narrative.combined_text().contains("example.com"));
    }

    #[test]
    fn single_marker_coverage_uses_it_twice() {
        let prompt = build_prompt(
            "Summarize this.",
            "[00:00:09] Only one marker here.",
            SummaryStyle::Narrative,
            None,
            PromptMode::Combined,
        );
        assert!(prompt.combined_text().contains("[00:00:09] through [00:00:09]"));
    }
}

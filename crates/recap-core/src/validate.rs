use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SummaryError};
use crate::types::SummaryStyle;

/// Anything shorter than this after trimming is an incomplete response.
pub const MIN_SUMMARY_CHARS: usize = 50;

// Refusals arrive as structurally valid 200s; they have to be caught by
// content.
static REFUSAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bno transcript (?:was |has been )?(?:provided|given|included|shared)",
        r"(?i)\bplease (?:share|provide|paste) (?:the |a |your )?transcript",
        r"(?i)\bi (?:do not|don't) see (?:a |any |the )?transcript",
        r"(?i)\bunable to (?:access|view|see) (?:the |any )?transcript",
        r"(?i)\bthere (?:is|was) no transcript",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

// "1. Overview" or "## 2) Details" style headings.
static NUMBERED_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*(?:#+\s*)?\d+[.)]\s+\S").unwrap());

const MIN_TECHNICAL_SECTIONS: usize = 2;

/// Validate extracted summary content before it is accepted. Every failure
/// here is transient: the model may well do better on the next attempt.
pub fn validate_summary(content: &str, style: SummaryStyle) -> Result<()> {
    let trimmed = content.trim();

    if REFUSAL_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed)) {
        return Err(SummaryError::Refusal);
    }

    let length = trimmed.chars().count();
    if length < MIN_SUMMARY_CHARS {
        return Err(SummaryError::TooShort { length });
    }

    if style == SummaryStyle::Technical
        && NUMBERED_SECTION.find_iter(trimmed).count() < MIN_TECHNICAL_SECTIONS
    {
        return Err(SummaryError::MissingSections { style });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_SUMMARY: &str = "The speakers walk through the history of the project, compare \
        the two competing designs, and close with a roadmap for the next release cycle.";

    #[test]
    fn accepts_a_reasonable_summary() {
        assert!(validate_summary(LONG_SUMMARY, SummaryStyle::Narrative).is_ok());
    }

    #[test]
    fn detects_refusals() {
        for refusal in [
            "I'm sorry, but no transcript was provided for me to summarize.",
            "Please share the transcript you would like me to work with.",
            "I don't see a transcript in your message.",
            "There is no transcript attached to this conversation.",
        ] {
            assert!(
                matches!(validate_summary(refusal, SummaryStyle::Bullets), Err(SummaryError::Refusal)),
                "expected refusal for: {refusal}"
            );
        }
    }

    #[test]
    fn rejects_short_content() {
        let result = validate_summary("Too short.", SummaryStyle::Narrative);
        assert!(matches!(result, Err(SummaryError::TooShort { length: 10 })));
    }

    #[test]
    fn technical_style_requires_numbered_sections() {
        let result = validate_summary(LONG_SUMMARY, SummaryStyle::Technical);
        assert!(matches!(result, Err(SummaryError::MissingSections { .. })));

        let sectioned = "1. Overview - a parser rewrite.\n2. Key Concepts - zero-copy input.\n\
            3. Implementation Details - a hand-rolled scanner replaces the regex pass.";
        assert!(validate_summary(sectioned, SummaryStyle::Technical).is_ok());
    }

    #[test]
    fn other_styles_skip_the_section_check() {
        assert!(validate_summary(LONG_SUMMARY, SummaryStyle::Bullets).is_ok());
    }
}

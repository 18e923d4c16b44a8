use crate::types::Segment;

/// Format seconds as a HH:MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

/// Format seconds as a subtitle timestamp, HH:MM:SS,mmm
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let millis = total_ms % 1000;
    let total = total_ms / 1000;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, millis)
}

/// Format segments as timestamped lines, one per segment. Attributed
/// segments carry their speaker label after the timestamp.
pub fn format_transcript_with_timestamps(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|seg| match &seg.speaker {
            Some(speaker) => format!("[{}] {}: {}", format_timestamp(seg.start), speaker, seg.text.trim()),
            None => format!("[{}] {}", format_timestamp(seg.start), seg.text.trim()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_as_midnight() {
        assert_eq!(format_timestamp(0.0), "00:00:00");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_timestamp(3661.9), "01:01:01");
    }

    #[test]
    fn clamps_negative_seconds() {
        assert_eq!(format_timestamp(-5.0), "00:00:00");
    }

    #[test]
    fn formats_srt_milliseconds() {
        assert_eq!(format_srt_timestamp(1.5), "00:00:01,500");
        assert_eq!(format_srt_timestamp(3723.042), "01:02:03,042");
    }

    #[test]
    fn renders_speaker_labels() {
        let segments = vec![
            Segment {
                text: "Welcome to the show".into(),
                start: 0.0,
                duration: 2.0,
                speaker: Some("Host".into()),
            },
            Segment::new("Thanks", 2.0, 1.0),
        ];
        let rendered = format_transcript_with_timestamps(&segments);
        assert_eq!(rendered, "[00:00:00] Host: Welcome to the show\n[00:00:02] Thanks");
    }
}

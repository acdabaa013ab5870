//! Splits a flat transcript into time-proportional caption segments.

use std::fmt::Write as _;

use crate::error::{Error, Result};

pub const DEFAULT_SEGMENTS: usize = 5;

/// One caption: a word span and the slice of the media's duration it covers.
/// Segments are contiguous and non-overlapping, and together cover the full
/// transcript and the full duration.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Chunks the transcript into `ceil(words / chunk_size)` segments where
/// `chunk_size = max(1, words / num_segments)`, assigning each chunk a time
/// span proportional to its word offsets.
pub fn segment(
    transcript: &str,
    total_duration: f64,
    num_segments: usize,
) -> Result<Vec<TranscriptSegment>> {
    let words: Vec<&str> = transcript.split_whitespace().collect();
    if words.is_empty() {
        return Err(Error::EmptyTranscript);
    }
    if total_duration <= 0.0 {
        return Err(Error::InvalidDuration(total_duration));
    }

    let word_count = words.len();
    let chunk_size = (word_count / num_segments.max(1)).max(1);

    let mut segments = Vec::with_capacity(word_count.div_ceil(chunk_size));
    for start_word in (0..word_count).step_by(chunk_size) {
        let end_word = (start_word + chunk_size).min(word_count);
        segments.push(TranscriptSegment {
            start: start_word as f64 / word_count as f64 * total_duration,
            end: ((start_word + chunk_size) as f64 / word_count as f64 * total_duration)
                .min(total_duration),
            text: words[start_word..end_word].join(" "),
        });
    }
    Ok(segments)
}

/// Serializes segments as a WebVTT caption track. Pure formatting.
pub fn to_vtt(segments: &[TranscriptSegment]) -> String {
    let mut track = String::from("WEBVTT\n\n");
    for (cue, segment) in segments.iter().enumerate() {
        let _ = writeln!(track, "{}", cue + 1);
        let _ = writeln!(
            track,
            "{} --> {}",
            timestamp(segment.start),
            timestamp(segment.end)
        );
        let _ = writeln!(track, "{}", segment.text);
        let _ = writeln!(track);
    }
    track
}

fn timestamp(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = total_millis % 3_600_000 / 60_000;
    let secs = total_millis % 60_000 / 1000;
    let millis = total_millis % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_words_over_five_segments() {
        let segments = segment("a b c d e f g h i j", 100.0, 5).unwrap();
        assert_eq!(segments.len(), 5);
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.start, i as f64 * 20.0);
            assert_eq!(seg.end, (i + 1) as f64 * 20.0);
        }
        // Segment 3 covers [40, 60] and holds the 5th and 6th words.
        assert_eq!(segments[2].text, "e f");
        // Contiguous, no gaps or overlaps, full coverage.
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[4].end, 100.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn empty_transcript_is_an_error() {
        assert!(matches!(segment("", 100.0, 5), Err(Error::EmptyTranscript)));
        assert!(matches!(
            segment("  \t \n ", 100.0, 5),
            Err(Error::EmptyTranscript)
        ));
    }

    #[test]
    fn non_positive_duration_is_an_error() {
        assert!(matches!(
            segment("one two", 0.0, 5),
            Err(Error::InvalidDuration(_))
        ));
        assert!(matches!(
            segment("one two", -3.0, 5),
            Err(Error::InvalidDuration(_))
        ));
    }

    #[test]
    fn remainder_words_get_their_own_segment() {
        // 11 words, 5 segments: chunk of 2, so six segments with a short tail.
        let segments = segment("a b c d e f g h i j k", 110.0, 5).unwrap();
        assert_eq!(segments.len(), 6);
        assert_eq!(segments[5].text, "k");
        assert_eq!(segments[5].end, 110.0);
        // The tail's nominal end would overshoot; it is clamped to the duration.
        assert!(segments[5].start < segments[5].end);
    }

    #[test]
    fn fewer_words_than_segments() {
        let segments = segment("alpha beta", 10.0, 5).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "alpha");
        assert_eq!(segments[1].text, "beta");
        assert_eq!(segments[1].end, 10.0);
    }

    #[test]
    fn vtt_serialization() {
        let segments = segment("a b c d e f g h i j", 100.0, 5).unwrap();
        let track = to_vtt(&segments);
        assert!(track.starts_with("WEBVTT\n\n"));
        assert!(track.contains("1\n00:00:00.000 --> 00:00:20.000\na b\n"));
        assert!(track.contains("3\n00:00:40.000 --> 00:01:00.000\ne f\n"));
        assert!(track.contains("5\n00:01:20.000 --> 00:01:40.000\ni j\n"));
    }
}

use std::collections::HashSet;

use crate::asr::{RawRecognitionResult, RawSegment};
use crate::{Segment, TranscriptionResponse};

/// Seconds credited per segment by the duration estimate.
const SECONDS_PER_SEGMENT: f64 = 2.0;

/// Converts raw backend output into the client-facing response.
///
/// Segments keep their original order. Missing log-probabilities become 0.
pub fn normalize(raw: RawRecognitionResult) -> TranscriptionResponse {
    let segments: Vec<Segment> = raw.segments.into_iter().map(to_segment).collect();
    let speakers_detected = count_speakers(&segments);
    let duration = estimate_duration(segments.len());

    TranscriptionResponse {
        text: raw.text,
        language: raw.language,
        confidence_score: raw.avg_logprob.unwrap_or(0.0),
        speakers_detected,
        segments,
        duration,
    }
}

fn to_segment(raw: RawSegment) -> Segment {
    Segment {
        start: raw.start,
        end: raw.end,
        text: raw.text.trim().to_string(),
        confidence: raw.avg_logprob.unwrap_or(0.0),
    }
}

/// Distinct `label:` prefixes across segments, floored at 1.
///
/// Purely lexical: any colon counts, including ones in timestamps or ratios.
pub fn count_speakers(segments: &[Segment]) -> usize {
    let labels: HashSet<&str> = segments
        .iter()
        .filter_map(|s| s.text.split_once(':').map(|(label, _)| label))
        .collect();
    labels.len().max(1)
}

/// `2s × segment count`, unrelated to the actual timestamps.
pub fn estimate_duration(segment_count: usize) -> f64 {
    SECONDS_PER_SEGMENT * segment_count as f64
}

//! Segment and turn value types shared across the pipeline.

use serde::{Deserialize, Serialize};

/// Speaker label assigned when no diarization segment matches a
/// transcription segment.
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// An interval along the recording timeline, in seconds.
///
/// Invariant: `end >= start`. Alignment rejects inputs that violate it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl TimeSpan {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration of the span in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the span is structurally valid (`end >= start`).
    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    /// Signed gap between two spans: at most zero when they genuinely
    /// overlap, the temporal distance between them otherwise.
    pub fn gap_to(&self, other: &TimeSpan) -> f64 {
        self.start.max(other.start) - self.end.min(other.end)
    }

    /// Intersection window of two spans, or `None` when it is empty or
    /// degenerate (zero length).
    pub fn intersect(&self, other: &TimeSpan) -> Option<TimeSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(TimeSpan { start, end })
    }
}

/// A segment of transcribed speech, as supplied by a transcription source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    #[serde(flatten)]
    pub span: TimeSpan,
    /// Transcribed text (may be empty)
    pub text: String,
}

impl TranscriptionSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            span: TimeSpan::new(start, end),
            text: text.into(),
        }
    }
}

/// A segment of speech attributed to one speaker, as supplied by a
/// diarization source. The label is opaque and not stable across recordings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiarizationSegment {
    #[serde(flatten)]
    pub span: TimeSpan,
    /// Speaker label assigned by the diarization model
    pub speaker: String,
}

impl DiarizationSegment {
    pub fn new(start: f64, end: f64, speaker: impl Into<String>) -> Self {
        Self {
            span: TimeSpan::new(start, end),
            speaker: speaker.into(),
        }
    }
}

/// A transcription segment (or a window of one) attributed to a speaker.
///
/// `text` always carries the full text of the originating transcription
/// segment, never a sub-slice, even when the span is narrowed to the
/// overlap window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedSegment {
    #[serde(flatten)]
    pub span: TimeSpan,
    /// A diarization label, or [`UNKNOWN_SPEAKER`]
    pub speaker: String,
    pub text: String,
}

impl AttributedSegment {
    pub fn new(start: f64, end: f64, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            span: TimeSpan::new(start, end),
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// A maximal run of consecutive same-speaker attributed segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(flatten)]
    pub span: TimeSpan,
    pub speaker: String,
    /// Space-joined texts of the merged segments, in merge order
    pub text: String,
}

impl Turn {
    pub fn new(start: f64, end: f64, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            span: TimeSpan::new(start, end),
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    /// Duration of the turn in seconds
    pub fn duration(&self) -> f64 {
        self.span.duration()
    }
}

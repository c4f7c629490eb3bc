//! Core transcript reconciliation pipeline.
//!
//! Takes a time-stamped transcription and a time-stamped diarization of the
//! same recording and produces speaker-attributed turns:
//! align → merge → format. All three steps are pure, synchronous
//! transformations over immutable inputs.

pub mod align;
pub mod format;
pub mod merge;
pub mod segment;

pub use align::{align, AlignError};
pub use format::{format_transcript, ExportFormat};
pub use merge::merge_turns;
pub use segment::{
    AttributedSegment, DiarizationSegment, TimeSpan, TranscriptionSegment, Turn, UNKNOWN_SPEAKER,
};

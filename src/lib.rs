//! Speaker-attributed transcript reconciliation.
//!
//! `turnscribe` merges two independently produced views of one recording —
//! a time-stamped transcription and a time-stamped speaker diarization —
//! into readable speaker turns. The core is a pure three-step pipeline
//! ([`transcript::align`] → [`transcript::merge_turns`] →
//! [`transcript::format_transcript`]); everything around it (sources,
//! storage, notification) is a seam with injected implementations.
//!
//! One documented surprise worth knowing up front: a transcription segment
//! whose diarization candidates all pass the soft tolerance test but none
//! of which genuinely overlaps it yields no output at all, rather than an
//! `UNKNOWN` attribution. See [`transcript::align`].

pub mod config;
pub mod db;
pub mod notify;
pub mod pipeline;
pub mod sources;
pub mod transcript;

pub use pipeline::{Pipeline, PipelineError, ProcessedFile};
pub use transcript::{
    align, format_transcript, merge_turns, AlignError, AttributedSegment, DiarizationSegment,
    ExportFormat, TimeSpan, TranscriptionSegment, Turn, UNKNOWN_SPEAKER,
};

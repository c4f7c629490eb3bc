//! Alignment of transcription segments to diarization segments.

use thiserror::Error;

use super::segment::{AttributedSegment, DiarizationSegment, TranscriptionSegment, UNKNOWN_SPEAKER};

#[derive(Error, Debug, PartialEq)]
pub enum AlignError {
    #[error("invalid span in {input} segment {index}: end {end} < start {start}")]
    InvalidSpan {
        input: &'static str,
        index: usize,
        start: f64,
        end: f64,
    },
    #[error("tolerance must be a non-negative number of seconds, got {0}")]
    InvalidTolerance(f64),
}

/// Attribute each transcription segment to the speakers active during it.
///
/// Candidate diarization segments are selected with a soft test first:
/// `max(starts) - min(ends) < tolerance`. For genuinely overlapping spans
/// that difference is at most zero, so they always qualify; disjoint spans
/// qualify when the gap between them stays under `tolerance`. The slack is
/// two-sided on purpose, to absorb clock skew between the two producers.
///
/// Each candidate then has to pass the hard test: a non-degenerate
/// intersection window with the transcription segment. The emitted segment
/// covers only that window but carries the full transcription text.
///
/// Per transcription segment:
/// - no candidates at all → one segment labelled [`UNKNOWN_SPEAKER`],
///   covering the transcription span verbatim;
/// - candidates exist but none survives the hard test → nothing is emitted
///   for that segment. The silent drop is deliberate, see the crate docs.
///
/// Output order is transcription order, then diarization input order within
/// one transcription segment. Nothing is ever re-sorted by timestamp.
///
/// Any input span with `end < start` fails the whole call; no partial
/// output is produced.
pub fn align(
    transcription: &[TranscriptionSegment],
    diarization: &[DiarizationSegment],
    tolerance: f64,
) -> Result<Vec<AttributedSegment>, AlignError> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(AlignError::InvalidTolerance(tolerance));
    }

    for (index, seg) in transcription.iter().enumerate() {
        if !seg.span.is_valid() {
            return Err(AlignError::InvalidSpan {
                input: "transcription",
                index,
                start: seg.span.start,
                end: seg.span.end,
            });
        }
    }
    for (index, seg) in diarization.iter().enumerate() {
        if !seg.span.is_valid() {
            return Err(AlignError::InvalidSpan {
                input: "diarization",
                index,
                start: seg.span.start,
                end: seg.span.end,
            });
        }
    }

    let mut attributed = Vec::new();

    for trans in transcription {
        let candidates: Vec<&DiarizationSegment> = diarization
            .iter()
            .filter(|dia| dia.span.gap_to(&trans.span) < tolerance)
            .collect();

        if candidates.is_empty() {
            attributed.push(AttributedSegment {
                span: trans.span,
                speaker: UNKNOWN_SPEAKER.to_string(),
                text: trans.text.clone(),
            });
            continue;
        }

        for dia in candidates {
            if let Some(window) = dia.span.intersect(&trans.span) {
                attributed.push(AttributedSegment {
                    span: window,
                    speaker: dia.speaker.clone(),
                    text: trans.text.clone(),
                });
            }
        }
    }

    Ok(attributed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_overlap_narrows_span_and_keeps_text() {
        let transcription = vec![TranscriptionSegment::new(0.0, 2.0, "hello")];
        let diarization = vec![DiarizationSegment::new(1.0, 3.0, "S1")];

        let out = align(&transcription, &diarization, 0.5).unwrap();
        assert_eq!(out, vec![AttributedSegment::new(1.0, 2.0, "S1", "hello")]);
    }

    #[test]
    fn test_no_match_falls_back_to_unknown() {
        let transcription = vec![TranscriptionSegment::new(0.0, 1.0, "x")];
        let diarization = vec![DiarizationSegment::new(5.0, 6.0, "S1")];

        let out = align(&transcription, &diarization, 0.5).unwrap();
        assert_eq!(
            out,
            vec![AttributedSegment::new(0.0, 1.0, UNKNOWN_SPEAKER, "x")]
        );
    }

    #[test]
    fn test_soft_match_without_hard_overlap_is_dropped() {
        // gap = 0.3 < 0.5 admits the candidate, but the intersection window
        // [1.3, 1.0) is empty, so the segment yields nothing at all.
        let transcription = vec![TranscriptionSegment::new(0.0, 1.0, "a")];
        let diarization = vec![DiarizationSegment::new(1.3, 2.0, "S1")];

        let out = align(&transcription, &diarization, 0.5).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_diarization_yields_all_unknown() {
        let transcription = vec![
            TranscriptionSegment::new(0.0, 1.0, "a"),
            TranscriptionSegment::new(1.0, 2.5, "b"),
            TranscriptionSegment::new(3.0, 3.0, ""),
        ];

        let out = align(&transcription, &[], 0.5).unwrap();
        assert_eq!(out.len(), transcription.len());
        for (seg, trans) in out.iter().zip(&transcription) {
            assert_eq!(seg.speaker, UNKNOWN_SPEAKER);
            assert_eq!(seg.span, trans.span);
            assert_eq!(seg.text, trans.text);
        }
    }

    #[test]
    fn test_empty_transcription_yields_nothing() {
        let diarization = vec![DiarizationSegment::new(0.0, 10.0, "S1")];
        let out = align(&[], &diarization, 0.5).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_speaker_change_fans_out_one_segment() {
        let transcription = vec![TranscriptionSegment::new(0.0, 4.0, "hello there")];
        let diarization = vec![
            DiarizationSegment::new(0.0, 2.0, "S1"),
            DiarizationSegment::new(2.0, 4.0, "S2"),
        ];

        let out = align(&transcription, &diarization, 0.5).unwrap();
        assert_eq!(
            out,
            vec![
                AttributedSegment::new(0.0, 2.0, "S1", "hello there"),
                AttributedSegment::new(2.0, 4.0, "S2", "hello there"),
            ]
        );
    }

    #[test]
    fn test_candidates_keep_diarization_input_order() {
        // Deliberately supply diarization out of time order: the engine must
        // not sort it.
        let transcription = vec![TranscriptionSegment::new(0.0, 4.0, "t")];
        let diarization = vec![
            DiarizationSegment::new(2.0, 4.0, "S2"),
            DiarizationSegment::new(0.0, 2.0, "S1"),
        ];

        let out = align(&transcription, &diarization, 0.5).unwrap();
        let speakers: Vec<&str> = out.iter().map(|s| s.speaker.as_str()).collect();
        assert_eq!(speakers, vec!["S2", "S1"]);
    }

    #[test]
    fn test_emitted_overlap_windows_are_never_degenerate() {
        let transcription = vec![
            TranscriptionSegment::new(0.0, 1.0, "a"),
            TranscriptionSegment::new(1.0, 2.0, "b"),
            TranscriptionSegment::new(2.5, 3.5, "c"),
        ];
        let diarization = vec![
            DiarizationSegment::new(0.0, 1.0, "S1"),
            DiarizationSegment::new(1.0, 1.0, "S2"),
            DiarizationSegment::new(3.4, 9.0, "S3"),
        ];

        for tolerance in [0.0, 0.25, 0.5, 2.0] {
            let out = align(&transcription, &diarization, tolerance).unwrap();
            for seg in out.iter().filter(|s| s.speaker != UNKNOWN_SPEAKER) {
                assert!(seg.span.end > seg.span.start, "degenerate span {:?}", seg);
            }
        }
    }

    #[test]
    fn test_invalid_transcription_span_fails_whole_call() {
        let transcription = vec![
            TranscriptionSegment::new(0.0, 1.0, "fine"),
            TranscriptionSegment::new(3.0, 2.0, "backwards"),
        ];
        let diarization = vec![DiarizationSegment::new(0.0, 1.0, "S1")];

        let err = align(&transcription, &diarization, 0.5).unwrap_err();
        assert_eq!(
            err,
            AlignError::InvalidSpan {
                input: "transcription",
                index: 1,
                start: 3.0,
                end: 2.0,
            }
        );
    }

    #[test]
    fn test_invalid_diarization_span_fails_whole_call() {
        let transcription = vec![TranscriptionSegment::new(0.0, 1.0, "fine")];
        let diarization = vec![DiarizationSegment::new(2.0, 1.0, "S1")];

        let err = align(&transcription, &diarization, 0.5).unwrap_err();
        assert!(matches!(
            err,
            AlignError::InvalidSpan {
                input: "diarization",
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let err = align(&[], &[], -0.1).unwrap_err();
        assert_eq!(err, AlignError::InvalidTolerance(-0.1));

        assert!(align(&[], &[], f64::NAN).is_err());
        assert!(align(&[], &[], 0.0).is_ok());
    }

    #[test]
    fn test_zero_length_transcription_segment() {
        // A zero-length span is valid input; it can never hard-overlap, so
        // it either becomes UNKNOWN (no candidates) or is dropped.
        let transcription = vec![TranscriptionSegment::new(1.0, 1.0, "blip")];

        let out = align(&transcription, &[], 0.5).unwrap();
        assert_eq!(out[0].speaker, UNKNOWN_SPEAKER);

        let diarization = vec![DiarizationSegment::new(0.5, 1.5, "S1")];
        let out = align(&transcription, &diarization, 0.5).unwrap();
        assert!(out.is_empty());
    }
}

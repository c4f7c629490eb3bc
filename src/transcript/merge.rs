//! Collapsing attributed segments into speaker turns.

use super::segment::{AttributedSegment, Turn};

/// Merge consecutive same-speaker segments into turns.
///
/// Single sequential pass: while the speaker stays the same the current
/// turn is extended (`end` moves forward, texts are space-joined);
/// a speaker change closes the turn and opens the next one.
///
/// Merging is adjacency-only. The input is never sorted, and two runs of
/// the same speaker separated by an intervening different speaker stay
/// distinct turns. Turn order therefore follows the emission order of
/// alignment, which is not guaranteed to be chronological when diarization
/// input was not globally time-ordered.
pub fn merge_turns(attributed: &[AttributedSegment]) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();
    let mut current: Option<Turn> = None;

    for seg in attributed {
        match current.as_mut() {
            Some(turn) if turn.speaker == seg.speaker => {
                turn.span.end = seg.span.end;
                turn.text.push(' ');
                turn.text.push_str(&seg.text);
            }
            _ => {
                if let Some(done) = current.take() {
                    turns.push(done);
                }
                current = Some(Turn {
                    span: seg.span,
                    speaker: seg.speaker.clone(),
                    text: seg.text.clone(),
                });
            }
        }
    }

    if let Some(done) = current {
        turns.push(done);
    }

    turns
}

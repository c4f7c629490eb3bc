//! Turn rendering and export formatters.
//!
//! Supports the canonical display rendering plus JSON, SRT, and VTT output.

use std::fmt::Write as FmtWrite;
use std::io;
use std::path::Path;

use super::segment::Turn;

/// Render turns as the canonical display transcript.
///
/// One line per turn, `[start-end] speaker: text` with times fixed to two
/// decimal places; lines joined by a single newline, no trailing newline.
pub fn format_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| {
            format!(
                "[{:.2}-{:.2}] {}: {}",
                turn.span.start, turn.span.end, turn.speaker, turn.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
    /// SubRip subtitle format
    Srt,
    /// WebVTT subtitle format
    Vtt,
    /// Canonical display transcript
    Text,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json | ExportFormat::JsonPretty => "json",
            ExportFormat::Srt => "srt",
            ExportFormat::Vtt => "vtt",
            ExportFormat::Text => "txt",
        }
    }

    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "json-pretty" | "json_pretty" => Some(ExportFormat::JsonPretty),
            "srt" => Some(ExportFormat::Srt),
            "vtt" | "webvtt" => Some(ExportFormat::Vtt),
            "txt" | "text" => Some(ExportFormat::Text),
            _ => None,
        }
    }
}

/// Export turns to the specified format
pub fn export(turns: &[Turn], format: ExportFormat) -> String {
    match format {
        ExportFormat::Json => serde_json::to_string(turns).unwrap_or_default(),
        ExportFormat::JsonPretty => serde_json::to_string_pretty(turns).unwrap_or_default(),
        ExportFormat::Srt => to_srt(turns),
        ExportFormat::Vtt => to_vtt(turns),
        ExportFormat::Text => format_transcript(turns),
    }
}

/// Export turns to a file in the specified format
pub fn export_to_file(turns: &[Turn], path: &Path, format: ExportFormat) -> io::Result<()> {
    std::fs::write(path, export(turns, format))
}

/// Export to SRT format
fn to_srt(turns: &[Turn]) -> String {
    let mut output = String::new();

    for (i, turn) in turns.iter().enumerate() {
        let _ = writeln!(output, "{}", i + 1);
        let _ = writeln!(
            output,
            "{} --> {}",
            format_srt_time(turn.span.start),
            format_srt_time(turn.span.end)
        );
        let _ = writeln!(output, "[{}] {}", turn.speaker, turn.text);
        let _ = writeln!(output);
    }

    output
}

/// Export to WebVTT format
fn to_vtt(turns: &[Turn]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for (i, turn) in turns.iter().enumerate() {
        let _ = writeln!(output, "{}", i + 1);
        let _ = writeln!(
            output,
            "{} --> {}",
            format_vtt_time(turn.span.start),
            format_vtt_time(turn.span.end)
        );
        let _ = writeln!(output, "<v {}>{}", turn.speaker, turn.text);
        let _ = writeln!(output);
    }

    output
}

/// Format time for SRT (HH:MM:SS,mmm)
fn format_srt_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0) as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
}

/// Format time for VTT (HH:MM:SS.mmm)
fn format_vtt_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0) as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
}

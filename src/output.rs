//! JSON rendering of the analysis envelope
//!
//! Pretty output uses a 2-space indent. Single-line output separates items
//! with `", "` and keys from values with `": "`, e.g.
//! `{"success": false, "error": "No audio file provided"}`.

use crate::model::AnalysisEnvelope;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Single-line formatter with a space after `,` and `:`
#[derive(Debug, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

/// Render as pretty JSON (2-space indent)
pub fn render_pretty(envelope: &AnalysisEnvelope) -> Result<String> {
    serde_json::to_string_pretty(envelope).context("Failed to serialize analysis result")
}

/// Render as single-line JSON
pub fn render_compact(envelope: &AnalysisEnvelope) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    envelope
        .serialize(&mut serializer)
        .context("Failed to serialize analysis result")?;
    String::from_utf8(buf).context("Serialized JSON is not UTF-8")
}

/// Render according to the `pretty` flag
pub fn render(envelope: &AnalysisEnvelope, pretty: bool) -> Result<String> {
    if pretty {
        render_pretty(envelope)
    } else {
        render_compact(envelope)
    }
}

//! Record extractor: runs a [`CompiledFormat`] over a block of log text.
//!
//! The pattern is applied to the whole text at once and yields at most one
//! match per line. Each match is zipped positionally with the compiled
//! assignments to populate a fresh [`LogRecord`]. Lines that do not match are
//! dropped: decoding is best-effort and trailing or truncated lines are common.

use serde::Deserialize;

use crate::compiler::CompiledFormat;
use crate::error::Result;
use crate::record::LogRecord;

/// What to do when a matched field can not be decoded (a `reqTime` that is
/// not a date, a `completeConnStatus` outside `X`/`+`/`-`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueErrorPolicy {
    /// Keep the field's default value and carry on.
    #[default]
    Default,
    /// Drop the whole line.
    SkipLine,
    /// Fail the extraction with the decode error.
    Abort,
}

impl std::str::FromStr for ValueErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "default" => Ok(ValueErrorPolicy::Default),
            "skip_line" | "skip-line" => Ok(ValueErrorPolicy::SkipLine),
            "abort" => Ok(ValueErrorPolicy::Abort),
            other => Err(format!("unknown value error policy `{other}`")),
        }
    }
}

/// Extract every matching line of `text` as a [`LogRecord`], in line order.
///
/// Only [`ValueErrorPolicy::Abort`] can make this fail.
pub fn extract(
    compiled: &CompiledFormat,
    text: &str,
    policy: ValueErrorPolicy,
) -> Result<Vec<LogRecord>> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    'lines: for caps in compiled.regex().captures_iter(text) {
        let start = caps.get(0).map_or(0, |m| m.start());
        if past_final_line(text, start) {
            continue;
        }
        let mut record = LogRecord::new();
        for assignment in compiled.assignments() {
            let raw = caps.get(assignment.position).map_or("", |m| m.as_str());
            if let Err(err) = record.assign(&assignment.target, raw) {
                match policy {
                    ValueErrorPolicy::Default => {
                        tracing::warn!(field = %assignment.target, value = raw, %err, "keeping default for undecodable value");
                    }
                    ValueErrorPolicy::SkipLine => {
                        tracing::trace!(field = %assignment.target, value = raw, %err, "dropping line");
                        dropped += 1;
                        continue 'lines;
                    }
                    ValueErrorPolicy::Abort => return Err(err),
                }
            }
        }
        records.push(record);
    }

    let unmatched = text.lines().count().saturating_sub(records.len() + dropped);
    tracing::debug!(records = records.len(), dropped, unmatched, "extracted log records");
    Ok(records)
}

/// In multi-line mode `^` also matches after the terminator of the last line.
/// That position starts no line, so an empty match there is not a record.
fn past_final_line(text: &str, start: usize) -> bool {
    start == text.len() && text.ends_with('\n')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

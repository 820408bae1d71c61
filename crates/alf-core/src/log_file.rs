//! [`LogFile`]: a format string and a block of log text, parsed on demand.

use std::sync::OnceLock;

use crate::compiler::CompiledFormat;
use crate::error::Result;
use crate::extractor::{self, ValueErrorPolicy};
use crate::record::LogRecord;

/// Owns the raw text of an access log and the format it was written with.
///
/// Nothing is compiled or parsed until the first call to
/// [`records`](Self::records) (or [`compiled`](Self::compiled)); both results,
/// failures included, are cached for the lifetime of the value. After that
/// the `LogFile` is immutable and can be shared between threads.
#[derive(Debug)]
pub struct LogFile {
    text: String,
    format: String,
    policy: ValueErrorPolicy,
    compiled: OnceLock<Result<CompiledFormat>>,
    records: OnceLock<Result<Vec<LogRecord>>>,
}

impl LogFile {
    pub fn new(text: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: format.into(),
            policy: ValueErrorPolicy::default(),
            compiled: OnceLock::new(),
            records: OnceLock::new(),
        }
    }

    /// Choose how undecodable field values are handled. Has no effect once
    /// records have been produced.
    pub fn with_policy(mut self, policy: ValueErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The compiled format, compiling it on first use.
    pub fn compiled(&self) -> Result<&CompiledFormat> {
        self.compiled
            .get_or_init(|| CompiledFormat::compile(&self.format))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Every record, in line order. The first call compiles and extracts.
    pub fn records(&self) -> Result<&[LogRecord]> {
        self.records
            .get_or_init(|| {
                let compiled = self.compiled()?;
                extractor::extract(compiled, &self.text, self.policy)
            })
            .as_ref()
            .map(Vec::as_slice)
            .map_err(Clone::clone)
    }

    /// The record parsed from the `index`-th matching line, if there is one.
    pub fn record(&self, index: usize) -> Result<Option<&LogRecord>> {
        Ok(self.records()?.get(index))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.records()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.records()?.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

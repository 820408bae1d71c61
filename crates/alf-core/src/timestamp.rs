//! Request-time decoding for `%t` and `%{format}t`.
//!
//! A bare `%t` logs `[day/Month/Year:HH:MM:SS zone]`. The braced form selects
//! either an epoch unit (`sec`, `msec`, `usec`) or a strftime string, with an
//! optional `begin:` / `end:` prefix that only matters to the log writer.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::error::{Error, Result};

/// chrono format string of the default access-log timestamp.
pub const CLF_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// How a `reqTime` capture is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeFormat {
    /// `24/Mar/2012:22:36:29 +0000`, logged between square brackets.
    Clf,
    EpochSeconds,
    EpochMillis,
    EpochMicros,
    /// Any other strftime string. Formats without an offset are read as UTC.
    Strftime(String),
}

impl TimeFormat {
    /// Interpret the `{...}` content of a `%t` directive.
    ///
    /// `msec_frac` and `usec_frac` log only a sub-second fraction, which can
    /// not be turned into a timestamp, so they are rejected.
    pub fn from_key(key: &str) -> Result<TimeFormat> {
        let key = key
            .strip_prefix("begin:")
            .or_else(|| key.strip_prefix("end:"))
            .unwrap_or(key);
        match key {
            "" => Ok(TimeFormat::Clf),
            "sec" => Ok(TimeFormat::EpochSeconds),
            "msec" => Ok(TimeFormat::EpochMillis),
            "usec" => Ok(TimeFormat::EpochMicros),
            "msec_frac" | "usec_frac" => Err(Error::UndefinedDirective('t')),
            fmt => Ok(TimeFormat::Strftime(fmt.to_string())),
        }
    }

    /// Pattern fragment for this format, with exactly one capture group.
    pub fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::Clf => r"\[(.*?)\]",
            TimeFormat::EpochSeconds | TimeFormat::EpochMillis | TimeFormat::EpochMicros => r"(\d+)",
            TimeFormat::Strftime(_) => r"(.*?)",
        }
    }

    pub fn parse(&self, raw: &str) -> Result<DateTime<FixedOffset>> {
        let malformed = || Error::MalformedTimestamp {
            value: raw.to_string(),
        };
        match self {
            TimeFormat::Clf => DateTime::parse_from_str(raw, CLF_FORMAT).map_err(|_| malformed()),
            TimeFormat::EpochSeconds => raw
                .parse::<i64>()
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|ts| ts.fixed_offset())
                .ok_or_else(malformed),
            TimeFormat::EpochMillis => raw
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .map(|ts| ts.fixed_offset())
                .ok_or_else(malformed),
            TimeFormat::EpochMicros => raw
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_micros)
                .map(|ts| ts.fixed_offset())
                .ok_or_else(malformed),
            TimeFormat::Strftime(fmt) => DateTime::parse_from_str(raw, fmt)
                .or_else(|_| NaiveDateTime::parse_from_str(raw, fmt).map(|n| n.and_utc().fixed_offset()))
                .map_err(|_| malformed()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

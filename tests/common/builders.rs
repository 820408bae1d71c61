//! Test builders: ergonomic constructors for expected `LogRecord`s.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use alf::LogRecord;

// ---------------------------------------------------------------------------
// LogRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LogRecord`] test fixtures. Values go through
/// [`LogRecord::log_value`], so they are decoded exactly as a log line would be.
///
/// # Example
///
/// ```rust
/// let expected = LogRecordBuilder::new()
///     .value("clientIP", "127.0.0.1")
///     .value("lastStatus", "200")
///     .value("reqHeader:Referer", "-")
///     .build();
/// ```
#[derive(Default)]
pub struct LogRecordBuilder {
    record: LogRecord,
}

impl LogRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, name: &str, raw: &str) -> Self {
        self.record
            .log_value(name, raw)
            .unwrap_or_else(|err| panic!("LogRecordBuilder::value({name:?}, {raw:?}): {err}"));
        self
    }

    /// The seven fields the `common` format fills in.
    pub fn common(
        self,
        client_ip: &str,
        user: &str,
        req_time: &str,
        request: &str,
        status: &str,
        bytes: &str,
    ) -> Self {
        self.value("clientIP", client_ip)
            .value("remoteLogname", "-")
            .value("user", user)
            .value("reqTime", req_time)
            .value("request", request)
            .value("lastStatus", status)
            .value("respBytes", bytes)
    }

    pub fn build(self) -> LogRecord {
        self.record
    }
}

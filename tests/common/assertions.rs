//! Domain-specific assertion macros for alf harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! attribute or keyed entry that was wrong.

// ---------------------------------------------------------------------------
// Attribute assertions
// ---------------------------------------------------------------------------

/// Assert that a `LogRecord` attribute, looked up by its declared name, holds
/// an expected value.
///
/// ```rust
/// assert_attr!(record, "clientIP", Value::Text("127.0.0.1"));
/// assert_attr!(record, "lastStatus", Value::Integer(200));
/// ```
#[macro_export]
macro_rules! assert_attr {
    ($record:expr, $name:expr, $value:expr) => {{
        let record: &alf::LogRecord = &$record;
        let name: &str = $name;
        let attr = alf::Attr::from_name(name)
            .unwrap_or_else(|| panic!("assert_attr! failed: {:?} is not a LogRecord attribute", name));
        pretty_assertions::assert_eq!(record.get(attr), $value, "attribute {:?}", name);
    }};
}

/// Assert that `reqTime` is set and renders as the given `strftime` text.
///
/// ```rust
/// assert_req_time!(record, "%Y-%m-%d %H:%M:%S %z", "2012-03-24 22:36:29 +0000");
/// ```
#[macro_export]
macro_rules! assert_req_time {
    ($record:expr, $format:expr, $expected:expr) => {{
        let record: &alf::LogRecord = &$record;
        match record.req_time {
            Some(ts) => pretty_assertions::assert_eq!(ts.format($format).to_string(), $expected),
            None => panic!("assert_req_time! failed: reqTime is unset"),
        }
    }};
}

// ---------------------------------------------------------------------------
// Keyed map assertions
// ---------------------------------------------------------------------------

/// Assert that a keyed map entry was logged with the expected text.
///
/// ```rust
/// assert_keyed!(record, MapName::ReqHeader, "Referer", "-");
/// ```
#[macro_export]
macro_rules! assert_keyed {
    ($record:expr, $map:expr, $key:expr, $value:expr) => {{
        let record: &alf::LogRecord = &$record;
        let map: alf::MapName = $map;
        let key: &str = $key;
        match record.keyed(map, key) {
            Ok(actual) => pretty_assertions::assert_eq!(actual, $value, "{}:{}", map, key),
            Err(_) => panic!(
                "assert_keyed! failed: {}:{} was not logged.\n  Logged keys: {:?}",
                map,
                key,
                record.map(map).keys().collect::<Vec<_>>()
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Record set assertions
// ---------------------------------------------------------------------------

/// Assert that every record in a set satisfies a predicate.
///
/// ```rust
/// assert_records_all!(records, |r| r.last_status >= 200);
/// ```
#[macro_export]
macro_rules! assert_records_all {
    ($records:expr, $pred:expr) => {{
        let records: &[alf::LogRecord] = &$records;
        let pred = $pred;
        let failing: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| !pred(*r))
            .map(|(i, _)| i)
            .collect();
        if !failing.is_empty() {
            panic!(
                "assert_records_all! failed: records {:?} of {} did not satisfy predicate.",
                failing,
                records.len()
            );
        }
    }};
}

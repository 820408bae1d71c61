//! [`LogRecord`], one parsed access-log line, and the rule that writes a
//! captured value onto it.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::timestamp::TimeFormat;
use crate::types::{Attr, AttrKind, ConnStatus, MapName, Target, Value};

/// A single access-log entry.
///
/// Scalars not present in the log format keep their defaults: empty strings,
/// zero integers, `None` for `req_time` and `complete_conn_status`. Serialized
/// field names match the declared attribute names (`clientIP`, `lastStatus`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    #[serde(rename = "remoteIP")]
    pub remote_ip: String,
    #[serde(rename = "localIP")]
    pub local_ip: String,
    pub filename: String,
    #[serde(rename = "clientIP")]
    pub client_ip: String,
    pub protocol: String,
    /// Remote logname from identd; a dash unless `IdentityCheck` is on.
    pub remote_logname: String,
    pub req_method: String,
    /// Prefixed with `?` when a query string exists, otherwise empty.
    pub query_string: String,
    /// First line of the request.
    pub request: String,
    pub user: String,
    /// URL path requested, without the query string.
    pub url: String,
    pub server_name: String,
    pub use_canonical_server_name: String,

    /// Response size excluding headers. `%b` logs `-` for zero.
    pub resp_bytes: i64,
    pub resp_micro: i64,
    pub port: i64,
    pub pid: i64,
    pub tid: i64,
    /// Status of the final request after internal redirects (`%>s`).
    pub last_status: i64,
    /// Status of the original request (`%s`, `%<s`).
    pub first_status: i64,
    pub resp_sec: i64,
    #[serde(rename = "libIOBytesIn")]
    pub lib_io_bytes_in: i64,
    #[serde(rename = "libIOBytesOut")]
    pub lib_io_bytes_out: i64,

    pub complete_conn_status: Option<ConnStatus>,
    pub req_time: Option<DateTime<FixedOffset>>,

    #[serde(rename = "cookie")]
    pub cookies: BTreeMap<String, String>,
    pub environment: BTreeMap<String, String>,
    #[serde(rename = "reqHeader")]
    pub req_headers: BTreeMap<String, String>,
    #[serde(rename = "respHeader")]
    pub resp_headers: BTreeMap<String, String>,
    #[serde(rename = "module")]
    pub module_notes: BTreeMap<String, String>,
}

impl LogRecord {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Assignment
    // -----------------------------------------------------------------------

    /// Store a captured value by name: `"attrName"` or `"mapName:key"`.
    ///
    /// Names that `LogRecord` does not declare fail with
    /// [`Error::UnknownField`]; otherwise this behaves like [`assign`](Self::assign).
    pub fn log_value(&mut self, name: &str, raw: &str) -> Result<()> {
        let target: Target = name.parse()?;
        self.assign(&target, raw)
    }

    /// Store a captured value on an already-resolved target.
    ///
    /// Integer attributes never fail: text that is not a number becomes `0`.
    /// `reqTime` fails with [`Error::MalformedTimestamp`] and
    /// `completeConnStatus` with [`Error::UnknownConnStatus`] when the text
    /// does not decode; the record is left unchanged in that case.
    pub fn assign(&mut self, target: &Target, raw: &str) -> Result<()> {
        match target {
            Target::Scalar(attr) => self.set_attr(*attr, raw),
            Target::Keyed(map, key) => {
                self.map_mut(*map).insert(key.clone(), raw.to_string());
                Ok(())
            }
            Target::Time(format) => {
                self.req_time = Some(format.parse(raw)?);
                Ok(())
            }
        }
    }

    fn set_attr(&mut self, attr: Attr, raw: &str) -> Result<()> {
        match attr.kind() {
            AttrKind::Text => {
                if let Some(slot) = self.text_mut(attr) {
                    *slot = raw.to_string();
                }
            }
            AttrKind::Integer => {
                let value = match (attr, raw) {
                    (Attr::RespBytes, "-") => 0,
                    _ => parse_int(raw),
                };
                if let Some(slot) = self.int_mut(attr) {
                    *slot = value;
                }
            }
            AttrKind::ConnStatus => {
                self.complete_conn_status = Some(ConnStatus::from_code(raw)?);
            }
            AttrKind::Timestamp => {
                self.req_time = Some(TimeFormat::Clf.parse(raw)?);
            }
        }
        Ok(())
    }

    fn text_mut(&mut self, attr: Attr) -> Option<&mut String> {
        let slot = match attr {
            Attr::RemoteIp => &mut self.remote_ip,
            Attr::LocalIp => &mut self.local_ip,
            Attr::Filename => &mut self.filename,
            Attr::ClientIp => &mut self.client_ip,
            Attr::Protocol => &mut self.protocol,
            Attr::RemoteLogname => &mut self.remote_logname,
            Attr::ReqMethod => &mut self.req_method,
            Attr::QueryString => &mut self.query_string,
            Attr::Request => &mut self.request,
            Attr::User => &mut self.user,
            Attr::Url => &mut self.url,
            Attr::ServerName => &mut self.server_name,
            Attr::UseCanonicalServerName => &mut self.use_canonical_server_name,
            _ => return None,
        };
        Some(slot)
    }

    fn int_mut(&mut self, attr: Attr) -> Option<&mut i64> {
        let slot = match attr {
            Attr::RespBytes => &mut self.resp_bytes,
            Attr::RespMicro => &mut self.resp_micro,
            Attr::Port => &mut self.port,
            Attr::Pid => &mut self.pid,
            Attr::Tid => &mut self.tid,
            Attr::LastStatus => &mut self.last_status,
            Attr::FirstStatus => &mut self.first_status,
            Attr::RespSec => &mut self.resp_sec,
            Attr::LibIoBytesIn => &mut self.lib_io_bytes_in,
            Attr::LibIoBytesOut => &mut self.lib_io_bytes_out,
            _ => return None,
        };
        Some(slot)
    }

    fn map_mut(&mut self, map: MapName) -> &mut BTreeMap<String, String> {
        match map {
            MapName::Cookie => &mut self.cookies,
            MapName::Environment => &mut self.environment,
            MapName::ReqHeader => &mut self.req_headers,
            MapName::RespHeader => &mut self.resp_headers,
            MapName::Module => &mut self.module_notes,
        }
    }

    // -----------------------------------------------------------------------
    // Access
    // -----------------------------------------------------------------------

    /// Read any scalar attribute as a [`Value`].
    pub fn get(&self, attr: Attr) -> Value<'_> {
        match attr {
            Attr::RemoteIp => Value::Text(&self.remote_ip),
            Attr::LocalIp => Value::Text(&self.local_ip),
            Attr::Filename => Value::Text(&self.filename),
            Attr::ClientIp => Value::Text(&self.client_ip),
            Attr::Protocol => Value::Text(&self.protocol),
            Attr::RemoteLogname => Value::Text(&self.remote_logname),
            Attr::ReqMethod => Value::Text(&self.req_method),
            Attr::QueryString => Value::Text(&self.query_string),
            Attr::Request => Value::Text(&self.request),
            Attr::User => Value::Text(&self.user),
            Attr::Url => Value::Text(&self.url),
            Attr::ServerName => Value::Text(&self.server_name),
            Attr::UseCanonicalServerName => Value::Text(&self.use_canonical_server_name),
            Attr::RespBytes => Value::Integer(self.resp_bytes),
            Attr::RespMicro => Value::Integer(self.resp_micro),
            Attr::Port => Value::Integer(self.port),
            Attr::Pid => Value::Integer(self.pid),
            Attr::Tid => Value::Integer(self.tid),
            Attr::LastStatus => Value::Integer(self.last_status),
            Attr::FirstStatus => Value::Integer(self.first_status),
            Attr::RespSec => Value::Integer(self.resp_sec),
            Attr::LibIoBytesIn => Value::Integer(self.lib_io_bytes_in),
            Attr::LibIoBytesOut => Value::Integer(self.lib_io_bytes_out),
            Attr::CompleteConnStatus => self.complete_conn_status.map_or(Value::Unset, Value::ConnStatus),
            Attr::ReqTime => self.req_time.map_or(Value::Unset, Value::Time),
        }
    }

    /// The whole keyed map.
    pub fn map(&self, map: MapName) -> &BTreeMap<String, String> {
        match map {
            MapName::Cookie => &self.cookies,
            MapName::Environment => &self.environment,
            MapName::ReqHeader => &self.req_headers,
            MapName::RespHeader => &self.resp_headers,
            MapName::Module => &self.module_notes,
        }
    }

    /// Look up one logged key, failing with [`Error::UnknownKey`] if it is absent.
    pub fn keyed(&self, map: MapName, key: &str) -> Result<&str> {
        self.map(map)
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownKey {
                map,
                key: key.to_string(),
            })
    }

    pub fn cookie(&self, name: &str) -> Result<&str> {
        self.keyed(MapName::Cookie, name)
    }

    pub fn env_var(&self, name: &str) -> Result<&str> {
        self.keyed(MapName::Environment, name)
    }

    pub fn req_header(&self, name: &str) -> Result<&str> {
        self.keyed(MapName::ReqHeader, name)
    }

    pub fn resp_header(&self, name: &str) -> Result<&str> {
        self.keyed(MapName::RespHeader, name)
    }

    pub fn module_note(&self, name: &str) -> Result<&str> {
        self.keyed(MapName::Module, name)
    }
}

/// Leading optional sign and digits; anything else reads as `0`.
fn parse_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    if negative {
        -value
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

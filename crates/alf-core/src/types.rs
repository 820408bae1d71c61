//! Core types for alf-core.
//!
//! This module defines the vocabulary shared by the compiler, the extractor
//! and [`LogRecord`](crate::LogRecord): the scalar [`Attr`]ibutes a record
//! declares, the keyed maps ([`MapName`]), the [`Target`] an extracted value
//! is written to, and the positional [`FieldAssignment`] list the compiler
//! produces.
//!
//! Attribute and map names are resolved from strings exactly once, through
//! the `phf` tables below. After that everything dispatches on enums.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::timestamp::TimeFormat;

// ---------------------------------------------------------------------------
// Scalar attributes
// ---------------------------------------------------------------------------

/// A scalar attribute declared on every [`LogRecord`](crate::LogRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attr {
    RemoteIp,
    LocalIp,
    Filename,
    ClientIp,
    Protocol,
    RemoteLogname,
    ReqMethod,
    QueryString,
    Request,
    User,
    Url,
    ServerName,
    UseCanonicalServerName,
    RespBytes,
    RespMicro,
    Port,
    Pid,
    Tid,
    LastStatus,
    FirstStatus,
    RespSec,
    LibIoBytesIn,
    LibIoBytesOut,
    CompleteConnStatus,
    ReqTime,
}

/// How the captured text for an [`Attr`] is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// Stored verbatim.
    Text,
    /// Best-effort integer; never fails.
    Integer,
    /// `X` / `+` / `-` connection status code.
    ConnStatus,
    /// Request timestamp.
    Timestamp,
}

static ATTR_NAMES: phf::Map<&'static str, Attr> = phf::phf_map! {
    "remoteIP" => Attr::RemoteIp,
    "localIP" => Attr::LocalIp,
    "filename" => Attr::Filename,
    "clientIP" => Attr::ClientIp,
    "protocol" => Attr::Protocol,
    "remoteLogname" => Attr::RemoteLogname,
    "reqMethod" => Attr::ReqMethod,
    "queryString" => Attr::QueryString,
    "request" => Attr::Request,
    "user" => Attr::User,
    "url" => Attr::Url,
    "serverName" => Attr::ServerName,
    "useCanonicalServerName" => Attr::UseCanonicalServerName,
    "respBytes" => Attr::RespBytes,
    "respMicro" => Attr::RespMicro,
    "port" => Attr::Port,
    "pid" => Attr::Pid,
    "tid" => Attr::Tid,
    "lastStatus" => Attr::LastStatus,
    "firstStatus" => Attr::FirstStatus,
    "respSec" => Attr::RespSec,
    "libIOBytesIn" => Attr::LibIoBytesIn,
    "libIOBytesOut" => Attr::LibIoBytesOut,
    "completeConnStatus" => Attr::CompleteConnStatus,
    "reqTime" => Attr::ReqTime,
};

impl Attr {
    /// Every declared attribute, in declaration order.
    pub const ALL: [Attr; 25] = [
        Attr::RemoteIp,
        Attr::LocalIp,
        Attr::Filename,
        Attr::ClientIp,
        Attr::Protocol,
        Attr::RemoteLogname,
        Attr::ReqMethod,
        Attr::QueryString,
        Attr::Request,
        Attr::User,
        Attr::Url,
        Attr::ServerName,
        Attr::UseCanonicalServerName,
        Attr::RespBytes,
        Attr::RespMicro,
        Attr::Port,
        Attr::Pid,
        Attr::Tid,
        Attr::LastStatus,
        Attr::FirstStatus,
        Attr::RespSec,
        Attr::LibIoBytesIn,
        Attr::LibIoBytesOut,
        Attr::CompleteConnStatus,
        Attr::ReqTime,
    ];

    /// Resolve an attribute by its declared name (`"clientIP"`, `"lastStatus"`, ...).
    pub fn from_name(name: &str) -> Option<Attr> {
        ATTR_NAMES.get(name).copied()
    }

    /// The declared name of this attribute.
    pub fn name(self) -> &'static str {
        match self {
            Attr::RemoteIp => "remoteIP",
            Attr::LocalIp => "localIP",
            Attr::Filename => "filename",
            Attr::ClientIp => "clientIP",
            Attr::Protocol => "protocol",
            Attr::RemoteLogname => "remoteLogname",
            Attr::ReqMethod => "reqMethod",
            Attr::QueryString => "queryString",
            Attr::Request => "request",
            Attr::User => "user",
            Attr::Url => "url",
            Attr::ServerName => "serverName",
            Attr::UseCanonicalServerName => "useCanonicalServerName",
            Attr::RespBytes => "respBytes",
            Attr::RespMicro => "respMicro",
            Attr::Port => "port",
            Attr::Pid => "pid",
            Attr::Tid => "tid",
            Attr::LastStatus => "lastStatus",
            Attr::FirstStatus => "firstStatus",
            Attr::RespSec => "respSec",
            Attr::LibIoBytesIn => "libIOBytesIn",
            Attr::LibIoBytesOut => "libIOBytesOut",
            Attr::CompleteConnStatus => "completeConnStatus",
            Attr::ReqTime => "reqTime",
        }
    }

    pub fn kind(self) -> AttrKind {
        match self {
            Attr::RespBytes
            | Attr::RespMicro
            | Attr::Port
            | Attr::Pid
            | Attr::Tid
            | Attr::LastStatus
            | Attr::FirstStatus
            | Attr::RespSec
            | Attr::LibIoBytesIn
            | Attr::LibIoBytesOut => AttrKind::Integer,
            Attr::CompleteConnStatus => AttrKind::ConnStatus,
            Attr::ReqTime => AttrKind::Timestamp,
            _ => AttrKind::Text,
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Keyed maps
// ---------------------------------------------------------------------------

/// One of the keyed maps on a [`LogRecord`](crate::LogRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapName {
    Cookie,
    Environment,
    ReqHeader,
    RespHeader,
    Module,
}

static MAP_NAMES: phf::Map<&'static str, MapName> = phf::phf_map! {
    "cookie" => MapName::Cookie,
    "environment" => MapName::Environment,
    "reqHeader" => MapName::ReqHeader,
    "respHeader" => MapName::RespHeader,
    "module" => MapName::Module,
};

impl MapName {
    pub const ALL: [MapName; 5] = [
        MapName::Cookie,
        MapName::Environment,
        MapName::ReqHeader,
        MapName::RespHeader,
        MapName::Module,
    ];

    pub fn from_name(name: &str) -> Option<MapName> {
        MAP_NAMES.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            MapName::Cookie => "cookie",
            MapName::Environment => "environment",
            MapName::ReqHeader => "reqHeader",
            MapName::RespHeader => "respHeader",
            MapName::Module => "module",
        }
    }
}

impl fmt::Display for MapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Assignment targets
// ---------------------------------------------------------------------------

/// Where an extracted value is written on a [`LogRecord`](crate::LogRecord).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A scalar attribute. `Scalar(Attr::ReqTime)` decodes the bracketed
    /// access-log date.
    Scalar(Attr),
    /// `map[key]`, last write wins.
    Keyed(MapName, String),
    /// `reqTime`, decoded with an explicit `%{...}t` time format.
    Time(TimeFormat),
}

impl FromStr for Target {
    type Err = Error;

    /// Parse `"attrName"` or `"mapName:key"`. Unknown names are
    /// [`Error::UnknownField`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((map, key)) = s.split_once(':') {
            let map = MapName::from_name(map).ok_or_else(|| Error::UnknownField(s.to_string()))?;
            return Ok(Target::Keyed(map, key.to_string()));
        }
        Attr::from_name(s)
            .map(Target::Scalar)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Scalar(attr) => write!(f, "{attr}"),
            Target::Keyed(map, key) => write!(f, "{map}:{key}"),
            Target::Time(_) => write!(f, "{}", Attr::ReqTime),
        }
    }
}

/// Maps one capture group of the compiled pattern onto a [`Target`].
///
/// The compiler emits these in left-to-right pattern order; the extractor
/// zips them with the captures positionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    /// 1-based capture group index.
    pub position: usize,
    pub target: Target,
}

// ---------------------------------------------------------------------------
// Decoded values
// ---------------------------------------------------------------------------

/// Connection status when the response completed (`%X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConnStatus {
    #[serde(rename = "aborted")]
    Aborted,
    #[serde(rename = "keep-alive")]
    KeepAlive,
    #[serde(rename = "closed")]
    Closed,
}

impl ConnStatus {
    /// Decode the single-character `%X` code.
    pub fn from_code(code: &str) -> Result<ConnStatus, Error> {
        match code {
            "X" => Ok(ConnStatus::Aborted),
            "+" => Ok(ConnStatus::KeepAlive),
            "-" => Ok(ConnStatus::Closed),
            other => Err(Error::UnknownConnStatus(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnStatus::Aborted => "aborted",
            ConnStatus::KeepAlive => "keep-alive",
            ConnStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ConnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar attribute value read back from a record, see
/// [`LogRecord::get`](crate::LogRecord::get).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value<'a> {
    Text(&'a str),
    Integer(i64),
    Time(chrono::DateTime<chrono::FixedOffset>),
    ConnStatus(ConnStatus),
    /// `reqTime` or `completeConnStatus` that was never logged.
    Unset,
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Time(ts) => write!(f, "{}", ts.format(crate::timestamp::CLF_FORMAT)),
            Value::ConnStatus(status) => write!(f, "{status}"),
            Value::Unset => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

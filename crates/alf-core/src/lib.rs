//! alf-core: Apache LogFormat compiler and access-log record model.
//!
//! Given a `LogFormat` / `CustomLog` directive string such as
//! `%h %l %u %t "%r" %>s %b`, this crate builds a line-matching regex plus
//! an ordered list of field assignments, then turns each matching line of a
//! log into a typed [`LogRecord`].
//!
//! # Architecture
//!
//! ```text
//! format ──► lexer ──► compiler ──► CompiledFormat
//!                                        │
//! log text ─────────────────────────► extractor ──► Vec<LogRecord>
//! ```
//!
//! [`LogFile`] ties the two inputs together and caches both results.
//!
//! ```rust
//! use alf_core::LogFile;
//!
//! let log = LogFile::new(
//!     "127.0.0.1 - - [24/Mar/2012:22:36:29 +0000] \"GET /x HTTP/1.1\" 200 238159\n",
//!     r#"%h %l %u %t "%r" %>s %b"#,
//! );
//! let record = &log.records().unwrap()[0];
//! assert_eq!(record.client_ip, "127.0.0.1");
//! assert_eq!(record.last_status, 200);
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod extractor;
pub mod formats;
pub mod lexer;
pub mod log_file;
pub mod record;
pub mod timestamp;
pub mod types;

pub use compiler::CompiledFormat;
pub use error::{Error, Result};
pub use extractor::{extract, ValueErrorPolicy};
pub use log_file::LogFile;
pub use record::LogRecord;
pub use timestamp::TimeFormat;
pub use types::{Attr, AttrKind, ConnStatus, FieldAssignment, MapName, Target, Value};

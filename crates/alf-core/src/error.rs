//! Error type shared by the lexer, compiler, record model and extractor.
//!
//! Compile-time errors (`UndefinedDirective`, `UnterminatedDirective`,
//! `MissingKey`, `UnknownField`, `Pattern`) abort compilation of a format
//! string. Value errors (`MalformedTimestamp`, `UnknownConnStatus`) come from
//! decoding captured log text. `UnknownKey` is only returned by keyed lookups
//! on a [`LogRecord`](crate::LogRecord).

use crate::types::MapName;

/// Result alias used throughout `alf-core`.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while compiling a format or populating a record.
///
/// `Error` is `Clone` so that a memoized failure can be handed out on every
/// call to [`LogFile::records`](crate::LogFile::records).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An assignment names an attribute or keyed map that `LogRecord` does not declare.
    #[error("field `{0}` can not be logged")]
    UnknownField(String),

    /// A keyed lookup asked for a key that was never logged on this record.
    #[error("no `{key}` value was logged in {map}")]
    UnknownKey { map: MapName, key: String },

    /// Captured `reqTime` text does not parse with the expected time format.
    #[error("malformed timestamp `{value}`")]
    MalformedTimestamp { value: String },

    /// Captured `completeConnStatus` text is not one of `X`, `+` or `-`.
    #[error("unknown connection status `{0}`")]
    UnknownConnStatus(String),

    /// The directive is recognised but has no pattern to match it with.
    #[error("directive `%{0}` has no defined pattern")]
    UndefinedDirective(char),

    /// The format string ended while a `%` directive was still open.
    #[error("directive starting at byte {offset} is not terminated")]
    UnterminatedDirective { offset: usize },

    /// A keyed directive (`%{name}i` and friends) was written without braces.
    #[error("directive `%{directive}` requires a `{{name}}` key")]
    MissingKey { directive: char },

    /// The assembled pattern was rejected by the regex engine.
    #[error("compiled pattern is invalid: {0}")]
    Pattern(#[from] regex::Error),
}

//! Directive compiler: turns a `LogFormat` string into one anchored regex
//! plus the ordered [`FieldAssignment`] list that says where each capture goes.
//!
//! # Directive table
//!
//! | Letter | Target | Fragment |
//! |--------|--------|----------|
//! | `%` | none | literal `%` |
//! | `a` `A` `h` | remoteIP / localIP / clientIP | IPv4 dotted quad |
//! | `b` | respBytes | `\S+` (`-` means zero) |
//! | `B` `D` `p` `T` `I` `O` | respBytes / respMicro / port / respSec / libIOBytesIn / libIOBytesOut | `\d*` |
//! | `C` `e` `i` `n` `o` | cookie / environment / reqHeader / module / respHeader `[key]` | lazy any |
//! | `f` `r` `u` `U` `v` `V` | filename / request / user / url / serverName / useCanonicalServerName | lazy any |
//! | `H` | protocol | none, rejected |
//! | `l` | remoteLogname | `-` |
//! | `m` | reqMethod | one of the HTTP method tokens |
//! | `P` | pid, or tid with `{tid}` | `\d*` |
//! | `q` | queryString | `\S*` |
//! | `s` | lastStatus with `>`, else firstStatus | `\d{3}` |
//! | `t` | reqTime | `\[...\]`, or per `%{format}t` |
//! | `X` | completeConnStatus | `X`, `+` or `-` |
//!
//! For keyed directives the key is the text inside the first `{...}` of the
//! raw segment. Anything around it (modifiers, `!200,304,302` condition
//! lists) is ignored: a suppressed value already shows up as `-` in the log.
//!
//! The regex is case-insensitive and multi-line, `.` never crosses a line
//! terminator, and every "any chars" fragment is lazy so adjacent fields
//! separated only by a space or a quote do not swallow each other.

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::lexer::{self, Token};
use crate::timestamp::TimeFormat;
use crate::types::{Attr, FieldAssignment, MapName, Target};

const IPV4: &str = r"(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})";
const ANY: &str = r"(.*?)";
const DIGITS: &str = r"(\d*)";
const NON_SPACE: &str = r"(\S+)";
const OPT_NON_SPACE: &str = r"(\S*)";
const STATUS: &str = r"(\d{3})";
const DASH: &str = r"(-)";
const METHOD: &str = "(GET|POST|PUT|HEAD|OPTIONS|DELETE|TRACE|CONNECT)";
const CONN_STATUS: &str = r"(X|\+|-)";

/// A format string compiled into a line-matching regex and its field assignments.
#[derive(Debug, Clone)]
pub struct CompiledFormat {
    format: String,
    regex: Regex,
    assignments: Vec<FieldAssignment>,
}

impl CompiledFormat {
    /// Compile `format`. Any error aborts compilation; no partial pattern is kept.
    pub fn compile(format: &str) -> Result<Self> {
        let tokens = lexer::tokenize(format)?;

        let mut pattern = String::from("^");
        let mut assignments = Vec::new();
        for token in &tokens {
            match token {
                Token::Literal(text) => pattern.push_str(&regex::escape(text)),
                Token::Directive { letter, raw, .. } => {
                    let (fragment, target) = compile_directive(*letter, raw)?;
                    pattern.push_str(fragment);
                    if let Some(target) = target {
                        assignments.push(FieldAssignment {
                            position: assignments.len() + 1,
                            target,
                        });
                    }
                }
            }
        }
        pattern.push('$');

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .multi_line(true)
            .crlf(true)
            .build()?;
        debug_assert_eq!(regex.captures_len() - 1, assignments.len());

        tracing::debug!(
            format,
            pattern = %regex.as_str(),
            fields = assignments.len(),
            "compiled log format"
        );

        Ok(Self {
            format: format.to_string(),
            regex,
            assignments,
        })
    }

    /// The format string this was compiled from.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The regex source, without the builder flags.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// One assignment per capture group, in capture order.
    pub fn assignments(&self) -> &[FieldAssignment] {
        &self.assignments
    }
}

/// Content strictly inside the first `{...}` pair, if any.
fn braced_key(raw: &str) -> Option<&str> {
    let open = raw.find('{')? + 1;
    let close = open + raw[open..].find('}')?;
    Some(&raw[open..close])
}

fn keyed(map: MapName, letter: char, raw: &str) -> Result<Option<Target>> {
    let key = braced_key(raw).ok_or(Error::MissingKey { directive: letter })?;
    Ok(Some(Target::Keyed(map, key.to_string())))
}

fn scalar(attr: Attr) -> Result<Option<Target>> {
    Ok(Some(Target::Scalar(attr)))
}

/// Pattern fragment and assignment target for one directive.
fn compile_directive(letter: char, raw: &str) -> Result<(&'static str, Option<Target>)> {
    let (fragment, target) = match letter {
        '%' => ("%", Ok(None)),
        'a' => (IPV4, scalar(Attr::RemoteIp)),
        'A' => (IPV4, scalar(Attr::LocalIp)),
        'b' => (NON_SPACE, scalar(Attr::RespBytes)),
        'B' => (DIGITS, scalar(Attr::RespBytes)),
        'C' => (ANY, keyed(MapName::Cookie, letter, raw)),
        'D' => (DIGITS, scalar(Attr::RespMicro)),
        'e' => (ANY, keyed(MapName::Environment, letter, raw)),
        'f' => (ANY, scalar(Attr::Filename)),
        'h' => (IPV4, scalar(Attr::ClientIp)),
        'i' => (ANY, keyed(MapName::ReqHeader, letter, raw)),
        'l' => (DASH, scalar(Attr::RemoteLogname)),
        'm' => (METHOD, scalar(Attr::ReqMethod)),
        'n' => (ANY, keyed(MapName::Module, letter, raw)),
        'o' => (ANY, keyed(MapName::RespHeader, letter, raw)),
        'p' => (DIGITS, scalar(Attr::Port)),
        'P' => {
            let target = match braced_key(raw) {
                Some("pid") => scalar(Attr::Pid),
                Some("tid") => scalar(Attr::Tid),
                Some(name) => Err(Error::UnknownField(name.to_string())),
                None => scalar(Attr::Pid),
            };
            (DIGITS, target)
        }
        'q' => (OPT_NON_SPACE, scalar(Attr::QueryString)),
        'r' => (ANY, scalar(Attr::Request)),
        's' if raw.ends_with('>') => (STATUS, scalar(Attr::LastStatus)),
        's' => (STATUS, scalar(Attr::FirstStatus)),
        't' => {
            let format = match braced_key(raw) {
                Some(key) => TimeFormat::from_key(key)?,
                None => TimeFormat::Clf,
            };
            let fragment = format.pattern();
            let target = match format {
                TimeFormat::Clf => Target::Scalar(Attr::ReqTime),
                other => Target::Time(other),
            };
            (fragment, Ok(Some(target)))
        }
        'T' => (DIGITS, scalar(Attr::RespSec)),
        'u' => (ANY, scalar(Attr::User)),
        'U' => (ANY, scalar(Attr::Url)),
        'v' => (ANY, scalar(Attr::ServerName)),
        'V' => (ANY, scalar(Attr::UseCanonicalServerName)),
        'X' => (CONN_STATUS, scalar(Attr::CompleteConnStatus)),
        'I' => (DIGITS, scalar(Attr::LibIoBytesIn)),
        'O' => (DIGITS, scalar(Attr::LibIoBytesOut)),
        // TODO: %H needs a protocol pattern (HTTP/1.1, HTTP/2.0, ...) before it can be matched.
        other => return Err(Error::UndefinedDirective(other)),
    };
    Ok((fragment, target?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

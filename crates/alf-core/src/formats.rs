//! Stock `LogFormat` nicknames shipped in the default Apache configuration.

/// Nickname → format string.
pub static BUILTIN: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "common" => r#"%h %l %u %t "%r" %>s %b"#,
    "combined" => r#"%h %l %u %t "%r" %>s %b "%{Referer}i" "%{User-agent}i""#,
    "combinedio" => r#"%h %l %u %t "%r" %>s %b "%{Referer}i" "%{User-agent}i" %I %O"#,
    "vhost_common" => r#"%v %h %l %u %t "%r" %>s %b"#,
    "referer" => "%{Referer}i -> %U",
    "agent" => "%{User-agent}i",
};

/// Return the format for a built-in nickname, or `name_or_format` unchanged.
///
/// A string containing `%` is always treated as a format, never a nickname.
pub fn resolve(name_or_format: &str) -> &str {
    if name_or_format.contains('%') {
        return name_or_format;
    }
    match BUILTIN.get(name_or_format) {
        Some(format) => *format,
        None => name_or_format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompiledFormat;

    #[test]
    fn nicknames_resolve() {
        assert_eq!(resolve("common"), r#"%h %l %u %t "%r" %>s %b"#);
        assert_eq!(resolve("%h"), "%h");
        assert_eq!(resolve("unknown"), "unknown");
    }

    #[test]
    fn every_builtin_compiles() {
        for (name, format) in BUILTIN.entries() {
            assert!(CompiledFormat::compile(format).is_ok(), "{name} does not compile");
        }
    }
}

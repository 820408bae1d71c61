//! Static log corpora used across harnesses.
//!
//! Each corpus pairs a `LogFormat` string with representative lines written
//! in that format. Some corpora deliberately contain lines that do not match
//! so that harnesses can check they are skipped.

/// The `common` nickname spelled out.
pub const COMMON_FORMAT: &str = r#"%h %l %u %t "%r" %>s %b"#;

/// Five matching lines plus one truncated line at index 4.
pub const COMMON_LOG: &[&str] = &[
    r#"127.0.0.1 - - [24/Mar/2012:22:36:20 +0000] "GET /activity/ HTTP/1.1" 200 2326"#,
    r#"127.0.0.1 - - [24/Mar/2012:22:36:21 +0000] "GET /activity/styles/main.css HTTP/1.1" 304 -"#,
    r#"127.0.0.1 - - [24/Mar/2012:22:36:29 +0000] "GET /activity/scripts/jquery-1.6.4.js HTTP/1.1" 200 238159"#,
    r#"192.168.0.104 - frank [24/Mar/2012:22:37:02 -0500] "POST /activity/login.php HTTP/1.1" 302 0"#,
    "this line was truncated by log rotation",
    r#"10.0.0.7 - - [24/Mar/2012:22:38:11 +0000] "GET /favicon.ico HTTP/1.1" 404 209"#,
];

pub const COMBINED_FORMAT: &str = r#"%h %l %u %t "%r" %>s %b "%{Referer}i" "%{User-Agent}i""#;

pub const COMBINED_LOG: &[&str] = &[
    r#"127.0.0.1 - - [24/Mar/2012:21:55:19 +0000] "GET /activity/ HTTP/1.1" 200 2326 "-" "Mozilla/5.0 (X11; Ubuntu; Linux i686; rv:11.0) Gecko/20100101 Firefox/11.0""#,
    r#"127.0.0.1 - - [24/Mar/2012:21:55:20 +0000] "GET /activity/scripts/jquery-1.6.4.js HTTP/1.1" 200 238159 "http://www.example.com/activity/" "Mozilla/5.0 (X11; Ubuntu; Linux i686; rv:11.0) Gecko/20100101 Firefox/11.0""#,
    r#"10.1.2.3 - - [18/Mar/2012:00:29:10 -0500] "GET /robots.txt HTTP/1.0" 404 209 "-" "Googlebot/2.1 (+http://www.google.com/bot.html)""#,
];

/// Every standalone directive the compiler understands.
pub const ALL_STANDARD_FORMAT: &str =
    r#"%% %a %A %b %B %D "%f" %h %l %m %p %q "%r" %s %t %T "%u" "%U" "%v" "%V" %X %I %O"#;

pub const ALL_STANDARD_LOG: &[&str] = &[
    r#"% 127.0.0.1 192.168.0.104 418 418 12371 "/var/www/activity/scripts/global.js" 127.0.0.1 - GET 80  "GET /activity/scripts/global.js HTTP/1.1" 200 [24/Mar/2012:22:05:48 -0400] 0 "-" "/activity/scripts/global.js" "www.example.com" "www.example.com" + 100 3540"#,
    r#"% 10.0.0.9 192.168.0.104 - 0 2305811 "/var/www/activity/page2.php" 10.0.0.9 - POST 443 ?variable=7 "POST /activity/page2.php?variable=7 HTTP/1.1" 500 [24/Mar/2012:22:06:01 -0400] 2 "frank" "/activity/page2.php" "www.example.com" "example.com" X 812 0"#,
];

/// Every keyed directive, plus both `%{...}P` spellings.
pub const ALL_SEGMENTED_FORMAT: &str =
    r#""%{foo}C" "%{foo}e" "%{Referer}i" "%{foo}n" "%{Server}o" "%{tid}P" "%{pid}P" "%>s""#;

pub const ALL_SEGMENTED_LOG: &[&str] = &[
    r#""bar" "baz" "http://www.example.com/activity/page2.php?variable=7" "bar" "Apache/2.4.1 (Unix) OpenSSL/1.0.0g" "3052276592" "27654" "200""#,
];

/// A status condition on a request header; only one request carried a referer.
pub const CONDITIONAL_FORMAT: &str = r#""%!200,304,302{Referer}i""#;

pub const CONDITIONAL_LOG: &[&str] = &[
    r#""-""#,
    r#""-""#,
    r#""http://www.example.com/videoViewer/index.php""#,
    r#""-""#,
    r#""-""#,
];

/// Join a corpus into log text with a trailing newline, the way Apache writes it.
pub fn log_text(lines: &[&str]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Generate `n` synthetic `combined` lines for throughput tests.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let status = match i % 10 {
                0 => 404,
                1 | 2 => 304,
                _ => 200,
            };
            format!(
                r#"10.0.{}.{} - - [24/Mar/2012:{:02}:{:02}:{:02} +0000] "GET /item/{} HTTP/1.1" {} {} "-" "bench/1.0""#,
                i / 256 % 256,
                i % 256,
                i / 3600 % 24,
                i / 60 % 60,
                i % 60,
                i,
                status,
                i * 7,
            )
        })
        .collect()
}

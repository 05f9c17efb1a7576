//! Syslog line parser.
//!
//! Matchers are tried strict-to-loose and the first one that matches wins:
//! `kernel` → `full` → `timestamp-only` → fallback (message only).
//! Each matcher is a regex with named groups; anything a matcher does not
//! capture is left as `None`.

use crate::error::NormalizeError;
use crate::timestamp;
use chrono::{DateTime, Utc};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Optional zone abbreviation, `Mon DD HH:MM:SS`, optional milliseconds. The
// milliseconds sit outside the `ts` group and are dropped.
const TS: &str = r"(?:[A-Z]{3,4} )?(?P<ts>[A-Z][a-z]{2} [ \d]?\d \d{2}:\d{2}:\d{2})(?:\.\d{3})?";

/// Name of the matcher that produced a [`SyslogLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Kernel,
    Full,
    TimestampOnly,
    Fallback,
}

impl Matcher {
    pub fn name(self) -> &'static str {
        match self {
            Matcher::Kernel => "kernel",
            Matcher::Full => "full",
            Matcher::TimestampOnly => "timestamp-only",
            Matcher::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One syslog line decomposed into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyslogLine {
    /// `Mon DD HH:MM:SS` exactly as it appeared, without milliseconds.
    pub stamp: Option<String>,
    pub host: Option<String>,
    pub process: Option<String>,
    pub pid: Option<u32>,
    pub message: String,
    pub matcher: Matcher,
}

impl SyslogLine {
    fn from_captures(caps: &Captures<'_>, matcher: Matcher) -> Self {
        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        Self {
            stamp: group("ts"),
            host: group("host"),
            process: group("process"),
            pid: caps.name("pid").and_then(|m| m.as_str().parse().ok()),
            message: group("message").unwrap_or_default(),
            matcher,
        }
    }

    fn fallback(line: &str) -> Self {
        Self {
            stamp: None,
            host: None,
            process: None,
            pid: None,
            message: line.to_string(),
            matcher: Matcher::Fallback,
        }
    }

    /// The line's timestamp with an inferred year, at second precision.
    ///
    /// `None` when the line had no stamp or the stamp does not name a real
    /// date in the inferred year.
    pub fn timestamp(&self, now: DateTime<Utc>) -> Option<String> {
        let stamp = self.stamp.as_deref()?;
        match timestamp::syslog_timestamp(stamp, now) {
            Ok(ts) => Some(timestamp::repair_str(&ts)),
            Err(err) => {
                tracing::debug!(error = %err, "syslog stamp unusable");
                None
            }
        }
    }
}

static MATCHERS: LazyLock<Vec<(Matcher, Regex)>> = LazyLock::new(|| {
    [
        (
            Matcher::Kernel,
            format!(r"^{TS} (?:(?P<host>\S+) )?(?P<process>kernel):(?: (?P<message>.*))?$"),
        ),
        (
            Matcher::Full,
            format!(r"^{TS} (?:(?P<host>\S+) )?(?P<process>[^\[]+)\[(?P<pid>\d+)\]: (?P<message>.*)$"),
        ),
        (Matcher::TimestampOnly, format!(r"^{TS}(?: (?P<message>.*))?$")),
    ]
    .into_iter()
    .map(|(matcher, pattern)| {
        let re = Regex::new(&pattern).expect("built-in syslog pattern must compile");
        (matcher, re)
    })
    .collect()
});

/// Decompose one raw syslog line. Never fails; unmatched lines come back as
/// a message-only [`SyslogLine`].
pub fn parse_line(line: &str) -> SyslogLine {
    let line = line.trim_end_matches(['\r', '\n']);
    MATCHERS
        .iter()
        .find_map(|(matcher, re)| re.captures(line).map(|caps| SyslogLine::from_captures(&caps, *matcher)))
        .unwrap_or_else(|| {
            let err = NormalizeError::SyslogParse(line.to_string());
            tracing::debug!(error = %err, "falling back to message-only line");
            SyslogLine::fallback(line)
        })
}

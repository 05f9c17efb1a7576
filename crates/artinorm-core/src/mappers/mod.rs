//! Per-artifact mappers.
//!
//! Each mapper turns one extractor record into a canonical base document and
//! declares which of the base document's timestamps become expanded events.
//! Field names follow the CSV/JSON output of the EZ tools (LECmd, JLECmd,
//! PECmd, MFTECmd).

pub mod jumplist;
pub mod lnk;
pub mod mft;
pub mod prefetch;
pub mod syslog;

use crate::expand::Association;
use crate::types::{ArtifactKind, Document, Fields, RawRecord};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Per-call context handed to every mapper.
#[derive(Debug, Clone, Copy)]
pub struct MapContext {
    /// Wall-clock "now", used to infer years for syslog lines.
    pub now: DateTime<Utc>,
}

/// A mapper for one artifact kind.
///
/// Implementors must be `Send` and `Sync` so a single registry can be shared
/// by callers that fan records out across threads.
pub trait Mapper: Send + Sync {
    fn kind(&self) -> ArtifactKind;

    fn description(&self) -> &'static str {
        "No description provided."
    }

    /// Build the base document for `record`.
    ///
    /// Returns `None` when the record's payload has the wrong shape for this
    /// mapper (raw text where fields were expected, or the reverse); the
    /// record then passes through unchanged.
    fn map(&self, record: &RawRecord, ctx: &MapContext) -> Option<Document>;

    /// Timestamp → event associations consumed by the expander.
    fn associations(&self) -> &'static [Association] {
        &[]
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// A non-blank string field. Numbers and booleans are rendered as text.
pub(crate) fn string(fields: &Fields, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// An unsigned integer field, accepting numbers, decimal strings and
/// `0x`-prefixed hex strings.
pub(crate) fn unsigned(fields: &Fields, key: &str) -> Option<u64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse_unsigned(s.trim()),
        _ => None,
    }
}

pub(crate) fn parse_unsigned(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Like [`unsigned`], but `0` means "absent". Used for sizes and attribute
/// masks where extractors write `0` instead of leaving the field empty.
pub(crate) fn nonzero(fields: &Fields, key: &str) -> Option<u64> {
    unsigned(fields, key).filter(|&n| n != 0)
}

/// A boolean field, accepting JSON booleans and `True`/`False`/`1`/`0` text.
pub(crate) fn boolean(fields: &Fields, key: &str) -> Option<bool> {
    match fields.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_u64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// A timestamp field, repaired or converted to its canonical string.
pub(crate) fn timestamp(fields: &Fields, key: &str) -> Option<String> {
    crate::timestamp::canonicalize(fields.get(key))
}

/// A `", "`-separated list field. Blank entries are dropped.
pub(crate) fn list(fields: &Fields, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::String(s)) => s
            .split(", ")
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|item| !item.trim().is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// A nested object field.
pub(crate) fn object<'a>(fields: &'a Fields, key: &str) -> Option<&'a Fields> {
    fields.get(key).and_then(Value::as_object)
}

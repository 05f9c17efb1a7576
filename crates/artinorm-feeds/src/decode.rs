//! Line framings.

use crate::error::FeedError;
use artinorm_core::{RawRecord, RecordData};
use serde_json::Value;
use std::borrow::Cow;
use std::io::BufRead;

/// How records are laid out on input lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// One serialized `RawRecord` per line.
    #[default]
    Json,
    /// `<plugin>:<payload>`, payload being a JSON object or raw text.
    Prefixed,
}

impl std::fmt::Display for Framing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Framing::Json => write!(f, "json"),
            Framing::Prefixed => write!(f, "prefixed"),
        }
    }
}

/// Decode one line. Blank lines decode to `Ok(None)`.
///
/// `source_path` fills the record's `path` when the line does not carry one.
pub fn decode_line(framing: Framing, line: &str, source_path: Option<&str>) -> Result<Option<RawRecord>, FeedError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let mut record = match framing {
        Framing::Json => serde_json::from_str::<RawRecord>(line)?,
        Framing::Prefixed => decode_prefixed(line)?,
    };
    if record.path.is_empty() {
        if let Some(path) = source_path {
            record.path = path.to_string();
        }
    }
    Ok(Some(record))
}

fn decode_prefixed(line: &str) -> Result<RawRecord, FeedError> {
    let (plugin, payload) = line.split_once(':').ok_or(FeedError::MissingPlugin)?;
    let plugin = plugin.trim();
    if plugin.is_empty() || plugin.contains(char::is_whitespace) {
        return Err(FeedError::MissingPlugin);
    }

    let trimmed = payload.trim_start();
    if trimmed.is_empty() {
        return Err(FeedError::EmptyLine(plugin.to_string()));
    }

    let data = if trimmed.starts_with('{') {
        match serde_json::from_str::<Value>(trimmed)? {
            Value::Object(fields) => RecordData::Structured(fields),
            // `{` always opens an object; anything else already failed to parse.
            other => RecordData::Text(other.to_string()),
        }
    } else {
        RecordData::Text(payload.to_string())
    };

    Ok(RawRecord {
        path: String::new(),
        plugin: Some(plugin.to_string()),
        mime: None,
        data,
        extra: Default::default(),
    })
}

/// Iterator over the records of a buffered reader.
///
/// Invalid UTF-8 is replaced rather than rejected. A read error ends the
/// iteration after being yielded once.
pub struct RecordReader<R> {
    reader: R,
    framing: Framing,
    source_path: Option<String>,
    line_number: usize,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, framing: Framing) -> Self {
        Self {
            reader,
            framing,
            source_path: None,
            line_number: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// 1-based number of the line most recently read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<RawRecord, FeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_number += 1;
                    let line = String::from_utf8_lossy(&self.buf);
                    if let Cow::Owned(_) = line {
                        tracing::debug!(line = self.line_number, "replaced invalid UTF-8");
                    }
                    match decode_line(self.framing, &line, self.source_path.as_deref()) {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => {
                            tracing::trace!(line = self.line_number, "blank line skipped");
                            continue;
                        }
                        Err(err) => return Some(Err(err)),
                    }
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
        }
        None
    }
}

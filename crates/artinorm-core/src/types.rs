//! Core types for artinorm-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! incoming [`RawRecord`], the [`ArtifactKind`] discriminant, and the typed
//! groups ([`FileGroup`], [`EventGroup`], [`ProcessGroup`], [`LogGroup`]) that
//! mappers use to build canonical documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A canonical document. Every stage of the pipeline works on plain JSON trees.
pub type Document = Value;

/// Structured fields as produced by an upstream extractor.
pub type Fields = Map<String, Value>;

/// One artifact instance as handed over by the extraction collaborator.
///
/// `plugin` names the extractor (`lecmd`, `jlecmd`, `pecmd`, `mftecmd`);
/// `mime` is the classifier's type tag and is serialized as `type`. Any other
/// top-level keys land in `extra` and survive passthrough; mappers ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    pub data: RecordData,
    #[serde(flatten)]
    pub extra: Fields,
}

impl RawRecord {
    pub fn structured(path: impl Into<String>, plugin: impl Into<String>, data: Fields) -> Self {
        Self {
            path: path.into(),
            plugin: Some(plugin.into()),
            mime: None,
            data: RecordData::Structured(data),
            extra: Fields::new(),
        }
    }

    pub fn text(path: impl Into<String>, mime: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            plugin: None,
            mime: Some(mime.into()),
            data: RecordData::Text(line.into()),
            extra: Fields::new(),
        }
    }

    /// The structured fields, or `None` for raw-text records.
    pub fn fields(&self) -> Option<&Fields> {
        match &self.data {
            RecordData::Structured(fields) => Some(fields),
            RecordData::Text(_) => None,
        }
    }

    /// The raw text, or `None` for structured records.
    pub fn text_data(&self) -> Option<&str> {
        match &self.data {
            RecordData::Text(line) => Some(line),
            RecordData::Structured(_) => None,
        }
    }

    /// Serialize the record unchanged. Used for the passthrough path.
    pub fn to_document(&self) -> Document {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Payload of a [`RawRecord`]: extractor fields or one raw text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordData {
    Structured(Fields),
    Text(String),
}

/// The artifact types the pipeline knows how to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Lnk,
    JumplistAutomatic,
    JumplistCustom,
    Mft,
    Prefetch,
    Syslog,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 6] = [
        ArtifactKind::Lnk,
        ArtifactKind::JumplistAutomatic,
        ArtifactKind::JumplistCustom,
        ArtifactKind::Mft,
        ArtifactKind::Prefetch,
        ArtifactKind::Syslog,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ArtifactKind::Lnk => "lnk",
            ArtifactKind::JumplistAutomatic => "jumplist-automatic",
            ArtifactKind::JumplistCustom => "jumplist-custom",
            ArtifactKind::Mft => "mft",
            ArtifactKind::Prefetch => "prefetch",
            ArtifactKind::Syslog => "syslog",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = crate::error::NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArtifactKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| crate::error::NormalizeError::UnrecognizedArtifactType(s.to_string()))
    }
}

/// `file.type` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Dir,
    File,
    Symlink,
}

/// `event.category` vocabulary used by expanded events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    File,
    Process,
}

/// The `file` group of a canonical document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileGroup {
    #[serde(rename = "type")]
    pub file_type: Option<FileType>,
    pub path: Option<String>,
    pub name: Option<String>,
    pub extension: Option<String>,
    pub directory: Option<String>,
    pub size: Option<u64>,
    pub target_path: Option<String>,
}

impl FileGroup {
    /// Fill `path`, `name`, `extension` and `directory` from a Windows or
    /// POSIX style path.
    pub fn from_path(path: &str) -> Self {
        let (directory, name) = match path.rfind(['\\', '/']) {
            Some(idx) => (Some(&path[..idx]), &path[idx + 1..]),
            None => (None, path),
        };
        let extension = name
            .rfind('.')
            .filter(|&idx| idx > 0 && idx + 1 < name.len())
            .map(|idx| name[idx + 1..].to_string());
        Self {
            path: Some(path.to_string()),
            name: Some(name.to_string()),
            extension,
            directory: directory.map(str::to_string),
            ..Default::default()
        }
    }
}

/// The `event` group of a canonical document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventGroup {
    pub kind: Option<String>,
    pub category: Option<EventCategory>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub action: Option<String>,
    pub outcome: Option<String>,
    pub original: Option<String>,
}

/// The `process` group of a canonical document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessGroup {
    pub name: Option<String>,
    pub pid: Option<u32>,
    pub start: Option<String>,
}

/// The `log` group: provenance of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogGroup {
    pub file: LogFile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogFile {
    pub path: Option<String>,
}

impl LogGroup {
    pub fn from_path(path: &str) -> Self {
        Self {
            file: LogFile {
                path: Some(path.to_string()),
            },
        }
    }
}

/// Serialize a typed group into a document node. Groups are plain data, so
/// this only fails on non-string map keys, which none of them have.
pub fn to_node<T: Serialize>(group: &T) -> Value {
    serde_json::to_value(group).unwrap_or(Value::Null)
}

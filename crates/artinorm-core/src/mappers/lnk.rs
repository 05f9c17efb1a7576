//! Shortcut (`.lnk`) mapper.
//!
//! Accepts both LECmd output shapes: the flat CSV-style record
//! (`TargetCreated`, `FileSize`, ...) and the nested JSON record whose target
//! times, size and attributes live under `Header`.

use super::{nonzero, object, parse_unsigned, string, timestamp, MapContext, Mapper};
use crate::error::NormalizeError;
use crate::expand::Association;
use crate::types::{to_node, ArtifactKind, Document, Fields, FileGroup, FileType, LogGroup, RawRecord};
use serde::Serialize;
use serde_json::{json, Value};

/// `FILE_ATTRIBUTE_DIRECTORY`.
pub const ATTRIBUTE_DIRECTORY: u64 = 0x10;

const ATTRIBUTE_NAMES: &[(&str, u64)] = &[
    ("ReadOnly", 0x1),
    ("Hidden", 0x2),
    ("System", 0x4),
    ("Directory", ATTRIBUTE_DIRECTORY),
    ("Archive", 0x20),
    ("Device", 0x40),
    ("Normal", 0x80),
    ("Temporary", 0x100),
    ("SparseFile", 0x200),
    ("ReparsePoint", 0x400),
    ("Compressed", 0x800),
    ("Offline", 0x1000),
    ("NotContentIndexed", 0x2000),
    ("Encrypted", 0x4000),
];

pub(crate) const ASSOCIATIONS: &[Association] = &[
    Association::file("/lnk/target_created", "creation", "file-created"),
    Association::file("/lnk/target_modified", "change", "file-modified"),
    Association::file("/lnk/target_accessed", "access", "file-accessed"),
];

/// The `lnk` namespace of a base document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LnkRecord {
    pub source_file: Option<String>,
    pub source_created: Option<String>,
    pub source_modified: Option<String>,
    pub source_accessed: Option<String>,
    pub target_created: Option<String>,
    pub target_modified: Option<String>,
    pub target_accessed: Option<String>,
    pub file_size: Option<u64>,
    pub file_attributes: Option<u64>,
    pub local_path: Option<String>,
    pub network_path: Option<String>,
    pub common_path: Option<String>,
    pub target_id_absolute_path: Option<String>,
    pub relative_path: Option<String>,
    pub working_directory: Option<String>,
    pub arguments: Option<String>,
    pub drive_type: Option<String>,
    pub volume_serial_number: Option<String>,
    pub volume_label: Option<String>,
    pub machine_id: Option<String>,
    pub machine_mac_address: Option<String>,
    pub tracker_created_on: Option<String>,
}

impl LnkRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        // Nested variant: target metadata under `Header`, top-level otherwise.
        let header = object(fields, "Header").unwrap_or(fields);

        Self {
            source_file: string(fields, "SourceFile"),
            source_created: timestamp(fields, "SourceCreated"),
            source_modified: timestamp(fields, "SourceModified"),
            source_accessed: timestamp(fields, "SourceAccessed"),
            target_created: first_timestamp(header, &["TargetCreated", "TargetCreationDate"]),
            target_modified: first_timestamp(header, &["TargetModified", "TargetModificationDate"]),
            target_accessed: first_timestamp(header, &["TargetAccessed", "TargetLastAccessedDate"]),
            file_size: nonzero(header, "FileSize"),
            file_attributes: attributes(header.get("FileAttributes")).filter(|&a| a != 0),
            local_path: string(fields, "LocalPath"),
            network_path: string(fields, "NetworkPath"),
            common_path: string(fields, "CommonPath"),
            target_id_absolute_path: string(fields, "TargetIDAbsolutePath"),
            relative_path: string(fields, "RelativePath"),
            working_directory: string(fields, "WorkingDirectory"),
            arguments: string(fields, "Arguments"),
            drive_type: string(fields, "DriveType"),
            volume_serial_number: string(fields, "VolumeSerialNumber"),
            volume_label: string(fields, "VolumeLabel"),
            machine_id: string(fields, "MachineID"),
            machine_mac_address: string(fields, "MachineMACAddress"),
            tracker_created_on: timestamp(fields, "TrackerCreatedOn"),
        }
    }

    /// Best available path of the shortcut's target.
    pub fn target_path(&self) -> Option<String> {
        if let Some(local) = &self.local_path {
            return Some(local.clone());
        }
        match (&self.network_path, &self.common_path) {
            (Some(net), Some(common)) => Some(format!("{}\\{}", net.trim_end_matches('\\'), common)),
            (Some(net), None) => Some(net.clone()),
            _ => self.target_id_absolute_path.clone(),
        }
    }

    pub fn file_type(&self) -> FileType {
        match self.file_attributes {
            Some(attrs) if attrs & ATTRIBUTE_DIRECTORY != 0 => FileType::Dir,
            _ => FileType::File,
        }
    }

    /// The `file` group: the shortcut's target.
    pub fn file_group(&self) -> FileGroup {
        let mut file = self
            .target_path()
            .map(|p| FileGroup::from_path(&p))
            .unwrap_or_default();
        file.file_type = Some(self.file_type());
        file.size = self.file_size;
        file.target_path = self.target_id_absolute_path.clone();
        file
    }

    /// Base document for a shortcut found at `path`.
    pub fn document(&self, path: &str) -> Document {
        json!({
            "file": to_node(&self.file_group()),
            "log": to_node(&LogGroup::from_path(path)),
            "lnk": to_node(self),
        })
    }
}

fn first_timestamp(fields: &Fields, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| timestamp(fields, key))
}

/// Decode a file attribute mask from a number, a numeric string, or a
/// `|`-separated flag list (`FileAttributeDirectory|FileAttributeArchive`).
pub fn attributes(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => parse_unsigned(s.trim()).or_else(|| Some(flag_mask(s))),
        _ => None,
    }
}

fn flag_mask(flags: &str) -> u64 {
    flags
        .split(['|', ','])
        .map(|flag| {
            flag.trim()
                .trim_start_matches("FileAttribute")
                .trim_start_matches("FILE_ATTRIBUTE_")
                .replace('_', "")
        })
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let bit = ATTRIBUTE_NAMES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(&name))
                .map(|(_, bit)| *bit);
            if bit.is_none() {
                let err = NormalizeError::InvalidField {
                    field: "FileAttributes".to_string(),
                    reason: format!("unknown attribute flag {name:?}"),
                };
                tracing::debug!(error = %err, "ignoring attribute flag");
            }
            bit
        })
        .fold(0, |mask, bit| mask | bit)
}

/// Mapper for LECmd records.
#[derive(Debug, Default)]
pub struct LnkMapper;

impl Mapper for LnkMapper {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Lnk
    }

    fn description(&self) -> &'static str {
        "Windows shortcut files (LECmd, flat or nested output)."
    }

    fn map(&self, record: &RawRecord, _ctx: &MapContext) -> Option<Document> {
        let lnk = LnkRecord::from_fields(record.fields()?);
        Some(lnk.document(&record.path))
    }

    fn associations(&self) -> &'static [Association] {
        ASSOCIATIONS
    }
}

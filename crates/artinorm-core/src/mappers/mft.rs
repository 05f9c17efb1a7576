//! MFT entry mapper (MFTECmd).
//!
//! Standard-information (`0x10`) times drive the events; file-name (`0x30`)
//! times are kept in the namespace for timestomp review.

use super::{boolean, nonzero, string, timestamp, unsigned, MapContext, Mapper};
use crate::expand::Association;
use crate::types::{to_node, ArtifactKind, Document, Fields, FileGroup, FileType, LogGroup, RawRecord};
use serde::Serialize;
use serde_json::json;

const ASSOCIATIONS: &[Association] = &[
    Association::file("/mft/mtime", "change", "file-modified"),
    Association::file("/mft/created", "creation", "file-created"),
    Association::file("/mft/ctime", "change", "file-meta-changed"),
    Association::file("/mft/accessed", "access", "file-accessed"),
];

/// The `mft` namespace of a base document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MftRecord {
    pub entry_number: Option<u64>,
    pub sequence_number: Option<u64>,
    pub parent_entry_number: Option<u64>,
    pub parent_sequence_number: Option<u64>,
    pub in_use: Option<bool>,
    pub is_directory: Option<bool>,
    pub has_ads: Option<bool>,
    pub is_ads: Option<bool>,
    /// `SI<FN`: standard-information created earlier than file-name created.
    pub timestomped: Option<bool>,
    pub usec_zeros: Option<bool>,
    pub copied: Option<bool>,
    pub si_flags: Option<String>,
    pub name_type: Option<String>,
    pub created: Option<String>,
    pub mtime: Option<String>,
    pub ctime: Option<String>,
    pub accessed: Option<String>,
    pub fn_created: Option<String>,
    pub fn_mtime: Option<String>,
    pub fn_ctime: Option<String>,
    pub fn_accessed: Option<String>,
}

impl MftRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            entry_number: unsigned(fields, "EntryNumber"),
            sequence_number: unsigned(fields, "SequenceNumber"),
            parent_entry_number: unsigned(fields, "ParentEntryNumber"),
            parent_sequence_number: unsigned(fields, "ParentSequenceNumber"),
            in_use: boolean(fields, "InUse"),
            is_directory: boolean(fields, "IsDirectory"),
            has_ads: boolean(fields, "HasAds"),
            is_ads: boolean(fields, "IsAds"),
            timestomped: boolean(fields, "SI<FN"),
            usec_zeros: boolean(fields, "uSecZeros"),
            copied: boolean(fields, "Copied"),
            si_flags: string(fields, "SiFlags"),
            name_type: string(fields, "NameType"),
            created: timestamp(fields, "Created0x10"),
            mtime: timestamp(fields, "LastModified0x10"),
            ctime: timestamp(fields, "LastRecordChange0x10"),
            accessed: timestamp(fields, "LastAccess0x10"),
            fn_created: timestamp(fields, "Created0x30"),
            fn_mtime: timestamp(fields, "LastModified0x30"),
            fn_ctime: timestamp(fields, "LastRecordChange0x30"),
            fn_accessed: timestamp(fields, "LastAccess0x30"),
        }
    }
}

/// `parent\name`, without doubling a separator the parent already ends with.
pub fn compose_path(parent: Option<&str>, name: Option<&str>) -> Option<String> {
    match (parent, name) {
        (Some(parent), Some(name)) if parent.ends_with('\\') => Some(format!("{parent}{name}")),
        (Some(parent), Some(name)) => Some(format!("{parent}\\{name}")),
        (None, Some(name)) => Some(name.to_string()),
        (Some(parent), None) => Some(parent.to_string()),
        (None, None) => None,
    }
}

fn file_group(fields: &Fields, mft: &MftRecord) -> FileGroup {
    let parent = string(fields, "ParentPath");
    let name = string(fields, "FileName");
    let mut file = compose_path(parent.as_deref(), name.as_deref())
        .map(|p| FileGroup::from_path(&p))
        .unwrap_or_default();
    // The extractor's idea of the parent wins over splitting the joined path.
    if parent.is_some() {
        file.directory = parent;
    }
    if let Some(ext) = string(fields, "Extension") {
        file.extension = Some(ext.trim_start_matches('.').to_string()).filter(|e| !e.is_empty());
    }
    file.file_type = Some(if mft.is_directory == Some(true) {
        FileType::Dir
    } else {
        FileType::File
    });
    file.size = nonzero(fields, "FileSize");
    file
}

/// Mapper for MFTECmd records.
#[derive(Debug, Default)]
pub struct MftMapper;

impl Mapper for MftMapper {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Mft
    }

    fn description(&self) -> &'static str {
        "NTFS Master File Table entries (MFTECmd)."
    }

    fn map(&self, record: &RawRecord, _ctx: &MapContext) -> Option<Document> {
        let fields = record.fields()?;
        let mft = MftRecord::from_fields(fields);
        Some(json!({
            "file": to_node(&file_group(fields, &mft)),
            "log": to_node(&LogGroup::from_path(&record.path)),
            "mft": to_node(&mft),
        }))
    }

    fn associations(&self) -> &'static [Association] {
        ASSOCIATIONS
    }
}

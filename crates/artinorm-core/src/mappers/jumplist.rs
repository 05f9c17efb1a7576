//! Jumplist mappers (JLECmd).
//!
//! Both destination-list flavours embed a shortcut; the base document is the
//! embedded shortcut's document plus a `jumplist` namespace, and expansion
//! reuses the shortcut associations. When no `Lnk` object is present the
//! shortcut fields are read from the record itself (JLECmd's flat CSV rows).

use super::lnk::{self, LnkRecord};
use super::{boolean, object, string, timestamp, unsigned, MapContext, Mapper};
use crate::expand::Association;
use crate::types::{to_node, ArtifactKind, Document, Fields, RawRecord};
use serde::Serialize;

const AUTOMATIC_SUFFIX: &str = ".automaticdestinations-ms";
const CUSTOM_SUFFIX: &str = ".customdestinations-ms";

/// The `jumplist` namespace of a base document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JumplistRecord {
    pub kind: &'static str,
    pub source_file: Option<String>,
    pub app_id: Option<String>,
    pub app_description: Option<String>,
    pub created: Option<String>,
    pub last_modified: Option<String>,
    pub rank: Option<u64>,
    pub name: Option<String>,
    pub entry_number: Option<u64>,
    pub hostname: Option<String>,
    pub pinned: Option<bool>,
    pub interaction_count: Option<u64>,
}

/// Which destination list a JLECmd record came from, judged from its source
/// file name, then from the fields only one flavour carries.
pub fn variant(fields: &Fields) -> ArtifactKind {
    let source = string(fields, "SourceFile").map(|s| s.to_ascii_lowercase());
    match source.as_deref() {
        Some(s) if s.ends_with(AUTOMATIC_SUFFIX) => ArtifactKind::JumplistAutomatic,
        Some(s) if s.ends_with(CUSTOM_SUFFIX) => ArtifactKind::JumplistCustom,
        _ if ["CreatedOn", "MRUPosition", "DestListVersion"]
            .iter()
            .any(|k| fields.contains_key(*k)) =>
        {
            ArtifactKind::JumplistAutomatic
        }
        _ if fields.contains_key("Rank") => ArtifactKind::JumplistCustom,
        _ => ArtifactKind::JumplistAutomatic,
    }
}

fn embedded_lnk(fields: &Fields) -> LnkRecord {
    LnkRecord::from_fields(object(fields, "Lnk").unwrap_or(fields))
}

fn document(record: &RawRecord, jumplist: &JumplistRecord, lnk: &LnkRecord) -> Document {
    let mut doc = lnk.document(&record.path);
    if let Some(map) = doc.as_object_mut() {
        map.insert("jumplist".to_string(), to_node(jumplist));
    }
    doc
}

/// Mapper for `*.automaticDestinations-ms` entries.
#[derive(Debug, Default)]
pub struct AutomaticMapper;

impl Mapper for AutomaticMapper {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::JumplistAutomatic
    }

    fn description(&self) -> &'static str {
        "Automatic destination jumplist entries (JLECmd)."
    }

    fn map(&self, record: &RawRecord, _ctx: &MapContext) -> Option<Document> {
        let fields = record.fields()?;
        let jumplist = JumplistRecord {
            kind: "automatic",
            source_file: string(fields, "SourceFile"),
            app_id: string(fields, "AppId"),
            app_description: string(fields, "AppIdDescription"),
            created: timestamp(fields, "CreatedOn"),
            last_modified: timestamp(fields, "LastModified"),
            rank: unsigned(fields, "MRUPosition"),
            name: string(fields, "Path"),
            entry_number: unsigned(fields, "EntryNumber"),
            hostname: string(fields, "Hostname"),
            pinned: boolean(fields, "Pinned"),
            interaction_count: unsigned(fields, "InteractionCount"),
        };
        Some(document(record, &jumplist, &embedded_lnk(fields)))
    }

    fn associations(&self) -> &'static [Association] {
        lnk::ASSOCIATIONS
    }
}

/// Mapper for `*.customDestinations-ms` entries.
#[derive(Debug, Default)]
pub struct CustomMapper;

impl Mapper for CustomMapper {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::JumplistCustom
    }

    fn description(&self) -> &'static str {
        "Custom destination jumplist entries (JLECmd)."
    }

    fn map(&self, record: &RawRecord, _ctx: &MapContext) -> Option<Document> {
        let fields = record.fields()?;
        let jumplist = JumplistRecord {
            kind: "custom",
            source_file: string(fields, "SourceFile"),
            app_id: string(fields, "AppId"),
            rank: unsigned(fields, "Rank"),
            name: string(fields, "Name"),
            ..Default::default()
        };
        Some(document(record, &jumplist, &embedded_lnk(fields)))
    }

    fn associations(&self) -> &'static [Association] {
        lnk::ASSOCIATIONS
    }
}

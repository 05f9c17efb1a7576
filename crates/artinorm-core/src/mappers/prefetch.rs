//! Prefetch mapper (PECmd).
//!
//! Every recorded run becomes a `process-start` event.

use super::{list, nonzero, string, timestamp, unsigned, MapContext, Mapper};
use crate::expand::Association;
use crate::types::{to_node, ArtifactKind, Document, Fields, FileGroup, LogGroup, ProcessGroup, RawRecord};
use serde::Serialize;
use serde_json::json;

/// PECmd keeps the last run plus up to this many earlier ones.
pub const PREVIOUS_RUNS: usize = 7;

/// PECmd lists at most this many referenced volumes.
pub const VOLUMES: usize = 5;

const ASSOCIATIONS: &[Association] = &[Association::process_each("/prefetch/runs", "start", "process-start")];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Volume {
    pub created: String,
    pub name: Option<String>,
    pub serial: Option<String>,
}

/// The `prefetch` namespace of a base document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrefetchRecord {
    pub executable: Option<String>,
    pub hash: Option<String>,
    pub size: Option<u64>,
    pub version: Option<String>,
    pub run_count: Option<u64>,
    /// Last run first, then previous runs in order. Missing runs are dropped.
    pub runs: Vec<String>,
    pub volumes: Vec<Volume>,
    pub directories: Vec<String>,
    pub files_loaded: Vec<String>,
    pub source_created: Option<String>,
    pub source_modified: Option<String>,
    pub source_accessed: Option<String>,
}

impl PrefetchRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        let runs = std::iter::once("LastRun".to_string())
            .chain((0..PREVIOUS_RUNS).map(|i| format!("PreviousRun{i}")))
            .filter_map(|key| timestamp(fields, &key))
            .collect();

        // Only volumes with a creation time are kept.
        let volumes = (0..VOLUMES)
            .filter_map(|i| {
                Some(Volume {
                    created: timestamp(fields, &format!("Volume{i}Created"))?,
                    name: string(fields, &format!("Volume{i}Name")),
                    serial: string(fields, &format!("Volume{i}Serial")),
                })
            })
            .collect();

        Self {
            executable: string(fields, "ExecutableName"),
            hash: string(fields, "Hash"),
            size: nonzero(fields, "Size"),
            version: string(fields, "Version"),
            run_count: unsigned(fields, "RunCount"),
            runs,
            volumes,
            directories: list(fields, "Directories"),
            files_loaded: list(fields, "FilesLoaded"),
            source_created: timestamp(fields, "SourceCreated"),
            source_modified: timestamp(fields, "SourceModified"),
            source_accessed: timestamp(fields, "SourceAccessed"),
        }
    }
}

/// Mapper for PECmd records.
#[derive(Debug, Default)]
pub struct PrefetchMapper;

impl Mapper for PrefetchMapper {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Prefetch
    }

    fn description(&self) -> &'static str {
        "Windows prefetch execution records (PECmd)."
    }

    fn map(&self, record: &RawRecord, _ctx: &MapContext) -> Option<Document> {
        let fields = record.fields()?;
        let prefetch = PrefetchRecord::from_fields(fields);

        let pf_path = string(fields, "SourceFilename").unwrap_or_else(|| record.path.clone());
        let mut file = FileGroup::from_path(&pf_path);
        file.size = prefetch.size;

        let process = ProcessGroup {
            name: prefetch.executable.clone(),
            ..Default::default()
        };

        Some(json!({
            "file": to_node(&file),
            "process": to_node(&process),
            "log": to_node(&LogGroup::from_path(&record.path)),
            "prefetch": to_node(&prefetch),
        }))
    }

    fn associations(&self) -> &'static [Association] {
        ASSOCIATIONS
    }
}

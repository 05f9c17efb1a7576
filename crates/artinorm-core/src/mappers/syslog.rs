//! Syslog mapper: one document per line, no expansion.

use super::{MapContext, Mapper};
use crate::syslog::parse_line;
use crate::types::{to_node, ArtifactKind, Document, EventGroup, LogGroup, ProcessGroup, RawRecord};
use serde_json::{json, Value};

/// Mapper for raw syslog text lines.
#[derive(Debug, Default)]
pub struct SyslogMapper;

impl SyslogMapper {
    // Structured syslog records (already split upstream) carry the raw line
    // under `line` or `message`.
    fn line(record: &RawRecord) -> Option<&str> {
        record.text_data().or_else(|| {
            let fields = record.fields()?;
            fields
                .get("line")
                .or_else(|| fields.get("message"))
                .and_then(Value::as_str)
        })
    }
}

impl Mapper for SyslogMapper {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Syslog
    }

    fn description(&self) -> &'static str {
        "Raw syslog text lines."
    }

    fn map(&self, record: &RawRecord, ctx: &MapContext) -> Option<Document> {
        let raw = Self::line(record)?;
        let line = parse_line(raw);

        let event = EventGroup {
            kind: Some("event".to_string()),
            original: Some(raw.trim_end_matches(['\r', '\n']).to_string()),
            ..Default::default()
        };
        let process = ProcessGroup {
            name: line.process.clone(),
            pid: line.pid,
            ..Default::default()
        };
        let mut log = to_node(&LogGroup::from_path(&record.path));
        if let Some(map) = log.as_object_mut() {
            map.insert("syslog".to_string(), json!({ "matcher": line.matcher.name() }));
        }

        Some(json!({
            "@timestamp": line.timestamp(ctx.now),
            "message": line.message,
            "host": { "hostname": line.host },
            "process": to_node(&process),
            "event": to_node(&event),
            "log": log,
        }))
    }
}

//! Event expander.
//!
//! Slices a base document into one event per available timestamp. Which
//! timestamps exist, and what each one means, is declared by the mapper as a
//! table of [`Association`]s; this module holds the only expansion routine.

use crate::types::{to_node, Document, EventCategory, EventGroup};
use serde_json::{Map, Value};

/// Groups of the base document copied onto every expanded event.
pub const SHARED_GROUPS: [&str; 3] = ["file", "process", "log"];

/// Where an association finds its timestamp(s) in the base document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampSource {
    /// A single timestamp at this JSON pointer.
    Field(&'static str),
    /// A sequence of timestamps at this JSON pointer; one event per element.
    Each(&'static str),
}

/// One timestamp → event mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association {
    pub source: TimestampSource,
    pub category: EventCategory,
    pub event_type: &'static str,
    pub action: &'static str,
}

impl Association {
    pub const fn file(pointer: &'static str, event_type: &'static str, action: &'static str) -> Self {
        Self {
            source: TimestampSource::Field(pointer),
            category: EventCategory::File,
            event_type,
            action,
        }
    }

    pub const fn process_each(pointer: &'static str, event_type: &'static str, action: &'static str) -> Self {
        Self {
            source: TimestampSource::Each(pointer),
            category: EventCategory::Process,
            event_type,
            action,
        }
    }

    fn timestamps<'a>(&self, base: &'a Document) -> Vec<&'a str> {
        let non_blank = |v: &'a Value| v.as_str().filter(|s| !s.trim().is_empty());
        match self.source {
            TimestampSource::Field(pointer) => base.pointer(pointer).and_then(non_blank).into_iter().collect(),
            TimestampSource::Each(pointer) => base
                .pointer(pointer)
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(non_blank).collect())
                .unwrap_or_default(),
        }
    }
}

/// Expand `base` into its timestamped events, in association order.
///
/// Associations whose timestamp is absent are skipped silently.
pub fn expand(base: &Document, associations: &[Association]) -> Vec<Document> {
    associations
        .iter()
        .flat_map(|assoc| {
            assoc
                .timestamps(base)
                .into_iter()
                .map(move |ts| build_event(base, assoc, ts))
        })
        .collect()
}

fn build_event(base: &Document, assoc: &Association, ts: &str) -> Document {
    let mut doc = Map::new();
    for group in SHARED_GROUPS {
        if let Some(value) = base.get(group) {
            doc.insert(group.to_string(), value.clone());
        }
    }
    doc.insert("@timestamp".to_string(), Value::String(ts.to_string()));
    doc.insert(
        "event".to_string(),
        to_node(&EventGroup {
            kind: Some("event".to_string()),
            category: Some(assoc.category),
            event_type: Some(assoc.event_type.to_string()),
            action: Some(assoc.action.to_string()),
            outcome: Some("success".to_string()),
            original: None,
        }),
    );

    if assoc.category == EventCategory::Process {
        let process = doc
            .entry("process")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(process) = process {
            process.insert("start".to_string(), Value::String(ts.to_string()));
        }
    }

    Value::Object(doc)
}

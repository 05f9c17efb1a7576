//! Test builders: ergonomic constructors for records and pipelines.
//!
//! These are for readability in tests, not for production use. They panic on
//! invalid input rather than returning `Result`.

use artinorm_core::{Config, FixedClock, Pipeline, RawRecord, RecordData};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

/// The instant every test pipeline believes it is.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

/// A pipeline over the built-in defaults and [`test_now`].
pub fn test_pipeline() -> Pipeline {
    pipeline_with(Config::defaults())
}

pub fn pipeline_with(config: Config) -> Pipeline {
    Pipeline::new(&config)
        .expect("test config must be valid")
        .with_clock(FixedClock(test_now()))
}

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] fixtures.
///
/// # Example
///
/// ```rust
/// let rec = RecordBuilder::plugin("pecmd")
///     .path("C:\\Windows\\Prefetch\\CMD.EXE-0BD30981.pf")
///     .field("ExecutableName", "CMD.EXE")
///     .build();
/// ```
pub struct RecordBuilder {
    path: String,
    plugin: Option<String>,
    mime: Option<String>,
    fields: Map<String, Value>,
    text: Option<String>,
}

impl RecordBuilder {
    pub fn plugin(plugin: impl Into<String>) -> Self {
        Self {
            path: "/case/evidence".to_string(),
            plugin: Some(plugin.into()),
            mime: None,
            fields: Map::new(),
            text: None,
        }
    }

    pub fn mime(mime: impl Into<String>) -> Self {
        Self {
            path: "/case/evidence".to_string(),
            plugin: None,
            mime: Some(mime.into()),
            fields: Map::new(),
            text: None,
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Replace all fields with the members of a JSON object.
    pub fn fields(mut self, value: Value) -> Self {
        self.fields = value.as_object().cloned().expect("fields must be a JSON object");
        self
    }

    /// Make this a raw-text record.
    pub fn text(mut self, line: impl Into<String>) -> Self {
        self.text = Some(line.into());
        self
    }

    pub fn build(self) -> RawRecord {
        RawRecord {
            path: self.path,
            plugin: self.plugin,
            mime: self.mime,
            data: match self.text {
                Some(line) => RecordData::Text(line),
                None => RecordData::Structured(self.fields),
            },
            extra: Default::default(),
        }
    }
}

/// A syslog text record as the classifier hands it over.
pub fn syslog_record(line: &str) -> RawRecord {
    RecordBuilder::mime("application/syslog")
        .path("/var/log/syslog")
        .text(line)
        .build()
}

//! Record pipeline: dispatch, map, expand, normalize.

use crate::config::{Config, ConfigError};
use crate::dispatch::{build_registry, Dispatcher};
use crate::expand::expand;
use crate::mappers::{MapContext, Mapper};
use crate::prune::finalize;
use crate::types::{Document, RawRecord};
use chrono::{DateTime, Utc};

/// Source of "now" for syslog year inference.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct Pipeline {
    dispatcher: Dispatcher,
    default_timestamp: String,
    emit_base: bool,
    clock: Box<dyn Clock>,
}

impl Pipeline {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let dispatcher = Dispatcher::new(build_registry(), config.alias_kinds()?, config.syslog.mime.clone());
        for (kind, mapper) in dispatcher.registry() {
            tracing::debug!(kind = %kind, description = mapper.description(), "mapper registered");
        }
        Ok(Self {
            dispatcher,
            default_timestamp: config.output.default_timestamp.clone(),
            emit_base: config.output.emit_base,
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Normalize one record into its output documents.
    ///
    /// Mapped records yield the base document followed by one event per
    /// associated timestamp. Unrecognized records yield themselves.
    pub fn process(&self, record: &RawRecord) -> Vec<Document> {
        let mut docs = match self.dispatcher.route(record) {
            Some(mapper) => self.map(mapper, record),
            None => {
                tracing::debug!(path = %record.path, plugin = ?record.plugin, mime = ?record.mime, "passthrough");
                vec![record.to_document()]
            }
        };
        for doc in &mut docs {
            finalize(doc, &self.default_timestamp);
        }
        docs
    }

    fn map(&self, mapper: &dyn Mapper, record: &RawRecord) -> Vec<Document> {
        let ctx = MapContext { now: self.clock.now() };
        let Some(base) = mapper.map(record, &ctx) else {
            tracing::debug!(kind = %mapper.kind(), path = %record.path, "payload shape not handled, passing through");
            return vec![record.to_document()];
        };

        let associations = mapper.associations();
        let events = expand(&base, associations);
        tracing::trace!(kind = %mapper.kind(), events = events.len(), "expanded");

        let mut docs = Vec::with_capacity(events.len() + 1);
        if self.emit_base || associations.is_empty() {
            docs.push(base);
        }
        docs.extend(events);
        docs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn pipeline() -> Pipeline {
        Pipeline::new(&Config::defaults())
            .unwrap()
            .with_clock(FixedClock(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()))
    }

    fn structured(plugin: &str, data: Value) -> RawRecord {
        RawRecord::structured("/case/evidence", plugin, data.as_object().cloned().unwrap())
    }

    #[test]
    fn prefetch_yields_base_then_one_event() {
        let rec = structured(
            "pecmd",
            json!({
                "ExecutableName": "NOTEPAD.EXE",
                "SourceFilename": "C:\\Windows\\Prefetch\\NOTEPAD.EXE-D8414F97.pf",
                "LastRun": "2021-03-04T10:11:12.1234567Z",
            }),
        );
        let docs = pipeline().process(&rec);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["@timestamp"], "0001-01-01T00:00:00.000Z");
        assert_eq!(docs[1]["@timestamp"], "2021-03-04T10:11:12.123Z");
        assert_eq!(docs[1]["event"]["action"], "process-start");
        assert_eq!(docs[1]["process"]["name"], "NOTEPAD.EXE");
        assert_eq!(docs[1]["process"]["start"], "2021-03-04T10:11:12.123Z");
        assert!(docs[1].get("prefetch").is_none());
    }

    #[test]
    fn mft_yields_base_plus_four() {
        let rec = structured(
            "mftecmd",
            json!({
                "ParentPath": ".\\Windows",
                "FileName": "x.dll",
                "Created0x10": "2020-01-01T00:00:00.0000000+00:00",
                "LastModified0x10": "2020-01-02T00:00:00.0000000+00:00",
                "LastRecordChange0x10": "2020-01-03T00:00:00.0000000+00:00",
                "LastAccess0x10": "2020-01-04T00:00:00.0000000+00:00",
            }),
        );
        assert_eq!(pipeline().process(&rec).len(), 5);
    }

    #[test]
    fn unknown_plugin_passes_through() {
        let rec = structured("foo", json!({"a": 1, "b": ""}));
        let docs = pipeline().process(&rec);
        assert_eq!(
            docs,
            vec![json!({
                "@timestamp": "0001-01-01T00:00:00.000Z",
                "path": "/case/evidence",
                "plugin": "foo",
                "data": {"a": 1},
            })]
        );
    }

    #[test]
    fn base_can_be_suppressed() {
        let mut config = Config::defaults();
        config.output.emit_base = false;
        let pipeline = Pipeline::new(&config).unwrap();
        let rec = structured("pecmd", json!({"LastRun": "2021-03-04T10:11:12.000Z"}));
        let docs = pipeline.process(&rec);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["event"]["action"], "process-start");

        let syslog = RawRecord::text("/var/log/syslog", "application/syslog", "Jan  5 01:02:03 h cron[1]: x");
        assert_eq!(pipeline.process(&syslog).len(), 1);
    }

    #[test]
    fn syslog_uses_clock_for_year() {
        let rec = RawRecord::text("/var/log/syslog", "application/syslog", "Dec 31 23:59:59 h kernel: boom");
        let docs = pipeline().process(&rec);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["@timestamp"], "2023-12-31T23:59:59");
    }

    #[test]
    fn bad_alias_fails_construction() {
        let mut config = Config::defaults();
        config.aliases.insert("x".into(), "nope".into());
        assert!(matches!(Pipeline::new(&config), Err(ConfigError::UnknownAliasKind { .. })));
    }
}

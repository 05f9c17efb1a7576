//! Dispatcher: routes records to mappers.
//!
//! A record is classified by its MIME tag first, then by its plugin tag, then
//! by the configured aliases. Records nobody claims pass through untouched.

use crate::mappers::{jumplist, lnk, mft, prefetch, syslog, Mapper};
use crate::types::{ArtifactKind, RawRecord};
use phf::phf_map;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub type Registry = HashMap<ArtifactKind, Arc<dyn Mapper>>;

/// What a plugin tag says about its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PluginTag {
    Kind(ArtifactKind),
    /// JLECmd emits both jumplist flavours; the record decides.
    Jumplist,
}

static PLUGIN_TAGS: phf::Map<&'static str, PluginTag> = phf_map! {
    "lecmd" => PluginTag::Kind(ArtifactKind::Lnk),
    "jlecmd" => PluginTag::Jumplist,
    "pecmd" => PluginTag::Kind(ArtifactKind::Prefetch),
    "mftecmd" => PluginTag::Kind(ArtifactKind::Mft),
    "syslog" => PluginTag::Kind(ArtifactKind::Syslog),
};

static MIME_TYPES: phf::Map<&'static str, ArtifactKind> = phf_map! {
    "application/x-ms-shortcut" => ArtifactKind::Lnk,
    "application/x-ms-jumplist-automatic" => ArtifactKind::JumplistAutomatic,
    "application/x-ms-jumplist-custom" => ArtifactKind::JumplistCustom,
    "application/x-ms-prefetch" => ArtifactKind::Prefetch,
    "application/x-ms-mft" => ArtifactKind::Mft,
};

/// Every built-in mapper, keyed by the kind it handles.
pub fn build_registry() -> Registry {
    let mappers: [Arc<dyn Mapper>; 6] = [
        Arc::new(lnk::LnkMapper),
        Arc::new(jumplist::AutomaticMapper),
        Arc::new(jumplist::CustomMapper),
        Arc::new(mft::MftMapper),
        Arc::new(prefetch::PrefetchMapper),
        Arc::new(syslog::SyslogMapper),
    ];
    mappers.into_iter().map(|m| (m.kind(), m)).collect()
}

pub struct Dispatcher {
    registry: Registry,
    aliases: BTreeMap<String, ArtifactKind>,
    syslog_mime: String,
}

impl Dispatcher {
    pub fn new(registry: Registry, aliases: BTreeMap<String, ArtifactKind>, syslog_mime: impl Into<String>) -> Self {
        Self {
            registry,
            aliases,
            syslog_mime: syslog_mime.into(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Decide which artifact kind `record` is, if any.
    pub fn classify(&self, record: &RawRecord) -> Option<ArtifactKind> {
        if let Some(mime) = record.mime.as_deref() {
            let mime = mime.trim().to_ascii_lowercase();
            if mime == self.syslog_mime.to_ascii_lowercase() {
                return Some(ArtifactKind::Syslog);
            }
            if let Some(kind) = MIME_TYPES.get(mime.as_str()) {
                return Some(*kind);
            }
        }

        let plugin = record.plugin.as_deref()?.trim().to_ascii_lowercase();
        match PLUGIN_TAGS.get(plugin.as_str()) {
            Some(PluginTag::Kind(kind)) => Some(*kind),
            Some(PluginTag::Jumplist) => Some(record.fields().map_or(ArtifactKind::JumplistAutomatic, jumplist::variant)),
            None => self.aliases.get(&plugin).copied(),
        }
    }

    /// The mapper for `record`, or `None` for passthrough.
    pub fn route(&self, record: &RawRecord) -> Option<&dyn Mapper> {
        let kind = self.classify(record)?;
        self.registry.get(&kind).map(|m| m.as_ref())
    }
}

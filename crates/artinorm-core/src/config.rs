//! Configuration types for artinorm.
//!
//! [`Config::load`] layers an optional user file and `ARTINORM__*` environment
//! variables on top of the embedded defaults. [`Config::defaults`] returns the
//! same defaults without touching the filesystem (useful in tests).

use crate::types::ArtifactKind;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
default_timestamp = "0001-01-01T00:00:00.000Z"
emit_base         = true

[syslog]
mime = "application/syslog"

[aliases]
"#;

const ENV_PREFIX: &str = "ARTINORM";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("alias {alias:?} names unknown artifact kind {kind:?}")]
    UnknownAliasKind { alias: String, kind: String },
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub syslog: SyslogConfig,
    /// Extra plugin tags, mapped to artifact kind names (`lnk`, `mft`, ...).
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Written to `@timestamp` when a document has none.
    #[serde(default = "default_timestamp")]
    pub default_timestamp: String,
    /// Emit the base record ahead of its expanded events.
    #[serde(default = "default_emit_base")]
    pub emit_base: bool,
}

fn default_timestamp() -> String { "0001-01-01T00:00:00.000Z".to_string() }
fn default_emit_base() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_timestamp: default_timestamp(),
            emit_base: default_emit_base(),
        }
    }
}

/// `[syslog]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SyslogConfig {
    /// MIME tag the classifier uses for syslog text.
    #[serde(default = "default_syslog_mime")]
    pub mime: String,
}

fn default_syslog_mime() -> String { "application/syslog".to_string() }

impl Default for SyslogConfig {
    fn default() -> Self {
        Self { mime: default_syslog_mime() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration, layered on top of the built-in defaults.
    ///
    /// `path` wins over the per-user file; a missing per-user file is not an
    /// error, a missing explicit `path` is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let user_file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::from(config_path().as_path()).required(false),
        };

        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(user_file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Resolved aliases. Fails on the first alias naming an unknown kind.
    pub fn alias_kinds(&self) -> Result<BTreeMap<String, ArtifactKind>, ConfigError> {
        self.aliases
            .iter()
            .map(|(alias, kind)| {
                kind.parse::<ArtifactKind>()
                    .map(|k| (alias.clone(), k))
                    .map_err(|_| ConfigError::UnknownAliasKind {
                        alias: alias.clone(),
                        kind: kind.clone(),
                    })
            })
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.alias_kinds().map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("artinorm")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

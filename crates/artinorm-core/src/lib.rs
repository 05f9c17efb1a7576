//! artinorm-core: forensic artifact normalization.
//!
//! Turns extractor records (shortcuts, jump lists, prefetch, MFT entries) and
//! raw syslog lines into flat, ECS-shaped timeline documents.
//!
//! # Architecture
//!
//! ```text
//! RawRecord ──► Dispatcher ──► Mapper ──► base document ──► Expander ──► events
//!                   │                           │                          │
//!                   └──► passthrough            └──────────► Output normalizer
//! ```
//!
//! [`Pipeline`] wires the stages together; each stage is also usable on its
//! own.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod expand;
pub mod mappers;
pub mod pipeline;
pub mod prune;
pub mod syslog;
pub mod timestamp;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::NormalizeError;
pub use pipeline::{Clock, FixedClock, Pipeline, SystemClock};
pub use types::{ArtifactKind, Document, Fields, RawRecord, RecordData};

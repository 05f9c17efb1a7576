//! artinorm-feeds: record decoders for artinorm.
//!
//! Turns line-oriented input into [`artinorm_core::RawRecord`]s. Two framings
//! are supported: one JSON record per line, and the `<plugin>:<payload>` lines
//! written by the extraction plugin runner.

pub mod decode;
pub mod error;

pub use decode::{decode_line, Framing, RecordReader};
pub use error::FeedError;

//! artinorm: forensic artifact normalizer.
//!
//! Reads extractor records line by line, normalizes each one through
//! [`artinorm_core::Pipeline`], and writes the resulting documents as JSON
//! lines. The run loop lives here so the binary and the integration tests
//! drive exactly the same code.
//!
//! # Architecture
//!
//! ```text
//! input ──► RecordReader ──► Pipeline ──► JSONL writer
//!               │
//!               └──► skipped (logged)
//! ```

use anyhow::Context;
use artinorm_core::Pipeline;
use artinorm_feeds::{FeedError, Framing, RecordReader};
use std::io::{BufRead, Write};

/// How the input is read.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub framing: Framing,
    /// Applied to every record that does not carry its own path.
    pub source_path: Option<String>,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records decoded and normalized.
    pub records: usize,
    /// Documents written.
    pub documents: usize,
    /// Input lines that could not be decoded.
    pub skipped: usize,
}

/// Normalize every record of `input`, writing one document per line to
/// `output`.
///
/// Undecodable lines are logged and counted; read and write failures abort.
pub fn run<R: BufRead, W: Write>(
    pipeline: &Pipeline,
    options: &RunOptions,
    input: R,
    mut output: W,
) -> anyhow::Result<RunStats> {
    let mut reader = RecordReader::new(input, options.framing);
    if let Some(path) = &options.source_path {
        reader = reader.with_source_path(path.clone());
    }

    let mut stats = RunStats::default();
    while let Some(next) = reader.next() {
        let record = match next {
            Ok(record) => record,
            Err(FeedError::Io(err)) => {
                return Err(err).with_context(|| format!("reading input line {}", reader.line_number() + 1));
            }
            Err(err) => {
                tracing::warn!(line = reader.line_number(), error = %err, "skipping undecodable line");
                stats.skipped += 1;
                continue;
            }
        };

        stats.records += 1;
        for doc in pipeline.process(&record) {
            serde_json::to_writer(&mut output, &doc).context("writing document")?;
            output.write_all(b"\n").context("writing document")?;
            stats.documents += 1;
        }
    }
    output.flush().context("flushing output")?;

    tracing::info!(
        framing = %options.framing,
        records = stats.records,
        documents = stats.documents,
        skipped = stats.skipped,
        "run complete"
    );
    Ok(stats)
}

use thiserror::Error;

/// Why an input line could not become a record.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line has no `<plugin>:` prefix")]
    MissingPlugin,

    #[error("plugin {0:?} sent an empty payload")]
    EmptyLine(String),
}

use thiserror::Error;

/// View markup that is not well-formed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarkupError {
    #[error("malformed markup at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("element <{tag}> opened at byte {position} is never closed")]
    Unclosed { tag: String, position: u64 },

    #[error("markup has no root element")]
    NoRoot,

    #[error("content after the root element at byte {position}")]
    TrailingContent { position: u64 },
}

/// Failure while scanning one view descriptor. Aborts the whole call chain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScanError {
    #[error("view {view} of model {model}: {source}")]
    Markup {
        model: String,
        view: String,
        #[source]
        source: MarkupError,
    },
}

/// Errors of the offline snapshot fetcher.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("model {0} is not present in the snapshot")]
    UnknownModel(String),

    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors of the remote fetcher: service failures pass through untouched.
#[derive(Debug, Error)]
pub enum RemoteFetchError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Service(E),

    #[error("unexpected {model} record: {source}")]
    InvalidRecord {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors of a trigger listing run.
#[derive(Debug, Error)]
pub enum ListError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Fetch(E),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

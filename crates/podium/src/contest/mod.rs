pub mod archive;
pub mod domain;
pub mod enrich;
pub mod feed;
mod snapshot;

pub use snapshot::{ContestSnapshot, SnapshotParts};

use std::path::PathBuf;

/// Capability to produce a finalized in-memory snapshot of a contest.
/// Adapters own all I/O; everything downstream is a pure batch transform.
pub trait ContestSource {
    fn fetch_snapshot(&self) -> Result<ContestSnapshot, SourceError>;
}

/// Errors raised while acquiring or assembling a contest snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed record at {}:{line}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown event type '{kind}' at {}:{line}", path.display())]
    UnknownEventType {
        path: PathBuf,
        line: usize,
        kind: String,
    },
    #[error("source contained no contest metadata")]
    MissingContestInfo,
}

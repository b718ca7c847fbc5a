use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::domain::ContestInfo;
use super::{ContestSnapshot, ContestSource, SnapshotParts, SourceError};

/// Offline contest-archive adapter: reads a directory of saved per-endpoint
/// JSON documents (`contest.json`, `teams.json`, ...), the shape produced by
/// dumping a contest API. `contest.json` is required; a missing collection
/// file is treated as an empty collection.
#[derive(Debug, Clone)]
pub struct ArchiveSource {
    dir: PathBuf,
}

impl ArchiveSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_document<T: DeserializeOwned>(&self, name: &str) -> Result<T, SourceError> {
        let path = self.dir.join(name);
        let raw = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SourceError::Document { path, source })
    }

    fn read_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, SourceError> {
        if !self.dir.join(name).exists() {
            debug!(file = name, "archive file absent, treating as empty");
            return Ok(Vec::new());
        }
        self.read_document(name)
    }
}

impl ContestSource for ArchiveSource {
    fn fetch_snapshot(&self) -> Result<ContestSnapshot, SourceError> {
        let info: ContestInfo = self.read_document("contest.json")?;

        let parts = SnapshotParts {
            info: Some(info),
            groups: self.read_collection("groups.json")?,
            organizations: self.read_collection("organizations.json")?,
            teams: self.read_collection("teams.json")?,
            problems: self.read_collection("problems.json")?,
            judgement_types: self.read_collection("judgement-types.json")?,
            submissions: self.read_collection("submissions.json")?,
            judgements: self.read_collection("judgements.json")?,
        };

        ContestSnapshot::from_parts(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).expect("archive file written");
    }

    #[test]
    fn loads_snapshot_from_archive_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        write(
            dir.path(),
            "contest.json",
            r#"{"id": "demo", "name": "Demo Contest", "shortname": "demo24",
                "duration": "5:00:00", "penalty_time": 20,
                "start_time": "2024-04-01T09:00:00+08:00"}"#,
        );
        write(
            dir.path(),
            "judgement-types.json",
            r#"[{"id": "AC", "solved": true}, {"id": "WA", "solved": false, "penalty": true}]"#,
        );
        write(
            dir.path(),
            "teams.json",
            r#"[{"id": "t1", "name": "Alpha", "group_ids": []}]"#,
        );
        write(
            dir.path(),
            "problems.json",
            r#"[{"id": "p1", "ordinal": 0, "label": "A", "name": "Apples"}]"#,
        );

        let snapshot = ArchiveSource::new(dir.path())
            .fetch_snapshot()
            .expect("snapshot builds");
        assert_eq!(snapshot.info.shortname.as_deref(), Some("demo24"));
        assert_eq!(snapshot.judgement_types.len(), 2);
        assert_eq!(snapshot.teams.len(), 1);
        // Absent collections come back empty rather than erroring.
        assert!(snapshot.submissions.is_empty());
    }

    #[test]
    fn missing_contest_document_is_fatal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ArchiveSource::new(dir.path())
            .fetch_snapshot()
            .expect_err("missing contest.json rejected");
        assert!(matches!(err, SourceError::Io { .. }));
    }
}

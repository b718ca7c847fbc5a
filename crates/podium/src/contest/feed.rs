use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::domain::{
    ContestInfo, Group, Judgement, JudgementType, Problem, Submission, Team, TeamId,
};
use super::{ContestSnapshot, ContestSource, SnapshotParts, SourceError};

/// Offline event-feed adapter: reads the newline-delimited JSON feed a
/// contest system emits (or that a previous run saved to disk).
#[derive(Debug, Clone)]
pub struct EventFeedSource {
    path: PathBuf,
}

impl EventFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContestSource for EventFeedSource {
    fn fetch_snapshot(&self) -> Result<ContestSnapshot, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let parts = parse_feed(BufReader::new(file), &self.path)?;
        ContestSnapshot::from_parts(parts)
    }
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    kind: String,
    data: Value,
}

#[derive(Debug, Deserialize)]
struct PersonRecord {
    team_id: TeamId,
    name: String,
}

/// Parse a newline-delimited event feed into raw snapshot parts. Blank
/// lines are tolerated; an unrecognized event type aborts the load.
pub fn parse_feed<R: Read>(reader: R, path: &Path) -> Result<SnapshotParts, SourceError> {
    let mut parts = SnapshotParts::default();
    let mut persons: Vec<PersonRecord> = Vec::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let malformed = |source| SourceError::Malformed {
            path: path.to_path_buf(),
            line: line_no,
            source,
        };

        let envelope: EventEnvelope = serde_json::from_str(&line).map_err(malformed)?;
        match envelope.kind.as_str() {
            "contests" => {
                let info: ContestInfo = serde_json::from_value(envelope.data).map_err(malformed)?;
                parts.info = Some(info);
            }
            "groups" => {
                let group: Group = serde_json::from_value(envelope.data).map_err(malformed)?;
                parts.groups.push(group);
            }
            "organizations" => {
                let organization =
                    serde_json::from_value(envelope.data).map_err(malformed)?;
                parts.organizations.push(organization);
            }
            "teams" => {
                let team: Team = serde_json::from_value(envelope.data).map_err(malformed)?;
                parts.teams.push(team);
            }
            "problems" => {
                let problem: Problem = serde_json::from_value(envelope.data).map_err(malformed)?;
                parts.problems.push(problem);
            }
            "judgement-types" => {
                let judgement_type: JudgementType =
                    serde_json::from_value(envelope.data).map_err(malformed)?;
                parts.judgement_types.push(judgement_type);
            }
            "submissions" => {
                let submission: Submission =
                    serde_json::from_value(envelope.data).map_err(malformed)?;
                parts.submissions.push(submission);
            }
            "judgements" => {
                let judgement: Judgement =
                    serde_json::from_value(envelope.data).map_err(malformed)?;
                parts.judgements.push(judgement);
            }
            "persons" => {
                let person: PersonRecord =
                    serde_json::from_value(envelope.data).map_err(malformed)?;
                persons.push(person);
            }
            "state" | "languages" => {
                debug!(kind = %envelope.kind, "ignoring feed record");
            }
            other => {
                return Err(SourceError::UnknownEventType {
                    path: path.to_path_buf(),
                    line: line_no,
                    kind: other.to_string(),
                });
            }
        }
    }

    attach_members(&mut parts.teams, persons);
    Ok(parts)
}

fn attach_members(teams: &mut [Team], persons: Vec<PersonRecord>) {
    let index: HashMap<TeamId, usize> = teams
        .iter()
        .enumerate()
        .map(|(idx, team)| (team.id.clone(), idx))
        .collect();

    for person in persons {
        if let Some(&idx) = index.get(&person.team_id) {
            teams[idx].members.push(person.name);
        } else {
            debug!(team = %person.team_id, "person record for unknown team");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE_FEED: &str = r#"
{"type": "contests", "data": {"id": "demo", "name": "Demo Contest", "duration": "5:00:00", "scoreboard_freeze_duration": "1:00:00", "penalty_time": 20}}
{"type": "state", "data": {"started": "2024-04-01T09:00:00+00:00"}}
{"type": "languages", "data": {"id": "cpp", "name": "C++"}}
{"type": "judgement-types", "data": {"id": "AC", "solved": true, "penalty": false}}
{"type": "judgement-types", "data": {"id": "WA", "solved": false, "penalty": true}}
{"type": "groups", "data": {"id": "g1", "name": "Official"}}
{"type": "organizations", "data": {"id": "o1", "name": "Tech University"}}
{"type": "teams", "data": {"id": "t1", "name": "Alpha", "organization_id": "o1", "group_ids": ["g1"]}}
{"type": "persons", "data": {"team_id": "t1", "name": "Ada"}}
{"type": "persons", "data": {"team_id": "t1", "name": "Grace"}}
{"type": "problems", "data": {"id": "p1", "ordinal": 0, "label": "A", "name": "Apples"}}
{"type": "submissions", "data": {"id": "1", "team_id": "t1", "problem_id": "p1", "contest_time": "0:10:00"}}
{"type": "judgements", "data": {"submission_id": "1", "judgement_type_id": "AC", "valid": true}}
"#;

    #[test]
    fn parses_a_complete_feed() {
        let path = PathBuf::from("feed.ndjson");
        let parts = parse_feed(SAMPLE_FEED.as_bytes(), &path).expect("feed parses");

        let info = parts.info.as_ref().expect("contest info present");
        assert_eq!(info.id, "demo");
        assert_eq!(info.penalty_time, 20);
        assert_eq!(parts.judgement_types.len(), 2);
        assert_eq!(parts.teams.len(), 1);
        assert_eq!(parts.teams[0].members, vec!["Ada", "Grace"]);
        assert_eq!(parts.submissions.len(), 1);
        assert_eq!(parts.judgements.len(), 1);
    }

    #[test]
    fn unknown_event_type_is_fatal() {
        let feed = r#"{"type": "mystery", "data": {}}"#;
        let err = parse_feed(feed.as_bytes(), &PathBuf::from("feed.ndjson"))
            .expect_err("unknown type rejected");
        match err {
            SourceError::UnknownEventType { kind, line, .. } => {
                assert_eq!(kind, "mystery");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_line_reports_its_position() {
        let feed = "{\"type\": \"groups\", \"data\": {\"id\": \"g1\", \"name\": \"Official\"}}\nnot json\n";
        let err = parse_feed(feed.as_bytes(), &PathBuf::from("feed.ndjson"))
            .expect_err("malformed line rejected");
        match err {
            SourceError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn source_builds_snapshot_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("eventfeed.ndjson");
        std::fs::write(&path, SAMPLE_FEED).expect("feed written");

        let snapshot = EventFeedSource::new(&path)
            .fetch_snapshot()
            .expect("snapshot builds");
        assert_eq!(snapshot.teams.len(), 1);
        assert_eq!(snapshot.problems.len(), 1);
        assert_eq!(snapshot.info.name, "Demo Contest");
    }
}

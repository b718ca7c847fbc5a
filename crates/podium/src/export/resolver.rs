use serde::Serialize;

use crate::awards::AllocationOutcome;
use crate::contest::enrich::JudgedSubmission;
use crate::contest::ContestSnapshot;

use super::ExportError;

/// The contest-results document consumed by the presentation/resolver tool:
/// one `<contest>` element grouping info, problems, regions, teams,
/// judgement types, runs, awards, and the finalized state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename = "contest")]
pub struct ResolverDocument {
    info: InfoElement,
    #[serde(rename = "problem")]
    problems: Vec<ProblemElement>,
    #[serde(rename = "region")]
    regions: Vec<RegionElement>,
    #[serde(rename = "team")]
    teams: Vec<TeamElement>,
    #[serde(rename = "judgement")]
    judgements: Vec<JudgementElement>,
    #[serde(rename = "run")]
    runs: Vec<RunElement>,
    #[serde(rename = "award")]
    awards: Vec<AwardElement>,
    finalized: FinalizedElement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct InfoElement {
    #[serde(rename = "contest-id")]
    contest_id: String,
    title: String,
    #[serde(rename = "short-title", skip_serializing_if = "Option::is_none")]
    short_title: Option<String>,
    length: String,
    #[serde(
        rename = "scoreboard-freeze-length",
        skip_serializing_if = "Option::is_none"
    )]
    scoreboard_freeze_length: Option<String>,
    starttime: i64,
    penalty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ProblemElement {
    /// 1-based presentation ordinal, as the resolver expects.
    id: u32,
    label: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RegionElement {
    #[serde(rename = "external-id")]
    external_id: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TeamElement {
    id: String,
    #[serde(rename = "external-id", skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    name: String,
    university: String,
    #[serde(rename = "university-short-name")]
    university_short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct JudgementElement {
    acronym: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RunElement {
    id: String,
    problem: u32,
    team: String,
    judged: bool,
    result: String,
    solved: bool,
    penalty: bool,
    /// Contest-relative seconds.
    time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct AwardElement {
    id: String,
    citation: String,
    show: bool,
    #[serde(rename = "teamId")]
    team_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct FinalizedElement {
    #[serde(rename = "last-gold")]
    last_gold: u32,
    #[serde(rename = "last-silver")]
    last_silver: u32,
    #[serde(rename = "last-bronze")]
    last_bronze: u32,
    timestamp: i64,
}

impl ResolverDocument {
    /// Assemble the document from the finished pipeline outputs.
    pub fn assemble(
        snapshot: &ContestSnapshot,
        judged: &[JudgedSubmission],
        outcome: &AllocationOutcome,
    ) -> Self {
        let info = &snapshot.info;
        let info_element = InfoElement {
            contest_id: info.id.clone(),
            title: info.name.clone(),
            short_title: info.shortname.clone(),
            length: info.duration.to_string(),
            scoreboard_freeze_length: info
                .scoreboard_freeze_duration
                .map(|freeze| freeze.to_string()),
            starttime: info
                .start_time
                .map(|start| start.timestamp())
                .unwrap_or(0),
            penalty: info.penalty_time,
        };

        let problems = snapshot
            .problems_in_order()
            .into_iter()
            .map(|problem| ProblemElement {
                id: problem.ordinal + 1,
                label: problem.label.clone(),
                name: problem.name.clone(),
            })
            .collect();

        let regions = snapshot
            .groups
            .values()
            .map(|group| RegionElement {
                external_id: group.id.0.clone(),
                name: group.name.clone(),
            })
            .collect();

        let teams = snapshot
            .teams
            .values()
            .map(|team| {
                let university = snapshot.affiliation_name(team).to_string();
                let university_short_name = snapshot
                    .organization_of(team)
                    .map(|organization| organization.short_display_name().to_string())
                    .unwrap_or_else(|| university.clone());
                let region = team
                    .group_ids
                    .first()
                    .and_then(|id| snapshot.groups.get(id))
                    .map(|group| group.name.clone());
                TeamElement {
                    id: team.id.0.clone(),
                    external_id: team.icpc_id.clone(),
                    name: team.name.clone(),
                    university,
                    university_short_name,
                    region,
                }
            })
            .collect();

        let judgements = snapshot
            .judgement_types
            .values()
            .map(|judgement_type| JudgementElement {
                acronym: judgement_type.id.0.clone(),
            })
            .collect();

        let runs = judged
            .iter()
            .map(|submission| RunElement {
                id: submission.id.0.clone(),
                problem: snapshot
                    .problems
                    .get(&submission.problem_id)
                    .map(|problem| problem.ordinal + 1)
                    .unwrap_or(0),
                team: submission.team_id.0.clone(),
                judged: true,
                result: submission.verdict.id.0.clone(),
                solved: submission.verdict.solved,
                penalty: submission.verdict.penalty,
                time: submission.contest_time.as_seconds_f64(),
            })
            .collect();

        let awards = outcome
            .awards
            .iter()
            .map(|award| AwardElement {
                id: award.id.clone(),
                citation: award.citation.clone(),
                show: award.show,
                team_ids: award.team_ids.iter().map(|id| id.0.clone()).collect(),
            })
            .collect();

        let finalized = outcome
            .medal_passes
            .first()
            .map(|cursors| FinalizedElement {
                last_gold: cursors.last_gold,
                last_silver: cursors.last_silver,
                last_bronze: cursors.last_bronze,
                timestamp: 0,
            })
            .unwrap_or(FinalizedElement {
                last_gold: 0,
                last_silver: 0,
                last_bronze: 0,
                timestamp: 0,
            });

        Self {
            info: info_element,
            problems,
            regions,
            teams,
            judgements,
            runs,
            awards,
            finalized,
        }
    }

    /// Render the document as an XML string with declaration.
    pub fn render(&self) -> Result<String, ExportError> {
        let body = quick_xml::se::to_string(self)?;
        Ok(format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awards::{Award, MedalPassCursors};
    use crate::contest::domain::{
        ContestInfo, ContestTime, Group, GroupId, JudgementType, JudgementTypeId, Organization,
        OrganizationId, Problem, ProblemId, SubmissionId, Team, TeamId,
    };
    use crate::contest::SnapshotParts;

    fn snapshot() -> ContestSnapshot {
        let parts = SnapshotParts {
            info: Some(ContestInfo {
                id: "demo".to_string(),
                name: "Demo <Contest>".to_string(),
                shortname: Some("demo24".to_string()),
                duration: "5:00:00".parse().expect("duration parses"),
                scoreboard_freeze_duration: Some("1:00:00".parse().expect("freeze parses")),
                penalty_time: 20,
                start_time: None,
            }),
            groups: vec![Group {
                id: GroupId("g1".to_string()),
                name: "Official".to_string(),
                hidden: false,
            }],
            organizations: vec![Organization {
                id: OrganizationId("o1".to_string()),
                icpc_id: None,
                name: "Tech".to_string(),
                formal_name: Some("Tech University".to_string()),
                shortname: Some("TU".to_string()),
            }],
            teams: vec![Team {
                id: TeamId("t1".to_string()),
                icpc_id: Some("400001".to_string()),
                name: "Ampersand & Sons".to_string(),
                organization_id: Some(OrganizationId("o1".to_string())),
                group_ids: vec![GroupId("g1".to_string())],
                members: Vec::new(),
            }],
            problems: vec![Problem {
                id: ProblemId("p1".to_string()),
                ordinal: 0,
                label: "A".to_string(),
                name: "Apples".to_string(),
            }],
            judgement_types: vec![JudgementType {
                id: JudgementTypeId("AC".to_string()),
                solved: true,
                penalty: false,
            }],
            ..SnapshotParts::default()
        };
        ContestSnapshot::from_parts(parts).expect("snapshot builds")
    }

    fn outcome() -> AllocationOutcome {
        AllocationOutcome {
            awards: vec![Award {
                id: "winner".to_string(),
                citation: "Champion".to_string(),
                team_ids: vec![TeamId("t1".to_string())],
                show: true,
            }],
            roster: Vec::new(),
            medal_passes: vec![MedalPassCursors {
                last_gold: 1,
                last_silver: 2,
                last_bronze: 3,
            }],
            medal_cutoff: Some(3),
        }
    }

    #[test]
    fn renders_the_expected_element_tree() {
        let snapshot = snapshot();
        let judged = vec![JudgedSubmission {
            id: SubmissionId("1".to_string()),
            team_id: TeamId("t1".to_string()),
            problem_id: ProblemId("p1".to_string()),
            contest_time: ContestTime::from_seconds(600),
            verdict: JudgementType {
                id: JudgementTypeId("AC".to_string()),
                solved: true,
                penalty: false,
            },
        }];
        let document = ResolverDocument::assemble(&snapshot, &judged, &outcome());
        let xml = document.render().expect("document renders");

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<contest>"));
        assert!(xml.contains("<contest-id>demo</contest-id>"));
        assert!(xml.contains("<short-title>demo24</short-title>"));
        assert!(xml.contains("<length>5:00:00</length>"));
        assert!(xml.contains("<scoreboard-freeze-length>1:00:00</scoreboard-freeze-length>"));
        assert!(xml.contains("<label>A</label>"));
        assert!(xml.contains("<university>Tech University</university>"));
        assert!(xml.contains("<university-short-name>TU</university-short-name>"));
        assert!(xml.contains("<region>Official</region>"));
        assert!(xml.contains("<acronym>AC</acronym>"));
        assert!(xml.contains("<solved>true</solved>"));
        assert!(xml.contains("<teamId>t1</teamId>"));
        assert!(xml.contains("<last-bronze>3</last-bronze>"));
    }

    #[test]
    fn escapes_markup_sensitive_names() {
        let snapshot = snapshot();
        let document = ResolverDocument::assemble(&snapshot, &[], &outcome());
        let xml = document.render().expect("document renders");
        assert!(xml.contains("Ampersand &amp; Sons"));
        assert!(xml.contains("Demo &lt;Contest&gt;"));
        assert!(!xml.contains("Ampersand & Sons"));
    }

    #[test]
    fn problem_ids_are_one_based_ordinals() {
        let snapshot = snapshot();
        let document = ResolverDocument::assemble(&snapshot, &[], &outcome());
        let xml = document.render().expect("document renders");
        assert!(xml.contains("<problem><id>1</id>"));
    }
}

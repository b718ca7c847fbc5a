//! Shared fixture: a six-team contest with two teams from the same school,
//! an exhibition team leading the board, and an all-girls team mid-field.

use podium::awards::{self, AllocationOutcome};
use podium::config::AwardsConfig;
use podium::contest::domain::{
    ContestInfo, ContestTime, Group, GroupId, Judgement, JudgementType, JudgementTypeId,
    Organization, OrganizationId, Problem, ProblemId, Submission, SubmissionId, Team, TeamId,
};
use podium::contest::enrich::{judge_submissions, JudgedSubmission};
use podium::contest::{ContestSnapshot, SnapshotParts};
use podium::ranking::{rank_teams, ScoreboardRow};

pub fn group(id: &str, name: &str) -> Group {
    Group {
        id: GroupId(id.to_string()),
        name: name.to_string(),
        hidden: false,
    }
}

pub fn organization(id: &str, name: &str) -> Organization {
    Organization {
        id: OrganizationId(id.to_string()),
        icpc_id: None,
        name: name.to_string(),
        formal_name: Some(format!("{name} of Technology")),
        shortname: None,
    }
}

pub fn team(id: &str, name: &str, org: Option<&str>, groups: &[&str]) -> Team {
    Team {
        id: TeamId(id.to_string()),
        icpc_id: None,
        name: name.to_string(),
        organization_id: org.map(|o| OrganizationId(o.to_string())),
        group_ids: groups.iter().map(|g| GroupId(g.to_string())).collect(),
        members: Vec::new(),
    }
}

pub fn problem(id: &str, ordinal: u32, label: &str) -> Problem {
    Problem {
        id: ProblemId(id.to_string()),
        ordinal,
        label: label.to_string(),
        name: format!("Problem {label}"),
    }
}

pub fn submission(id: &str, team: &str, problem: &str, minutes: i64) -> Submission {
    Submission {
        id: SubmissionId(id.to_string()),
        team_id: TeamId(team.to_string()),
        problem_id: ProblemId(problem.to_string()),
        contest_time: ContestTime::from_seconds(minutes * 60),
    }
}

pub fn judgement(submission: &str, verdict: &str) -> Judgement {
    Judgement {
        id: None,
        submission_id: SubmissionId(submission.to_string()),
        judgement_type_id: Some(JudgementTypeId(verdict.to_string())),
        valid: true,
    }
}

/// Final standings produced by this fixture:
///
/// | rank | team | school | solved | time |
/// |------|------|--------|--------|------|
/// | 1    | t5   | u4     | 2      | 15   | exhibition (no-occupy candidate)
/// | 2    | t1   | u1     | 2      | 32   |
/// | 3    | t3   | u1     | 2      | 40   | same school as t1
/// | 4    | t2   | u2     | 1      | 30   |
/// | 5    | t4   | u3     | 1      | 40   | all-girls
/// | 6    | t6   | u5     | 1      | 50   |
pub fn contest_fixture(freeze_duration_minutes: Option<i64>) -> ContestSnapshot {
    let parts = SnapshotParts {
        info: Some(ContestInfo {
            id: "finals".to_string(),
            name: "Regional Finals".to_string(),
            shortname: Some("finals".to_string()),
            duration: ContestTime::from_seconds(300 * 60),
            scoreboard_freeze_duration: freeze_duration_minutes
                .map(|minutes| ContestTime::from_seconds(minutes * 60)),
            penalty_time: 20,
            start_time: None,
        }),
        groups: vec![
            group("official", "Official"),
            group("girls", "All Girls"),
            group("exhibition", "Exhibition"),
        ],
        organizations: vec![
            organization("u1", "North University"),
            organization("u2", "South University"),
            organization("u3", "East University"),
            organization("u4", "West University"),
            organization("u5", "Central University"),
        ],
        teams: vec![
            team("t1", "Alpha", Some("u1"), &["official"]),
            team("t2", "Bravo", Some("u2"), &["official"]),
            team("t3", "Alpha Prime", Some("u1"), &["official"]),
            team("t4", "Charlie", Some("u3"), &["official", "girls"]),
            team("t5", "Delta", Some("u4"), &["exhibition"]),
            team("t6", "Echo", Some("u5"), &["official"]),
        ],
        problems: vec![
            problem("p1", 0, "A"),
            problem("p2", 1, "B"),
            problem("p3", 2, "C"),
        ],
        judgement_types: vec![
            JudgementType {
                id: JudgementTypeId("AC".to_string()),
                solved: true,
                penalty: false,
            },
            JudgementType {
                id: JudgementTypeId("WA".to_string()),
                solved: false,
                penalty: true,
            },
        ],
        submissions: vec![
            submission("1", "t5", "p1", 5),
            submission("2", "t5", "p2", 10),
            submission("3", "t1", "p1", 12),
            submission("4", "t1", "p2", 20),
            submission("5", "t3", "p1", 15),
            submission("6", "t3", "p2", 25),
            submission("7", "t2", "p1", 30),
            submission("8", "t2", "p3", 35),
            submission("9", "t4", "p1", 40),
            submission("10", "t6", "p2", 50),
        ],
        judgements: vec![
            judgement("1", "AC"),
            judgement("2", "AC"),
            judgement("3", "AC"),
            judgement("4", "AC"),
            judgement("5", "AC"),
            judgement("6", "AC"),
            judgement("7", "AC"),
            judgement("8", "WA"),
            judgement("9", "AC"),
            judgement("10", "AC"),
        ],
        ..SnapshotParts::default()
    };
    ContestSnapshot::from_parts(parts).expect("fixture snapshot builds")
}

/// The full layered award configuration used by most tests.
pub fn full_config() -> AwardsConfig {
    serde_json::from_str(
        r#"{
            "no_occupy_groups": ["exhibition"],
            "top_teams": [{"slots": 3}],
            "medals": [{"gold": 1, "silver": 1, "bronze": 1}],
            "champion": {},
            "first_to_solve": true,
            "last_accepted": {},
            "group_leaders": [{"group": "girls", "citation": "Best Girls' Team"}]
        }"#,
    )
    .expect("award configuration parses")
}

pub fn run_pipeline(
    snapshot: &ContestSnapshot,
    config: &AwardsConfig,
) -> (Vec<JudgedSubmission>, Vec<ScoreboardRow>, AllocationOutcome) {
    config.validate(snapshot).expect("configuration validates");
    let judged = judge_submissions(snapshot, &config.fallback_verdict).expect("enrichment succeeds");
    let scoreboard = rank_teams(snapshot, &judged, config.tiebreak);
    let outcome = awards::allocate(snapshot, &scoreboard, &judged, config);
    (judged, scoreboard, outcome)
}

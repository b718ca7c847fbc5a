use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::contest::domain::{ProblemId, TeamId};
use crate::contest::enrich::JudgedSubmission;
use crate::contest::ContestSnapshot;

/// Per-team score. `total_time` is penalized time in seconds; acceptance
/// times are floored to whole minutes before they are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub num_solved: u32,
    pub total_time: i64,
    /// Numeric id of the team's last accepted submission; optional final
    /// tiebreak depending on the contest format.
    pub last_accepted_submission: u64,
}

/// One scoreboard row. Computed once; immutable after ranking completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardRow {
    /// 1-based; ties share a rank (standard competition ranking).
    pub rank: u32,
    pub team_id: TeamId,
    pub score: Score,
}

/// Contest formats disagree on the final scoreboard tiebreak, so it is
/// configurable rather than hard-coded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakPolicy {
    /// More solves, less time, then earlier last-accepted-submission id.
    #[default]
    LastAcceptedSubmission,
    /// More solves, then less time only.
    SolvedAndTimeOnly,
}

/// Rank every team in the snapshot from its judged submissions.
///
/// Teams with zero submissions still receive a row and sort last. Two rows
/// share a rank iff their `(num_solved, total_time)` tuples are equal, even
/// when the id tiebreak orders them.
pub fn rank_teams(
    snapshot: &ContestSnapshot,
    judged: &[JudgedSubmission],
    policy: TiebreakPolicy,
) -> Vec<ScoreboardRow> {
    let mut by_team: HashMap<&TeamId, Vec<&JudgedSubmission>> = HashMap::new();
    for submission in judged {
        by_team.entry(&submission.team_id).or_default().push(submission);
    }

    let penalty_seconds = i64::from(snapshot.info.penalty_time) * 60;
    let mut rows: Vec<ScoreboardRow> = snapshot
        .teams
        .keys()
        .map(|team_id| {
            let mut submissions = by_team.remove(team_id).unwrap_or_default();
            submissions.sort_by_key(|submission| (submission.contest_time, submission.id.numeric()));
            ScoreboardRow {
                rank: 0,
                team_id: team_id.clone(),
                score: score_team(&submissions, penalty_seconds),
            }
        })
        .collect();

    rows.sort_by_key(|row| {
        let id_tiebreak = match policy {
            TiebreakPolicy::LastAcceptedSubmission => row.score.last_accepted_submission,
            TiebreakPolicy::SolvedAndTimeOnly => 0,
        };
        (
            Reverse(row.score.num_solved),
            row.score.total_time,
            id_tiebreak,
        )
    });

    assign_ranks(&mut rows);
    rows
}

fn score_team(submissions: &[&JudgedSubmission], penalty_seconds: i64) -> Score {
    let mut solved: HashSet<&ProblemId> = HashSet::new();
    let mut penalty: HashMap<&ProblemId, i64> = HashMap::new();
    let mut num_solved = 0;
    let mut total_time = 0;
    let mut last_accepted_submission = 0;

    for submission in submissions {
        // Later submissions to an already-solved problem never affect score.
        if solved.contains(&submission.problem_id) {
            continue;
        }
        if submission.verdict.solved {
            solved.insert(&submission.problem_id);
            num_solved += 1;
            total_time += submission.contest_time.floored_to_minute_seconds()
                + penalty.get(&submission.problem_id).copied().unwrap_or(0);
            last_accepted_submission = last_accepted_submission.max(submission.id.numeric());
        } else if submission.verdict.penalty {
            *penalty.entry(&submission.problem_id).or_insert(0) += penalty_seconds;
        }
        // Verdicts that neither solve nor penalize (compile errors and the
        // like) affect nothing.
    }

    Score {
        num_solved,
        total_time,
        last_accepted_submission,
    }
}

fn assign_ranks(rows: &mut [ScoreboardRow]) {
    for idx in 0..rows.len() {
        let position = idx as u32 + 1;
        rows[idx].rank = if idx > 0 && tie_key(&rows[idx - 1]) == tie_key(&rows[idx]) {
            rows[idx - 1].rank
        } else {
            position
        };
    }
}

fn tie_key(row: &ScoreboardRow) -> (u32, i64) {
    (row.score.num_solved, row.score.total_time)
}

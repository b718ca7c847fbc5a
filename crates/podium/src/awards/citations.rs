use std::collections::BTreeSet;

use crate::config::{AwardsConfig, ChampionAward, GroupLeaderAward, LastAcceptedAward};
use crate::contest::domain::ProblemId;
use crate::contest::enrich::JudgedSubmission;
use crate::contest::ContestSnapshot;
use crate::ranking::ScoreboardRow;

use super::{in_no_occupy, Grants};

/// First team to solve each problem, in contest-time order. A submission at
/// or after the freeze start is invisible here even though it still counts
/// on the official scoreboard.
pub(crate) fn first_to_solve(
    grants: &mut Grants<'_>,
    snapshot: &ContestSnapshot,
    judged: &[JudgedSubmission],
    config: &AwardsConfig,
) {
    let freeze_start = snapshot.info.freeze_start();
    let mut claimed: BTreeSet<&ProblemId> = BTreeSet::new();

    for submission in in_contest_order(judged) {
        if !submission.verdict.solved {
            continue;
        }
        if in_no_occupy(snapshot, config, &submission.team_id) {
            continue;
        }
        if let Some(freeze) = freeze_start {
            if submission.contest_time >= freeze {
                continue;
            }
        }
        if claimed.contains(&submission.problem_id) {
            continue;
        }
        claimed.insert(&submission.problem_id);

        let label = snapshot
            .problems
            .get(&submission.problem_id)
            .map(|problem| problem.label.clone())
            .unwrap_or_else(|| submission.problem_id.0.clone());
        grants.grant(
            format!("first-to-solve-{label}"),
            format!("First to solve problem {label}"),
            vec![submission.team_id.clone()],
        );
    }
}

/// The overall rank-1 row. Not subject to the no-occupy exclusion.
pub(crate) fn champion(
    grants: &mut Grants<'_>,
    scoreboard: &[ScoreboardRow],
    award: &ChampionAward,
) {
    if let Some(first) = scoreboard.first() {
        grants.grant(
            "winner".to_string(),
            award.citation.clone(),
            vec![first.team_id.clone()],
        );
    }
}

/// The latest accepted submission of the contest.
pub(crate) fn last_accepted(
    grants: &mut Grants<'_>,
    judged: &[JudgedSubmission],
    award: &LastAcceptedAward,
) {
    let last = in_contest_order(judged)
        .into_iter()
        .filter(|submission| submission.verdict.solved)
        .next_back();
    if let Some(submission) = last {
        grants.grant(
            "last-ac".to_string(),
            award.citation.clone(),
            vec![submission.team_id.clone()],
        );
    }
}

/// Highest-ranked team of the designated group, granted only when it falls
/// within the medal cutoff (when a cutoff exists).
pub(crate) fn group_leader(
    grants: &mut Grants<'_>,
    snapshot: &ContestSnapshot,
    scoreboard: &[ScoreboardRow],
    award: &GroupLeaderAward,
    medal_cutoff: Option<u32>,
) {
    let filter: BTreeSet<_> = [award.group.clone()].into_iter().collect();

    for row in scoreboard {
        if let Some(cutoff) = medal_cutoff {
            if row.rank > cutoff {
                break;
            }
        }
        if snapshot.team_in_groups(&row.team_id, &filter) {
            grants.grant(
                format!("group-winner-{}", award.group),
                award.citation.clone(),
                vec![row.team_id.clone()],
            );
            break;
        }
    }
}

fn in_contest_order(judged: &[JudgedSubmission]) -> Vec<&JudgedSubmission> {
    let mut ordered: Vec<&JudgedSubmission> = judged.iter().collect();
    ordered.sort_by_key(|submission| (submission.contest_time, submission.id.numeric()));
    ordered
}

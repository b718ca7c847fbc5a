use std::collections::HashMap;

use tracing::{debug, warn};

use super::domain::{ContestTime, JudgementType, JudgementTypeId, ProblemId, SubmissionId, TeamId};
use super::ContestSnapshot;

/// A submission with its resolved verdict attached. This is the only shape
/// the ranking engine and award allocator consume; raw judgements are
/// discarded after enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgedSubmission {
    pub id: SubmissionId,
    pub team_id: TeamId,
    pub problem_id: ProblemId,
    pub contest_time: ContestTime,
    pub verdict: JudgementType,
}

/// Errors raised during submission enrichment.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("fallback verdict '{0}' is not a known judgement type")]
    UnknownFallbackVerdict(JudgementTypeId),
}

/// Resolve exactly one verdict per submission.
///
/// The first valid judgement in ingestion order wins; contest systems
/// normally guarantee at most one valid judgement per submission, so
/// duplicates are an input assumption and are not resolved defensively.
/// A submission with no usable judgement receives the configured fallback
/// verdict with a diagnostic, not an error.
pub fn judge_submissions(
    snapshot: &ContestSnapshot,
    fallback: &JudgementTypeId,
) -> Result<Vec<JudgedSubmission>, EnrichError> {
    let fallback_verdict = snapshot
        .judgement_types
        .get(fallback)
        .ok_or_else(|| EnrichError::UnknownFallbackVerdict(fallback.clone()))?;

    let mut resolved: HashMap<&SubmissionId, &JudgementType> = HashMap::new();
    for judgement in &snapshot.judgements {
        if !judgement.valid {
            continue;
        }
        let Some(type_id) = judgement.judgement_type_id.as_ref() else {
            debug!(submission = %judgement.submission_id, "judgement still in flight");
            continue;
        };
        let Some(judgement_type) = snapshot.judgement_types.get(type_id) else {
            warn!(
                submission = %judgement.submission_id,
                judgement_type = %type_id,
                "skipping judgement with unknown judgement type"
            );
            continue;
        };
        resolved.entry(&judgement.submission_id).or_insert(judgement_type);
    }

    let judged = snapshot
        .submissions
        .iter()
        .map(|submission| {
            let verdict = match resolved.get(&submission.id) {
                Some(&verdict) => verdict.clone(),
                None => {
                    warn!(
                        submission = %submission.id,
                        problem = %submission.problem_id,
                        fallback = %fallback,
                        "submission has no judgement, applying fallback verdict"
                    );
                    fallback_verdict.clone()
                }
            };
            JudgedSubmission {
                id: submission.id.clone(),
                team_id: submission.team_id.clone(),
                problem_id: submission.problem_id.clone(),
                contest_time: submission.contest_time,
                verdict,
            }
        })
        .collect();

    Ok(judged)
}

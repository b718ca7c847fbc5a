use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::domain::{
    ContestInfo, Group, GroupId, Judgement, JudgementType, JudgementTypeId, Organization,
    OrganizationId, Problem, ProblemId, Submission, Team, TeamId,
};
use super::SourceError;

/// Raw entity collections as read by a data-source adapter, before
/// normalization and indexing.
#[derive(Debug, Default)]
pub struct SnapshotParts {
    pub info: Option<ContestInfo>,
    pub groups: Vec<Group>,
    pub organizations: Vec<Organization>,
    pub teams: Vec<Team>,
    pub problems: Vec<Problem>,
    pub judgement_types: Vec<JudgementType>,
    pub submissions: Vec<Submission>,
    pub judgements: Vec<Judgement>,
}

/// Finalized, id-indexed snapshot of all contest entities. Built once per
/// run; nothing in here is mutated after construction.
#[derive(Debug, Clone)]
pub struct ContestSnapshot {
    pub info: ContestInfo,
    pub groups: BTreeMap<GroupId, Group>,
    pub organizations: BTreeMap<OrganizationId, Organization>,
    pub teams: BTreeMap<TeamId, Team>,
    pub problems: BTreeMap<ProblemId, Problem>,
    pub judgement_types: BTreeMap<JudgementTypeId, JudgementType>,
    /// Submissions in ingestion order, restricted to known teams/problems.
    pub submissions: Vec<Submission>,
    /// Judgements in ingestion order, restricted to known submissions.
    pub judgements: Vec<Judgement>,
}

impl ContestSnapshot {
    /// Normalize and index raw adapter output. Hidden groups are dropped,
    /// and a team is dropped only when every group it belongs to is hidden.
    /// Submissions and judgements that reference unknown entities are
    /// skipped with a diagnostic; they never silently distort scores.
    pub fn from_parts(parts: SnapshotParts) -> Result<Self, SourceError> {
        let info = parts.info.ok_or(SourceError::MissingContestInfo)?;

        let mut groups = BTreeMap::new();
        for group in parts.groups {
            if group.hidden {
                debug!(group = %group.id, "dropping hidden group");
                continue;
            }
            groups.insert(group.id.clone(), group);
        }

        let organizations: BTreeMap<_, _> = parts
            .organizations
            .into_iter()
            .map(|organization| (organization.id.clone(), organization))
            .collect();

        let mut teams = BTreeMap::new();
        for team in parts.teams {
            let all_groups_hidden = !team.group_ids.is_empty()
                && team.group_ids.iter().all(|id| !groups.contains_key(id));
            if all_groups_hidden {
                warn!(team = %team.id, "dropping team whose groups are all hidden or unknown");
                continue;
            }
            teams.insert(team.id.clone(), team);
        }

        let problems: BTreeMap<_, _> = parts
            .problems
            .into_iter()
            .map(|problem| (problem.id.clone(), problem))
            .collect();

        let judgement_types: BTreeMap<_, _> = parts
            .judgement_types
            .into_iter()
            .map(|judgement_type| (judgement_type.id.clone(), judgement_type))
            .collect();

        let mut submissions = Vec::new();
        for submission in parts.submissions {
            if !teams.contains_key(&submission.team_id) {
                warn!(
                    submission = %submission.id,
                    team = %submission.team_id,
                    "skipping submission from unknown team"
                );
                continue;
            }
            if !problems.contains_key(&submission.problem_id) {
                warn!(
                    submission = %submission.id,
                    problem = %submission.problem_id,
                    "skipping submission for unknown problem"
                );
                continue;
            }
            submissions.push(submission);
        }

        let known_submissions: BTreeSet<_> = submissions
            .iter()
            .map(|submission| submission.id.clone())
            .collect();
        let mut judgements = Vec::new();
        for judgement in parts.judgements {
            if !known_submissions.contains(&judgement.submission_id) {
                warn!(
                    submission = %judgement.submission_id,
                    "skipping judgement for unknown submission"
                );
                continue;
            }
            judgements.push(judgement);
        }

        Ok(Self {
            info,
            groups,
            organizations,
            teams,
            problems,
            judgement_types,
            submissions,
            judgements,
        })
    }

    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.get(id)
    }

    pub fn organization_of(&self, team: &Team) -> Option<&Organization> {
        team.organization_id
            .as_ref()
            .and_then(|id| self.organizations.get(id))
    }

    /// Human-readable affiliation for roster lines; empty when the team has
    /// no resolvable organization.
    pub fn affiliation_name(&self, team: &Team) -> &str {
        self.organization_of(team)
            .map(Organization::display_name)
            .unwrap_or("")
    }

    pub fn group_names(&self, team: &Team) -> Vec<&str> {
        team.group_ids
            .iter()
            .filter_map(|id| self.groups.get(id))
            .map(|group| group.name.as_str())
            .collect()
    }

    /// Shared eligibility predicate: an empty filter places no restriction,
    /// otherwise the team's group set must intersect the filter.
    pub fn team_in_groups(&self, team_id: &TeamId, filter: &BTreeSet<GroupId>) -> bool {
        if filter.is_empty() {
            return true;
        }
        match self.teams.get(team_id) {
            Some(team) => team.group_ids.iter().any(|id| filter.contains(id)),
            None => false,
        }
    }

    /// Problems in presentation order.
    pub fn problems_in_order(&self) -> Vec<&Problem> {
        let mut problems: Vec<&Problem> = self.problems.values().collect();
        problems.sort_by_key(|problem| problem.ordinal);
        problems
    }
}

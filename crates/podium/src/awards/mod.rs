mod citations;
mod tiers;

use serde::Serialize;

use crate::config::AwardsConfig;
use crate::contest::domain::TeamId;
use crate::contest::enrich::JudgedSubmission;
use crate::contest::ContestSnapshot;
use crate::ranking::ScoreboardRow;

/// A granted award, in the shape the results document expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Award {
    pub id: String,
    pub citation: String,
    pub team_ids: Vec<TeamId>,
    pub show: bool,
}

/// Human-readable grant line accumulated for the audit roster. Purely a
/// side output; never feeds back into allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterLine {
    pub team_id: TeamId,
    pub team_name: String,
    pub group_names: String,
    pub organization: String,
    pub citation: String,
    pub members: String,
}

/// Ending cursor (scoreboard rows consumed) after each tier of one medal
/// pass. Monotonically non-decreasing gold through bronze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MedalPassCursors {
    pub last_gold: u32,
    pub last_silver: u32,
    pub last_bronze: u32,
}

/// Everything the allocator produces for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    pub awards: Vec<Award>,
    pub roster: Vec<RosterLine>,
    /// One entry per configured medal pass, in configuration order.
    pub medal_passes: Vec<MedalPassCursors>,
    /// Rows consumed when the final medal pass ended; gates group-leader
    /// awards. Absent when no medals are configured.
    pub medal_cutoff: Option<u32>,
}

/// Allocate the full layered award set from a ranked scoreboard.
///
/// Pure with respect to its inputs: the scoreboard is never mutated, the
/// medal cursor is threaded explicitly between tiers, and repeated calls
/// with the same inputs produce identical output.
pub fn allocate(
    snapshot: &ContestSnapshot,
    scoreboard: &[ScoreboardRow],
    judged: &[JudgedSubmission],
    config: &AwardsConfig,
) -> AllocationOutcome {
    let mut grants = Grants::new(snapshot, config.id_token.as_deref());

    if config.first_to_solve {
        citations::first_to_solve(&mut grants, snapshot, judged, config);
    }
    for (index, tier) in config.top_teams.iter().enumerate() {
        tiers::top_team_tier(&mut grants, snapshot, scoreboard, config, tier, index);
    }
    if let Some(champion) = &config.champion {
        citations::champion(&mut grants, scoreboard, champion);
    }

    let mut medal_passes = Vec::new();
    for (index, tier) in config.medals.iter().enumerate() {
        medal_passes.push(tiers::medal_pass(
            &mut grants,
            snapshot,
            scoreboard,
            config,
            tier,
            index,
        ));
    }
    let medal_cutoff = medal_passes.last().map(|cursors| cursors.last_bronze);

    for leader in &config.group_leaders {
        citations::group_leader(&mut grants, snapshot, scoreboard, leader, medal_cutoff);
    }
    if let Some(last_accepted) = &config.last_accepted {
        citations::last_accepted(&mut grants, judged, last_accepted);
    }

    let (awards, roster) = grants.into_parts();
    AllocationOutcome {
        awards,
        roster,
        medal_passes,
        medal_cutoff,
    }
}

/// Accumulates award records plus their roster lines. Replaces the
/// original's mutable global roster list with an explicit output value.
pub(crate) struct Grants<'a> {
    snapshot: &'a ContestSnapshot,
    id_token: Option<&'a str>,
    awards: Vec<Award>,
    roster: Vec<RosterLine>,
}

impl<'a> Grants<'a> {
    fn new(snapshot: &'a ContestSnapshot, id_token: Option<&'a str>) -> Self {
        Self {
            snapshot,
            id_token,
            awards: Vec::new(),
            roster: Vec::new(),
        }
    }

    pub(crate) fn grant(&mut self, base_id: String, citation: String, team_ids: Vec<TeamId>) {
        let id = match self.id_token {
            Some(token) => format!("{base_id}-{token}"),
            None => base_id,
        };

        for team_id in &team_ids {
            if let Some(team) = self.snapshot.team(team_id) {
                self.roster.push(RosterLine {
                    team_id: team_id.clone(),
                    team_name: team.name.clone(),
                    group_names: self.snapshot.group_names(team).join(", "),
                    organization: self.snapshot.affiliation_name(team).to_string(),
                    citation: citation.clone(),
                    members: team.members.join(", "),
                });
            }
        }

        self.awards.push(Award {
            id,
            citation,
            team_ids,
            show: true,
        });
    }

    fn into_parts(self) -> (Vec<Award>, Vec<RosterLine>) {
        (self.awards, self.roster)
    }
}

/// The no-occupy exclusion: teams in these categories compete unofficially
/// and never consume placement or medal slots.
pub(crate) fn in_no_occupy(
    snapshot: &ContestSnapshot,
    config: &AwardsConfig,
    team_id: &TeamId,
) -> bool {
    !config.no_occupy_groups.is_empty()
        && snapshot.team_in_groups(team_id, &config.no_occupy_groups)
}

/// Key for the distinct-school cap. A team without an organization counts
/// as its own school.
pub(crate) fn school_key(snapshot: &ContestSnapshot, team_id: &TeamId) -> String {
    snapshot
        .team(team_id)
        .and_then(|team| team.organization_id.as_ref())
        .map(|organization| format!("org:{organization}"))
        .unwrap_or_else(|| format!("team:{team_id}"))
}

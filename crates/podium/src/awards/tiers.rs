use std::collections::BTreeSet;

use crate::config::{AwardsConfig, MedalTier, TopTeamTier};
use crate::contest::ContestSnapshot;
use crate::ranking::ScoreboardRow;

use super::{in_no_occupy, school_key, Grants, MedalPassCursors};

/// Walk the scoreboard from rank 1 and place the first `slots` distinct
/// schools among eligible, occupying teams. Emits one award per placement.
pub(crate) fn top_team_tier(
    grants: &mut Grants<'_>,
    snapshot: &ContestSnapshot,
    scoreboard: &[ScoreboardRow],
    config: &AwardsConfig,
    tier: &TopTeamTier,
    tier_index: usize,
) {
    let mut placed_schools: BTreeSet<String> = BTreeSet::new();
    let mut placements = Vec::new();

    for row in scoreboard {
        if placements.len() as u32 == tier.slots {
            break;
        }
        if !snapshot.team_in_groups(&row.team_id, &tier.eligible_groups) {
            continue;
        }
        if in_no_occupy(snapshot, config, &row.team_id) {
            continue;
        }
        if !placed_schools.insert(school_key(snapshot, &row.team_id)) {
            // School already holds a placement in this tier; a later
            // distinct-school team fills the slot instead.
            continue;
        }
        placements.push(row.team_id.clone());
    }

    for (index, team_id) in placements.into_iter().enumerate() {
        let place = index as u32 + 1;
        let base_id = if tier_index == 0 {
            format!("rank-{place}")
        } else {
            format!("rank-{place}-{tier_index}")
        };
        let citation = format!("{} {}", ordinal(place), tier.citation_suffix);
        grants.grant(base_id, citation, vec![team_id]);
    }
}

/// One gold/silver/bronze pass over the scoreboard. A single cursor is
/// shared across the three tiers and the distinct-school set is threaded
/// through them: a school that already medaled stops counting toward the
/// current tier's target but its later teams still occupy positions and
/// still appear in the tier they land in.
pub(crate) fn medal_pass(
    grants: &mut Grants<'_>,
    snapshot: &ContestSnapshot,
    scoreboard: &[ScoreboardRow],
    config: &AwardsConfig,
    tier: &MedalTier,
    pass_index: usize,
) -> MedalPassCursors {
    let mut position = 0usize;
    let mut schools: BTreeSet<String> = BTreeSet::new();
    let mut cumulative_target = 0u32;
    let mut cursors = [0u32; 3];

    let tiers = [
        (tier.gold, "gold-medal", "Gold Medalist"),
        (tier.silver, "silver-medal", "Silver Medalist"),
        (tier.bronze, "bronze-medal", "Bronze Medalist"),
    ];

    for (slot, (count, base_id, base_citation)) in tiers.into_iter().enumerate() {
        cumulative_target += count;
        let mut medalists = Vec::new();

        while (schools.len() as u32) < cumulative_target && position < scoreboard.len() {
            let row = &scoreboard[position];
            position += 1;
            if !snapshot.team_in_groups(&row.team_id, &tier.eligible_groups) {
                continue;
            }
            if in_no_occupy(snapshot, config, &row.team_id) {
                continue;
            }
            schools.insert(school_key(snapshot, &row.team_id));
            medalists.push(row.team_id.clone());
        }

        cursors[slot] = position as u32;
        if !medalists.is_empty() {
            let base_id = if pass_index == 0 {
                base_id.to_string()
            } else {
                format!("{base_id}-{pass_index}")
            };
            let citation = if tier.citation_suffix.is_empty() {
                base_citation.to_string()
            } else {
                format!("{} {}", base_citation, tier.citation_suffix)
            };
            grants.grant(base_id, citation, medalists);
        }
    }

    MedalPassCursors {
        last_gold: cursors[0],
        last_silver: cursors[1],
        last_bronze: cursors[2],
    }
}

/// English ordinal for placement citations: 1st, 2nd, 3rd, 4th, 122nd, 213th.
pub(crate) fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_cover_the_teen_exceptions() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(122), "122nd");
        assert_eq!(ordinal(213), "213th");
    }
}

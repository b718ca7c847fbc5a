use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contest::domain::{GroupId, JudgementTypeId};
use crate::contest::ContestSnapshot;
use crate::ranking::TiebreakPolicy;

/// Tracing controls, read from the environment (`.env` honored).
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl TelemetryConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self {
            log_level: env::var("PODIUM_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Declarative description of one top-N placement tier: the first
/// `slots` distinct schools among eligible teams, walked from rank 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTeamTier {
    pub slots: u32,
    /// Empty means no group restriction.
    #[serde(default)]
    pub eligible_groups: BTreeSet<GroupId>,
    /// Appended to the placement citation, e.g. "1st Place".
    #[serde(default = "default_place_suffix")]
    pub citation_suffix: String,
}

fn default_place_suffix() -> String {
    "Place".to_string()
}

/// One gold/silver/bronze medal pass. Counts are distinct-school targets,
/// applied cumulatively from the start of the pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedalTier {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    #[serde(default)]
    pub eligible_groups: BTreeSet<GroupId>,
    /// Appended to the medal citations when several passes run (e.g. one
    /// per division).
    #[serde(default)]
    pub citation_suffix: String,
}

/// Citation for the highest-ranked team of a designated group, granted only
/// when that team falls within the medal cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLeaderAward {
    pub group: GroupId,
    pub citation: String,
}

/// Citation for the overall rank-1 row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionAward {
    #[serde(default = "default_champion_citation")]
    pub citation: String,
}

fn default_champion_citation() -> String {
    "Champion".to_string()
}

/// Citation for the latest accepted submission of the contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastAcceptedAward {
    #[serde(default = "default_tenacious_citation")]
    pub citation: String,
}

fn default_tenacious_citation() -> String {
    "Tenacious Award".to_string()
}

/// Declarative award configuration, loaded once from a JSON file and never
/// mutated. Group and judgement-type references are validated against the
/// snapshot before any computation starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardsConfig {
    /// Teams in these groups never occupy placement or medal slots
    /// (exhibition/staff teams).
    #[serde(default)]
    pub no_occupy_groups: BTreeSet<GroupId>,
    /// Verdict applied to submissions with no judgement record.
    #[serde(default = "default_fallback_verdict")]
    pub fallback_verdict: JudgementTypeId,
    #[serde(default)]
    pub tiebreak: TiebreakPolicy,
    /// Deterministic disambiguation token appended to award ids so repeated
    /// exports do not collide in downstream tools.
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub top_teams: Vec<TopTeamTier>,
    #[serde(default)]
    pub medals: Vec<MedalTier>,
    #[serde(default)]
    pub champion: Option<ChampionAward>,
    #[serde(default)]
    pub first_to_solve: bool,
    #[serde(default)]
    pub last_accepted: Option<LastAcceptedAward>,
    #[serde(default)]
    pub group_leaders: Vec<GroupLeaderAward>,
}

fn default_fallback_verdict() -> JudgementTypeId {
    JudgementTypeId("WA".to_string())
}

impl Default for AwardsConfig {
    fn default() -> Self {
        Self {
            no_occupy_groups: BTreeSet::new(),
            fallback_verdict: default_fallback_verdict(),
            tiebreak: TiebreakPolicy::default(),
            id_token: None,
            top_teams: Vec::new(),
            medals: Vec::new(),
            champion: None,
            first_to_solve: false,
            last_accepted: None,
            group_leaders: Vec::new(),
        }
    }
}

impl AwardsConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fail fast on references the snapshot cannot resolve; allocation never
    /// encounters an unknown group or judgement type at runtime.
    pub fn validate(&self, snapshot: &ContestSnapshot) -> Result<(), ConfigError> {
        if !snapshot.judgement_types.contains_key(&self.fallback_verdict) {
            return Err(ConfigError::UnknownJudgementType {
                id: self.fallback_verdict.clone(),
            });
        }

        let check_groups = |context: &'static str,
                            groups: &BTreeSet<GroupId>|
         -> Result<(), ConfigError> {
            for group in groups {
                if !snapshot.groups.contains_key(group) {
                    return Err(ConfigError::UnknownGroup {
                        context,
                        id: group.clone(),
                    });
                }
            }
            Ok(())
        };

        check_groups("no_occupy_groups", &self.no_occupy_groups)?;
        for tier in &self.top_teams {
            check_groups("top_teams", &tier.eligible_groups)?;
        }
        for tier in &self.medals {
            check_groups("medals", &tier.eligible_groups)?;
        }
        for leader in &self.group_leaders {
            if !snapshot.groups.contains_key(&leader.group) {
                return Err(ConfigError::UnknownGroup {
                    context: "group_leaders",
                    id: leader.group.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Configuration failures; all fatal before any computation begins.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{context} references unknown group '{id}'")]
    UnknownGroup { context: &'static str, id: GroupId },
    #[error("configuration references unknown judgement type '{id}'")]
    UnknownJudgementType { id: JudgementTypeId },
}

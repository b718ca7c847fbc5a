use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier wrapper for teams as issued by the contest system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub String);

/// Identifier wrapper for organizations (schools).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

/// Identifier wrapper for groups (team categories such as "rookie" or "all-girls").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub String);

/// Identifier wrapper for problems.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(pub String);

/// Identifier wrapper for submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    /// Numeric view of the id, used as the final scoreboard tiebreak.
    /// Non-numeric ids order as zero.
    pub fn numeric(&self) -> u64 {
        self.0.parse().unwrap_or(0)
    }
}

/// Identifier wrapper for judgement types (verdict acronyms such as "AC" or "WA").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JudgementTypeId(pub String);

macro_rules! display_id {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        })+
    };
}

display_id!(TeamId, OrganizationId, GroupId, ProblemId, SubmissionId, JudgementTypeId);

/// Contest-relative time in the `H:MM:SS` / `H:MM:SS.mmm` reltime notation
/// used by CCS-style feeds. Stored as signed milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContestTime(i64);

impl ContestTime {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self(seconds * 1000)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_seconds(self) -> i64 {
        self.0.div_euclid(1000)
    }

    pub fn as_seconds_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Acceptance times count whole minutes only; seconds are discarded.
    pub fn floored_to_minute_seconds(self) -> i64 {
        let seconds = self.as_seconds();
        seconds - seconds.rem_euclid(60)
    }
}

impl fmt::Display for ContestTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let millis = self.0.abs();
        let total_seconds = millis / 1000;
        let (hours, minutes, seconds) = (
            total_seconds / 3600,
            total_seconds / 60 % 60,
            total_seconds % 60,
        );
        let fraction = millis % 1000;
        if fraction == 0 {
            write!(f, "{sign}{hours}:{minutes:02}:{seconds:02}")
        } else {
            write!(f, "{sign}{hours}:{minutes:02}:{seconds:02}.{fraction:03}")
        }
    }
}

/// Error raised for a malformed reltime string.
#[derive(Debug, thiserror::Error)]
#[error("invalid contest time '{value}': expected H:MM:SS or H:MM:SS.mmm")]
pub struct ContestTimeParseError {
    pub value: String,
}

impl FromStr for ContestTime {
    type Err = ContestTimeParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ContestTimeParseError {
            value: raw.to_string(),
        };

        let trimmed = raw.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut parts = body.split(':');
        let hours: i64 = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;
        let minutes: i64 = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;
        let seconds_part = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() || minutes >= 60 {
            return Err(invalid());
        }

        let (seconds, millis) = match seconds_part.split_once('.') {
            Some((whole, fraction)) => {
                let padded = format!("{fraction:0<3}");
                let millis: i64 = padded.get(..3).and_then(|f| f.parse().ok()).ok_or_else(invalid)?;
                (whole.parse::<i64>().map_err(|_| invalid())?, millis)
            }
            None => (seconds_part.parse::<i64>().map_err(|_| invalid())?, 0),
        };
        if seconds >= 60 {
            return Err(invalid());
        }

        let total = (hours * 3600 + minutes * 60 + seconds) * 1000 + millis;
        Ok(Self(if negative { -total } else { total }))
    }
}

impl Serialize for ContestTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContestTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Contest metadata as published by the contest system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub shortname: Option<String>,
    pub duration: ContestTime,
    #[serde(default)]
    pub scoreboard_freeze_duration: Option<ContestTime>,
    /// Penalty minutes added per rejected-with-penalty submission.
    #[serde(default = "default_penalty_minutes")]
    pub penalty_time: u32,
    #[serde(default)]
    pub start_time: Option<DateTime<FixedOffset>>,
}

fn default_penalty_minutes() -> u32 {
    20
}

impl ContestInfo {
    /// Contest time at which the scoreboard freeze begins, if any.
    pub fn freeze_start(&self) -> Option<ContestTime> {
        self.scoreboard_freeze_duration
            .map(|freeze| ContestTime::from_millis(self.duration.as_millis() - freeze.as_millis()))
    }
}

/// A competing team. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(default)]
    pub icpc_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    #[serde(default)]
    pub group_ids: Vec<GroupId>,
    /// Member names, populated from `persons` records when the feed carries them.
    #[serde(default)]
    pub members: Vec<String>,
}

/// An organization (school) a team represents. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    #[serde(default)]
    pub icpc_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub formal_name: Option<String>,
    #[serde(default)]
    pub shortname: Option<String>,
}

impl Organization {
    pub fn display_name(&self) -> &str {
        self.formal_name.as_deref().unwrap_or(&self.name)
    }

    pub fn short_display_name(&self) -> &str {
        self.shortname.as_deref().unwrap_or(&self.name)
    }
}

/// A team classification tag, used for display and award eligibility scoping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
}

/// A contest problem. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    /// 0-based presentation order.
    pub ordinal: u32,
    pub label: String,
    pub name: String,
}

/// Classification of a submission outcome. Loaded once, immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgementType {
    pub id: JudgementTypeId,
    /// Whether this verdict counts as solving the problem.
    pub solved: bool,
    /// Whether this verdict incurs time penalty.
    #[serde(default)]
    pub penalty: bool,
}

/// A single submission as reported by the contest system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub team_id: TeamId,
    pub problem_id: ProblemId,
    pub contest_time: ContestTime,
}

/// A judgement record, used only to resolve a submission's verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgement {
    #[serde(default)]
    pub id: Option<String>,
    pub submission_id: SubmissionId,
    /// Absent while judging is still in flight.
    #[serde(default)]
    pub judgement_type_id: Option<JudgementTypeId>,
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contest_time_parses_reltime_notation() {
        let time: ContestTime = "2:03:04".parse().expect("plain reltime parses");
        assert_eq!(time.as_seconds(), 2 * 3600 + 3 * 60 + 4);

        let fractional: ContestTime = "0:10:30.250".parse().expect("fractional reltime parses");
        assert_eq!(fractional.as_millis(), (10 * 60 + 30) * 1000 + 250);

        let negative: ContestTime = "-0:05:00".parse().expect("negative reltime parses");
        assert_eq!(negative.as_seconds(), -300);
    }

    #[test]
    fn contest_time_rejects_malformed_values() {
        assert!("".parse::<ContestTime>().is_err());
        assert!("5:99:00".parse::<ContestTime>().is_err());
        assert!("1:00".parse::<ContestTime>().is_err());
        assert!("one:two:three".parse::<ContestTime>().is_err());
    }

    #[test]
    fn contest_time_round_trips_through_display() {
        for raw in ["5:00:00", "0:20:15", "1:02:03.450"] {
            let time: ContestTime = raw.parse().expect("parses");
            assert_eq!(time.to_string(), raw);
        }
    }

    #[test]
    fn acceptance_times_floor_to_whole_minutes() {
        let time: ContestTime = "0:20:59".parse().expect("parses");
        assert_eq!(time.floored_to_minute_seconds(), 20 * 60);
    }

    #[test]
    fn freeze_start_subtracts_freeze_from_duration() {
        let info = ContestInfo {
            id: "c1".to_string(),
            name: "Sample Contest".to_string(),
            shortname: None,
            duration: "5:00:00".parse().expect("duration parses"),
            scoreboard_freeze_duration: Some("1:00:00".parse().expect("freeze parses")),
            penalty_time: 20,
            start_time: None,
        };
        assert_eq!(
            info.freeze_start().expect("freeze configured").as_seconds(),
            4 * 3600
        );
    }

    #[test]
    fn non_numeric_submission_ids_order_as_zero() {
        assert_eq!(SubmissionId("1042".to_string()).numeric(), 1042);
        assert_eq!(SubmissionId("s-17".to_string()).numeric(), 0);
    }
}

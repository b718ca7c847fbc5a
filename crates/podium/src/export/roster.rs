use std::io::Write;

use crate::awards::RosterLine;
use crate::contest::ContestSnapshot;
use crate::ranking::ScoreboardRow;

use super::ExportError;

/// Write the human-review roster: one line per granted team, quoted CSV.
pub fn write_roster<W: Write>(writer: W, roster: &[RosterLine]) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record([
        "team id",
        "team name",
        "team group",
        "team affiliation",
        "award",
        "team members",
    ])?;
    for line in roster {
        csv_writer.write_record([
            line.team_id.0.as_str(),
            line.team_name.as_str(),
            line.group_names.as_str(),
            line.organization.as_str(),
            line.citation.as_str(),
            line.members.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Dump the final scoreboard for spot checks: name, solves, penalized
/// minutes, rank.
pub fn write_scoreboard<W: Write>(
    writer: W,
    snapshot: &ContestSnapshot,
    rows: &[ScoreboardRow],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["team name", "solved", "time", "rank"])?;
    for row in rows {
        let name = snapshot
            .team(&row.team_id)
            .map(|team| team.name.as_str())
            .unwrap_or(row.team_id.0.as_str());
        csv_writer.write_record([
            name,
            &row.score.num_solved.to_string(),
            &(row.score.total_time / 60).to_string(),
            &row.rank.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

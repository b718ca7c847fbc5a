use std::path::PathBuf;

use clap::Args;
use tracing::info;

use podium::awards;
use podium::config::{AwardsConfig, TelemetryConfig};
use podium::contest::archive::ArchiveSource;
use podium::contest::enrich::judge_submissions;
use podium::contest::feed::EventFeedSource;
use podium::contest::{ContestSnapshot, ContestSource};
use podium::error::AppError;
use podium::export::{self, ResolverDocument};
use podium::ranking::rank_teams;
use podium::telemetry;

/// Where to read the contest from: a saved event feed or an archive
/// directory of per-endpoint documents. Exactly one must be given.
#[derive(Args, Debug)]
pub(crate) struct SourceArgs {
    /// Path to a saved NDJSON event feed
    #[arg(long, conflicts_with = "archive", required_unless_present = "archive")]
    feed: Option<PathBuf>,
    /// Directory holding per-endpoint JSON documents (contest.json, teams.json, ...)
    #[arg(long)]
    archive: Option<PathBuf>,
}

impl SourceArgs {
    fn fetch(&self) -> Result<ContestSnapshot, AppError> {
        let snapshot = match (&self.feed, &self.archive) {
            (Some(feed), _) => EventFeedSource::new(feed).fetch_snapshot()?,
            (None, Some(archive)) => ArchiveSource::new(archive).fetch_snapshot()?,
            (None, None) => unreachable!("clap enforces one source argument"),
        };
        info!(
            contest = %snapshot.info.name,
            teams = snapshot.teams.len(),
            submissions = snapshot.submissions.len(),
            "contest loaded"
        );
        Ok(snapshot)
    }
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Award configuration file (JSON)
    #[arg(long)]
    awards: PathBuf,
    /// Output basename; writes `<out>.xml` and `<out>.csv`
    #[arg(long, default_value = "results")]
    out: PathBuf,
    /// Also dump the ranked scoreboard as CSV
    #[arg(long)]
    board: Option<PathBuf>,
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    telemetry::init(&TelemetryConfig::load())?;

    let config = AwardsConfig::from_path(&args.awards)?;
    let snapshot = args.source.fetch()?;
    config.validate(&snapshot)?;

    let judged = judge_submissions(&snapshot, &config.fallback_verdict)?;
    let scoreboard = rank_teams(&snapshot, &judged, config.tiebreak);
    let outcome = awards::allocate(&snapshot, &scoreboard, &judged, &config);
    info!(
        rows = scoreboard.len(),
        awards = outcome.awards.len(),
        "allocation complete"
    );

    let document = ResolverDocument::assemble(&snapshot, &judged, &outcome);
    let results_path = args.out.with_extension("xml");
    export::write_results_file(&results_path, &document)?;
    let roster_path = args.out.with_extension("csv");
    export::write_roster_file(&roster_path, &outcome.roster)?;
    if let Some(board) = &args.board {
        export::write_scoreboard_file(board, &snapshot, &scoreboard)?;
    }

    println!("Results document: {}", results_path.display());
    println!("Award roster:     {}", roster_path.display());
    for award in &outcome.awards {
        println!("  {} ({} team(s))", award.citation, award.team_ids.len());
    }
    Ok(())
}

#[derive(Args, Debug)]
pub(crate) struct BoardArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Optional award configuration; controls fallback verdict and tiebreak
    #[arg(long)]
    awards: Option<PathBuf>,
}

pub(crate) fn run_board(args: BoardArgs) -> Result<(), AppError> {
    telemetry::init(&TelemetryConfig::load())?;

    let config = match &args.awards {
        Some(path) => AwardsConfig::from_path(path)?,
        None => AwardsConfig::default(),
    };
    let snapshot = args.source.fetch()?;
    config.validate(&snapshot)?;

    let judged = judge_submissions(&snapshot, &config.fallback_verdict)?;
    let scoreboard = rank_teams(&snapshot, &judged, config.tiebreak);

    println!("{:>4}  {:<40} {:>6} {:>8}", "Rank", "Team", "Solved", "Minutes");
    for row in &scoreboard {
        let name = snapshot
            .team(&row.team_id)
            .map(|team| team.name.as_str())
            .unwrap_or("<unknown>");
        println!(
            "{:>4}  {:<40} {:>6} {:>8}",
            row.rank,
            name,
            row.score.num_solved,
            row.score.total_time / 60
        );
    }
    Ok(())
}

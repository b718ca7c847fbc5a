use clap::{Parser, Subcommand};
use podium::error::AppError;

use crate::commands::{run_board, run_export, BoardArgs, ExportArgs};

#[derive(Parser, Debug)]
#[command(
    name = "podium",
    about = "Compute contest rankings and awards, and export resolver results",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline and write the results document plus award roster
    Export(ExportArgs),
    /// Print the ranked scoreboard without allocating awards
    Board(BoardArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Export(args) => run_export(args),
        Command::Board(args) => run_board(args),
    }
}

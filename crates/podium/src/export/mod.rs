mod resolver;
mod roster;

pub use resolver::ResolverDocument;
pub use roster::{write_roster, write_scoreboard};

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::awards::RosterLine;
use crate::contest::ContestSnapshot;
use crate::ranking::ScoreboardRow;

/// Errors raised while serializing or writing result artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("xml serialization failed: {0}")]
    Xml(#[from] quick_xml::de::DeError),
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the resolver XML document to `path`.
pub fn write_results_file(path: &Path, document: &ResolverDocument) -> Result<(), ExportError> {
    let rendered = document.render()?;
    let mut file = create(path)?;
    file.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Write the award roster CSV to `path`.
pub fn write_roster_file(path: &Path, roster: &[RosterLine]) -> Result<(), ExportError> {
    let file = create(path)?;
    write_roster(file, roster)
}

/// Write the scoreboard CSV to `path`.
pub fn write_scoreboard_file(
    path: &Path,
    snapshot: &ContestSnapshot,
    rows: &[ScoreboardRow],
) -> Result<(), ExportError> {
    let file = create(path)?;
    write_scoreboard(file, snapshot, rows)
}

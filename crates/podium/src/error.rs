use crate::config::ConfigError;
use crate::contest::enrich::EnrichError;
use crate::contest::SourceError;
use crate::export::ExportError;
use crate::telemetry::TelemetryError;

/// Top-level error for pipeline runs, aggregating each stage's failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("data source error: {0}")]
    Source(#[from] SourceError),
    #[error("enrichment error: {0}")]
    Enrich(#[from] EnrichError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use argus_core::error::AppError;
use argus_core::traits::DecisionLog;
use argus_core::verdict::DecisionRecord;

/// Default location of the decision log.
pub const DEFAULT_DECISIONS_PATH: &str = "agency_decisions.csv";

/// Append-only CSV log of screening decisions.
///
/// Each decision is one `url,decision,reasoning` row, written without a
/// header so repeated appends across process restarts produce one uniform
/// file. Every append opens the file, writes a single row, and flushes
/// before closing; rows are self-contained even with concurrent writers.
#[derive(Debug, Clone)]
pub struct CsvDecisionLog {
    path: PathBuf,
}

impl CsvDecisionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write_record(path: &Path, record: &DecisionRecord) -> Result<(), AppError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| {
                AppError::StorageError(format!("Failed to open {}: {e}", path.display()))
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| AppError::StorageError(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| AppError::StorageError(e.to_string()))?;

        Ok(())
    }
}

impl DecisionLog for CsvDecisionLog {
    async fn append(&self, record: &DecisionRecord) -> Result<(), AppError> {
        tracing::debug!("Appending {} decision for {}", record.decision, record.url);

        let path = self.path.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || Self::write_record(&path, &record))
            .await
            .map_err(|e| AppError::StorageError(format!("Log task failed: {e}")))?
    }
}

//! Bulk load of the pre-built summary file.
//!
//! The grid is populated entirely from this flattened JSON array; no
//! per-item detail fetches happen at startup. A missing or empty file is
//! the one blocking failure in the system.

use crate::errors::{SummaryDataError, SummaryDataResult};
use schema::PokemonSummary;
use std::fs;
use std::path::Path;

/// Load the full summary list, replacing any previous in-memory list.
pub fn load_summaries(path: &Path) -> SummaryDataResult<Vec<PokemonSummary>> {
    let content = fs::read_to_string(path).map_err(|e| SummaryDataError::Unreadable {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let summaries: Vec<PokemonSummary> =
        serde_json::from_str(&content).map_err(|e| SummaryDataError::Malformed(e.to_string()))?;

    if summaries.is_empty() {
        return Err(SummaryDataError::Empty(path.to_path_buf()));
    }

    tracing::info!(count = summaries.len(), path = %path.display(), "loaded summary data");
    Ok(summaries)
}

//! JSON input files for the CLI

use serde::de::DeserializeOwned;
use shared::{AppError, AppResult, ErrorCode};
use std::path::Path;

/// Read and parse a JSON file
///
/// A missing or unreadable file is `IoError`; malformed content is
/// `InvalidFormat`. Both carry the path as a `path` detail.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let shown = path.display().to_string();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::io(shown.clone(), format!("Failed to read {shown}: {e}")))?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid JSON in {shown}: {e}"))
            .with_detail("path", shown)
    })
}

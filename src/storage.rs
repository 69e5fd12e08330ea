use crate::errors::AppError;
use crate::models::ProgressData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("GOAL_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/progress.json"))
}

/// Loads the progress blob. Absent or malformed files degrade to an
/// empty map; nothing is surfaced beyond a log line.
pub async fn load_progress(path: &Path) -> ProgressData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse progress file: {err}");
                ProgressData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => ProgressData::default(),
        Err(err) => {
            error!("failed to read progress file: {err}");
            ProgressData::default()
        }
    }
}

pub async fn persist_progress(path: &Path, data: &ProgressData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the tracker home directory, its `exports` directory and an initial `config.json`.
///
/// # Arguments
/// - `tracker_home` - The directory that will be the root of data directory, e.g. `$HOME/tracker`
/// - `year` - The calendar year to track, 2026 if `None`.
///
/// # Errors
/// - Returns an error if the year cannot be tracked or if any file operations fail.
pub async fn init(tracker_home: &Path, year: Option<i32>) -> Result<Out<()>> {
    let config = Config::create(tracker_home, year)
        .await
        .context("Unable to create the tracker home and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the tracker directory at {} for {}",
        config.root().display(),
        config.year()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("tracker");
        let out = init(&home, Some(2028)).await.unwrap();
        assert!(out.message().contains("2028"));
        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.year(), 2028);
    }
}

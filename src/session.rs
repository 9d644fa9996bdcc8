//! Keeps the `AppState` in `session.json` between CLI invocations.

use crate::app::AppState;
use crate::error::{ErrorType, IntoResult};
use crate::{utils, Result};
use anyhow::Context;
use std::path::Path;
use tracing::trace;

/// Loads the session at `path`. A missing file is an empty session.
pub async fn load(path: &Path) -> Result<AppState> {
    if !path.is_file() {
        trace!("No session at {}", path.display());
        return Ok(AppState::default());
    }
    utils::deserialize(path)
        .await
        .context("The session file is unreadable, run 'tracker logout' to reset it")
        .pub_result(ErrorType::Session)
}

/// Writes `state` to `path`. An empty session removes the file.
pub async fn save(path: &Path, state: &AppState) -> Result<()> {
    if state == &AppState::default() {
        return utils::remove_if_exists(path)
            .await
            .pub_result(ErrorType::Session);
    }
    utils::serialize(path, state)
        .await
        .pub_result(ErrorType::Session)
}

use crate::app::{EXPORTED, EXPORT_FAILED};
use crate::commands::{close, open, Out, LOGIN_FIRST};
use crate::export::CSV_MIME_TYPE;
use crate::{Config, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The file written by `tracker export`.
#[derive(Debug, Clone, Serialize)]
pub struct Exported {
    pub path: PathBuf,
    pub mime_type: &'static str,
}

/// Writes `business_tracker_<year>.csv` into `dir`, or into `$TRACKER_HOME/exports` when `dir` is
/// `None`.
pub async fn export(config: Config, dir: Option<&Path>) -> Result<Out<Exported>> {
    let mut tracker = open(&config).await?;
    if tracker.identity().is_none() {
        return Ok(LOGIN_FIRST.into());
    }
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(|| config.exports());
    let result = tracker.export(&dir).await;
    close(&config, tracker).await?;

    Ok(match result {
        Ok(path) => Out::new(
            format!("{EXPORTED} Wrote {}", path.display()),
            Exported {
                path,
                mime_type: CSV_MIME_TYPE,
            },
        ),
        Err(e) => {
            debug!("{e:#}");
            EXPORT_FAILED.into()
        }
    })
}

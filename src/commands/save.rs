use crate::app::{LOGIN_TO_SAVE, SAVED, SAVE_FAILED};
use crate::commands::{close, open, Out};
use crate::{Config, Result};
use tracing::debug;

/// Writes the signed-in user's records to the store. A failed save keeps the edits in the session
/// so that it can be tried again.
pub async fn save(config: Config) -> Result<Out<()>> {
    let mut tracker = open(&config).await?;
    let signed_in = tracker.identity().is_some();
    let result = tracker.save().await;
    close(&config, tracker).await?;

    Ok(match result {
        Ok(()) => SAVED.into(),
        Err(e) => {
            debug!("{e:#}");
            if signed_in {
                SAVE_FAILED.into()
            } else {
                LOGIN_TO_SAVE.into()
            }
        }
    })
}

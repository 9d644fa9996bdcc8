use crate::commands::{close, open, Out};
use crate::{Config, Result};

/// Signs out and clears the session. Edits that were never saved are lost, and the message says
/// so.
pub async fn logout(config: Config) -> Result<Out<()>> {
    let mut tracker = open(&config).await?;
    let who = tracker.identity().map(|i| i.label().to_string());
    let discarded = tracker.sign_out();
    close(&config, tracker).await?;

    Ok(match (who, discarded) {
        (None, _) => "Nobody is signed in".into(),
        (Some(who), false) => format!("Signed out {who}").into(),
        (Some(who), true) => format!("Signed out {who}, unsaved edits were discarded").into(),
    })
}

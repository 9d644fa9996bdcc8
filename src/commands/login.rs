use crate::app::LOADED;
use crate::args::LoginArgs;
use crate::auth::{Credential, Identity};
use crate::commands::{close, open, Out};
use crate::tracker::LoadKind;
use crate::{Config, Result};
use serde::Serialize;

/// What `tracker login` reports.
#[derive(Debug, Clone, Serialize)]
pub struct Login {
    pub identity: Identity,
    pub load: LoadKind,
    pub weeks: usize,
}

/// Signs in and loads the user's records. A rejected credential is reported in the message and
/// recorded in the session; it is not an error.
pub async fn login(config: Config, args: LoginArgs) -> Result<Out<Login>> {
    let credential = if args.google() {
        Credential::Google
    } else {
        Credential::email(
            args.email().unwrap_or_default(),
            args.password().unwrap_or_default(),
        )
    };

    let mut tracker = open(&config).await?;
    let result = tracker.sign_in(credential).await;
    let out = match result {
        Err(e) => Out::new_message(e.message()),
        Ok(load) => {
            let identity = tracker
                .identity()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Sign in did not produce an identity"))?;
            let message = match load {
                LoadKind::Loaded => format!("{LOADED} Welcome back, {}", identity.label()),
                LoadKind::NotFound | LoadKind::LoadError => format!(
                    "Welcome, {}. Starting a fresh {}",
                    identity.label(),
                    tracker.year()
                ),
            };
            let weeks = tracker.state().dataset().len();
            Out::new(
                message,
                Login {
                    identity,
                    load,
                    weeks,
                },
            )
        }
    };
    close(&config, tracker).await?;
    Ok(out)
}

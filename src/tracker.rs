//! The controller that performs user actions against an `AppState`.

use crate::app::{reduce, Action, AppState, Clock};
use crate::auth::{AuthError, Credential, Identity, IdentityProvider};
use crate::error::{ErrorType, IntoResult};
use crate::export::{export_filename, to_csv};
use crate::model::{weeks_for_year, Dataset, Field};
use crate::persist::{LoadOutcome, Persistence};
use crate::{utils, Result};
use anyhow::anyhow;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How a sign-in obtained its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadKind {
    /// Stored records were found.
    Loaded,
    /// Nothing was stored yet; a fresh year was generated.
    NotFound,
    /// The store failed; a fresh year was generated.
    LoadError,
}

impl From<&LoadOutcome> for LoadKind {
    fn from(value: &LoadOutcome) -> Self {
        match value {
            LoadOutcome::Loaded(_) => LoadKind::Loaded,
            LoadOutcome::NotFound => LoadKind::NotFound,
            LoadOutcome::LoadError(_) => LoadKind::LoadError,
        }
    }
}

/// Owns the `AppState` and applies every user action to it through `reduce`.
pub struct Tracker {
    state: AppState,
    persistence: Persistence,
    provider: Box<dyn IdentityProvider + Send + Sync>,
    year: i32,
    fresh: Dataset,
    notice_seconds: u32,
}

impl Tracker {
    /// Fails if `year` is outside the supported calendar.
    pub fn new(
        state: AppState,
        persistence: Persistence,
        provider: Box<dyn IdentityProvider + Send + Sync>,
        year: i32,
        notice_seconds: u32,
    ) -> Result<Self> {
        let fresh = weeks_for_year(year).pub_result(ErrorType::Config)?;
        Ok(Self {
            state,
            persistence,
            provider,
            year,
            fresh,
            notice_seconds,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    fn dispatch(&mut self, action: Action) {
        let clock = Clock::new(Utc::now(), self.notice_seconds);
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action, &clock);
    }

    /// Signs in and loads the user's records, falling back to a fresh year when nothing usable is
    /// stored. A previous session is replaced.
    pub async fn sign_in(
        &mut self,
        credential: Credential,
    ) -> std::result::Result<LoadKind, AuthError> {
        let identity = match self.provider.sign_in(credential) {
            Ok(identity) => identity,
            Err(e) => {
                debug!("Sign in rejected: {e}");
                self.dispatch(Action::AuthFailed(e.message().to_string()));
                return Err(e);
            }
        };
        info!("Signed in as {}", identity.email());
        self.dispatch(Action::SignedIn(identity.clone()));

        let outcome = self.persistence.load(&identity).await;
        let kind = LoadKind::from(&outcome);
        self.dispatch(Action::Loaded {
            outcome,
            fallback: self.fresh.clone(),
        });
        Ok(kind)
    }

    /// Applies one typed value to week `id`. Returns `false` if there is no such week.
    pub fn edit(&mut self, id: u32, field: Field, input: &str) -> bool {
        let known = self.state.dataset.get(id).is_some();
        if !known {
            warn!("There is no week with id {id}");
        }
        self.dispatch(Action::Edit {
            id,
            field,
            input: input.to_string(),
        });
        known
    }

    /// Writes the whole dataset to the store, replacing what was there.
    pub async fn save(&mut self) -> Result<()> {
        let Some(identity) = self.state.identity.clone() else {
            self.dispatch(Action::SaveRejected);
            return Err(anyhow!("Nobody is signed in")).pub_result(ErrorType::Save);
        };
        let result = self.persistence.save(&identity, &self.state.dataset).await;
        match result {
            Ok(()) => {
                self.dispatch(Action::Saved(Ok(())));
                Ok(())
            }
            Err(e) => {
                warn!("Save failed: {e:#}");
                self.dispatch(Action::Saved(Err(format!("{e:#}"))));
                Err(e).pub_result(ErrorType::Save)
            }
        }
    }

    /// Writes the CSV export into `dir` and returns the path of the file.
    pub async fn export(&mut self, dir: &Path) -> Result<PathBuf> {
        let year = self.state.dataset.year().unwrap_or(self.year);
        let path = dir.join(export_filename(year));
        let result = write_export(&path, &self.state.dataset).await;
        match result {
            Ok(()) => {
                debug!("Exported to {}", path.display());
                self.dispatch(Action::Exported(Ok(())));
                Ok(path)
            }
            Err(e) => {
                warn!("Export failed: {e:#}");
                self.dispatch(Action::Exported(Err(format!("{e:#}"))));
                Err(e).pub_result(ErrorType::Export)
            }
        }
    }

    /// Forgets the identity and the dataset. Unsaved edits are discarded; returns `true` when
    /// that happened.
    pub fn sign_out(&mut self) -> bool {
        let discarded = self.state.dirty;
        if discarded {
            warn!("Signing out discards edits that were never saved");
        }
        if let Some(identity) = self.state.identity.as_ref() {
            info!("Signed out {}", identity.email());
        }
        self.provider.sign_out();
        self.dispatch(Action::SignedOut);
        discarded
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }
}

async fn write_export(path: &Path, data: &Dataset) -> Result<()> {
    if let Some(parent) = path.parent() {
        utils::make_dir(parent).await?;
    }
    utils::write(path, to_csv(data)).await
}

//! Command handlers for the tracker CLI.
//!
//! Every handler restores the session from the tracker home, performs one action through a
//! `Tracker`, and writes the session back.

mod export;
mod init;
mod login;
mod logout;
mod save;
mod set;
mod show;
mod status;

use crate::auth::MockProvider;
use crate::persist::Persistence;
use crate::store::FileStore;
use crate::tracker::Tracker;
use crate::{session, Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info, trace};

pub use export::{export, Exported};
pub use init::init;
pub use login::{login, Login};
pub use logout::logout;
pub use save::save;
pub use set::{set, Edit};
pub use show::{show, summary};
pub use status::{status, Status};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data and text meant for stdout.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,

    /// Output such as a rendered table.
    #[serde(skip)]
    text: Option<String>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
            text: None,
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
            text: None,
        }
    }

    /// Attach text that `print` writes to stdout.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Print the text (if it exists) to stdout, the message to `info!` and the structured data
    /// (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        if let Some(text) = self.text() {
            println!("{text}");
        }
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Restores the session kept in the tracker home.
async fn open(config: &Config) -> Result<Tracker> {
    let state = session::load(&config.session_path()).await?;
    trace!("Restored session, signed in: {}", state.identity().is_some());
    let store = FileStore::new(config.store_path());
    Tracker::new(
        state,
        Persistence::new(Box::new(store)),
        Box::new(MockProvider),
        config.year(),
        config.notice_seconds(),
    )
}

/// Writes the tracker's state back to the tracker home.
async fn close(config: &Config, tracker: Tracker) -> Result<()> {
    session::save(&config.session_path(), &tracker.into_state()).await
}

/// The message shown by commands that need someone signed in.
const LOGIN_FIRST: &str = "Please login first, run 'tracker login'";

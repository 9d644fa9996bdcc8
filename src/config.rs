//! Configuration file handling for the tracker.
//!
//! The configuration file is stored at `$TRACKER_HOME/config.json` and holds the tracked year, how
//! long notices stay visible, the currency symbol used for display, and where the key-value store
//! file lives.

use crate::app::DEFAULT_NOTICE_SECONDS;
use crate::model::weeks_for_year;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "tracker";
const CONFIG_VERSION: u8 = 1;
const DEFAULT_YEAR: i32 = 2026;
const DEFAULT_CURRENCY: &str = "R";
const CONFIG_JSON: &str = "config.json";
const SESSION_JSON: &str = "session.json";
const STORE_JSON: &str = "store.json";
const EXPORTS: &str = "exports";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$TRACKER_HOME` and from there it loads `$TRACKER_HOME/config.json`. It provides
/// paths to other items that are either configurable or are expected in a certain location within
/// the tracker home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the tracker home directory, if needed, and writes an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g. `$HOME/tracker`
    /// - `year` - The calendar year to track. Defaults to 2026.
    ///
    /// # Errors
    /// - Returns an error if the year cannot be tracked or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, year: Option<i32>) -> Result<Self> {
        let year = year.unwrap_or(DEFAULT_YEAR);
        weeks_for_year(year).context("Unable to track the requested year")?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the tracker home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        utils::make_dir(&root.join(EXPORTS)).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            year,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `tracker_home` exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(tracker_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = tracker_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The tracker home '{}' is missing, run 'tracker init' first",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn year(&self) -> i32 {
        self.config_file.year
    }

    pub fn notice_seconds(&self) -> u32 {
        self.config_file.notice_seconds
    }

    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    /// Where the state between CLI invocations is kept.
    pub fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_JSON)
    }

    /// Returns the stored `store_path` if it is absolute, otherwise resolves it against the home.
    pub fn store_path(&self) -> PathBuf {
        let p = self.config_file.store_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// The default directory CSV exports are written to.
    pub fn exports(&self) -> PathBuf {
        self.root.join(EXPORTS)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "tracker",
///   "config_version": 1,
///   "year": 2026,
///   "notice_seconds": 3,
///   "currency": "R",
///   "store_path": "store.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "tracker"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The calendar year whose weeks are tracked
    #[serde(default = "default_year")]
    year: i32,

    /// How long success and failure notices stay visible
    #[serde(default = "default_notice_seconds")]
    notice_seconds: u32,

    /// Shown in front of amounts in the table
    #[serde(default = "default_currency")]
    currency: String,

    /// Path to the key-value store file (optional, relative to the tracker home or absolute)
    /// Defaults to $TRACKER_HOME/store.json if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    store_path: Option<PathBuf>,
}

fn default_year() -> i32 {
    DEFAULT_YEAR
}

fn default_notice_seconds() -> u32 {
    DEFAULT_NOTICE_SECONDS
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            year: DEFAULT_YEAR,
            notice_seconds: DEFAULT_NOTICE_SECONDS,
            currency: DEFAULT_CURRENCY.to_string(),
            store_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it names another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .context("Unable to load the config file")?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        weeks_for_year(config.year).context("Invalid year in config file")?;

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        utils::serialize(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }

    /// Gets the store path, defaulting to `store.json`.
    fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(STORE_JSON))
    }
}

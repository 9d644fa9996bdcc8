//! These structs provide the CLI interface for the tracker CLI.

use crate::model::Field;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// tracker: Weekly deposits and withdrawals for a small business.
///
/// Sign in, type amounts into the week you want, and the tracker keeps monthly and yearly totals
/// for you. Your records are saved to a key-value store under your identity and can be exported
/// as a CSV file.
///
/// Each invocation performs one action. The signed-in user and any unsaved edits are kept in the
/// tracker home between invocations.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the tracker home directory and its configuration file.
    ///
    /// This is the first command you should run. By default the tracker home is $HOME/tracker,
    /// pass --tracker-home or set TRACKER_HOME if you want it somewhere else.
    Init(InitArgs),
    /// Sign in and load your records, or start a fresh year if nothing is stored.
    Login(LoginArgs),
    /// Sign out. Edits that were not saved are discarded.
    Logout,
    /// Print the weekly table with monthly and yearly totals.
    Show,
    /// Print the monthly and yearly totals.
    Summary,
    /// Set the deposit or out amount of one week.
    Set(SetArgs),
    /// Save all records to the store.
    Save,
    /// Write the records as a CSV file.
    Export(ExportArgs),
    /// Show who is signed in, whether there are unsaved edits, and the latest notice.
    Status,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where tracker data and configuration is held. Defaults to ~/tracker
    #[arg(long, env = "TRACKER_HOME", default_value_t = default_tracker_home())]
    tracker_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, tracker_home: PathBuf) -> Self {
        Self {
            log_level,
            tracker_home: tracker_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn tracker_home(&self) -> &DisplayPath {
        &self.tracker_home
    }
}

/// Args for the `tracker init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The calendar year to track. Defaults to 2026.
    #[arg(long)]
    year: Option<i32>,
}

impl InitArgs {
    pub fn new(year: Option<i32>) -> Self {
        Self { year }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}

/// Args for the `tracker login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    /// Your email address. Together with the password it identifies your records.
    #[arg(long, conflicts_with = "google")]
    email: Option<String>,

    /// Your password. It is not checked or stored.
    #[arg(long, conflicts_with = "google")]
    password: Option<String>,

    /// Sign in with the Google account instead of an email and password.
    #[arg(long)]
    google: bool,
}

impl LoginArgs {
    pub fn new(email: Option<String>, password: Option<String>, google: bool) -> Self {
        Self {
            email,
            password,
            google,
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn google(&self) -> bool {
        self.google
    }
}

/// Args for the `tracker set` command.
#[derive(Debug, Parser, Clone)]
pub struct SetArgs {
    /// The week number, e.g. 1 for "Week 1".
    week: u32,

    /// Which amount to set.
    field: Field,

    /// The amount. Anything that is not a number is stored as 0.
    #[arg(allow_hyphen_values = true)]
    value: String,
}

impl SetArgs {
    pub fn new(week: u32, field: Field, value: impl Into<String>) -> Self {
        Self {
            week,
            field,
            value: value.into(),
        }
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Args for the `tracker export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The directory to write the CSV file to. Defaults to $TRACKER_HOME/exports
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

fn default_tracker_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("tracker"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --tracker-home or TRACKER_HOME instead of relying on the \
                default tracker home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("tracker")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["tracker", "--tracker-home", "/tmp/t"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_set_parses_field_and_negative_value() {
        let args = parse(&["set", "3", "out", "-20"]);
        match args.command() {
            Command::Set(set) => {
                assert_eq!(set.week(), 3);
                assert_eq!(set.field(), Field::Out);
                assert_eq!(set.value(), "-20");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(args.common().tracker_home().path(), Path::new("/tmp/t"));
    }

    #[test]
    fn test_login_google_conflicts_with_email() {
        let result = Args::try_parse_from([
            "tracker",
            "login",
            "--google",
            "--email",
            "a@b.co",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        let args = parse(&["--log-level", "debug", "status"]);
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
    }
}

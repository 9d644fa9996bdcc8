//! Application state and the reducer that applies user actions to it.
//!
//! `AppState` is the only mutable state of the tracker. It changes only through `reduce`, a pure
//! function of the old state, an `Action` and the current time. The asynchronous work (store
//! calls, writing files) happens in `Tracker`, which feeds the outcomes back in as actions.

use crate::auth::Identity;
use crate::model::{Amount, Dataset, Field};
use crate::persist::LoadOutcome;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const LOADED: &str = "Data loaded successfully!";
pub const SAVED: &str = "Data saved to cloud successfully!";
pub const SAVE_FAILED: &str = "Error saving data";
pub const LOGIN_TO_SAVE: &str = "Please login to save data";
pub const EXPORTED: &str = "CSV exported successfully!";
pub const EXPORT_FAILED: &str = "Error exporting CSV";

/// How long a notice stays visible unless configured otherwise.
pub const DEFAULT_NOTICE_SECONDS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A transient message for the user, visible until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    message: String,
    kind: NoticeKind,
    expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// The time an action is applied at, and how long notices posted by it last.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub now: DateTime<Utc>,
    pub notice_ttl: Duration,
}

impl Clock {
    pub fn new(now: DateTime<Utc>, notice_seconds: u32) -> Self {
        Self {
            now,
            notice_ttl: Duration::seconds(i64::from(notice_seconds)),
        }
    }

    fn notice(&self, message: &str, kind: NoticeKind) -> Option<Notice> {
        Some(Notice {
            message: message.to_string(),
            kind,
            expires_at: self.now + self.notice_ttl,
        })
    }
}

/// Everything the tracker knows about the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub(crate) identity: Option<Identity>,
    pub(crate) dataset: Dataset,
    pub(crate) notice: Option<Notice>,
    pub(crate) auth_error: Option<String>,
    /// True when the dataset has edits that have not been saved.
    pub(crate) dirty: bool,
}

impl AppState {
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The current notice, unless it has expired.
    pub fn notice(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_visible(now))
    }
}

/// A discrete user action, or the outcome of one.
#[derive(Debug)]
pub enum Action {
    SignedIn(Identity),
    AuthFailed(String),
    /// The store answered a load. `fallback` replaces the dataset unless the outcome is `Loaded`.
    Loaded {
        outcome: LoadOutcome,
        fallback: Dataset,
    },
    /// The user typed `input` into one money field of week `id`.
    Edit {
        id: u32,
        field: Field,
        input: String,
    },
    /// The store answered a save. The error message is for logs, the user sees `SAVE_FAILED`.
    Saved(Result<(), String>),
    /// Save was asked for without anyone signed in.
    SaveRejected,
    Exported(Result<(), String>),
    SignedOut,
}

/// Applies `action` to `state` at the time given by `clock`.
pub fn reduce(mut state: AppState, action: Action, clock: &Clock) -> AppState {
    match action {
        Action::SignedIn(identity) => {
            state.identity = Some(identity);
            state.auth_error = None;
        }
        Action::AuthFailed(message) => {
            state.auth_error = Some(message);
        }
        Action::Loaded { outcome, fallback } => {
            state.dirty = false;
            match outcome {
                LoadOutcome::Loaded(data) => {
                    state.dataset = data;
                    state.notice = clock.notice(LOADED, NoticeKind::Success);
                }
                LoadOutcome::NotFound | LoadOutcome::LoadError(_) => {
                    state.dataset = fallback;
                }
            }
        }
        Action::Edit { id, field, input } => {
            let mut value = Amount::parse_lenient(&input).capped();
            if value.is_negative() {
                value = Amount::ZERO;
            }
            if state.dataset.set(id, field, value) {
                state.dirty = true;
            }
            state.notice = None;
        }
        Action::Saved(Ok(())) => {
            state.dirty = false;
            state.notice = clock.notice(SAVED, NoticeKind::Success);
        }
        Action::Saved(Err(_)) => {
            state.notice = clock.notice(SAVE_FAILED, NoticeKind::Failure);
        }
        Action::SaveRejected => {
            state.notice = clock.notice(LOGIN_TO_SAVE, NoticeKind::Failure);
        }
        Action::Exported(Ok(())) => {
            state.notice = clock.notice(EXPORTED, NoticeKind::Success);
        }
        Action::Exported(Err(_)) => {
            state.notice = clock.notice(EXPORT_FAILED, NoticeKind::Failure);
        }
        Action::SignedOut => {
            state = AppState::default();
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::weeks_for_year;
    use anyhow::anyhow;
    use chrono::TimeZone;

    fn clock() -> Clock {
        Clock::new(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(), 3)
    }

    fn later(seconds: i64) -> DateTime<Utc> {
        clock().now + Duration::seconds(seconds)
    }

    fn identity() -> Identity {
        Identity::new("abc", "user", "user@example.com")
    }

    fn signed_in() -> AppState {
        let state = reduce(AppState::default(), Action::SignedIn(identity()), &clock());
        reduce(
            state,
            Action::Loaded {
                outcome: LoadOutcome::NotFound,
                fallback: weeks_for_year(2026).unwrap(),
            },
            &clock(),
        )
    }

    fn edit(state: AppState, id: u32, field: Field, input: &str) -> AppState {
        reduce(
            state,
            Action::Edit {
                id,
                field,
                input: input.to_string(),
            },
            &clock(),
        )
    }

    #[test]
    fn test_sign_in_clears_auth_error() {
        let state = reduce(
            AppState::default(),
            Action::AuthFailed("Please enter email and password".into()),
            &clock(),
        );
        assert!(state.auth_error().is_some());
        assert!(state.dataset().is_empty());
        let state = reduce(state, Action::SignedIn(identity()), &clock());
        assert!(state.auth_error().is_none());
        assert_eq!(state.identity(), Some(&identity()));
    }

    #[test]
    fn test_not_found_uses_fallback_silently() {
        let state = signed_in();
        assert_eq!(state.dataset().len(), 52);
        assert!(state.notice(clock().now).is_none());
        assert!(!state.is_dirty());
    }

    #[test]
    fn test_load_error_uses_fallback_silently() {
        let state = reduce(AppState::default(), Action::SignedIn(identity()), &clock());
        let state = reduce(
            state,
            Action::Loaded {
                outcome: LoadOutcome::LoadError(anyhow!("offline")),
                fallback: weeks_for_year(2026).unwrap(),
            },
            &clock(),
        );
        assert_eq!(state.dataset().len(), 52);
        assert!(state.notice(clock().now).is_none());
    }

    #[test]
    fn test_loaded_replaces_dataset_and_notifies() {
        let mut stored = weeks_for_year(2026).unwrap();
        stored.set(1, Field::Deposit, Amount::from(9));
        let state = reduce(
            signed_in(),
            Action::Loaded {
                outcome: LoadOutcome::Loaded(stored.clone()),
                fallback: weeks_for_year(2026).unwrap(),
            },
            &clock(),
        );
        assert_eq!(state.dataset(), &stored);
        assert_eq!(state.notice(clock().now).unwrap().message(), LOADED);
    }

    #[test]
    fn test_edit_sets_value_and_clears_notice() {
        let state = reduce(signed_in(), Action::Saved(Ok(())), &clock());
        assert!(state.notice(clock().now).is_some());
        let state = edit(state, 2, Field::Deposit, "125.50");
        assert_eq!(
            state.dataset().get(2).unwrap().deposit(),
            Amount::parse_lenient("125.5")
        );
        assert!(state.notice.is_none());
        assert!(state.is_dirty());
    }

    #[test]
    fn test_non_numeric_edit_stores_zero() {
        let state = edit(signed_in(), 1, Field::Out, "40");
        let state = edit(state, 1, Field::Out, "");
        assert!(state.dataset().get(1).unwrap().out().is_zero());
        let state = edit(state, 1, Field::Out, "abc");
        assert!(state.dataset().get(1).unwrap().out().is_zero());
    }

    #[test]
    fn test_negative_edit_is_clamped() {
        let state = edit(signed_in(), 1, Field::Deposit, "-50");
        assert!(state.dataset().get(1).unwrap().deposit().is_zero());
    }

    #[test]
    fn test_huge_edits_are_capped_and_total() {
        let max = "79228162514264337593543950335";
        let state = edit(signed_in(), 1, Field::Deposit, max);
        let state = edit(state, 2, Field::Deposit, max);
        let state = edit(state, 3, Field::Out, "1e400");
        let data = state.dataset();
        assert_eq!(data.get(1).unwrap().deposit(), Amount::MAX_ENTRY);
        assert_eq!(data.get(3).unwrap().out(), Amount::MAX_ENTRY);
        let deposit = crate::summary::year_total(data, Field::Deposit);
        assert_eq!(deposit, Amount::MAX_ENTRY + Amount::MAX_ENTRY);
        assert_eq!(crate::summary::year_net(data), Amount::MAX_ENTRY);
    }

    #[test]
    fn test_edit_unknown_week_changes_nothing() {
        let before = signed_in();
        let after = edit(before.clone(), 99, Field::Deposit, "10");
        assert_eq!(before.dataset(), after.dataset());
        assert!(!after.is_dirty());
    }

    #[test]
    fn test_save_success_notice_expires() {
        let state = edit(signed_in(), 1, Field::Deposit, "10");
        let state = reduce(state, Action::Saved(Ok(())), &clock());
        assert!(!state.is_dirty());
        let notice = state.notice(later(2)).unwrap();
        assert_eq!(notice.message(), SAVED);
        assert_eq!(notice.kind(), NoticeKind::Success);
        assert!(state.notice(later(3)).is_none());
    }

    #[test]
    fn test_save_failure_keeps_data() {
        let state = edit(signed_in(), 1, Field::Deposit, "10");
        let before = state.dataset().clone();
        let state = reduce(state, Action::Saved(Err("offline".into())), &clock());
        assert_eq!(state.dataset(), &before);
        assert!(state.is_dirty());
        let notice = state.notice(clock().now).unwrap();
        assert_eq!(notice.message(), SAVE_FAILED);
        assert_eq!(notice.kind(), NoticeKind::Failure);
    }

    #[test]
    fn test_save_rejected() {
        let state = reduce(AppState::default(), Action::SaveRejected, &clock());
        assert_eq!(state.notice(clock().now).unwrap().message(), LOGIN_TO_SAVE);
    }

    #[test]
    fn test_export_notices() {
        let state = reduce(signed_in(), Action::Exported(Ok(())), &clock());
        assert_eq!(state.notice(clock().now).unwrap().message(), EXPORTED);
        let state = reduce(state, Action::Exported(Err("disk".into())), &clock());
        assert_eq!(state.notice(clock().now).unwrap().message(), EXPORT_FAILED);
    }

    #[test]
    fn test_sign_out_discards_everything() {
        let state = edit(signed_in(), 1, Field::Deposit, "10");
        let state = reduce(state, Action::SignedOut, &clock());
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_state_serializes() {
        let state = reduce(signed_in(), Action::Saved(Ok(())), &clock());
        let json = serde_json::to_string(&state).unwrap();
        let back: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}

use crate::app::NoticeKind;
use crate::auth::Identity;
use crate::commands::{open, Out};
use crate::{Config, Result};
use chrono::Utc;
use serde::Serialize;

/// What `tracker status` reports.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub identity: Option<Identity>,
    pub dirty: bool,
    pub notice: Option<String>,
    pub auth_error: Option<String>,
}

/// Reports who is signed in, whether there are unsaved edits, and the notice of the last action
/// if it is still visible.
pub async fn status(config: Config) -> Result<Out<Status>> {
    let tracker = open(&config).await?;
    let state = tracker.state();
    let notice = state.notice(Utc::now());

    let mut lines = vec![match state.identity() {
        Some(i) => format!("Signed in as {} <{}>", i.label(), i.email()),
        None => "Not signed in".to_string(),
    }];
    if let Some(e) = state.auth_error() {
        lines.push(e.to_string());
    }
    if state.is_dirty() {
        lines.push("There are unsaved edits".to_string());
    }
    if let Some(n) = notice {
        let tag = match n.kind() {
            NoticeKind::Success => "ok",
            NoticeKind::Failure => "error",
        };
        lines.push(format!("[{tag}] {}", n.message()));
    }

    let status = Status {
        identity: state.identity().cloned(),
        dirty: state.is_dirty(),
        notice: notice.map(|n| n.message().to_string()),
        auth_error: state.auth_error().map(str::to_string),
    };
    Ok(Out::new(lines.join("\n"), status))
}

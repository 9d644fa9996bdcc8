use crate::commands::{open, Out, LOGIN_FIRST};
use crate::summary::Summary;
use crate::{view, Config, Result};
use std::fmt::Write;

/// Prints the weekly table. Nothing in the session changes.
pub async fn show(config: Config) -> Result<Out<Summary>> {
    let tracker = open(&config).await?;
    if tracker.identity().is_none() {
        return Ok(LOGIN_FIRST.into());
    }
    let data = tracker.state().dataset();
    let table = view::render(data, config.currency(), tracker.year());
    let message = if tracker.state().is_dirty() {
        "There are unsaved edits, run 'tracker save' to keep them"
    } else {
        "All edits are saved"
    };
    Ok(Out::new(message, Summary::new(data)).with_text(table))
}

/// Prints only the monthly and yearly totals.
pub async fn summary(config: Config) -> Result<Out<Summary>> {
    let tracker = open(&config).await?;
    if tracker.identity().is_none() {
        return Ok(LOGIN_FIRST.into());
    }
    let summary = Summary::new(tracker.state().dataset());
    let money = |a: crate::model::Amount| a.display_with(config.currency());

    let mut text = String::new();
    for m in &summary.months {
        // Writing to a String cannot fail.
        let _ = writeln!(
            text,
            "{:<12} {:>16} {:>16} {:>16}",
            m.month,
            money(m.totals.deposit),
            money(m.totals.out),
            money(m.totals.net)
        );
    }
    let _ = write!(
        text,
        "{:<12} {:>16} {:>16} {:>16}",
        tracker.year(),
        money(summary.year.deposit),
        money(summary.year.out),
        money(summary.year.net)
    );

    Ok(Out::new(
        format!("Net for {}: {}", tracker.year(), money(summary.year.net)),
        summary,
    )
    .with_text(text))
}

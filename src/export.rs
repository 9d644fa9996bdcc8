//! Formats a `Dataset` and its aggregates as a CSV document.
//!
//! Fields are written as-is, without quoting. None of the values written can contain a comma:
//! labels are `Week N`, dates are `YYYY/MM/DD`, months are English month names and amounts are
//! plain decimals.

use crate::model::Dataset;
use crate::summary::{Summary, Totals};
use std::fmt::Write;

/// The MIME type of an exported document.
pub const CSV_MIME_TYPE: &str = "text/csv; charset=utf-8";

const HEADER: &str = "Week,Date,Month,Deposit,Out,Net";

/// The file name an export of `year` is saved under, e.g. `business_tracker_2026.csv`.
pub fn export_filename(year: i32) -> String {
    format!("business_tracker_{year}.csv")
}

/// Produces the CSV document for `data`:
/// - a header row,
/// - one row per week,
/// - a blank line and a `<Month> Total` row for each month, in first-appearance order,
/// - a blank line and a `Year Total` row.
///
/// Every amount has exactly two decimal places.
pub fn to_csv(data: &Dataset) -> String {
    let summary = Summary::new(data);
    let mut csv = String::new();
    line(&mut csv, HEADER);
    for r in data.records() {
        line(
            &mut csv,
            format!(
                "{},{},{},{},{},{}",
                r.label(),
                r.date_str(),
                r.month(),
                r.deposit(),
                r.out(),
                r.net()
            ),
        );
    }
    for m in &summary.months {
        line(&mut csv, "");
        line(&mut csv, total_row(&format!("{} Total", m.month), &m.totals));
    }
    line(&mut csv, "");
    line(&mut csv, total_row("Year Total", &summary.year));
    csv
}

fn total_row(label: &str, totals: &Totals) -> String {
    format!("{label},,,{},{},{}", totals.deposit, totals.out, totals.net)
}

fn line(csv: &mut String, s: impl AsRef<str>) {
    // Writing to a String cannot fail.
    let _ = writeln!(csv, "{}", s.as_ref());
}

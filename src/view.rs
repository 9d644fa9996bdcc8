//! Lays out the weekly table: each week's row, a total row after the last week of every month,
//! and a year total at the end.

use crate::model::{Dataset, WeekRecord};
use crate::summary::{Summary, Totals};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<'a> {
    Week(&'a WeekRecord),
    MonthTotal { month: &'a str, totals: Totals },
    YearTotal(Totals),
}

/// The rows of the table in display order.
///
/// A month total follows every run of consecutive weeks in the same month. Its figures are the
/// totals for the month label as a whole.
pub fn rows(data: &Dataset) -> Vec<Row<'_>> {
    let summary = Summary::new(data);
    let records = data.records();
    let mut rows = Vec::with_capacity(records.len() + 13);
    for (ix, record) in records.iter().enumerate() {
        rows.push(Row::Week(record));
        let last_of_month = records
            .get(ix + 1)
            .map_or(true, |next| next.month() != record.month());
        if last_of_month {
            rows.push(Row::MonthTotal {
                month: record.month(),
                totals: summary.month(record.month()).copied().unwrap_or_default(),
            });
        }
    }
    rows.push(Row::YearTotal(summary.year));
    rows
}

/// Renders the table as aligned plain text, with amounts like `R 1,250.00`.
pub fn render(data: &Dataset, currency: &str, year: i32) -> String {
    let money = |a: crate::model::Amount| a.display_with(currency);
    let mut lines = vec![format!(
        "{:<10} {:<12} {:<10} {:>16} {:>16} {:>16}",
        "Week", "Date", "Month", "Deposit", "Out", "Net"
    )];
    for row in rows(data) {
        lines.push(match row {
            Row::Week(r) => format!(
                "{:<10} {:<12} {:<10} {:>16} {:>16} {:>16}",
                r.label(),
                r.date_str(),
                r.month(),
                money(r.deposit()),
                money(r.out()),
                money(r.net())
            ),
            Row::MonthTotal { month, totals } => format!(
                "{:<34} {:>16} {:>16} {:>16}",
                format!("{month} Total"),
                money(totals.deposit),
                money(totals.out),
                money(totals.net)
            ),
            Row::YearTotal(totals) => format!(
                "{:<34} {:>16} {:>16} {:>16}",
                format!("{year} YEAR TOTAL"),
                money(totals.deposit),
                money(totals.out),
                money(totals.net)
            ),
        });
    }
    lines.join("\n")
}

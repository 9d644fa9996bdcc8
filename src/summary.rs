//! Monthly and yearly aggregates derived from a `Dataset`.
//!
//! Nothing here is stored. Every figure is recomputed from the records on each call, which is a
//! single pass over at most a few dozen weeks.

use crate::model::{Amount, Dataset, Field};
use serde::Serialize;

/// The distinct month labels of `data` in the order they first appear.
pub fn months(data: &Dataset) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for record in data.records() {
        if !seen.contains(&record.month()) {
            seen.push(record.month());
        }
    }
    seen
}

/// Sum of `field` over the records whose month is `month`.
pub fn monthly_total(data: &Dataset, month: &str, field: Field) -> Amount {
    data.records()
        .iter()
        .filter(|r| r.month() == month)
        .map(|r| r.get(field))
        .sum()
}

/// Deposits minus outs for `month`.
pub fn monthly_net(data: &Dataset, month: &str) -> Amount {
    monthly_total(data, month, Field::Deposit) - monthly_total(data, month, Field::Out)
}

/// Sum of `field` over every record.
pub fn year_total(data: &Dataset, field: Field) -> Amount {
    data.records().iter().map(|r| r.get(field)).sum()
}

/// Deposits minus outs over every record.
pub fn year_net(data: &Dataset) -> Amount {
    year_total(data, Field::Deposit) - year_total(data, Field::Out)
}

/// Deposit, out and net for some span of weeks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub deposit: Amount,
    pub out: Amount,
    pub net: Amount,
}

impl Totals {
    pub fn new(deposit: Amount, out: Amount) -> Self {
        Self {
            deposit,
            out,
            net: deposit - out,
        }
    }
}

/// The totals of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: String,
    #[serde(flatten)]
    pub totals: Totals,
}

/// Every monthly total, in first-appearance order, plus the year total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub months: Vec<MonthSummary>,
    pub year: Totals,
}

impl Summary {
    pub fn new(data: &Dataset) -> Self {
        let mut months: Vec<MonthSummary> = Vec::new();
        for record in data.records() {
            let ix = match months.iter().position(|m| m.month == record.month()) {
                Some(ix) => ix,
                None => {
                    months.push(MonthSummary {
                        month: record.month().to_string(),
                        totals: Totals::default(),
                    });
                    months.len() - 1
                }
            };
            let t = months[ix].totals;
            months[ix].totals = Totals::new(t.deposit + record.deposit(), t.out + record.out());
        }
        Self {
            months,
            year: Totals::new(
                year_total(data, Field::Deposit),
                year_total(data, Field::Out),
            ),
        }
    }

    pub fn month(&self, month: &str) -> Option<&Totals> {
        self.months
            .iter()
            .find(|m| m.month == month)
            .map(|m| &m.totals)
    }
}

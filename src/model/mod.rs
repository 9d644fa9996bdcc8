//! Types that represent the core data model: `WeekRecord`, `Dataset` and `Amount`.
mod amount;
mod record;
mod weeks;

pub use amount::Amount;
pub use record::{month_name, Field, WeekRecord};
pub use weeks::{weeks_between, weeks_for_year};

use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// The ordered weekly records of one tracked year.
///
/// Records stay in the order they were generated or loaded in, which is chronological. The
/// serialized form is a bare JSON array, which is what the key-value store holds.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<WeekRecord>,
}

impl Dataset {
    pub fn new(records: Vec<WeekRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[WeekRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&WeekRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Sets one field of the record with `id`. Returns `false` if there is no such record.
    pub fn set(&mut self, id: u32, field: Field, value: Amount) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.set(field, value);
                true
            }
            None => false,
        }
    }

    /// The year of the first record, if any.
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.records.first().map(|r| r.date.year())
    }

    /// Serializes the whole dataset into the blob stored under a user's key.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Unable to serialize the weekly records")
    }

    /// Parses a blob previously produced by `to_json`.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Unable to parse the stored weekly records")
    }
}

impl FromIterator<WeekRecord> for Dataset {
    fn from_iter<T: IntoIterator<Item = WeekRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Dataset {
        let mut data = weeks_for_year(2026).unwrap();
        data.set(1, Field::Deposit, Amount::parse_lenient("100.10"));
        data.set(2, Field::Out, Amount::parse_lenient("20.5"));
        data.set(40, Field::Deposit, Amount::parse_lenient("1234.56"));
        data
    }

    #[test]
    fn test_json_round_trip() {
        let data = sample();
        let json = data.to_json().unwrap();
        let back = Dataset::from_json(&json).unwrap();
        assert_eq!(data, back);
        assert_eq!(
            data.records().iter().map(|r| r.id()).collect::<Vec<_>>(),
            back.records().iter().map(|r| r.id()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_many_digit_amounts_round_trip() {
        let mut data = sample();
        data.set(1, Field::Deposit, Amount::parse_lenient("12345678901234567.89"));
        data.set(1, Field::Out, Amount::parse_lenient("0.1234567890123456789"));
        data.set(2, Field::Deposit, Amount::parse_lenient("79228162514264337593543950335"));
        data.set(3, Field::Out, Amount::parse_lenient("0.0000000000000000000000000001"));
        let back = Dataset::from_json(&data.to_json().unwrap()).unwrap();
        assert_eq!(back, data);
        // Plain cents are still written as numbers.
        assert!(data.to_json().unwrap().contains(r#""deposit":1234.56"#));
    }

    #[test]
    fn test_serializes_as_array() {
        let json = sample().to_json().unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(r#""week":"Week 1""#));
    }

    #[test]
    fn test_parses_blob_written_by_browser() {
        let blob = r#"[
            {"id":1,"week":"Week 1","date":"2026/01/02","month":"January","deposit":100,"out":20},
            {"id":2,"week":"Week 2","date":"2026/01/09","month":"January","deposit":50.5,"out":0}
        ]"#;
        let data = Dataset::from_json(blob).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get(2).unwrap().deposit(), Amount::parse_lenient("50.5"));
        assert_eq!(data.year(), Some(2026));
    }

    #[test]
    fn test_garbage_blob_is_an_error() {
        assert!(Dataset::from_json("{not json").is_err());
        assert!(Dataset::from_json(r#"{"id":1}"#).is_err());
    }

    #[test]
    fn test_set_unknown_id() {
        let mut data = sample();
        assert!(!data.set(99, Field::Deposit, Amount::from(1)));
    }

    #[test]
    fn test_from_iter() {
        let d = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let data: Dataset = [WeekRecord::new(1, d)].into_iter().collect();
        assert_eq!(data.len(), 1);
        assert_eq!(data.get(1).unwrap().month(), "May");
    }
}

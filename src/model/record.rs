use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which money column of a week is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Money received during the week.
    Deposit,
    /// Money paid out during the week.
    Out,
}

serde_plain::derive_display_from_serialize!(Field);
serde_plain::derive_fromstr_from_deserialize!(Field);

/// One week's deposit and withdrawal entry.
///
/// The serialized form keeps the key names of the stored blobs: `id`, `week`, `date`, `month`,
/// `deposit`, `out`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRecord {
    pub(crate) id: u32,
    #[serde(rename = "week")]
    pub(crate) label: String,
    #[serde(with = "short_date")]
    pub(crate) date: NaiveDate,
    pub(crate) month: String,
    #[serde(default)]
    pub(crate) deposit: Amount,
    #[serde(default)]
    pub(crate) out: Amount,
}

impl WeekRecord {
    /// Creates the record for week number `id` falling on `date`, with zero amounts.
    pub fn new(id: u32, date: NaiveDate) -> Self {
        Self {
            id,
            label: format!("Week {id}"),
            date,
            month: month_name(date),
            deposit: Amount::ZERO,
            out: Amount::ZERO,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The date as shown to the user and written to CSV, e.g. `2026/01/02`.
    pub fn date_str(&self) -> String {
        self.date.format(short_date::FORMAT).to_string()
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn deposit(&self) -> Amount {
        self.deposit
    }

    pub fn out(&self) -> Amount {
        self.out
    }

    pub fn get(&self, field: Field) -> Amount {
        match field {
            Field::Deposit => self.deposit,
            Field::Out => self.out,
        }
    }

    pub fn set(&mut self, field: Field, value: Amount) {
        match field {
            Field::Deposit => self.deposit = value,
            Field::Out => self.out = value,
        }
    }

    pub fn with(mut self, deposit: impl Into<Amount>, out: impl Into<Amount>) -> Self {
        self.deposit = deposit.into();
        self.out = out.into();
        self
    }

    /// Deposit minus out.
    pub fn net(&self) -> Amount {
        self.deposit - self.out
    }
}

/// The long English month name of `date`, e.g. `January`.
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Serializes dates in the short South African form `YYYY/MM/DD`. ISO `YYYY-MM-DD` is also
/// accepted when reading.
mod short_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%Y/%m/%d";
    const ISO_FORMAT: &str = "%Y-%m-%d";

    pub(super) fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(s.trim(), FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(s.trim(), ISO_FORMAT))
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{s}': {e}")))
    }
}

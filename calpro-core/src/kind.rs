//! Kinds of dated notes.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalProError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl NoteKind {
    pub const ALL: [NoteKind; 5] = [
        NoteKind::Daily,
        NoteKind::Weekly,
        NoteKind::Monthly,
        NoteKind::Quarterly,
        NoteKind::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteKind::Daily => "daily",
            NoteKind::Weekly => "weekly",
            NoteKind::Monthly => "monthly",
            NoteKind::Quarterly => "quarterly",
            NoteKind::Yearly => "yearly",
        }
    }

    /// The date a note of this kind is filed under.
    ///
    /// Monthly, quarterly and yearly notes use the first day of their period
    /// so that any date inside the period resolves to the same note.
    pub fn anchor(&self, date: NaiveDate) -> NaiveDate {
        match self {
            NoteKind::Daily | NoteKind::Weekly => date,
            NoteKind::Monthly => date.with_day(1).unwrap_or(date),
            NoteKind::Quarterly => {
                let first_month = date.month0() / 3 * 3 + 1;
                NaiveDate::from_ymd_opt(date.year(), first_month, 1).unwrap_or(date)
            }
            NoteKind::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoteKind {
    type Err = CalProError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" | "diary" => Ok(NoteKind::Daily),
            "weekly" | "week" => Ok(NoteKind::Weekly),
            "monthly" | "month" => Ok(NoteKind::Monthly),
            "quarterly" | "quarter" => Ok(NoteKind::Quarterly),
            "yearly" | "year" => Ok(NoteKind::Yearly),
            other => Err(CalProError::Config(format!(
                "Unknown note kind '{}'. Expected one of: daily, weekly, monthly, quarterly, yearly",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_moves_to_start_of_period() {
        let day = NaiveDate::from_ymd_opt(2024, 8, 17).unwrap();
        assert_eq!(NoteKind::Daily.anchor(day), day);
        assert_eq!(NoteKind::Weekly.anchor(day), day);
        assert_eq!(NoteKind::Monthly.anchor(day), NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
        assert_eq!(NoteKind::Quarterly.anchor(day), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(NoteKind::Yearly.anchor(day), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_kind_names() {
        assert_eq!("Weekly".parse::<NoteKind>().unwrap(), NoteKind::Weekly);
        assert_eq!("diary".parse::<NoteKind>().unwrap(), NoteKind::Daily);
        assert!("hourly".parse::<NoteKind>().is_err());
        for kind in NoteKind::ALL {
            assert_eq!(kind.to_string().parse::<NoteKind>().unwrap(), kind);
        }
    }
}

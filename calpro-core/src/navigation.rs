//! Which month or year a calendar view is showing.
//!
//! Views hold a cursor and feed it actions; the reducers are pure so they can
//! be tested without anything on screen.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move forward (positive) or back (negative) by whole months or years.
    Navigate(i32),
    /// Jump to the period containing this date.
    Today(NaiveDate),
}

/// The month shown by the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    /// 0-based month index.
    pub month: u32,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::Navigate(delta) => {
                let index = i64::from(self.year) * 12 + i64::from(self.month) + i64::from(delta);
                MonthCursor {
                    year: index.div_euclid(12) as i32,
                    month: index.rem_euclid(12) as u32,
                }
            }
            Action::Today(date) => Self::containing(date),
        }
    }
}

/// The year shown by the quarter picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCursor {
    pub year: i32,
}

impl YearCursor {
    pub fn containing(date: NaiveDate) -> Self {
        YearCursor { year: date.year() }
    }

    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::Navigate(delta) => YearCursor {
                year: self.year.saturating_add(delta),
            },
            Action::Today(date) => Self::containing(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        let december = MonthCursor { year: 2024, month: 11 };
        assert_eq!(
            december.reduce(Action::Navigate(1)),
            MonthCursor { year: 2025, month: 0 }
        );

        let january = MonthCursor { year: 2024, month: 0 };
        assert_eq!(
            january.reduce(Action::Navigate(-1)),
            MonthCursor { year: 2023, month: 11 }
        );
        assert_eq!(
            january.reduce(Action::Navigate(-25)),
            MonthCursor { year: 2021, month: 11 }
        );
    }

    #[test]
    fn test_today_resets_cursor() {
        let cursor = MonthCursor { year: 1999, month: 4 };
        assert_eq!(
            cursor.reduce(Action::Today(date(2024, 3, 15))),
            MonthCursor { year: 2024, month: 2 }
        );

        let year = YearCursor { year: 2000 }.reduce(Action::Navigate(3));
        assert_eq!(year.year, 2003);
        assert_eq!(year.reduce(Action::Today(date(2024, 3, 15))).year, 2024);
    }

    #[test]
    fn test_navigation_round_trips() {
        let start = MonthCursor::containing(date(2024, 3, 15));
        let moved = start.reduce(Action::Navigate(7)).reduce(Action::Navigate(-7));
        assert_eq!(moved, start);
    }
}

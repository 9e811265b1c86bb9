//! Month grids, ISO week numbers and the quarter picker.
//!
//! A month grid is a run of week rows, seven cells each, covering every day
//! of the target month. Leading and trailing cells are filled with the
//! neighbouring months' days so the grid always starts on the configured
//! start-of-week.

use std::fmt;

use chrono::{Datelike, Days, Duration, NaiveDate};

use crate::error::{CalProError, CalProResult};

const DAYS_PER_WEEK: usize = 7;

/// Maximum number of rows a month grid can have.
pub const MAX_ROWS: usize = 6;

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One day slot in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    /// None only when the padding day falls outside chrono's date range.
    pub date: Option<NaiveDate>,
    pub in_month: bool,
    pub is_today: bool,
}

impl CalendarCell {
    fn padding(date: Option<NaiveDate>) -> Self {
        CalendarCell {
            date,
            in_month: false,
            is_today: false,
        }
    }

    fn in_month(date: NaiveDate) -> Self {
        CalendarCell {
            date: Some(date),
            in_month: true,
            is_today: false,
        }
    }
}

/// ISO-8601 week: the week-numbering year and the week within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub cells: [CalendarCell; DAYS_PER_WEEK],
    /// Day `1 + 7 * row` of the target month, which always lies inside this
    /// row. Falls back to the row's first representable day when that date is
    /// past chrono's range.
    pub anchor: NaiveDate,
    pub iso_week: IsoWeek,
}

impl WeekRow {
    pub fn week_number(&self) -> u32 {
        self.iso_week.week
    }

    pub fn is_current_week(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_today)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    /// 0-based month index (0 = January).
    pub month: u32,
    pub start_of_week: u8,
    pub rows: Vec<WeekRow>,
}

impl MonthGrid {
    /// Mark the cell for `today`, if it is part of this grid.
    pub fn highlight(mut self, today: NaiveDate) -> Self {
        for cell in self.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
            cell.is_today = cell.date == Some(today);
        }
        self
    }

    /// Days of the target month, in grid order.
    pub fn month_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.in_month)
            .filter_map(|cell| cell.date)
    }

    pub fn first_day(&self) -> CalProResult<NaiveDate> {
        first_of_month(self.year, self.month)
    }

    /// Header text such as "March 2024".
    pub fn title(&self) -> String {
        match self.first_day() {
            Ok(first) => first.format("%B %Y").to_string(),
            Err(_) => format!("{}-{:02}", self.year, self.month + 1),
        }
    }
}

/// First day of a month given a 0-based month index.
pub fn first_of_month(year: i32, month: u32) -> CalProResult<NaiveDate> {
    if month > 11 {
        return Err(CalProError::InvalidDate(format!(
            "month index {} is out of range 0..=11",
            month
        )));
    }

    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or_else(|| {
        CalProError::InvalidDate(format!("{}-{:02} is out of range", year, month + 1))
    })
}

fn check_start_of_week(start_of_week: u8) -> CalProResult<()> {
    if usize::from(start_of_week) >= DAYS_PER_WEEK {
        return Err(CalProError::InvalidDate(format!(
            "start of week {} is out of range 0..=6",
            start_of_week
        )));
    }
    Ok(())
}

/// Lay out `month` (0-based) of `year` as week rows starting on
/// `start_of_week` (0 = Sunday).
pub fn build_month_grid(year: i32, month: u32, start_of_week: u8) -> CalProResult<MonthGrid> {
    check_start_of_week(start_of_week)?;
    let first = first_of_month(year, month)?;

    let weekday = first.weekday().num_days_from_sunday() as usize;
    let start = (weekday + DAYS_PER_WEEK - usize::from(start_of_week)) % DAYS_PER_WEEK;

    let month_days: Vec<NaiveDate> = first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect();

    let mut cells: Vec<CalendarCell> = Vec::with_capacity(MAX_ROWS * DAYS_PER_WEEK);

    // Previous month, ascending
    for back in (1..=start as u64).rev() {
        cells.push(CalendarCell::padding(first.checked_sub_days(Days::new(back))));
    }

    cells.extend(month_days.iter().copied().map(CalendarCell::in_month));

    // Next month, enough to close the final row
    let trailing = (DAYS_PER_WEEK - cells.len() % DAYS_PER_WEEK) % DAYS_PER_WEEK;
    let last = month_days.last().copied().unwrap_or(first);
    for forward in 1..=trailing as u64 {
        cells.push(CalendarCell::padding(last.checked_add_days(Days::new(forward))));
    }

    let rows = cells
        .chunks(DAYS_PER_WEEK)
        .enumerate()
        .map(|(index, chunk)| {
            let cells: [CalendarCell; DAYS_PER_WEEK] = chunk.try_into().map_err(|_| {
                CalProError::InvalidDate(format!("row {} is not a full week", index))
            })?;
            let anchor = match anchor_from(first, index) {
                Ok(anchor) => anchor,
                Err(err) => cells.iter().find_map(|cell| cell.date).ok_or(err)?,
            };
            Ok(WeekRow {
                cells,
                anchor,
                iso_week: iso_week(anchor),
            })
        })
        .collect::<CalProResult<Vec<_>>>()?;

    log::debug!(
        "built grid for {}-{:02}: {} rows, {} leading, {} trailing",
        year,
        month + 1,
        rows.len(),
        start,
        trailing
    );

    Ok(MonthGrid {
        year,
        month,
        start_of_week,
        rows,
    })
}

fn anchor_from(first: NaiveDate, week_index: usize) -> CalProResult<NaiveDate> {
    first
        .checked_add_days(Days::new((week_index * DAYS_PER_WEEK) as u64))
        .ok_or_else(|| {
            CalProError::InvalidDate(format!("week {} of {} is out of range", week_index, first))
        })
}

/// Number of rows in the grid for the month starting on `first`.
fn row_count(first: NaiveDate, start_of_week: u8) -> usize {
    let weekday = first.weekday().num_days_from_sunday() as usize;
    let leading = (weekday + DAYS_PER_WEEK - usize::from(start_of_week)) % DAYS_PER_WEEK;
    let days = first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .count();
    (leading + days).div_ceil(DAYS_PER_WEEK)
}

/// The date used to represent row `week_index` of a month grid.
///
/// Day `1 + 7 * week_index` of the month sits in row `week_index` for every
/// start-of-week. Rows the grid does not have are rejected.
pub fn week_anchor(
    year: i32,
    month: u32,
    start_of_week: u8,
    week_index: usize,
) -> CalProResult<NaiveDate> {
    check_start_of_week(start_of_week)?;
    let first = first_of_month(year, month)?;

    let rows = row_count(first, start_of_week);
    if week_index >= rows {
        return Err(CalProError::InvalidDate(format!(
            "week row {} is out of range 0..{} for {}-{:02}",
            week_index,
            rows,
            year,
            month + 1
        )));
    }
    anchor_from(first, week_index)
}

/// ISO week number of row `week_index` in the grid for `month` (0-based).
pub fn iso_week_number(
    year: i32,
    month: u32,
    start_of_week: u8,
    week_index: usize,
) -> CalProResult<u32> {
    Ok(iso_week(week_anchor(year, month, start_of_week, week_index)?).week)
}

/// ISO-8601 week of a date.
///
/// Moves to the Thursday of the date's week and counts whole weeks from the
/// Monday of the week containing January 4 of that Thursday's year.
pub fn iso_week(date: NaiveDate) -> IsoWeek {
    let monday_offset = i64::from(date.weekday().num_days_from_monday());

    let Some(thursday) = date.checked_add_signed(Duration::days(3 - monday_offset)) else {
        // Within three days of the representable range
        let week = date.iso_week();
        return IsoWeek {
            year: week.year(),
            week: week.week(),
        };
    };

    // Jan 4 exists for every year a Thursday can fall in
    let week1 = NaiveDate::from_ymd_opt(thursday.year(), 1, 4).unwrap_or(thursday);
    let week1_offset = i64::from(week1.weekday().num_days_from_monday());
    let days = (thursday - week1).num_days();

    IsoWeek {
        year: thursday.year(),
        week: (1 + (days - 3 + week1_offset).div_euclid(7)) as u32,
    }
}

/// Weekday header labels rotated to begin on `start_of_week`.
pub fn weekday_labels(start_of_week: u8) -> [&'static str; DAYS_PER_WEEK] {
    let start = usize::from(start_of_week) % DAYS_PER_WEEK;
    std::array::from_fn(|i| WEEKDAY_LABELS[(i + start) % DAYS_PER_WEEK])
}

/// Quarter (1..=4) a date falls in.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    /// 1-based month number.
    pub month: u32,
    pub label: &'static str,
    pub is_current: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterRow {
    pub quarter: u32,
    pub months: [MonthCell; 3],
    pub is_current: bool,
}

impl QuarterRow {
    pub fn label(&self) -> String {
        format!("Q{}", self.quarter)
    }
}

/// Quarter and month picker for one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearOverview {
    pub year: i32,
    pub quarters: [QuarterRow; 4],
}

pub fn year_overview(year: i32, today: NaiveDate) -> YearOverview {
    let this_year = today.year() == year;

    let quarters = std::array::from_fn(|q| {
        let quarter = q as u32 + 1;
        let months = std::array::from_fn(|m| {
            let month = q as u32 * 3 + m as u32 + 1;
            MonthCell {
                month,
                label: MONTH_LABELS[month as usize - 1],
                is_current: this_year && today.month() == month,
            }
        });

        QuarterRow {
            quarter,
            months,
            is_current: this_year && quarter_of(today) == quarter,
        }
    });

    YearOverview { year, quarters }
}

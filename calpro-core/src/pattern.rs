//! File-name patterns.
//!
//! Patterns use moment-style tokens (`YYYY-MM-DD`, `gggg-[W]ww`, `YYYY-[Q]Q`).
//! Text inside square brackets is copied verbatim, as is any character that
//! does not start a token.

use chrono::{Datelike, Days, NaiveDate};

use crate::grid::{iso_week, quarter_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Year2,
    Year4,
    Quarter,
    Month,
    Month2,
    MonthShort,
    MonthLong,
    Day,
    Day2,
    DayOrdinal,
    DayOfYear,
    DayOfYear3,
    Weekday,
    WeekdayMin,
    WeekdayShort,
    WeekdayLong,
    IsoWeekday,
    LocaleWeekday,
    IsoWeekYear,
    IsoWeekYear2,
    IsoWeek,
    IsoWeek2,
    LocaleWeekYear,
    LocaleWeekYear2,
    LocaleWeek,
    LocaleWeek2,
}

// Longest tokens first so `MMMM` wins over `MM`.
const TOKENS: &[(&str, Field)] = &[
    ("YYYY", Field::Year4),
    ("MMMM", Field::MonthLong),
    ("DDDD", Field::DayOfYear3),
    ("dddd", Field::WeekdayLong),
    ("GGGG", Field::IsoWeekYear),
    ("gggg", Field::LocaleWeekYear),
    ("MMM", Field::MonthShort),
    ("DDD", Field::DayOfYear),
    ("ddd", Field::WeekdayShort),
    ("YY", Field::Year2),
    ("GG", Field::IsoWeekYear2),
    ("gg", Field::LocaleWeekYear2),
    ("MM", Field::Month2),
    ("DD", Field::Day2),
    ("Do", Field::DayOrdinal),
    ("dd", Field::WeekdayMin),
    ("WW", Field::IsoWeek2),
    ("ww", Field::LocaleWeek2),
    ("Y", Field::Year),
    ("Q", Field::Quarter),
    ("M", Field::Month),
    ("D", Field::Day),
    ("d", Field::Weekday),
    ("E", Field::IsoWeekday),
    ("e", Field::LocaleWeekday),
    ("W", Field::IsoWeek),
    ("w", Field::LocaleWeek),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

fn parse(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                literal.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        if let Some((token, field)) = TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(*field));
            rest = &rest[token.len()..];
            continue;
        }

        literal.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Render `date` through a moment-style pattern.
///
/// `start_of_week` (0 = Sunday) drives the locale week tokens `gggg`/`ww`/`e`.
pub fn format_date(date: NaiveDate, pattern: &str, start_of_week: u8) -> String {
    parse(pattern)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Field(field) => render_field(date, field, start_of_week),
        })
        .collect()
}

fn render_field(date: NaiveDate, field: Field, start_of_week: u8) -> String {
    match field {
        Field::Year => date.year().to_string(),
        Field::Year2 => format!("{:02}", date.year().rem_euclid(100)),
        Field::Year4 => format!("{:04}", date.year()),
        Field::Quarter => quarter_of(date).to_string(),
        Field::Month => date.month().to_string(),
        Field::Month2 => format!("{:02}", date.month()),
        Field::MonthShort => date.format("%b").to_string(),
        Field::MonthLong => date.format("%B").to_string(),
        Field::Day => date.day().to_string(),
        Field::Day2 => format!("{:02}", date.day()),
        Field::DayOrdinal => ordinal(date.day()),
        Field::DayOfYear => date.ordinal().to_string(),
        Field::DayOfYear3 => format!("{:03}", date.ordinal()),
        Field::Weekday => date.weekday().num_days_from_sunday().to_string(),
        Field::WeekdayMin => date.format("%a").to_string().chars().take(2).collect(),
        Field::WeekdayShort => date.format("%a").to_string(),
        Field::WeekdayLong => date.format("%A").to_string(),
        Field::IsoWeekday => date.weekday().number_from_monday().to_string(),
        Field::LocaleWeekday => {
            ((date.weekday().num_days_from_sunday() + 7 - u32::from(start_of_week)) % 7).to_string()
        }
        Field::IsoWeekYear => format!("{:04}", iso_week(date).year),
        Field::IsoWeekYear2 => format!("{:02}", iso_week(date).year.rem_euclid(100)),
        Field::IsoWeek => iso_week(date).week.to_string(),
        Field::IsoWeek2 => format!("{:02}", iso_week(date).week),
        Field::LocaleWeekYear => format!("{:04}", locale_week(date, start_of_week).0),
        Field::LocaleWeekYear2 => {
            format!("{:02}", locale_week(date, start_of_week).0.rem_euclid(100))
        }
        Field::LocaleWeek => locale_week(date, start_of_week).1.to_string(),
        Field::LocaleWeek2 => format!("{:02}", locale_week(date, start_of_week).1),
    }
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

fn start_of_locale_week(date: NaiveDate, start_of_week: u8) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 7 - u32::from(start_of_week) % 7) % 7;
    date.checked_sub_days(Days::new(u64::from(offset))).unwrap_or(date)
}

/// Locale week-year and week number.
///
/// Weeks begin on `start_of_week`; week 1 is the week containing January 1.
pub fn locale_week(date: NaiveDate, start_of_week: u8) -> (i32, u32) {
    let week_start = start_of_locale_week(date, start_of_week);
    let week_end = week_start.checked_add_days(Days::new(6)).unwrap_or(week_start);
    let week_year = week_end.year();

    let Some(jan1) = NaiveDate::from_ymd_opt(week_year, 1, 1) else {
        return (week_year, 1);
    };
    let first_week_start = start_of_locale_week(jan1, start_of_week);
    let weeks = (week_start - first_week_start).num_days() / 7;

    (week_year, weeks as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_patterns() {
        let day = date(2024, 3, 15);
        assert_eq!(format_date(day, "YYYY-MM-DD", 0), "2024-03-15");
        assert_eq!(format_date(day, "gggg-[W]ww", 0), "2024-W11");
        assert_eq!(format_date(day, "YYYY-MM", 0), "2024-03");
        assert_eq!(format_date(day, "YYYY-[Q]Q", 0), "2024-Q1");
        assert_eq!(format_date(day, "YYYY", 0), "2024");
    }

    #[test]
    fn test_names_and_ordinals() {
        let day = date(2024, 3, 1);
        assert_eq!(format_date(day, "dddd, MMMM Do YYYY", 0), "Friday, March 1st 2024");
        assert_eq!(format_date(day, "ddd D MMM YY", 0), "Fri 1 Mar 24");
        assert_eq!(format_date(date(2024, 3, 12), "Do", 0), "12th");
        assert_eq!(format_date(date(2024, 3, 22), "Do", 0), "22nd");
        assert_eq!(format_date(day, "dd", 0), "Fr");
    }

    #[test]
    fn test_brackets_escape_tokens() {
        let day = date(2024, 3, 15);
        assert_eq!(format_date(day, "[Daily] YYYY", 0), "Daily 2024");
        assert_eq!(format_date(day, "YYYY/MM/[Week] WW", 0), "2024/03/Week 11");
        // Unterminated bracket stays literal
        assert_eq!(format_date(day, "[YYYY", 0), "[2024");
    }

    #[test]
    fn test_iso_week_year_differs_from_calendar_year() {
        let day = date(2024, 12, 31);
        assert_eq!(format_date(day, "GGGG-[W]WW", 1), "2025-W01");
        assert_eq!(format_date(date(2021, 1, 1), "GGGG-[W]WW", 1), "2020-W53");
        assert_eq!(format_date(day, "E", 0), "2");
    }

    #[test]
    fn test_locale_week_uses_start_of_week() {
        // Sunday weeks: the week containing Jan 1 is week 1
        assert_eq!(locale_week(date(2024, 12, 31), 0), (2025, 1));
        assert_eq!(locale_week(date(2023, 1, 1), 0), (2023, 1));
        assert_eq!(locale_week(date(2023, 1, 7), 0), (2023, 1));
        assert_eq!(locale_week(date(2023, 1, 8), 0), (2023, 2));

        // Monday weeks: Sunday Jan 1 2023 closes the week that began Dec 26
        assert_eq!(locale_week(date(2023, 1, 1), 1), (2023, 1));
        assert_eq!(locale_week(date(2023, 1, 2), 1), (2023, 2));
        assert_eq!(format_date(date(2023, 1, 2), "e", 1), "0");
    }

    #[test]
    fn test_sunday_closes_a_monday_week() {
        // Sunday 2024-03-17 ends the Monday week but starts a Sunday week
        let sunday = date(2024, 3, 17);
        assert_eq!(format_date(sunday, "gggg-[W]ww", 1), "2024-W11");
        assert_eq!(format_date(sunday, "gggg-[W]ww", 0), "2024-W12");
        assert_eq!(format_date(sunday, "e", 1), "6");
    }
}

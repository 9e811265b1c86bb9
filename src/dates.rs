use anyhow::Result;
use chrono::{Days, NaiveDate};

/// Parse a date argument relative to `today`.
///
/// Accepts `today`, `yesterday`, `tomorrow`, `YYYY-MM-DD` and `YYYY-MM`
/// (the first of that month).
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    let relative = match input.to_lowercase().as_str() {
        "today" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        _ => None,
    };
    if let Some(date) = relative {
        return Ok(date);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d").map_err(|_| {
        anyhow::anyhow!(
            "Invalid date '{}'. Expected YYYY-MM-DD, YYYY-MM, today, yesterday or tomorrow",
            input
        )
    })
}

use anyhow::Result;
use calpro_core::grid::build_month_grid;
use calpro_core::navigation::{Action, MonthCursor};
use chrono::NaiveDate;

use crate::render::Render;
use crate::vault::Vault;

/// Print the month grid. `month` is 1-based.
pub fn run(
    vault: &Vault,
    today: NaiveDate,
    year: Option<i32>,
    month: Option<u32>,
    offset: i32,
) -> Result<()> {
    let current = MonthCursor::containing(today);
    let cursor = MonthCursor {
        year: year.unwrap_or(current.year),
        month: month.map(|m| m - 1).unwrap_or(current.month),
    }
    .reduce(Action::Navigate(offset));

    let grid = build_month_grid(cursor.year, cursor.month, vault.settings.start_of_week())?
        .highlight(today);

    println!("{}", grid.render());

    Ok(())
}

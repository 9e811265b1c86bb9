use anyhow::Result;
use calpro_core::grid::year_overview;
use calpro_core::navigation::{Action, YearCursor};
use chrono::NaiveDate;

use crate::render::Render;

pub fn run(today: NaiveDate, year: Option<i32>, offset: i32) -> Result<()> {
    let cursor = match year {
        Some(year) => YearCursor { year },
        None => YearCursor::containing(today),
    }
    .reduce(Action::Navigate(offset));

    println!("{}", year_overview(cursor.year, today).render());

    Ok(())
}

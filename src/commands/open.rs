use anyhow::Result;
use calpro_core::NoteKind;
use calpro_core::grid::build_month_grid;
use calpro_core::materialize::open_note;
use chrono::NaiveDate;
use dialoguer::Confirm;

use crate::host::LocalHost;
use crate::render::Render;
use crate::vault::Vault;

pub async fn run(
    vault: &Vault,
    kind: NoteKind,
    date: NaiveDate,
    yes: bool,
    launch: bool,
) -> Result<()> {
    let host = LocalHost::new(vault.dir.clone()).with_launch(launch);

    let result = open_note(&host, &vault.settings, kind, date, |path| {
        yes || confirm_create(path)
    })
    .await?;

    eprintln!("{}", result.render());

    Ok(())
}

/// Open the weekly note for grid row `row` (1-based) of `month` (1-based).
pub async fn run_week(
    vault: &Vault,
    year: i32,
    month: u32,
    row: u32,
    yes: bool,
    launch: bool,
) -> Result<()> {
    let grid = build_month_grid(year, month - 1, vault.settings.start_of_week())?;
    let Some(week) = grid.rows.get((row - 1) as usize) else {
        anyhow::bail!(
            "{} has {} week rows, there is no row {}",
            grid.title(),
            grid.rows.len(),
            row
        );
    };
    let anchor = week.anchor;
    log::debug!("row {} of {}-{:02} is anchored at {}", row, year, month, anchor);

    run(vault, NoteKind::Weekly, anchor, yes, launch).await
}

fn confirm_create(path: &str) -> bool {
    Confirm::new()
        .with_prompt(format!("Create {}?", path))
        .default(true)
        .interact()
        .unwrap_or(false)
}

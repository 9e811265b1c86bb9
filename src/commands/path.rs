use anyhow::Result;
use calpro_core::NoteKind;
use calpro_core::resolver::resolve_note_path;
use chrono::NaiveDate;
use serde::Serialize;

use crate::vault::Vault;

#[derive(Serialize)]
struct PathOutput {
    kind: NoteKind,
    date: NaiveDate,
    folder: String,
    path: String,
    exists: bool,
}

pub fn run(vault: &Vault, kind: NoteKind, date: NaiveDate, json: bool) -> Result<()> {
    let note = resolve_note_path(date, kind, &vault.settings)?;
    let path = note.path();

    if json {
        let output = PathOutput {
            kind,
            date: note.date,
            exists: vault.dir.join(&path).is_file(),
            folder: note.folder,
            path,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path);
    }

    Ok(())
}

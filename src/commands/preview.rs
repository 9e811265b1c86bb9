use anyhow::Result;
use calpro_core::NoteKind;
use calpro_core::materialize::preview_note;
use chrono::NaiveDate;

use crate::host::LocalHost;
use crate::vault::Vault;

pub async fn run(vault: &Vault, kind: NoteKind, date: NaiveDate) -> Result<()> {
    let host = LocalHost::new(vault.dir.clone()).with_launch(false);
    preview_note(&host, &vault.settings, kind, date).await?;
    Ok(())
}

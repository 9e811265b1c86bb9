//! Filesystem-backed host: the vault is a directory on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use calpro_core::error::{CalProError, CalProResult};
use calpro_core::resolver::normalize_path;
use calpro_core::{Entry, Host};
use owo_colors::OwoColorize;
use tokio::io::AsyncWriteExt;

/// Lines shown by a hover preview.
const PREVIEW_LINES: usize = 12;

pub struct LocalHost {
    root: PathBuf,
    launch: bool,
}

impl LocalHost {
    pub fn new(root: PathBuf) -> Self {
        LocalHost { root, launch: true }
    }

    /// Whether `open` launches the system handler or only prints the path.
    pub fn with_launch(mut self, launch: bool) -> Self {
        self.launch = launch;
        self
    }

    /// Map a vault-relative path onto the vault directory.
    fn resolve(&self, path: &str) -> CalProResult<(String, PathBuf)> {
        let normalized = normalize_path(path);

        if Path::new(path).is_absolute() || normalized.split('/').any(|segment| segment == "..") {
            return Err(CalProError::PathOutsideVault(path.to_string()));
        }

        let full = if normalized.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&normalized)
        };

        Ok((normalized, full))
    }
}

#[async_trait]
impl Host for LocalHost {
    async fn exists(&self, path: &str) -> CalProResult<bool> {
        let (_, full) = self.resolve(path)?;
        Ok(tokio::fs::try_exists(&full).await?)
    }

    async fn create_folder(&self, path: &str) -> CalProResult<()> {
        let (_, full) = self.resolve(path)?;
        tokio::fs::create_dir(&full).await?;
        Ok(())
    }

    async fn lookup(&self, path: &str) -> CalProResult<Option<Entry>> {
        let (normalized, full) = self.resolve(path)?;

        match tokio::fs::metadata(&full).await {
            Ok(meta) if meta.is_dir() => Ok(Some(Entry::Folder(normalized))),
            Ok(_) => Ok(Some(Entry::File(normalized))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, path: &str, content: &str) -> CalProResult<Entry> {
        let (normalized, full) = self.resolve(path)?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(Entry::File(normalized))
    }

    async fn read(&self, entry: &Entry) -> CalProResult<String> {
        let (_, full) = self.resolve(entry.path())?;
        Ok(tokio::fs::read_to_string(&full).await?)
    }

    async fn open(&self, path: &str) -> CalProResult<()> {
        let (_, full) = self.resolve(path)?;

        if !self.launch || open::that(&full).is_err() {
            println!("{}", full.display());
        }

        Ok(())
    }

    async fn emit_hover_preview(&self, path: &str) -> CalProResult<()> {
        let (normalized, full) = self.resolve(path)?;

        let content = match tokio::fs::read_to_string(&full).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                println!("{}", format!("No note at {}", normalized).dimmed());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        println!("{}", normalized.bold());
        let lines: Vec<&str> = content.lines().collect();
        for line in lines.iter().take(PREVIEW_LINES) {
            println!("  {}", line.dimmed());
        }
        if lines.len() > PREVIEW_LINES {
            println!("  {}", format!("… {} more lines", lines.len() - PREVIEW_LINES).dimmed());
        }
        if lines.is_empty() {
            println!("  {}", "(empty)".dimmed());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calpro_core::NoteKind;
    use calpro_core::Settings;
    use calpro_core::materialize::{Materialized, TemplateUse, open_note};
    use chrono::NaiveDate;

    fn host(dir: &Path) -> LocalHost {
        LocalHost::new(dir.to_path_buf()).with_launch(false)
    }

    #[tokio::test]
    async fn test_create_folder_needs_parent() {
        let vault = tempfile::tempdir().unwrap();
        let host = host(vault.path());

        assert!(host.create_folder("a/b").await.is_err());
        host.create_folder("a").await.unwrap();
        host.create_folder("a/b").await.unwrap();
        assert!(host.exists("a/b").await.unwrap());
        assert_eq!(
            host.lookup("a/b").await.unwrap(),
            Some(Entry::Folder("a/b".to_string()))
        );
    }

    #[tokio::test]
    async fn test_create_refuses_existing_file() {
        let vault = tempfile::tempdir().unwrap();
        let host = host(vault.path());

        let entry = host.create("note.md", "first").await.unwrap();
        assert_eq!(entry, Entry::File("note.md".to_string()));
        assert!(host.create("note.md", "second").await.is_err());
        assert_eq!(host.read(&entry).await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_paths_outside_vault_are_rejected() {
        let vault = tempfile::tempdir().unwrap();
        let host = host(vault.path());

        assert!(matches!(
            host.exists("../elsewhere").await,
            Err(CalProError::PathOutsideVault(_))
        ));
        assert!(host.create("/etc/passwd", "").await.is_err());
        assert_eq!(host.lookup("missing.md").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_open_note_on_disk() {
        let vault = tempfile::tempdir().unwrap();
        std::fs::create_dir(vault.path().join("Templates")).unwrap();
        std::fs::write(vault.path().join("Templates/Daily.md"), "# Today\n").unwrap();

        let mut settings = Settings::default();
        settings.set("rootFolder", "Cal").unwrap();
        settings.set("diaryFileTemplate", "Templates/Daily").unwrap();
        settings.set("showConfirmBeforeCreate", "false").unwrap();

        let host = host(vault.path());
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let first = open_note(&host, &settings, NoteKind::Daily, date, |_| true)
            .await
            .unwrap();
        assert_eq!(
            first,
            Materialized::Created {
                path: "Cal/Diary/2024-03-15.md".to_string(),
                template: TemplateUse::Copied("Templates/Daily.md".to_string()),
            }
        );
        assert_eq!(
            std::fs::read_to_string(vault.path().join("Cal/Diary/2024-03-15.md")).unwrap(),
            "# Today\n"
        );

        let second = open_note(&host, &settings, NoteKind::Daily, date, |_| true)
            .await
            .unwrap();
        assert_eq!(second, Materialized::Opened("Cal/Diary/2024-03-15.md".to_string()));
    }
}

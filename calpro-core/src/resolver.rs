//! Resolve dated notes to vault-relative paths.
//!
//! Pure: nothing here touches the vault.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{CalProError, CalProResult};
use crate::kind::NoteKind;
use crate::pattern::format_date;
use crate::settings::Settings;

const NOTE_EXTENSION: &str = "md";

/// Where a note for a given kind and date lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePath {
    pub kind: NoteKind,
    /// The date the note is filed under (see [`NoteKind::anchor`]).
    pub date: NaiveDate,
    /// Normalized folder, empty for the vault root.
    pub folder: String,
    pub stem: String,
}

impl NotePath {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.stem, NOTE_EXTENSION)
    }

    pub fn path(&self) -> String {
        join_path(&[self.folder.as_str(), self.file_name().as_str()])
    }
}

impl fmt::Display for NotePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Normalize a vault-relative path.
///
/// Backslashes become slashes, runs of slashes collapse, and empty or `.`
/// segments along with leading and trailing slashes are dropped. Segment
/// names are kept as written, spaces included.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

pub fn join_path(parts: &[&str]) -> String {
    normalize_path(&parts.join("/"))
}

/// Resolve the note for `kind` on `date` using the configured folders and
/// file-name patterns.
pub fn resolve_note_path(
    date: NaiveDate,
    kind: NoteKind,
    settings: &Settings,
) -> CalProResult<NotePath> {
    let note = settings.note(kind);
    let anchor = kind.anchor(date);

    let rendered = normalize_path(&format_date(anchor, note.file_name, settings.start_of_week()));

    // Patterns such as `YYYY/MM-DD` put part of the name in subfolders
    let (subfolder, stem) = match rendered.rsplit_once('/') {
        Some((dir, stem)) => (dir, stem),
        None => ("", rendered.as_str()),
    };

    if stem.is_empty() {
        return Err(CalProError::InvalidPattern {
            pattern: note.file_name.to_string(),
            reason: format!("renders to an empty file name for {}", anchor),
        });
    }

    let resolved = NotePath {
        kind,
        date: anchor,
        folder: join_path(&[settings.root_folder.as_str(), note.folder, subfolder]),
        stem: stem.to_string(),
    };

    log::debug!("resolved {} note for {} to {}", kind, date, resolved);

    Ok(resolved)
}

/// Paths to try when looking up a template.
///
/// A template configured without an extension is also tried as a markdown
/// file, so `Templates/Daily` finds `Templates/Daily.md`.
pub fn template_candidates(template: &str) -> Vec<String> {
    let path = normalize_path(template);
    if path.is_empty() {
        return Vec::new();
    }

    let has_extension = path
        .rsplit('/')
        .next()
        .is_some_and(|name| name.contains('.'));

    if has_extension {
        vec![path]
    } else {
        let with_extension = format!("{}.{}", path, NOTE_EXTENSION);
        vec![path, with_extension]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.set("rootFolder", "Cal").unwrap();
        settings.set("diaryFolder", "Diary").unwrap();
        settings.set("diaryFileName", "YYYY-MM-DD").unwrap();
        settings
    }

    #[test]
    fn test_daily_note_path() {
        let resolved = resolve_note_path(date(2024, 3, 15), NoteKind::Daily, &settings()).unwrap();
        assert_eq!(resolved.folder, "Cal/Diary");
        assert_eq!(resolved.stem, "2024-03-15");
        assert_eq!(resolved.path(), "Cal/Diary/2024-03-15.md");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let settings = settings();
        for kind in NoteKind::ALL {
            let a = resolve_note_path(date(2024, 12, 30), kind, &settings).unwrap();
            let b = resolve_note_path(date(2024, 12, 30), kind, &settings).unwrap();
            assert_eq!(a.path(), b.path());
        }
    }

    #[test]
    fn test_default_paths_for_each_kind() {
        let settings = Settings::default();
        let day = date(2024, 8, 17);

        let paths: Vec<String> = NoteKind::ALL
            .iter()
            .map(|kind| resolve_note_path(day, *kind, &settings).unwrap().path())
            .collect();

        assert_eq!(
            paths,
            vec![
                "Calendar Pro/Diary/2024-08-17.md",
                "Calendar Pro/Weekly/2024-W33.md",
                "Calendar Pro/Monthly/2024-08.md",
                "Calendar Pro/Quarterly/2024-Q3.md",
                "Calendar Pro/Yearly/2024.md",
            ]
        );
    }

    #[test]
    fn test_empty_folders_and_stray_slashes() {
        let mut settings = settings();
        settings.set("rootFolder", "/").unwrap();
        settings.set("diaryFolder", "//Journal\\Daily/").unwrap();

        let resolved = resolve_note_path(date(2024, 3, 15), NoteKind::Daily, &settings).unwrap();
        assert_eq!(resolved.path(), "Journal/Daily/2024-03-15.md");

        settings.set("diaryFolder", "").unwrap();
        let resolved = resolve_note_path(date(2024, 3, 15), NoteKind::Daily, &settings).unwrap();
        assert_eq!(resolved.path(), "2024-03-15.md");
        assert_eq!(resolved.folder, "");
    }

    #[test]
    fn test_pattern_with_subfolders() {
        let mut settings = settings();
        settings.set("diaryFileName", "YYYY/MM/YYYY-MM-DD").unwrap();

        let resolved = resolve_note_path(date(2024, 3, 15), NoteKind::Daily, &settings).unwrap();
        assert_eq!(resolved.folder, "Cal/Diary/2024/03");
        assert_eq!(resolved.stem, "2024-03-15");
    }

    #[test]
    fn test_pattern_rendering_to_nothing_is_an_error() {
        let mut settings = settings();
        settings.set("diaryFileName", "[/]").unwrap();

        let err = resolve_note_path(date(2024, 3, 15), NoteKind::Daily, &settings).unwrap_err();
        assert!(matches!(err, CalProError::InvalidPattern { .. }));
    }

    #[test]
    fn test_template_candidates() {
        assert_eq!(
            template_candidates("Templates/Daily"),
            vec!["Templates/Daily".to_string(), "Templates/Daily.md".to_string()]
        );
        assert_eq!(template_candidates("/Daily.md"), vec!["Daily.md".to_string()]);
        assert!(template_candidates("/").is_empty());
    }

    #[test]
    fn test_spaces_in_segments_are_kept() {
        assert_eq!(normalize_path(" Cal / Diary "), " Cal / Diary ");

        let mut settings = settings();
        settings.set("diaryFolder", "Diary ").unwrap();
        settings.set("diaryFileName", "[ ]YYYY").unwrap();

        let resolved = resolve_note_path(date(2024, 3, 15), NoteKind::Daily, &settings).unwrap();
        assert_eq!(resolved.path(), "Cal/Diary / 2024.md");
    }
}

//! Per-vault settings.
//!
//! Stored as a flat record in `<vault>/.calpro/settings.toml`. Keys that are
//! missing from the file fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CalProError, CalProResult};
use crate::kind::NoteKind;

const SETTINGS_DIR: &str = ".calpro";
const SETTINGS_FILE: &str = "settings.toml";

const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Keys accepted by [`Settings::set`].
pub const KEYS: [&str; 18] = [
    "startDayOfWeek",
    "showConfirmBeforeCreate",
    "rootFolder",
    "diaryFolder",
    "diaryFileName",
    "diaryFileTemplate",
    "weeklyFolder",
    "weeklyFileName",
    "weeklyFileTemplate",
    "monthlyFolder",
    "monthlyFileName",
    "monthlyFileTemplate",
    "quarterlyFolder",
    "quarterlyFileName",
    "quarterlyFileTemplate",
    "yearlyFolder",
    "yearlyFileName",
    "yearlyFileTemplate",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// "0" (Sunday) through "6" (Saturday).
    pub start_day_of_week: String,
    pub show_confirm_before_create: bool,
    pub root_folder: String,

    pub diary_folder: String,
    pub diary_file_name: String,
    pub diary_file_template: String,

    pub weekly_folder: String,
    pub weekly_file_name: String,
    pub weekly_file_template: String,

    pub monthly_folder: String,
    pub monthly_file_name: String,
    pub monthly_file_template: String,

    pub quarterly_folder: String,
    pub quarterly_file_name: String,
    pub quarterly_file_template: String,

    pub yearly_folder: String,
    pub yearly_file_name: String,
    pub yearly_file_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            start_day_of_week: "0".to_string(),
            show_confirm_before_create: true,
            root_folder: "Calendar Pro".to_string(),
            diary_folder: "Diary".to_string(),
            diary_file_name: "YYYY-MM-DD".to_string(),
            diary_file_template: "Daily Template".to_string(),
            weekly_folder: "Weekly".to_string(),
            weekly_file_name: "gggg-[W]ww".to_string(),
            weekly_file_template: "Weekly Template".to_string(),
            monthly_folder: "Monthly".to_string(),
            monthly_file_name: "YYYY-MM".to_string(),
            monthly_file_template: "Monthly Template".to_string(),
            quarterly_folder: "Quarterly".to_string(),
            quarterly_file_name: "YYYY-[Q]Q".to_string(),
            quarterly_file_template: "Quarterly Template".to_string(),
            yearly_folder: "Yearly".to_string(),
            yearly_file_name: "YYYY".to_string(),
            yearly_file_template: "Yearly Template".to_string(),
        }
    }
}

/// Folder, file-name pattern and template configured for one note kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteSettings<'a> {
    pub folder: &'a str,
    pub file_name: &'a str,
    pub file_template: &'a str,
}

impl NoteSettings<'_> {
    /// Template path, or None when no template is configured.
    pub fn template(&self) -> Option<&str> {
        let template = self.file_template.trim();
        if template.is_empty() {
            None
        } else {
            Some(template)
        }
    }
}

impl Settings {
    pub fn path(vault_dir: &Path) -> PathBuf {
        vault_dir.join(SETTINGS_DIR).join(SETTINGS_FILE)
    }

    /// Load settings from `<vault>/.calpro/settings.toml`, or defaults.
    pub fn load(vault_dir: &Path) -> CalProResult<Self> {
        let path = Self::path(vault_dir);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let settings: Settings =
                toml::from_str(&content).map_err(|e| CalProError::Config(e.to_string()))?;
            Ok(settings)
        } else {
            log::debug!("no settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, vault_dir: &Path) -> CalProResult<()> {
        let path = Self::path(vault_dir);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CalProError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    pub fn note(&self, kind: NoteKind) -> NoteSettings<'_> {
        let (folder, file_name, file_template) = match kind {
            NoteKind::Daily => (
                &self.diary_folder,
                &self.diary_file_name,
                &self.diary_file_template,
            ),
            NoteKind::Weekly => (
                &self.weekly_folder,
                &self.weekly_file_name,
                &self.weekly_file_template,
            ),
            NoteKind::Monthly => (
                &self.monthly_folder,
                &self.monthly_file_name,
                &self.monthly_file_template,
            ),
            NoteKind::Quarterly => (
                &self.quarterly_folder,
                &self.quarterly_file_name,
                &self.quarterly_file_template,
            ),
            NoteKind::Yearly => (
                &self.yearly_folder,
                &self.yearly_file_name,
                &self.yearly_file_template,
            ),
        };

        NoteSettings {
            folder: folder.as_str(),
            file_name: file_name.as_str(),
            file_template: file_template.as_str(),
        }
    }

    /// Start of week as 0 (Sunday) through 6. Unparseable values fall back to
    /// Sunday.
    pub fn start_of_week(&self) -> u8 {
        match parse_start_day(&self.start_day_of_week) {
            Some(day) => day,
            None => {
                log::warn!(
                    "invalid startDayOfWeek '{}', falling back to Sunday",
                    self.start_day_of_week
                );
                0
            }
        }
    }

    /// Check that the start day parses and every note kind has a pattern.
    pub fn validate(&self) -> CalProResult<()> {
        if parse_start_day(&self.start_day_of_week).is_none() {
            return Err(invalid(
                "startDayOfWeek",
                &self.start_day_of_week,
                "expected a digit 0-6 or a weekday name",
            ));
        }

        for kind in NoteKind::ALL {
            if self.note(kind).file_name.trim().is_empty() {
                return Err(invalid(
                    &format!("{}FileName", key_prefix(kind)),
                    "",
                    "file name pattern cannot be empty",
                ));
            }
        }

        Ok(())
    }

    /// Update one setting by its persisted key.
    pub fn set(&mut self, key: &str, value: &str) -> CalProResult<()> {
        match key {
            "startDayOfWeek" => {
                let day = parse_start_day(value).ok_or_else(|| {
                    invalid(key, value, "expected a digit 0-6 or a weekday name")
                })?;
                self.start_day_of_week = day.to_string();
            }
            "showConfirmBeforeCreate" => {
                self.show_confirm_before_create = value
                    .parse()
                    .map_err(|_| invalid(key, value, "expected true or false"))?;
            }
            "rootFolder" => self.root_folder = value.to_string(),
            _ => {
                let field = self
                    .note_field_mut(key)
                    .ok_or_else(|| invalid(key, value, "unknown setting"))?;
                if key.ends_with("FileName") && value.trim().is_empty() {
                    return Err(invalid(key, value, "file name pattern cannot be empty"));
                }
                *field = value.to_string();
            }
        }

        Ok(())
    }

    fn note_field_mut(&mut self, key: &str) -> Option<&mut String> {
        let field = match key {
            "diaryFolder" => &mut self.diary_folder,
            "diaryFileName" => &mut self.diary_file_name,
            "diaryFileTemplate" => &mut self.diary_file_template,
            "weeklyFolder" => &mut self.weekly_folder,
            "weeklyFileName" => &mut self.weekly_file_name,
            "weeklyFileTemplate" => &mut self.weekly_file_template,
            "monthlyFolder" => &mut self.monthly_folder,
            "monthlyFileName" => &mut self.monthly_file_name,
            "monthlyFileTemplate" => &mut self.monthly_file_template,
            "quarterlyFolder" => &mut self.quarterly_folder,
            "quarterlyFileName" => &mut self.quarterly_file_name,
            "quarterlyFileTemplate" => &mut self.quarterly_file_template,
            "yearlyFolder" => &mut self.yearly_folder,
            "yearlyFileName" => &mut self.yearly_file_name,
            "yearlyFileTemplate" => &mut self.yearly_file_template,
            _ => return None,
        };
        Some(field)
    }
}

fn key_prefix(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Daily => "diary",
        other => other.as_str(),
    }
}

fn parse_start_day(value: &str) -> Option<u8> {
    let value = value.trim().to_lowercase();

    if let Ok(day) = value.parse::<u8>() {
        return (day < 7).then_some(day);
    }

    WEEKDAY_NAMES
        .iter()
        .position(|name| *name == value || name[..3] == value)
        .map(|day| day as u8)
}

fn invalid(key: &str, value: &str, reason: &str) -> CalProError {
    CalProError::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.start_of_week(), 0);
        assert_eq!(settings.note(NoteKind::Daily).file_name, "YYYY-MM-DD");
        assert_eq!(settings.note(NoteKind::Weekly).file_name, "gggg-[W]ww");
        assert_eq!(settings.note(NoteKind::Quarterly).folder, "Quarterly");
        assert!(settings.show_confirm_before_create);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_keys() {
        let settings: Settings = toml::from_str(
            r#"
rootFolder = "Cal"
diaryFolder = "Diary"
startDayOfWeek = "1"
"#,
        )
        .unwrap();

        assert_eq!(settings.root_folder, "Cal");
        assert_eq!(settings.start_of_week(), 1);
        assert_eq!(settings.yearly_file_name, "YYYY");
    }

    #[test]
    fn test_empty_template_means_no_template() {
        let mut settings = Settings::default();
        settings.set("weeklyFileTemplate", "  ").unwrap();
        assert_eq!(settings.note(NoteKind::Weekly).template(), None);
        assert_eq!(
            settings.note(NoteKind::Daily).template(),
            Some("Daily Template")
        );
    }

    #[test]
    fn test_set_validates_values() {
        let mut settings = Settings::default();

        settings.set("startDayOfWeek", "monday").unwrap();
        assert_eq!(settings.start_day_of_week, "1");
        settings.set("startDayOfWeek", "sat").unwrap();
        assert_eq!(settings.start_of_week(), 6);

        assert!(settings.set("startDayOfWeek", "7").is_err());
        assert!(settings.set("showConfirmBeforeCreate", "maybe").is_err());
        assert!(settings.set("diaryFileName", "").is_err());
        assert!(settings.set("hourlyFolder", "Hours").is_err());

        settings.set("showConfirmBeforeCreate", "false").unwrap();
        assert!(!settings.show_confirm_before_create);
    }

    #[test]
    fn test_every_key_is_settable() {
        let mut settings = Settings::default();
        for key in KEYS {
            let value = match key {
                "startDayOfWeek" => "3",
                "showConfirmBeforeCreate" => "true",
                _ => "X",
            };
            settings.set(key, value).unwrap();
        }
        assert_eq!(settings.note(NoteKind::Yearly).folder, "X");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_stored_start_day_falls_back_to_sunday() {
        let settings = Settings {
            start_day_of_week: "funday".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.start_of_week(), 0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_save_and_load_in_vault() {
        let vault = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(vault.path()).unwrap(), Settings::default());

        let mut settings = Settings::default();
        settings.set("rootFolder", "Journal").unwrap();
        settings.save(vault.path()).unwrap();

        assert!(vault.path().join(".calpro/settings.toml").exists());
        assert_eq!(Settings::load(vault.path()).unwrap().root_folder, "Journal");
    }
}

//! Global calpro configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalProError, CalProResult};

static DEFAULT_VAULT_PATH: &str = "~/notes";

fn default_vault_path() -> PathBuf {
    PathBuf::from(DEFAULT_VAULT_PATH)
}

fn is_default_vault_path(p: &PathBuf) -> bool {
    *p == default_vault_path()
}

/// Global configuration at ~/.config/calpro/config.toml
///
/// Note settings (folders, file names, templates) live inside the vault at
/// `.calpro/settings.toml` instead.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CalproConfig {
    #[serde(default = "default_vault_path", skip_serializing_if = "is_default_vault_path")]
    pub vault_dir: PathBuf,
}

impl Default for CalproConfig {
    fn default() -> Self {
        CalproConfig {
            vault_dir: default_vault_path(),
        }
    }
}

impl CalproConfig {
    pub fn config_path() -> CalProResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalProError::Config("Could not determine config directory".into()))?
            .join("calpro");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first use.
    ///
    /// `CALPRO_VAULT_DIR` overrides the file.
    pub fn load() -> CalProResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> CalProResult<Self> {
        Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("CALPRO"))
            .build()
            .map_err(|e| CalProError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalProError::Config(e.to_string()))
    }

    /// Vault directory with `~` expanded.
    pub fn vault_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.vault_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalProResult<()> {
        let contents = format!(
            "\
# calpro configuration

# Where your notes live:
# vault_dir = \"{}\"
",
            DEFAULT_VAULT_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalProError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalProError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

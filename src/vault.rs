use std::path::PathBuf;

use anyhow::Result;
use calpro_core::Settings;
use calpro_core::calpro_config::CalproConfig;

/// The vault directory and the settings stored inside it.
pub struct Vault {
    pub dir: PathBuf,
    pub settings: Settings,
}

impl Vault {
    /// Vault directory from `--vault`, or from the global config.
    pub fn locate(vault_override: Option<PathBuf>) -> Result<PathBuf> {
        match vault_override {
            Some(dir) => Ok(dir),
            None => Ok(CalproConfig::load()?.vault_path()),
        }
    }

    pub fn load(vault_override: Option<PathBuf>) -> Result<Self> {
        let dir = Self::locate(vault_override)?;

        if !dir.is_dir() {
            let config_path = CalproConfig::config_path()?;
            anyhow::bail!(
                "Vault directory {} does not exist.\n\n\
                Point calpro at your notes with:\n  \
                vault_dir = \"~/path/to/notes\"\n\
                in {}, or pass --vault <dir>",
                dir.display(),
                config_path.display()
            );
        }

        let settings = Settings::load(&dir)?;
        Ok(Vault { dir, settings })
    }
}

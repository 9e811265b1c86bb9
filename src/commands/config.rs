use std::path::PathBuf;

use anyhow::Result;
use calpro_core::Settings;
use calpro_core::calpro_config::CalproConfig;
use owo_colors::OwoColorize;

use crate::vault::Vault;

pub fn show(vault_override: Option<PathBuf>) -> Result<()> {
    let vault = Vault::load(vault_override)?;

    path_lines(&vault.dir)?;
    println!();
    println!("{}", "Settings".bold());
    for line in toml::to_string_pretty(&vault.settings)?.lines() {
        println!("  {}", line);
    }

    Ok(())
}

pub fn path(vault_override: Option<PathBuf>) -> Result<()> {
    let dir = Vault::locate(vault_override)?;
    path_lines(&dir)
}

fn path_lines(dir: &std::path::Path) -> Result<()> {
    println!("{}", "Paths".bold());
    println!("  Config:    {}", CalproConfig::config_path()?.display());
    println!("  Vault:     {}", dir.display());
    println!("  Settings:  {}", Settings::path(dir).display());
    Ok(())
}

pub fn set(vault_override: Option<PathBuf>, key: &str, value: &str) -> Result<()> {
    let mut vault = Vault::load(vault_override)?;

    vault.settings.set(key, value)?;
    vault.settings.validate()?;
    vault.settings.save(&vault.dir)?;

    println!("{} {} = {}", "Set".green(), key.bold(), value);

    Ok(())
}

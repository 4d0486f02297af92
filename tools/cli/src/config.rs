use anyhow::Result;
use log::{debug, warn};
use salary_accrual::Language;
use salary_ticker::Settings;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const LANGUAGE_ENV: &str = "SALARY_TICKER_LANG";

pub fn expand_path(config_path: &Path) -> Result<PathBuf> {
    if !config_path.starts_with("~") {
        return Ok(config_path.to_path_buf());
    }

    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    let relative = config_path.strip_prefix("~")?;
    Ok(home_dir.join(relative))
}

/// Loads settings, writing a default file on first run.
///
/// Only display preferences and setup defaults live here; a tracked salary
/// is never written back.
pub async fn load_settings(config_path: &Path) -> Result<Settings> {
    let expanded_path = expand_path(config_path)?;

    if !expanded_path.exists() {
        let default_settings = Settings::default();
        create_settings_file(&expanded_path, &default_settings).await?;
        return Ok(default_settings);
    }

    debug!("Reading settings from {}", expanded_path.display());
    let content = fs::read_to_string(&expanded_path).await?;
    let settings: Settings = toml::from_str(&content)?;

    Ok(settings)
}

async fn create_settings_file(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content).await?;

    eprintln!("Created default config file at: {}", path.display());

    Ok(())
}

/// Flag first, then the environment, then the settings file.
pub fn resolve_language(flag: Option<Language>, settings: &Settings) -> Language {
    if let Some(language) = flag {
        return language;
    }

    if let Ok(value) = std::env::var(LANGUAGE_ENV) {
        match value.parse() {
            Ok(language) => return language,
            Err(e) => warn!("Ignoring {}: {}", LANGUAGE_ENV, e),
        }
    }

    settings.display.language
}

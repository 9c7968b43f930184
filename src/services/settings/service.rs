use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

/// Environment variable that points at an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "RUST_PLANNER_CONFIG";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `RUST_PLANNER_CONFIG` when set, otherwise the platform config dir.
    pub fn from_environment() -> Self {
        Self::new(resolve_settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings, falling back to defaults when no file exists
    pub fn get(&self) -> Result<Settings> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                self.path.display()
            );
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings {}", self.path.display()))?;
        let settings: Settings = toml::from_str(&content).context("Failed to parse settings")?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create settings directory {}", parent.display())
                })?;
            }
        }

        let content = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        std::fs::write(&self.path, content).context("Failed to update settings")?;

        Ok(())
    }
}

fn resolve_settings_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(dirs) = ProjectDirs::from("com", "RustPlanner", "Planner") {
        dirs.config_dir().join("settings.toml")
    } else {
        log::warn!("Unable to resolve project directory; using current dir for settings");
        PathBuf::from("settings.toml")
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sys::geometry::Tolerance;

pub fn home_dir() -> PathBuf { dirs::home_dir().unwrap_or_default() }
pub fn layout_file() -> PathBuf { home_dir().join(".layout.json") }
pub fn config_file() -> PathBuf { home_dir().join(".relayout.toml") }

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct Config {
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Saved layout to restore from. Falls back to `~/.layout.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_file: Option<PathBuf>,
    #[serde(default)]
    pub restore: RestoreSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct RestoreSettings {
    /// Pixels of slack on each axis before a window counts as misplaced.
    #[serde(default = "default_tolerance")]
    pub position_tolerance: f64,
    /// Pixels of slack on each dimension before a window counts as resized.
    #[serde(default = "default_tolerance")]
    pub size_tolerance: f64,
    /// Pause after each move so the window server catches up. 0 disables it.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for RestoreSettings {
    fn default() -> Self {
        Self {
            position_tolerance: default_tolerance(),
            size_tolerance: default_tolerance(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl RestoreSettings {
    pub fn position_tolerance(&self) -> Tolerance { Tolerance::uniform(self.position_tolerance) }

    pub fn size_tolerance(&self) -> Tolerance { Tolerance::uniform(self.size_tolerance) }

    pub fn settle_delay(&self) -> Duration { Duration::from_millis(self.settle_delay_ms) }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(self.position_tolerance > 0.0) {
            issues.push(format!(
                "position_tolerance must be positive, got {}",
                self.position_tolerance
            ));
        }

        if !(self.size_tolerance > 0.0) {
            issues.push(format!(
                "size_tolerance must be positive, got {}",
                self.size_tolerance
            ));
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if !(self.position_tolerance > 0.0) {
            self.position_tolerance = default_tolerance();
            fixes += 1;
        }

        if !(self.size_tolerance > 0.0) {
            self.size_tolerance = default_tolerance();
            fixes += 1;
        }

        fixes
    }
}

impl Settings {
    pub fn layout_file(&self) -> PathBuf { self.layout_file.clone().unwrap_or_else(layout_file) }

    pub fn validate(&self) -> Vec<String> { self.restore.validate() }

    pub fn auto_fix_values(&mut self) -> usize { self.restore.auto_fix_values() }
}

fn default_tolerance() -> f64 { 4.0 }

fn default_settle_delay_ms() -> u64 { 250 }

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn default() -> Config {
        Self::parse(include_str!("../../relayout.default.toml")).unwrap_or_else(|_| Config {
            settings: Settings::default(),
        })
    }

    /// Save the current config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let config_file = ConfigFile { settings: self.settings.clone() };

        let toml_string = toml::to_string_pretty(&config_file)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;

        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }

    fn parse(buf: &str) -> anyhow::Result<Config> {
        let c: ConfigFile = toml::from_str(buf)?;
        Ok(Config { settings: c.settings })
    }
}

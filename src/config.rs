use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::generator::ContentMode;

/// Test lengths offered by the duration selector.
pub const SUPPORTED_DURATIONS: [u32; 4] = [15, 30, 60, 120];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
    #[serde(default)]
    pub mode: ContentMode,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_duration_secs() -> u32 {
    30
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keysprint")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            mode: ContentMode::default(),
            theme: default_theme(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Writes this config's mode and duration into the stored config file,
    /// leaving every other stored field alone. A stored file that cannot be
    /// read is left untouched and reported as an error.
    pub fn save_selection(&self) -> Result<()> {
        self.save_selection_to(&Self::config_path())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn save_selection_to(&self, path: &Path) -> Result<()> {
        let mut stored = Self::load_from(path)?;
        if stored.mode == self.mode && stored.duration_secs == self.duration_secs {
            return Ok(());
        }
        stored.mode = self.mode;
        stored.duration_secs = self.duration_secs;
        stored.save_to(path)
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keysprint")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Snaps `duration_secs` to the nearest supported length and resets an
    /// unknown theme to the default. Call after deserialization and after
    /// applying command line overrides.
    pub fn validate(&mut self, valid_themes: &[&str]) {
        if !SUPPORTED_DURATIONS.contains(&self.duration_secs) {
            let snapped = snap_duration(self.duration_secs);
            warn!(
                requested = self.duration_secs,
                using = snapped,
                "unsupported test duration"
            );
            self.duration_secs = snapped;
        }
        if !valid_themes.contains(&self.theme.as_str()) {
            warn!(theme = %self.theme, "unknown theme, using default");
            self.theme = default_theme();
        }
    }
}

/// Closest supported duration, preferring the shorter one on ties.
pub fn snap_duration(secs: u32) -> u32 {
    SUPPORTED_DURATIONS
        .iter()
        .copied()
        .min_by_key(|d| d.abs_diff(secs))
        .unwrap_or_else(default_duration_secs)
}

/// Next supported duration after `secs`, wrapping around.
pub fn next_duration(secs: u32) -> u32 {
    let idx = SUPPORTED_DURATIONS
        .iter()
        .position(|d| *d == snap_duration(secs))
        .unwrap_or(0);
    SUPPORTED_DURATIONS[(idx + 1) % SUPPORTED_DURATIONS.len()]
}

/// Previous supported duration before `secs`, wrapping around.
pub fn prev_duration(secs: u32) -> u32 {
    let idx = SUPPORTED_DURATIONS
        .iter()
        .position(|d| *d == snap_duration(secs))
        .unwrap_or(0);
    SUPPORTED_DURATIONS[(idx + SUPPORTED_DURATIONS.len() - 1) % SUPPORTED_DURATIONS.len()]
}

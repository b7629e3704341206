use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::format::OutputFormat;

/// Where and how report files are written.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory for report files; the current directory when unset.
    pub output_dir: Option<PathBuf>,

    /// File name without extension, e.g. "weather" gives `weather.json`.
    pub file_stem: String,

    /// Example TOML:
    /// formats = ["json", "toml"]
    pub formats: Vec<OutputFormat>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            file_stem: "weather".to_string(),
            formats: OutputFormat::all().to_vec(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or defaults if there is no file yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;

        if cfg.file_stem.trim().is_empty() {
            return Err(anyhow!("`file_stem` must not be empty"));
        }

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "dough-tui";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoughConfig {
    /// Keep batches across restarts. When false they live only in memory.
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Ring the terminal bell when a batch becomes ready.
    #[serde(default = "default_true")]
    pub bell: bool,

    /// Where batches are stored. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Upper bound suggested next to the hours field. Not enforced.
    #[serde(default = "default_max_hours_hint")]
    pub max_hours_hint: f64,
}

fn default_true() -> bool {
    true
}

fn default_max_hours_hint() -> f64 {
    240.0
}

impl Default for DoughConfig {
    fn default() -> Self {
        Self {
            persist: true,
            bell: true,
            data_file: None,
            max_hours_hint: default_max_hours_hint(),
        }
    }
}

impl DoughConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR)
            .join("config.toml"))
    }

    fn data_root() -> Result<PathBuf> {
        Ok(dirs::data_dir()
            .context("Cannot determine data directory")?
            .join(APP_DIR))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_root()?.join("dough-tui.log"))
    }

    /// The batch file: `data_file` if set, otherwise `<data dir>/dough-tui/batches.json`.
    pub fn batch_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_root()?.join("batches.json")),
        }
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Print-friendly path of the config file, writing defaults if it is missing.
    pub fn ensure_config_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default()
                .save_to(&path)
                .with_context(|| format!("Failed to write config at {}", path.display()))?;
        }
        Ok(path)
    }
}

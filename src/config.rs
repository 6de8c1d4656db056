//! Config model and persistence helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository location and startup behaviour.
    pub git: GitCfg,
    /// Panel timing and layout.
    pub gui: GuiCfg,
    /// Log file destination and verbosity.
    pub log: LogCfg,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitCfg {
    /// Path of the repository to open.
    pub repo_path: String,
    /// Run a fetch right after startup.
    pub fetch_on_startup: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiCfg {
    /// Interval between background refreshes of the files panel.
    pub refresh_interval_ms: u64,
    /// Interval between background fetches; 0 disables them.
    pub fetch_interval_secs: u64,
    /// View focused at startup.
    pub initial_view: String,
    /// Width of the side panel column, in percent of the screen.
    pub side_panel_ratio: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogCfg {
    pub file: String,
    /// `tracing` filter directive, e.g. `info` or `repo_tui=debug`.
    pub level: String,
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            Ok(toml::from_str(&s)?)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }
}

impl Default for GitCfg {
    fn default() -> Self {
        Self {
            repo_path: ".".into(),
            fetch_on_startup: false,
        }
    }
}

impl Default for GuiCfg {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 2000,
            fetch_interval_secs: 60,
            initial_view: "files".into(),
            side_panel_ratio: 33,
        }
    }
}

impl Default for LogCfg {
    fn default() -> Self {
        Self {
            file: "repo_tui.log".into(),
            level: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_or_default(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.gui.initial_view, "files");
        assert_eq!(cfg.git.repo_path, ".");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[gui]\nfetch_interval_secs = 0\n").unwrap();
        let cfg = Config::load_or_default(&path).unwrap();
        assert_eq!(cfg.gui.fetch_interval_secs, 0);
        assert_eq!(cfg.gui.refresh_interval_ms, 2000);
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.gui.initial_view = "commits".into();
        cfg.save(&path).unwrap();
        let loaded = Config::load_or_default(&path).unwrap();
        assert_eq!(loaded.gui.initial_view, "commits");
    }
}

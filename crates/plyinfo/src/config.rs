//! Application configuration — persisted as JSON.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PLYINFO_CONFIG_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("unknown output format '{s}' (expected 'table' or 'json')"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

/// Global configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output used by `show` when neither `--json` nor `--table` is given.
    #[serde(default)]
    pub default_output: OutputFormat,
    /// Include `comment` / `obj_info` lines in table output.
    #[serde(default = "default_show_comments")]
    pub show_comments: bool,
}

fn default_show_comments() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::default(),
            show_comments: default_show_comments(),
        }
    }
}

impl AppConfig {
    /// `$PLYINFO_CONFIG_DIR`, or the platform config directory:
    /// `~/.config/plyinfo/`
    pub fn config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("plyinfo")
    }

    fn config_file(dir: &Path) -> PathBuf {
        dir.join("config.json")
    }

    /// Load from disk, or return defaults if the file doesn't exist.
    pub fn load_or_default() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_dir())
    }

    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let path = Self::config_file(dir);
        if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_dir())
    }

    pub fn save_to(&self, dir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)?;
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::config_file(dir), data)?;
        Ok(())
    }

    /// Update one field from its `config set` spelling.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "default_output" => self.default_output = value.parse()?,
            "show_comments" => self.show_comments = value.parse()?,
            _ => anyhow::bail!("Unknown config key: {key}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("plyinfo-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = AppConfig::load_from(&scratch_dir("missing")).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.default_output, OutputFormat::Table);
        assert!(cfg.show_comments);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = scratch_dir("roundtrip");
        let mut cfg = AppConfig::default();
        cfg.set("default_output", "json").unwrap();
        cfg.set("show_comments", "false").unwrap();
        cfg.save_to(&dir).unwrap();

        assert_eq!(AppConfig::load_from(&dir).unwrap(), cfg);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{"default_output":"json"}"#).unwrap();
        assert_eq!(cfg.default_output, OutputFormat::Json);
        assert!(cfg.show_comments);
    }

    #[test]
    fn rejects_unknown_keys_and_values() {
        let mut cfg = AppConfig::default();
        assert!(cfg.set("colour", "red").is_err());
        assert!(cfg.set("default_output", "yaml").is_err());
        assert!(cfg.set("show_comments", "maybe").is_err());
        assert_eq!(cfg, AppConfig::default());
    }
}

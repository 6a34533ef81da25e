use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fs;

/// Default settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = "atcf-config.yaml";

/// Settings of the command line tool itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Directory that holds `atcf/config/...`
    #[serde(default = "default_store_root")]
    pub store_root: Utf8PathBuf,

    #[serde(default = "default_log_dir")]
    pub log_dir: Utf8PathBuf,

    #[serde(default)]
    pub debug: bool,

    /// Mirror log output to stderr
    #[serde(default)]
    pub console_log: bool,

    /// Write the log file as JSON lines
    #[serde(default)]
    pub json_log: bool,
}

fn default_store_root() -> Utf8PathBuf {
    Utf8PathBuf::from(".")
}

fn default_log_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("logs")
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            store_root: default_store_root(),
            log_dir: default_log_dir(),
            debug: false,
            console_log: false,
            json_log: false,
        }
    }
}

impl ToolSettings {
    /// Load settings from YAML.
    ///
    /// # Returns
    /// The loaded settings, or defaults if the file doesn't exist
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!("Settings file not found at {}, using defaults", path);
            return Ok(Self::default());
        }

        let file_contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path))?;

        let settings: ToolSettings = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", path))?;

        tracing::info!("Loaded settings from {}", path);
        Ok(settings)
    }

    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(self).context("Failed to serialize settings to YAML")?;

        fs::write(path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", path))?;

        tracing::info!("Saved settings to {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join(SETTINGS_FILE)).unwrap();

        let settings = ToolSettings::load(&path).unwrap();
        assert_eq!(settings, ToolSettings::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join(SETTINGS_FILE)).unwrap();
        fs::write(&path, "store_root: /data/localization\ndebug: true\n").unwrap();

        let settings = ToolSettings::load(&path).unwrap();
        assert_eq!(settings.store_root, "/data/localization");
        assert!(settings.debug);
        assert_eq!(settings.log_dir, "logs");
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join(SETTINGS_FILE)).unwrap();

        let settings = ToolSettings {
            json_log: true,
            ..ToolSettings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(ToolSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join(SETTINGS_FILE)).unwrap();
        fs::write(&path, "debug: [not a bool\n").unwrap();

        assert!(ToolSettings::load(&path).is_err());
    }
}

//! Tool configuration module.
//!
//! Handles loading, validating, and merging `logokit.toml`. Stock defaults are
//! the base layer; a user file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [trim]
//! margin = 10                # Pixels kept around content by `logokit trim`
//!
//! [manipulate]
//! skip_same = true           # Report "no change" when a chain round-trips
//!
//! [files]
//! extensions = ["jpg", "jpeg", "png", "webp", "bmp", "gif"]
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only widen the trim margin
//! [trim]
//! margin = 24
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::DEFAULT_TRIM_MARGIN;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "logokit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `logokit.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Defaults for the `trim` command.
    pub trim: TrimConfig,
    /// Defaults for the `manipulate` command.
    pub manipulate: ManipulateConfig,
    /// Which files directory arguments expand to.
    pub files: FilesConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.files.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "files.extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .files
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains('.'))
        {
            return Err(ConfigError::Validation(format!(
                "files.extensions entries must be bare extensions without dots, got {bad:?}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrimConfig {
    /// Margin in pixels kept around the detected content.
    pub margin: u32,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_TRIM_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManipulateConfig {
    /// Treat a chain result identical to its input as unmodified.
    pub skip_same: bool,
}

impl Default for ManipulateConfig {
    fn default() -> Self {
        Self { skip_same: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesConfig {
    /// Lowercase extensions, without the dot, picked up from directories.
    pub extensions: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp", "bmp", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ToolConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        log::debug!("loading config from {}", path.display());
    }
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock `logokit.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# logokit configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# logokit trim
# ---------------------------------------------------------------------------
[trim]
# Pixels of background kept around the detected content.
# `--margin` on the command line overrides this.
margin = 10

# ---------------------------------------------------------------------------
# logokit manipulate
# ---------------------------------------------------------------------------
[manipulate]
# When a chain such as "e,t0" produces exactly the input pixels, report
# the file as unchanged and write nothing. `--no-skip-same` disables this.
skip_same = true

# ---------------------------------------------------------------------------
# Input files
# ---------------------------------------------------------------------------
[files]
# Extensions (case-insensitive, no dot) picked up when a directory is given.
# Files named explicitly on the command line are always attempted.
extensions = ["jpg", "jpeg", "png", "webp", "bmp", "gif"]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = ToolConfig::default();
        assert_eq!(config.trim.margin, 10);
        assert!(config.manipulate.skip_same);
        assert_eq!(
            config.files.extensions,
            vec!["jpg", "jpeg", "png", "webp", "bmp", "gif"]
        );
    }

    #[test]
    fn parse_partial_config() {
        let config: ToolConfig = toml::from_str("[trim]\nmargin = 3\n").unwrap();
        assert_eq!(config.trim.margin, 3);
        // Defaults preserved
        assert!(config.manipulate.skip_same);
        assert_eq!(config.files.extensions.len(), 6);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
[manipulate]
skip_same = false

[files]
extensions = ["png"]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.manipulate.skip_same);
        assert_eq!(config.files.extensions, vec!["png"]);
        assert_eq!(config.trim.margin, 10);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[trim\nmargin = ").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_rejects_negative_margin() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[trim]\nmargin = -4\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("margin = 10").unwrap();
        let overlay: toml::Value = toml::from_str("margin = 4").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("margin").unwrap().as_integer(), Some(4));
    }

    #[test]
    fn merge_toml_table_merge_preserves_base_keys() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[trim]\nmargin = 0\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(
            merged.get("trim").unwrap().get("margin").unwrap().as_integer(),
            Some(0)
        );
        assert_eq!(
            merged
                .get("manipulate")
                .unwrap()
                .get("skip_same")
                .unwrap()
                .as_bool(),
            Some(true)
        );
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[files]\nextensions = [\"gif\"]\n").unwrap();
        let merged = merge_toml(base, overlay);
        let exts = merged
            .get("files")
            .unwrap()
            .get("extensions")
            .unwrap()
            .as_array()
            .unwrap();
        assert_eq!(exts.len(), 1);
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<ToolConfig, _> = toml::from_str("[trim]\nmargn = 5\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<ToolConfig, _> = toml::from_str("[extend]\nscale = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[manipulate]\nskip = true\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(ToolConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_extensions() {
        let mut config = ToolConfig::default();
        config.files.extensions.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_dotted_extension() {
        let mut config = ToolConfig::default();
        config.files.extensions = vec![".png".into()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("\".png\""));
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[files]\nextensions = []\n").unwrap();
        let result = resolve_config(base, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: ToolConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[trim]"));
        assert!(content.contains("[manipulate]"));
        assert!(content.contains("[files]"));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        assert!(val.get("trim").is_some());
        assert!(val.get("manipulate").is_some());
        assert!(val.get("files").is_some());
    }
}

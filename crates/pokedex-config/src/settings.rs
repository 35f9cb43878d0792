use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use pokedex_core::view::{Capitalization, KeyPolicy, RenderOptions};
use serde::{Deserialize, Serialize};

/// Upper bound for `ui.recent_log_lines`; the footer never grows past this.
const MAX_RECENT_LOG_LINES: usize = 10;

/// Top-level schema loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PokedexConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// How records are turned into view trees.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default)]
    pub capitalization: Capitalization,
    #[serde(default)]
    pub type_keys: KeyPolicy,
}

/// Terminal chrome around the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_recent_log: bool,
    #[serde(default = "default_recent_log_lines")]
    pub recent_log_lines: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_recent_log: true,
            recent_log_lines: default_recent_log_lines(),
        }
    }
}

impl UiConfig {
    /// Number of log lines the footer shows; zero when the log is hidden.
    pub fn footer_capacity(&self) -> usize {
        if self.show_recent_log {
            self.recent_log_lines
        } else {
            0
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_recent_log_lines() -> usize {
    2
}

impl PokedexConfig {
    /// Parse and validate config TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;

        Self::from_toml_str(&raw).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Load from an explicit path, or from [`config_path`] if one exists,
    /// falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        match config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.ui.recent_log_lines > MAX_RECENT_LOG_LINES {
            bail!(
                "ui.recent_log_lines must be at most {MAX_RECENT_LOG_LINES}, got {}",
                self.ui.recent_log_lines
            );
        }
        Ok(())
    }

    /// Options handed to the display component.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            capitalization: self.display.capitalization,
            type_keys: self.display.type_keys,
        }
    }
}

/// Return the config file path, if one can be determined.
///
/// Precedence: `POKEDEX_CONFIG` env var > `<config_dir>/pokedex/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("POKEDEX_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("pokedex").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const FULL_CONFIG: &str = r#"
[display]
capitalization = "first"
type_keys = "name"

[ui]
show_recent_log = false
recent_log_lines = 4
"#;

    #[test]
    fn parses_full_config() {
        let config = PokedexConfig::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(config.display.capitalization, Capitalization::First);
        assert_eq!(config.display.type_keys, KeyPolicy::Name);
        assert!(!config.ui.show_recent_log);
        assert_eq!(config.ui.recent_log_lines, 4);
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = PokedexConfig::from_toml_str("").unwrap();
        assert_eq!(config, PokedexConfig::default());
        assert_eq!(config.render_options(), RenderOptions::default());
        assert!(config.ui.show_recent_log);
        assert_eq!(config.ui.recent_log_lines, 2);
    }

    #[test]
    fn partial_section_fills_defaults() {
        let config = PokedexConfig::from_toml_str("[ui]\nrecent_log_lines = 0\n").unwrap();
        assert!(config.ui.show_recent_log);
        assert_eq!(config.ui.recent_log_lines, 0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = PokedexConfig::from_toml_str("[display]\ncolour = \"red\"\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("failed to parse config TOML"));
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let raw = FULL_CONFIG.replace("\"first\"", "\"shout\"");
        assert!(PokedexConfig::from_toml_str(&raw).is_err());
    }

    #[test]
    fn too_many_log_lines_is_rejected() {
        let err = PokedexConfig::from_toml_str("[ui]\nrecent_log_lines = 50\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("ui.recent_log_lines must be at most"));
    }

    #[test]
    fn footer_capacity_follows_ui_section() {
        assert_eq!(UiConfig::default().footer_capacity(), 2);

        let hidden = PokedexConfig::from_toml_str(FULL_CONFIG).unwrap();
        assert_eq!(hidden.ui.footer_capacity(), 0);

        let max = PokedexConfig::from_toml_str("[ui]\nrecent_log_lines = 10\n").unwrap();
        assert_eq!(max.ui.footer_capacity(), MAX_RECENT_LOG_LINES);
    }

    #[test]
    fn render_options_follow_display_section() {
        let config = PokedexConfig::from_toml_str(FULL_CONFIG).unwrap();
        let opts = config.render_options();
        assert_eq!(opts.capitalization, Capitalization::First);
        assert_eq!(opts.type_keys, KeyPolicy::Name);
    }

    #[test]
    fn load_explicit_path_reports_missing_file() {
        let path = std::env::temp_dir().join("pokedex-test-missing-config.toml");
        let _ = std::fs::remove_file(&path);
        let err = PokedexConfig::load(Some(&path)).unwrap_err().to_string();
        assert!(err.contains("failed to read config"));
    }

    #[test]
    fn load_without_file_falls_back_to_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let original = std::env::var("POKEDEX_CONFIG").ok();

        let missing = std::env::temp_dir().join("pokedex-test-no-such-config.toml");
        let _ = std::fs::remove_file(&missing);
        unsafe { std::env::set_var("POKEDEX_CONFIG", &missing) };
        assert_eq!(config_path(), Some(missing));
        assert_eq!(PokedexConfig::load(None).unwrap(), PokedexConfig::default());

        match original {
            Some(v) => unsafe { std::env::set_var("POKEDEX_CONFIG", v) },
            None => unsafe { std::env::remove_var("POKEDEX_CONFIG") },
        }
    }
}

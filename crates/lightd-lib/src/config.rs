//! Service configuration — TOML-based sysfs node paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# lightd configuration — sysfs node paths for the backlight and indicator LED.\n\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backlight brightness control node (write-only, plain integer text).
    #[serde(default = "default_backlight_path")]
    pub backlight_path: String,

    /// Backlight maximum-brightness capability node (read once at start-up).
    #[serde(default = "default_backlight_max_path")]
    pub backlight_max_path: String,

    /// Indicator LED blink control node (write-only, 0 = off, 10 = blink).
    #[serde(default = "default_led_blink_path")]
    pub led_blink_path: String,
}

fn default_backlight_path() -> String {
    "/sys/class/backlight/panel0-backlight/brightness".into()
}
fn default_backlight_max_path() -> String {
    "/sys/class/backlight/panel0-backlight/max_brightness".into()
}
fn default_led_blink_path() -> String {
    "/sys/class/leds/mx_led/blink".into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backlight_path: default_backlight_path(),
            backlight_max_path: default_backlight_max_path(),
            led_blink_path: default_led_blink_path(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A node path is empty or whitespace-only (`field` names it).
    EmptyPath { field: &'static str },
    /// A node path is not absolute (`field` names it).
    RelativePath { field: &'static str, path: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyPath { field } => write!(f, "{field} cannot be empty"),
            ValidationError::RelativePath { field, path } => {
                write!(f, "{field} must be an absolute path, got \"{path}\"")
            }
        }
    }
}

impl Config {
    /// Platform config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lightd"))
    }

    /// Full path to the config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended to document what the file controls.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Save config to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        for (field, value) in [
            ("backlight_path", &self.backlight_path),
            ("backlight_max_path", &self.backlight_max_path),
            ("led_blink_path", &self.led_blink_path),
        ] {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                errors.push(ValidationError::EmptyPath { field });
            } else if !Path::new(trimmed).is_absolute() {
                errors.push(ValidationError::RelativePath {
                    field,
                    path: value.clone(),
                });
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

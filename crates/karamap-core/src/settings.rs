// Karamap Settings Module
// Profile target, resolver behavior and temporal rules loaded from TOML

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::combo::{EventOptions, Target};
use crate::config::{parse_combo_string, ComboParseError};
use crate::mapping::RemapRule;

/// Karabiner profile the generated rule is written into unless overridden
pub const DEFAULT_PROFILE_NAME: &str = "Basic Profile for Lenovo Trackpoint Keyboard 2 by Kamome283";

/// Description of the single complex-modification rule that holds every manipulator
pub const DEFAULT_RULE_DESCRIPTION: &str = "Key mapping";

/// Settings for karamap
///
/// Loaded from a TOML file (default: ~/.config/karamap/settings.toml). A
/// missing file means every default applies.
#[derive(Debug, Clone)]
pub struct Settings {
    profile_name: String,
    rule_description: String,
    karabiner_json: Option<PathBuf>,
    lazy_when_tap_and_hold: bool,
    temporal: Vec<RemapRule>,
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("invalid temporal rule #{index} ({field} = \"{value}\"): {source}")]
    InvalidCombo {
        index: usize,
        field: &'static str,
        value: String,
        source: ComboParseError,
    },

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    profile: Option<ProfileSettings>,

    #[serde(default)]
    behavior: Option<BehaviorSettings>,

    #[serde(default)]
    temporal: Vec<TemporalToml>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ProfileSettings {
    name: Option<String>,
    description: Option<String>,
    karabiner_json: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct BehaviorSettings {
    lazy_when_tap_and_hold: Option<bool>,
}

/// One `[[temporal]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemporalToml {
    from: String,
    to: String,
    alone: Option<String>,
    lazy: Option<bool>,
}

impl TemporalToml {
    fn to_rule(&self, index: usize) -> Result<RemapRule, SettingsError> {
        let parse = |field: &'static str, value: &str| {
            parse_combo_string(value)
                .map(|parsed| parsed.into_combo())
                .map_err(|source| SettingsError::InvalidCombo {
                    index,
                    field,
                    value: value.to_string(),
                    source,
                })
        };

        let source = parse("from", &self.from)?;
        let target = parse("to", &self.to)?;
        let alone = match &self.alone {
            Some(alone) => Some(Target::new(parse("alone", alone)?)),
            None => None,
        };
        let options = EventOptions {
            lazy: self.lazy,
            ..EventOptions::default()
        };

        Ok(RemapRule::new(source, target)
            .with_target_options(options)
            .with_target_if_alone(alone))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with every default applied
    pub fn new() -> Self {
        Self {
            profile_name: DEFAULT_PROFILE_NAME.to_string(),
            rule_description: DEFAULT_RULE_DESCRIPTION.to_string(),
            karabiner_json: None,
            lazy_when_tap_and_hold: true,
            temporal: Vec::new(),
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(profile) = toml_settings.profile {
            if let Some(name) = profile.name {
                if name.trim().is_empty() {
                    return Err(SettingsError::InvalidValue(
                        "profile.name cannot be empty".to_string(),
                    ));
                }
                settings.profile_name = name;
            }
            if let Some(description) = profile.description {
                settings.rule_description = description;
            }
            settings.karabiner_json = profile.karabiner_json.map(|p| expand_home(&p));
        }

        if let Some(behavior) = toml_settings.behavior {
            if let Some(lazy) = behavior.lazy_when_tap_and_hold {
                settings.lazy_when_tap_and_hold = lazy;
            }
        }

        settings.temporal = toml_settings
            .temporal
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_rule(index))
            .collect::<Result<_, _>>()?;

        Ok(settings)
    }

    /// Get the default settings path (~/.config/karamap/settings.toml on every platform)
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(".config")
                .join("karamap")
                .join("settings.toml")
        })
    }

    /// Load from default location (~/.config/karamap/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
            log::debug!("no settings at {}, using defaults", path.display());
        }
        Ok(Self::new())
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn set_profile_name(&mut self, name: impl Into<String>) {
        self.profile_name = name.into();
    }

    pub fn rule_description(&self) -> &str {
        &self.rule_description
    }

    /// Explicit karabiner.json location, if configured
    pub fn karabiner_json(&self) -> Option<&Path> {
        self.karabiner_json.as_deref()
    }

    pub fn set_karabiner_json(&mut self, path: impl Into<PathBuf>) {
        self.karabiner_json = Some(path.into());
    }

    pub fn lazy_when_tap_and_hold(&self) -> bool {
        self.lazy_when_tap_and_hold
    }

    /// User rules appended after the built-in table
    pub fn temporal_rules(&self) -> &[RemapRule] {
        &self.temporal
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

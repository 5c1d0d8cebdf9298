// Karamap Config - Combo String Parser
// Parses combo strings like "Shift-hyphen" into structured components

use crate::combo::Combo;
use crate::key::key_from_name;
use crate::modifier::ModifierKey;
use crate::KeyCode;

/// Result of parsing a combo string
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCombo {
    /// The modifiers parsed from the string (in order, deduplicated)
    pub modifiers: Vec<ModifierKey>,
    /// The key (the last component after hyphens)
    pub key: KeyCode,
}

impl ParsedCombo {
    pub fn into_combo(self) -> Combo {
        Combo::new(self.modifiers, self.key)
    }
}

/// Errors that can occur during combo parsing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComboParseError {
    /// Empty input string
    #[error("combo string cannot be empty")]
    EmptyInput,
    /// Key name not recognized
    #[error("unknown key name: '{0}'")]
    UnknownKey(String),
    /// Modifier alias not recognized
    #[error("unknown modifier: '{0}'")]
    UnknownModifier(String),
    /// Input ends with hyphen (e.g., "Shift-")
    #[error("combo string cannot end with hyphen")]
    TrailingHyphen,
}

/// Parse a combo string like "Shift-hyphen" into modifiers and key
///
/// Modifiers accept Karabiner names (`left_shift`) and short aliases
/// (`LShift`, `Cmd`); the key is a Karabiner key code name.
///
/// # Examples
/// ```
/// use karamap_core::config::parse_combo_string;
/// use karamap_core::KeyCode;
/// let parsed = parse_combo_string("Shift-hyphen").unwrap();
/// assert_eq!(parsed.modifiers.len(), 1);
/// assert_eq!(parsed.key, KeyCode::Hyphen);
/// ```
pub fn parse_combo_string(exp: &str) -> Result<ParsedCombo, ComboParseError> {
    let trimmed = exp.trim();
    if trimmed.is_empty() {
        return Err(ComboParseError::EmptyInput);
    }

    if trimmed.ends_with('-') {
        return Err(ComboParseError::TrailingHyphen);
    }

    let mut parts: Vec<&str> = trimmed.split('-').collect();

    // The last part is always the key
    let key_str = parts.pop().ok_or(ComboParseError::EmptyInput)?;
    let key = key_from_name(key_str).map_err(|_| ComboParseError::UnknownKey(key_str.to_string()))?;

    let mut modifiers = Vec::new();
    for modifier_str in parts {
        let modifier = ModifierKey::from_alias(modifier_str)
            .ok_or_else(|| ComboParseError::UnknownModifier(modifier_str.to_string()))?;
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
    }

    Ok(ParsedCombo { modifiers, key })
}

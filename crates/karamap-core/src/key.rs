// Karamap Key Type
// Represents a single Karabiner-Elements key_code name

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A physical or synthesized key, named the way Karabiner-Elements names it.
///
/// The string form (`Display` / `FromStr`) is the exact `key_code` value used
/// in `karabiner.json`, e.g. `japanese_pc_nfer` or `grave_accent_and_tilde`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    #[strum(serialize = "1")]
    Num1,
    #[strum(serialize = "2")]
    Num2,
    #[strum(serialize = "3")]
    Num3,
    #[strum(serialize = "4")]
    Num4,
    #[strum(serialize = "5")]
    Num5,
    #[strum(serialize = "6")]
    Num6,
    #[strum(serialize = "7")]
    Num7,
    #[strum(serialize = "8")]
    Num8,
    #[strum(serialize = "9")]
    Num9,
    #[strum(serialize = "0")]
    Num0,
    ReturnOrEnter,
    Escape,
    DeleteOrBackspace,
    DeleteForward,
    Tab,
    Spacebar,
    Hyphen,
    EqualSign,
    OpenBracket,
    CloseBracket,
    Backslash,
    NonUsPound,
    Semicolon,
    Quote,
    GraveAccentAndTilde,
    Comma,
    Period,
    Slash,
    NonUsBackslash,
    CapsLock,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    PrintScreen,
    ScrollLock,
    Pause,
    Insert,
    Home,
    PageUp,
    End,
    PageDown,
    RightArrow,
    LeftArrow,
    DownArrow,
    UpArrow,
    KeypadNumLock,
    KeypadSlash,
    KeypadAsterisk,
    KeypadHyphen,
    KeypadPlus,
    KeypadEnter,
    #[strum(serialize = "keypad_1")]
    Keypad1,
    #[strum(serialize = "keypad_2")]
    Keypad2,
    #[strum(serialize = "keypad_3")]
    Keypad3,
    #[strum(serialize = "keypad_4")]
    Keypad4,
    #[strum(serialize = "keypad_5")]
    Keypad5,
    #[strum(serialize = "keypad_6")]
    Keypad6,
    #[strum(serialize = "keypad_7")]
    Keypad7,
    #[strum(serialize = "keypad_8")]
    Keypad8,
    #[strum(serialize = "keypad_9")]
    Keypad9,
    #[strum(serialize = "keypad_0")]
    Keypad0,
    KeypadPeriod,
    KeypadEqualSign,
    KeypadComma,
    Application,
    International1,
    International2,
    International3,
    International4,
    International5,
    Lang1,
    Lang2,
    JapaneseEisuu,
    JapaneseKana,
    JapanesePcNfer,
    JapanesePcXfer,
    JapanesePcKatakana,
    LeftControl,
    LeftShift,
    LeftOption,
    LeftCommand,
    RightControl,
    RightShift,
    RightOption,
    RightCommand,
    #[strum(serialize = "fn")]
    Function,
    VolumeIncrement,
    VolumeDecrement,
    Mute,
    DisplayBrightnessIncrement,
    DisplayBrightnessDecrement,
}

/// Error returned when a name is not a recognized key code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: '{0}'")]
pub struct KeyCodeError(pub String);

impl KeyCode {
    /// The Karabiner `key_code` string
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether this key is itself a modifier key (usable as a hold target)
    pub fn is_modifier_key(self) -> bool {
        matches!(
            self,
            KeyCode::LeftControl
                | KeyCode::LeftShift
                | KeyCode::LeftOption
                | KeyCode::LeftCommand
                | KeyCode::RightControl
                | KeyCode::RightShift
                | KeyCode::RightOption
                | KeyCode::RightCommand
                | KeyCode::Function
        )
    }
}

/// Parse a key name to a key code.
///
/// Accepts the Karabiner name in any ASCII case (`Spacebar`, `SPACEBAR`).
pub fn key_from_name(name: &str) -> Result<KeyCode, KeyCodeError> {
    let lower = name.trim().to_ascii_lowercase();
    KeyCode::from_str(&lower).map_err(|_| KeyCodeError(name.to_string()))
}

impl Serialize for KeyCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for KeyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        key_from_name(&name).map_err(serde::de::Error::custom)
    }
}

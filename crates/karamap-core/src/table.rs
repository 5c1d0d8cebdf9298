// Karamap Rule Table
// Built-in remaps for a Lenovo TrackPoint Keyboard II with a JIS layout
//
// The host is configured for the JIS layout, so the targets below are the
// keys that produce the wanted glyph under JIS, not under US.

use crate::combo::Combo;
use crate::mapping::RemapRule;
use crate::modifier::Modifier;
use crate::KeyCode;

fn bare(key: KeyCode) -> Combo {
    Combo::key_only(key)
}

fn shifted(key: KeyCode) -> Combo {
    Combo::from_single(Modifier::Shift, key)
}

/// Symbol placement: move JIS symbols to where a US typist expects them
pub fn symbol_rules() -> Vec<RemapRule> {
    use KeyCode::*;

    vec![
        // Number row
        RemapRule::new(bare(GraveAccentAndTilde), bare(EqualSign)), // ^
        RemapRule::new(shifted(GraveAccentAndTilde), shifted(EqualSign)), // ~
        RemapRule::new(shifted(Num2), shifted(Semicolon)),          // +
        RemapRule::new(shifted(Num0), shifted(International3)),     // |
        // Top row
        RemapRule::new(bare(OpenBracket), bare(CloseBracket)), // [
        RemapRule::new(shifted(OpenBracket), shifted(CloseBracket)), // {
        RemapRule::new(bare(CloseBracket), bare(NonUsPound)),  // ]
        RemapRule::new(shifted(CloseBracket), shifted(NonUsPound)), // }
        // Home row
        RemapRule::new(bare(CapsLock), bare(Hyphen)),               // -
        RemapRule::new(shifted(CapsLock), shifted(Hyphen)),         // =
        RemapRule::new(shifted(Semicolon), shifted(Num2)),          // "
        RemapRule::new(bare(NonUsPound), bare(OpenBracket)),        // @
        RemapRule::new(shifted(NonUsPound), shifted(OpenBracket)),  // `
        // Bottom row
        RemapRule::new(bare(LeftShift), bare(DeleteOrBackspace)),
        RemapRule::new(
            shifted(International1),
            Combo::from_single(Modifier::Option, International3),
        ), // \
    ]
}

/// Thumb-cluster keys: hold for a modifier, tap for a key
pub fn modifier_rules() -> Vec<RemapRule> {
    use KeyCode::*;

    vec![
        RemapRule::tap_hold(bare(Spacebar), bare(LeftShift), bare(Spacebar)),
        RemapRule::tap_hold(bare(JapanesePcNfer), bare(LeftCommand), bare(Escape)),
        RemapRule::tap_hold(bare(JapanesePcXfer), bare(RightCommand), bare(ReturnOrEnter)),
        RemapRule::tap_hold(bare(LeftOption), bare(LeftOption), bare(JapaneseEisuu)),
        RemapRule::tap_hold(bare(JapanesePcKatakana), bare(RightOption), bare(JapaneseKana)),
    ]
}

/// Scratch rules kept while a layout change is in progress. Empty unless
/// supplied through settings.
pub fn temporal_rules() -> Vec<RemapRule> {
    Vec::new()
}

/// The full built-in table in declaration order
pub fn default_rules() -> Vec<RemapRule> {
    let mut rules = symbol_rules();
    rules.extend(modifier_rules());
    rules.extend(temporal_rules());
    rules
}

// Karamap Combo Type
// Represents a key combination with modifiers

use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::modifier::{ModifierKey, ModifierSet};
use crate::KeyCode;

/// Modifier list of a combo; rules never carry more than four
pub type Modifiers = SmallVec<[ModifierKey; 4]>;

/// Represents a key together with an ordered list of modifiers.
///
/// On the source side the modifiers are the ones that must be held for a
/// rule to fire; on the target side they are synthesized with the key.
#[derive(Debug, Clone)]
pub struct Combo {
    modifiers: Modifiers,
    key: KeyCode,
}

impl Combo {
    /// Create a new Combo from modifiers and a key
    pub fn new(modifiers: impl IntoIterator<Item = ModifierKey>, key: KeyCode) -> Self {
        let mut deduped = Modifiers::new();
        for modifier in modifiers {
            if !deduped.contains(&modifier) {
                deduped.push(modifier);
            }
        }
        Self {
            modifiers: deduped,
            key,
        }
    }

    /// A bare key with no modifiers
    pub fn key_only(key: KeyCode) -> Self {
        Self {
            modifiers: Modifiers::new(),
            key,
        }
    }

    /// Create a Combo from a single modifier and key
    pub fn from_single(modifier: impl Into<ModifierKey>, key: KeyCode) -> Self {
        Self::new([modifier.into()], key)
    }

    pub fn modifiers(&self) -> &[ModifierKey] {
        &self.modifiers
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }

    /// Generic modifiers of this combo, sides ignored
    pub fn modifier_set(&self) -> ModifierSet {
        ModifierSet::from_keys(&self.modifiers)
    }
}

impl PartialEq for Combo {
    fn eq(&self, other: &Self) -> bool {
        // Order-independent: modifiers are deduplicated on construction
        self.key == other.key
            && self.modifiers.len() == other.modifiers.len()
            && self.modifiers.iter().all(|m| other.modifiers.contains(m))
    }
}

impl Eq for Combo {}

impl Hash for Combo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sorted = self.modifiers.clone();
        sorted.sort();
        sorted.hash(state);
        self.key.hash(state);
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}-", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

/// Per-event flags Karabiner accepts on a `to` event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventOptions {
    /// Synthesized modifier is held back until another key is pressed
    pub lazy: Option<bool>,
    pub repeat: Option<bool>,
    pub halt: Option<bool>,
    pub hold_down_milliseconds: Option<u32>,
}

impl EventOptions {
    pub fn lazy() -> Self {
        Self {
            lazy: Some(true),
            ..Self::default()
        }
    }

    /// Copy of these options with `lazy` forced on
    pub fn with_lazy(self) -> Self {
        Self {
            lazy: Some(true),
            ..self
        }
    }
}

/// Output side of a rule: the combo to synthesize plus event flags
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub combo: Combo,
    pub options: EventOptions,
}

impl Target {
    pub fn new(combo: Combo) -> Self {
        Self {
            combo,
            options: EventOptions::default(),
        }
    }

    pub fn with_options(combo: Combo, options: EventOptions) -> Self {
        Self { combo, options }
    }

    pub fn key(&self) -> KeyCode {
        self.combo.key()
    }

    /// Copy of this target with the lazy flag set
    pub fn lazied(&self) -> Self {
        Self {
            combo: self.combo.clone(),
            options: self.options.with_lazy(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.combo)?;
        if self.options.lazy == Some(true) {
            write!(f, " (lazy)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::Modifier;

    #[test]
    fn test_combo_equality_order_independent() {
        let a = Combo::new(
            [
                ModifierKey::either(Modifier::Shift),
                ModifierKey::left(Modifier::Option),
            ],
            KeyCode::Hyphen,
        );
        let b = Combo::new(
            [
                ModifierKey::left(Modifier::Option),
                ModifierKey::either(Modifier::Shift),
            ],
            KeyCode::Hyphen,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_combo_deduplicates_modifiers() {
        let combo = Combo::new(
            [
                ModifierKey::either(Modifier::Shift),
                ModifierKey::either(Modifier::Shift),
            ],
            KeyCode::Num2,
        );
        assert_eq!(combo.modifiers().len(), 1);
    }

    #[test]
    fn test_combo_display() {
        let combo = Combo::from_single(Modifier::Shift, KeyCode::Hyphen);
        assert_eq!(combo.to_string(), "shift-hyphen");
        assert_eq!(Combo::key_only(KeyCode::Spacebar).to_string(), "spacebar");
    }

    #[test]
    fn test_combo_hashable() {
        use std::collections::HashMap;
        let combo1 = Combo::from_single(Modifier::Control, KeyCode::A);
        let combo2 = Combo::from_single(Modifier::Control, KeyCode::A);

        let mut map: HashMap<Combo, &str> = HashMap::new();
        map.insert(combo1, "value");
        assert_eq!(map.get(&combo2), Some(&"value"));
    }

    #[test]
    fn test_target_lazied_keeps_other_options() {
        let target = Target::with_options(
            Combo::key_only(KeyCode::LeftShift),
            EventOptions {
                repeat: Some(false),
                ..EventOptions::default()
            },
        );
        let lazied = target.lazied();
        assert_eq!(lazied.options.lazy, Some(true));
        assert_eq!(lazied.options.repeat, Some(false));
        assert_eq!(target.options.lazy, None);
    }
}

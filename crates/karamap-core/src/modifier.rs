// Karamap Modifier System
// The fixed four-modifier alphabet (shift, option, control, command)

use std::fmt;

use bitflags::bitflags;
use serde::{Serialize, Serializer};

/// One of the four modifiers Karabiner matches on.
///
/// Declaration order is the canonical order used everywhere a modifier list
/// is emitted: shift, option, control, command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Shift,
    Option,
    Control,
    Command,
}

impl Modifier {
    /// Every modifier, in canonical order
    pub const ALL: [Modifier; 4] = [
        Modifier::Shift,
        Modifier::Option,
        Modifier::Control,
        Modifier::Command,
    ];

    /// Position in [`Modifier::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Generic Karabiner name (matches either side)
    pub fn name(self) -> &'static str {
        match self {
            Modifier::Shift => "shift",
            Modifier::Option => "option",
            Modifier::Control => "control",
            Modifier::Command => "command",
        }
    }

    /// Single-bit set for this modifier
    pub fn flag(self) -> ModifierSet {
        match self {
            Modifier::Shift => ModifierSet::SHIFT,
            Modifier::Option => ModifierSet::OPTION,
            Modifier::Control => ModifierSet::CONTROL,
            Modifier::Command => ModifierSet::COMMAND,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which physical side a modifier is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Side {
    #[default]
    Either,
    Left,
    Right,
}

/// A modifier as written in a rule: the generic modifier plus an optional side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModifierKey {
    pub modifier: Modifier,
    pub side: Side,
}

impl ModifierKey {
    pub const fn new(modifier: Modifier, side: Side) -> Self {
        Self { modifier, side }
    }

    /// Generic modifier, matching either side
    pub const fn either(modifier: Modifier) -> Self {
        Self::new(modifier, Side::Either)
    }

    pub const fn left(modifier: Modifier) -> Self {
        Self::new(modifier, Side::Left)
    }

    pub const fn right(modifier: Modifier) -> Self {
        Self::new(modifier, Side::Right)
    }

    /// Karabiner modifier name (`shift`, `left_shift`, `right_command`, ...)
    pub fn name(&self) -> &'static str {
        match (self.side, self.modifier) {
            (Side::Either, m) => m.name(),
            (Side::Left, Modifier::Shift) => "left_shift",
            (Side::Left, Modifier::Option) => "left_option",
            (Side::Left, Modifier::Control) => "left_control",
            (Side::Left, Modifier::Command) => "left_command",
            (Side::Right, Modifier::Shift) => "right_shift",
            (Side::Right, Modifier::Option) => "right_option",
            (Side::Right, Modifier::Control) => "right_control",
            (Side::Right, Modifier::Command) => "right_command",
        }
    }

    /// Look up a modifier by its Karabiner name
    pub fn from_name(name: &str) -> Option<ModifierKey> {
        let (side, rest) = if let Some(rest) = name.strip_prefix("left_") {
            (Side::Left, rest)
        } else if let Some(rest) = name.strip_prefix("right_") {
            (Side::Right, rest)
        } else {
            (Side::Either, name)
        };
        let modifier = Modifier::ALL.into_iter().find(|m| m.name() == rest)?;
        Some(ModifierKey::new(modifier, side))
    }

    /// Look up a modifier by Karabiner name or by a short alias.
    ///
    /// Aliases are case-sensitive: `Cmd`, `LShift`, `ROpt`, `Ctrl`, `Alt`.
    pub fn from_alias(alias: &str) -> Option<ModifierKey> {
        if let Some(m) = Self::from_name(alias) {
            return Some(m);
        }
        let (side, rest) = if alias.len() > 1 && alias.starts_with('L') {
            (Side::Left, &alias[1..])
        } else if alias.len() > 1 && alias.starts_with('R') {
            (Side::Right, &alias[1..])
        } else {
            (Side::Either, alias)
        };
        let modifier = match rest {
            "Shift" => Modifier::Shift,
            "Opt" | "Option" | "Alt" => Modifier::Option,
            "Ctrl" | "Control" => Modifier::Control,
            "Cmd" | "Command" | "Meta" | "Super" | "Win" => Modifier::Command,
            _ => return None,
        };
        Some(ModifierKey::new(modifier, side))
    }
}

impl From<Modifier> for ModifierKey {
    fn from(modifier: Modifier) -> Self {
        ModifierKey::either(modifier)
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ModifierKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

bitflags! {
    /// A concrete set of held modifiers, sides ignored
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ModifierSet: u8 {
        const SHIFT = 1 << 0;
        const OPTION = 1 << 1;
        const CONTROL = 1 << 2;
        const COMMAND = 1 << 3;
    }
}

impl ModifierSet {
    /// Collect the generic modifiers of the given keys
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a ModifierKey>) -> Self {
        keys.into_iter()
            .fold(ModifierSet::empty(), |acc, key| acc | key.modifier.flag())
    }

    pub fn contains_modifier(self, modifier: Modifier) -> bool {
        self.contains(modifier.flag())
    }

    /// Members in canonical order
    pub fn modifiers(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL
            .into_iter()
            .filter(move |m| self.contains_modifier(*m))
    }

    /// All sixteen concrete combinations, empty set first
    pub fn combinations() -> impl Iterator<Item = ModifierSet> {
        (0..16u8).map(ModifierSet::from_bits_truncate)
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let parts: Vec<&str> = self.modifiers().map(Modifier::name).collect();
        f.write_str(&parts.join("+"))
    }
}

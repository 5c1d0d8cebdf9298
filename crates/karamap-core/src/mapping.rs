// Karamap Mapping Structures
// RemapRule: one declared source -> target remap

use std::fmt;

use crate::combo::{Combo, EventOptions, Target};
use crate::modifier::ModifierSet;
use crate::KeyCode;

/// A single remap declaration.
///
/// `source` is the key that must be pressed together with its required
/// modifiers. `target` is emitted on press (or held, for modifier targets).
/// `target_if_alone` replaces `target` when the source key is pressed and
/// released without any other key in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapRule {
    source: Combo,
    target: Target,
    target_if_alone: Option<Target>,
}

impl RemapRule {
    /// Create a plain key-to-key remap
    pub fn new(source: Combo, target: Combo) -> Self {
        Self {
            source,
            target: Target::new(target),
            target_if_alone: None,
        }
    }

    /// Create a hold-as-modifier / tap-as-key remap
    pub fn tap_hold(source: Combo, hold: Combo, tap: Combo) -> Self {
        Self {
            source,
            target: Target::new(hold),
            target_if_alone: Some(Target::new(tap)),
        }
    }

    /// Set the event options of the main target
    pub fn with_target_options(mut self, options: EventOptions) -> Self {
        self.target.options = options;
        self
    }

    /// Replace the tap-alone target
    pub fn with_target_if_alone(mut self, alone: Option<Target>) -> Self {
        self.target_if_alone = alone;
        self
    }

    pub fn source(&self) -> &Combo {
        &self.source
    }

    /// The physical key this rule matches
    pub fn source_key(&self) -> KeyCode {
        self.source.key()
    }

    /// Generic modifiers that must be held for this rule to fire
    pub fn required_modifiers(&self) -> ModifierSet {
        self.source.modifier_set()
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn target_if_alone(&self) -> Option<&Target> {
        self.target_if_alone.as_ref()
    }

    /// Check if this rule distinguishes tapping from holding
    pub fn is_tap_hold(&self) -> bool {
        self.target_if_alone.is_some()
    }
}

impl fmt::Display for RemapRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)?;
        if let Some(alone) = &self.target_if_alone {
            write!(f, " [alone: {}]", alone)?;
        }
        Ok(())
    }
}

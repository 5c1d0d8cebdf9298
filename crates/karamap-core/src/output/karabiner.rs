// Karamap Karabiner Models
// Serde shapes of Karabiner-Elements complex_modifications rules

use serde::Serialize;

use crate::combo::Target;
use crate::modifier::ModifierKey;
use crate::resolve::Directive;
use crate::KeyCode;

/// A complex-modification rule: a description and its manipulators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexRule {
    pub description: String,
    pub manipulators: Vec<Manipulator>,
}

impl ComplexRule {
    /// One manipulator per directive, order kept
    pub fn from_directives(description: impl Into<String>, directives: &[Directive]) -> Self {
        Self {
            description: description.into(),
            manipulators: directives.iter().map(Manipulator::from).collect(),
        }
    }
}

/// A `basic` manipulator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manipulator {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub from: FromEvent,
    pub to: Vec<ToEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_if_alone: Vec<ToEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FromEvent {
    pub key_code: KeyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<FromModifiers>,
}

/// Karabiner's `from.modifiers`: modifiers outside both lists must not be held
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FromModifiers {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<ModifierKey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<ModifierKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToEvent {
    pub key_code: KeyCode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<ModifierKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold_down_milliseconds: Option<u32>,
}

impl From<&Target> for ToEvent {
    fn from(target: &Target) -> Self {
        Self {
            key_code: target.key(),
            modifiers: target.combo.modifiers().to_vec(),
            lazy: target.options.lazy,
            repeat: target.options.repeat,
            halt: target.options.halt,
            hold_down_milliseconds: target.options.hold_down_milliseconds,
        }
    }
}

impl From<&Directive> for Manipulator {
    fn from(directive: &Directive) -> Self {
        let mandatory: Vec<ModifierKey> = directive.modifiers.required().collect();
        let optional: Vec<ModifierKey> = directive
            .modifiers
            .dont_care()
            .map(ModifierKey::either)
            .collect();
        let modifiers = if mandatory.is_empty() && optional.is_empty() {
            None
        } else {
            Some(FromModifiers {
                mandatory,
                optional,
            })
        };

        Self {
            kind: "basic",
            from: FromEvent {
                key_code: directive.source,
                modifiers,
            },
            to: vec![ToEvent::from(&directive.target)],
            to_if_alone: directive
                .target_if_alone
                .iter()
                .map(ToEvent::from)
                .collect(),
        }
    }
}

// Karamap Modifier-Conflict Resolver
// Expands declared rules into directives whose modifier conditions don't overlap

use indexmap::IndexMap;

use crate::combo::Target;
use crate::mapping::RemapRule;
use crate::modifier::{Modifier, ModifierKey, ModifierSet, Side};
use crate::KeyCode;

/// How a directive treats one modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierState {
    /// Must be held (optionally on a specific side)
    Required(Side),
    /// Must not be held
    Forbidden,
    /// Held or not, the directive still fires
    DontCare,
}

/// Tri-state condition over the four modifiers, indexed by [`Modifier::index`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierMatch {
    states: [ModifierState; 4],
}

impl ModifierMatch {
    /// Build the condition for a rule: its own modifiers are required, the
    /// `unclaimed` ones don't matter and everything else is forbidden.
    pub fn for_rule(required: &[ModifierKey], unclaimed: ModifierSet) -> Self {
        let mut states = [ModifierState::Forbidden; 4];
        for modifier in unclaimed.modifiers() {
            states[modifier.index()] = ModifierState::DontCare;
        }
        // First mention wins when a side-specific and a generic form collide
        for key in required.iter().rev() {
            states[key.modifier.index()] = ModifierState::Required(key.side);
        }
        Self { states }
    }

    pub fn state(&self, modifier: Modifier) -> ModifierState {
        self.states[modifier.index()]
    }

    /// Required modifiers with their sides, canonical order
    pub fn required(&self) -> impl Iterator<Item = ModifierKey> + '_ {
        Modifier::ALL
            .into_iter()
            .filter_map(move |m| match self.state(m) {
                ModifierState::Required(side) => Some(ModifierKey::new(m, side)),
                _ => None,
            })
    }

    /// Don't-care modifiers, canonical order
    pub fn dont_care(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL
            .into_iter()
            .filter(move |m| self.state(*m) == ModifierState::DontCare)
    }

    pub fn required_set(&self) -> ModifierSet {
        ModifierSet::from_keys(&self.required().collect::<Vec<_>>())
    }

    pub fn dont_care_set(&self) -> ModifierSet {
        self.dont_care()
            .fold(ModifierSet::empty(), |acc, m| acc | m.flag())
    }

    pub fn forbidden_set(&self) -> ModifierSet {
        ModifierSet::all() - self.required_set() - self.dont_care_set()
    }

    /// Whether a concrete set of held modifiers satisfies this condition.
    ///
    /// Sides are not modelled in `held`; a side-specific requirement is
    /// satisfied by either side.
    pub fn matches(&self, held: ModifierSet) -> bool {
        held.contains(self.required_set()) && (held & self.forbidden_set()).is_empty()
    }
}

/// One resolved output rule, ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub source: KeyCode,
    pub modifiers: ModifierMatch,
    pub target: Target,
    pub target_if_alone: Option<Target>,
}

impl Directive {
    pub fn matches(&self, held: ModifierSet) -> bool {
        self.modifiers.matches(held)
    }
}

/// Group rules by source key.
///
/// Keys appear in order of first declaration, rules within a key keep their
/// declaration order.
pub fn group_by_source(rules: &[RemapRule]) -> IndexMap<KeyCode, Vec<&RemapRule>> {
    let mut groups: IndexMap<KeyCode, Vec<&RemapRule>> = IndexMap::new();
    for rule in rules {
        groups.entry(rule.source_key()).or_default().push(rule);
    }
    groups
}

/// Turns a rule table into non-overlapping directives.
///
/// The complement of the claimed modifiers is computed once per source key.
/// With three or more distinct requirement sets on one key some combinations
/// end up matched by no directive; that case is not detected here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    lazy_when_tap_and_hold: bool,
}

impl Resolver {
    /// `lazy_when_tap_and_hold` marks the hold target of every tap/hold rule
    /// as lazy, so the modifier is only asserted once another key is pressed.
    pub fn new(lazy_when_tap_and_hold: bool) -> Self {
        Self {
            lazy_when_tap_and_hold,
        }
    }

    pub fn lazy_when_tap_and_hold(&self) -> bool {
        self.lazy_when_tap_and_hold
    }

    /// Resolve the whole table, one directive per rule
    pub fn resolve(&self, rules: &[RemapRule]) -> Vec<Directive> {
        let groups = group_by_source(rules);
        let mut directives = Vec::with_capacity(rules.len());
        for (key, group) in &groups {
            directives.extend(self.resolve_group(*key, group));
        }
        directives
    }

    fn resolve_group(&self, key: KeyCode, group: &[&RemapRule]) -> Vec<Directive> {
        let claimed = group
            .iter()
            .fold(ModifierSet::empty(), |acc, rule| acc | rule.required_modifiers());
        let unclaimed = ModifierSet::all() - claimed;

        log::debug!(
            "{}: {} rule(s), claimed {}, don't care {}",
            key,
            group.len(),
            claimed,
            unclaimed
        );

        group
            .iter()
            .map(|rule| {
                let target = match rule.target_if_alone() {
                    Some(_) if self.lazy_when_tap_and_hold => rule.target().lazied(),
                    _ => rule.target().clone(),
                };
                Directive {
                    source: key,
                    modifiers: ModifierMatch::for_rule(rule.source().modifiers(), unclaimed),
                    target,
                    target_if_alone: rule.target_if_alone().cloned(),
                }
            })
            .collect()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(true)
    }
}

// Karamap Coverage Analysis
// Checks resolved directives against every concrete modifier combination

use std::fmt;

use indexmap::IndexMap;

use super::resolver::Directive;
use crate::modifier::{Modifier, ModifierSet};
use crate::KeyCode;

/// How the directives of one source key cover the sixteen modifier combinations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCoverage {
    pub source: KeyCode,
    pub directives: usize,
    /// Combinations that satisfy some rule's requirement yet no directive
    /// fires on; the key passes through unmapped
    pub gaps: Vec<ModifierSet>,
    /// Combinations several directives fire on; the daemon picks one
    pub overlaps: Vec<ModifierSet>,
    /// Union of required and don't-care modifiers over all directives
    pub mentioned: ModifierSet,
}

impl KeyCoverage {
    /// Every combination some rule applies to is handled by exactly one
    /// directive
    pub fn is_consistent(&self) -> bool {
        self.gaps.is_empty() && self.overlaps.is_empty()
    }
}

/// Coverage of a whole directive list, keys in first-appearance order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageReport {
    keys: Vec<KeyCoverage>,
}

impl CoverageReport {
    pub fn keys(&self) -> &[KeyCoverage] {
        &self.keys
    }

    pub fn get(&self, source: KeyCode) -> Option<&KeyCoverage> {
        self.keys.iter().find(|k| k.source == source)
    }

    pub fn has_overlaps(&self) -> bool {
        self.keys.iter().any(|k| !k.overlaps.is_empty())
    }

    pub fn has_gaps(&self) -> bool {
        self.keys.iter().any(|k| !k.gaps.is_empty())
    }

    /// Keys with gaps or overlaps
    pub fn problems(&self) -> impl Iterator<Item = &KeyCoverage> {
        self.keys.iter().filter(|k| !k.is_consistent())
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.keys {
            let status = if key.is_consistent() { "ok" } else { "AMBIGUOUS" };
            writeln!(f, "{:<24} {} directive(s)  {}", key.source, key.directives, status)?;
            for gap in &key.gaps {
                writeln!(f, "    unhandled: {}", gap)?;
            }
            for overlap in &key.overlaps {
                writeln!(f, "    overlap:   {}", overlap)?;
            }
        }
        Ok(())
    }
}

/// Evaluate every directive of every source key against all combinations
pub fn analyze(directives: &[Directive]) -> CoverageReport {
    let mut groups: IndexMap<KeyCode, Vec<&Directive>> = IndexMap::new();
    for directive in directives {
        groups.entry(directive.source).or_default().push(directive);
    }

    let keys = groups
        .into_iter()
        .map(|(source, group)| {
            let mut gaps = Vec::new();
            let mut overlaps = Vec::new();
            for held in ModifierSet::combinations() {
                let applicable = group
                    .iter()
                    .any(|d| held.contains(d.modifiers.required_set()));
                match group.iter().filter(|d| d.matches(held)).count() {
                    0 if applicable => gaps.push(held),
                    0 | 1 => {}
                    _ => overlaps.push(held),
                }
            }
            let mentioned = group.iter().fold(ModifierSet::empty(), |acc, d| {
                acc | d.modifiers.required_set() | d.modifiers.dont_care_set()
            });
            KeyCoverage {
                source,
                directives: group.len(),
                gaps,
                overlaps,
                mentioned,
            }
        })
        .collect();

    CoverageReport { keys }
}

/// Modifiers the whole group leaves unmentioned (should be empty)
pub fn unmentioned(coverage: &KeyCoverage) -> Vec<Modifier> {
    (ModifierSet::all() - coverage.mentioned).modifiers().collect()
}

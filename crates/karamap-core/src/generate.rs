// Karamap Generation Pipeline
// Settings -> rule table -> directives -> Karabiner rule

use crate::mapping::RemapRule;
use crate::output::ComplexRule;
use crate::resolve::{Directive, Resolver};
use crate::settings::Settings;
use crate::table::default_rules;

/// Built-in table followed by the temporal rules from settings
pub fn rule_table(settings: &Settings) -> Vec<RemapRule> {
    let mut rules = default_rules();
    rules.extend(settings.temporal_rules().iter().cloned());
    rules
}

/// Resolve the full table with the configured lazy behavior
pub fn resolve_table(settings: &Settings) -> Vec<Directive> {
    let rules = rule_table(settings);
    let directives = Resolver::new(settings.lazy_when_tap_and_hold()).resolve(&rules);
    log::debug!(
        "resolved {} rule(s) into {} directive(s)",
        rules.len(),
        directives.len()
    );
    directives
}

/// The single complex-modification rule holding every manipulator
pub fn generate(settings: &Settings) -> ComplexRule {
    ComplexRule::from_directives(settings.rule_description(), &resolve_table(settings))
}

// Karamap Resolve
// Rule table -> non-overlapping directives, plus coverage diagnostics

pub mod coverage;
pub mod resolver;

pub use coverage::{analyze, CoverageReport, KeyCoverage};
pub use resolver::{group_by_source, Directive, ModifierMatch, ModifierState, Resolver};

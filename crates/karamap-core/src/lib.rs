// Karamap Core Library
// Rule table, modifier-conflict resolution and Karabiner-Elements output

pub mod combo;
pub mod config;
pub mod generate;
pub mod key;
pub mod mapping;
pub mod modifier;
pub mod output;
pub mod resolve;
pub mod settings;
pub mod table;

pub use combo::{Combo, EventOptions, Target};
pub use config::{parse_combo_string, ComboParseError, ParsedCombo};
pub use generate::{generate, resolve_table, rule_table};
pub use key::{key_from_name, KeyCode, KeyCodeError};
pub use mapping::RemapRule;
pub use modifier::{Modifier, ModifierKey, ModifierSet, Side};
pub use output::{
    default_karabiner_json_path, render_dry_run, write_to_profile, ComplexRule, Manipulator,
    ProfileError,
};
pub use resolve::{analyze, CoverageReport, Directive, ModifierMatch, ModifierState, Resolver};
pub use settings::{Settings, SettingsError};

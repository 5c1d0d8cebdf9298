// Karamap Config API
// Combo string parsing used by settings and tests

pub mod combo_parser;

pub use combo_parser::{parse_combo_string, ComboParseError, ParsedCombo};

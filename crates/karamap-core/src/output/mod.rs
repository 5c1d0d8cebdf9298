// Karamap Output Layer
// Karabiner JSON models and profile persistence

pub mod karabiner;
pub mod profile;

pub use karabiner::{ComplexRule, FromEvent, FromModifiers, Manipulator, ToEvent};
pub use profile::{default_karabiner_json_path, render_dry_run, write_to_profile, ProfileError};

// Karamap Profile Writer
// Merges generated rules into a named profile of karabiner.json

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use super::karabiner::ComplexRule;

/// Errors that can occur while writing a profile
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: &'static str },

    #[error("profile \"{0}\" not found; create it in Karabiner-Elements first")]
    ProfileNotFound(String),

    #[error("failed to serialize rules: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where Karabiner-Elements keeps its configuration (~/.config/karabiner/karabiner.json)
pub fn default_karabiner_json_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("karabiner")
            .join("karabiner.json")
    })
}

/// Replace the complex-modification rules of `profile_name` in `path`.
///
/// Every other field of the file is preserved. The profile must already
/// exist. The file is rewritten through a temp file and rename.
pub fn write_to_profile(
    path: &Path,
    profile_name: &str,
    rules: &[ComplexRule],
) -> Result<(), ProfileError> {
    let content = fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Value = serde_json::from_str(&content).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    merge_rules(&mut config, profile_name, rules).map_err(|err| match err {
        MergeError::Malformed(reason) => ProfileError::Malformed {
            path: path.to_path_buf(),
            reason,
        },
        MergeError::NotFound => ProfileError::ProfileNotFound(profile_name.to_string()),
        MergeError::Serialize(e) => ProfileError::Serialize(e),
    })?;

    let mut output = serde_json::to_string_pretty(&config)?;
    output.push('\n');
    atomic_write(path, &output)?;

    let manipulators: usize = rules.iter().map(|r| r.manipulators.len()).sum();
    log::info!(
        "wrote {} manipulator(s) to profile \"{}\" in {}",
        manipulators,
        profile_name,
        path.display()
    );
    Ok(())
}

/// Pretty JSON of what would be written, for `--dry-run`
pub fn render_dry_run(profile_name: &str, rules: &[ComplexRule]) -> Result<String, ProfileError> {
    let value = json!({
        "description": profile_name,
        "rules": serde_json::to_value(rules)?,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

enum MergeError {
    Malformed(&'static str),
    NotFound,
    Serialize(serde_json::Error),
}

fn merge_rules(
    config: &mut Value,
    profile_name: &str,
    rules: &[ComplexRule],
) -> Result<(), MergeError> {
    let profiles = config
        .get_mut("profiles")
        .and_then(Value::as_array_mut)
        .ok_or(MergeError::Malformed("missing \"profiles\" array"))?;

    let profile = profiles
        .iter_mut()
        .find(|p| p.get("name").and_then(Value::as_str) == Some(profile_name))
        .ok_or(MergeError::NotFound)?
        .as_object_mut()
        .ok_or(MergeError::Malformed("profile is not an object"))?;

    let modifications = profile
        .entry("complex_modifications")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or(MergeError::Malformed(
            "\"complex_modifications\" is not an object",
        ))?;

    let rules = serde_json::to_value(rules).map_err(MergeError::Serialize)?;
    modifications.insert("rules".to_string(), rules);
    Ok(())
}

/// Write to a sibling temp file, then rename over the target
fn atomic_write(path: &Path, content: &str) -> Result<(), ProfileError> {
    let temp_path = path.with_extension("json.tmp");

    fs::write(&temp_path, content).map_err(|source| ProfileError::Write {
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        ProfileError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rule() -> ComplexRule {
        ComplexRule {
            description: "Key mapping".to_string(),
            manipulators: Vec::new(),
        }
    }

    #[test]
    fn test_merge_replaces_rules_of_named_profile() {
        let mut config = json!({
            "global": { "show_in_menu_bar": false },
            "profiles": [
                { "name": "Default", "complex_modifications": { "rules": ["old"] } },
                {
                    "name": "Work",
                    "selected": true,
                    "complex_modifications": { "parameters": { "basic.to_if_alone_timeout_milliseconds": 500 }, "rules": ["old"] }
                }
            ]
        });

        assert!(merge_rules(&mut config, "Work", &[sample_rule()]).is_ok());

        assert_eq!(config["profiles"][0]["complex_modifications"]["rules"], json!(["old"]));
        let work = &config["profiles"][1];
        assert_eq!(work["selected"], json!(true));
        assert_eq!(
            work["complex_modifications"]["parameters"]["basic.to_if_alone_timeout_milliseconds"],
            json!(500)
        );
        assert_eq!(
            work["complex_modifications"]["rules"],
            json!([{ "description": "Key mapping", "manipulators": [] }])
        );
        assert_eq!(config["global"]["show_in_menu_bar"], json!(false));
    }

    #[test]
    fn test_merge_creates_complex_modifications() {
        let mut config = json!({ "profiles": [{ "name": "Fresh" }] });
        assert!(merge_rules(&mut config, "Fresh", &[sample_rule()]).is_ok());
        assert!(config["profiles"][0]["complex_modifications"]["rules"].is_array());
    }

    #[test]
    fn test_merge_profile_not_found() {
        let mut config = json!({ "profiles": [{ "name": "Default" }] });
        assert!(matches!(
            merge_rules(&mut config, "Missing", &[]),
            Err(MergeError::NotFound)
        ));
    }

    #[test]
    fn test_merge_without_profiles() {
        let mut config = json!({ "global": {} });
        assert!(matches!(
            merge_rules(&mut config, "Default", &[]),
            Err(MergeError::Malformed(_))
        ));
    }

    #[test]
    fn test_render_dry_run() {
        let text = render_dry_run("Work", &[sample_rule()]).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["description"], json!("Work"));
        assert_eq!(value["rules"][0]["description"], json!("Key mapping"));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the rename fail after the temp write
        let target = dir.path().join("karabiner.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = atomic_write(&target, "{}").unwrap_err();
        assert!(matches!(err, ProfileError::Write { .. }));
        assert!(!dir.path().join("karabiner.json.tmp").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("karabiner.json");
        fs::write(&target, "old").unwrap();

        atomic_write(&target, "new").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert!(!dir.path().join("karabiner.json.tmp").exists());
    }

    #[test]
    fn test_default_path_points_at_karabiner_dir() {
        if let Some(path) = default_karabiner_json_path() {
            assert!(path.ends_with(".config/karabiner/karabiner.json"));
        }
    }
}

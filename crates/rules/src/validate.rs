//! Transform-name validation (spec §7: an unknown transform verb is a
//! configuration error, fatal before any output is produced).
//!
//! The original `apply_rules()` (`mkfrogfs.py`) raises `f'{action} is not a
//! known transform'` the moment it resolves a verb that isn't `cache`,
//! `discard`, `compress`, or a name in the discovered-transforms dict — for
//! every entry a rule matches, regardless of whether that entry is later
//! discarded or turns out to be cache-fresh. This module reproduces that
//! check once per distinct transform name referenced anywhere in the
//! filter table, so a typo'd transform name is fatal even if every entry
//! that would have used it is discarded or already up to date in the
//! cache.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::action::Verb;
use crate::config::FilterTable;
use crate::error::ConfigError;

/// Validates that every transform name referenced by `table` resolves to a
/// discoverable `transform-<name>` script under `tool_dirs`.
///
/// Called once per build, independent of the collected entry set: a
/// transform name is either known or it isn't, regardless of which paths
/// happen to match the rule that names it.
pub fn validate_transforms(table: &FilterTable, tool_dirs: &[PathBuf]) -> Result<(), ConfigError> {
    let mut names = BTreeSet::new();
    for rule in &table.rules {
        for action in &rule.actions {
            if let Verb::Transform(name) = &action.verb {
                names.insert(name.as_str());
            }
        }
    }

    for name in names {
        transform::discover(tool_dirs, name).map_err(|_| ConfigError::UnknownTransform {
            name: name.to_owned(),
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterTable;

    #[test]
    fn unknown_transform_name_is_rejected() {
        let table = FilterTable::from_yaml_str("filters:\n  \"*\":\n    - js_minify\n").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = validate_transforms(&table, &[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTransform { name } if name == "js_minify"));
    }

    #[test]
    fn known_transform_name_passes() {
        let table = FilterTable::from_yaml_str("filters:\n  \"*\":\n    - js_minify\n").unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("transform-js_minify.py"), b"").unwrap();
        validate_transforms(&table, &[dir.path().to_path_buf()]).unwrap();
    }

    #[test]
    fn disabled_transform_reference_is_still_validated() {
        let table = FilterTable::from_yaml_str("filters:\n  \"*\":\n    - no js_minify\n").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = validate_transforms(&table, &[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTransform { .. }));
    }

    #[test]
    fn reserved_verbs_never_require_a_transform_script() {
        let table = FilterTable::from_yaml_str("filters:\n  \"*\":\n    - cache\n    - discard\n    - compress deflate\n").unwrap();
        let empty_dir = tempfile::tempdir().unwrap();
        validate_transforms(&table, &[empty_dir.path().to_path_buf()]).unwrap();
    }
}

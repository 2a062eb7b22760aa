//! Config loading (spec §4.2, §6.2): `filters: { pattern → [action, …] }`,
//! normalized into an order-preserving [`FilterTable`].

use std::fs;
use std::path::Path;

use globset::{Glob, GlobMatcher};

use crate::action::{parse_action, ParsedAction, RawAction};
use crate::error::ConfigError;

/// One compiled filter rule: the pattern text (kept for diagnostics), its
/// compiled glob matcher, and its ordered action list.
pub struct FilterRule {
    /// The raw glob pattern text, as written in the config file.
    pub pattern: String,
    /// The compiled matcher for `pattern`.
    pub matcher: GlobMatcher,
    /// The actions to apply, in declaration order.
    pub actions: Vec<ParsedAction>,
}

/// The normalized `filters` table: an ordered list of [`FilterRule`]s.
/// Declaration order is load-bearing — the rule engine evaluates rules in
/// this order and later actions can override earlier ones (spec §9
/// REDESIGN FLAGS).
pub struct FilterTable {
    /// The compiled rules, in declaration order.
    pub rules: Vec<FilterRule>,
}

impl FilterTable {
    /// Loads and normalizes `filters:` from a YAML document on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Loads and normalizes `filters:` from an in-memory YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let doc: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let filters = match doc {
            serde_yaml::Value::Mapping(ref top) => top
                .get(serde_yaml::Value::String("filters".to_owned()))
                .cloned()
                .unwrap_or(serde_yaml::Value::Mapping(serde_yaml::Mapping::new())),
            serde_yaml::Value::Null => serde_yaml::Value::Mapping(serde_yaml::Mapping::new()),
            _ => {
                return Err(ConfigError::InvalidShape(
                    "top-level config document must be a mapping".to_owned(),
                ))
            }
        };

        let mapping = filters.as_mapping().ok_or_else(|| {
            ConfigError::InvalidShape("`filters` must be a mapping from pattern to action list".to_owned())
        })?;

        let mut rules = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let pattern = key.as_str().ok_or_else(|| {
                ConfigError::InvalidShape("filter pattern keys must be strings".to_owned())
            })?;

            let raw_actions: Vec<RawAction> = serde_yaml::from_value(value.clone())?;
            let actions = raw_actions
                .into_iter()
                .map(|raw| parse_action(pattern, raw))
                .collect::<Result<Vec<_>, _>>()?;

            let matcher = Glob::new(pattern)
                .map_err(|source| ConfigError::InvalidGlob {
                    pattern: pattern.to_owned(),
                    source,
                })?
                .compile_matcher();

            rules.push(FilterRule {
                pattern: pattern.to_owned(),
                matcher,
                actions,
            });
        }

        Ok(Self { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_filters_preserving_declaration_order() {
        let yaml = "filters:\n  \"*.txt\":\n    - cache\n  \"*.js\":\n    - no cache\n    - js_minify\n";
        let table = FilterTable::from_yaml_str(yaml).unwrap();
        let patterns: Vec<&str> = table.rules.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["*.txt", "*.js"]);
        assert_eq!(table.rules[1].actions.len(), 2);
    }

    #[test]
    fn missing_filters_key_yields_empty_table() {
        let table = FilterTable::from_yaml_str("other: 1\n").unwrap();
        assert!(table.rules.is_empty());
    }

    #[test]
    fn unknown_verb_is_fatal() {
        let yaml = "filters:\n  \"*\":\n    - {bogus verb here: null}\n";
        let err = FilterTable::from_yaml_str(yaml);
        assert!(err.is_err());
    }
}

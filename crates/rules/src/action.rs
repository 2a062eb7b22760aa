//! Filter action parsing (spec §3 "Filter rule", §4.2).
//!
//! A raw YAML action item is either a bare string (`"cache"`, `"no
//! compress"`, `"js_minify"`) or a single-key mapping to an argument object
//! (`{compress deflate: {level: 9}}`). [`parse_action`] normalizes either
//! shape into a [`ParsedAction`]: an optional `no` prefix, the verb itself,
//! and its argument mapping (bare strings get `{}`).

use std::collections::BTreeMap;

use image::ArgMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// One raw action item as written in YAML, before verb parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAction {
    /// A bare verb string with no arguments: `"cache"`, `"no compress"`.
    Bare(String),
    /// A single-key mapping from verb text to its argument object (or
    /// `null` for a bare flag with no value of its own).
    WithArgs(BTreeMap<String, Option<BTreeMap<String, serde_yaml::Value>>>),
}

/// The verb a [`ParsedAction`] names, already split from its `no` prefix
/// and (for `compress`) its algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// `cache` / `no cache`.
    Cache,
    /// `discard` / `no discard`.
    Discard,
    /// `compress <algo>` / `no compress`. `algo` is absent on `no compress`.
    Compress {
        /// The compressor name (`deflate`/`heatshrink`), absent when
        /// disabling.
        algo: Option<String>,
    },
    /// Any other verb: an external transform name.
    Transform(String),
}

/// One normalized filter action: whether it disables (`no ...`) rather than
/// enables, which verb it names, and its argument mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAction {
    /// `true` for a `no <verb>` action.
    pub disable: bool,
    /// The verb this action names.
    pub verb: Verb,
    /// Its argument mapping (empty for bare actions).
    pub args: ArgMap,
}

fn value_to_arg(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => None,
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s),
        other => Some(serde_yaml::to_string(&other).unwrap_or_default().trim().to_owned()),
    }
}

fn parse_verb_tokens(pattern: &str, text: &str) -> Result<(bool, Verb), ConfigError> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next().ok_or_else(|| ConfigError::UnknownVerb {
        pattern: pattern.to_owned(),
        verb: text.to_owned(),
    })?;

    let (disable, verb_name) = if first == "no" {
        let verb_name = tokens.next().ok_or_else(|| ConfigError::UnknownVerb {
            pattern: pattern.to_owned(),
            verb: text.to_owned(),
        })?;
        (true, verb_name)
    } else {
        (false, first)
    };

    let verb = match verb_name {
        "cache" => Verb::Cache,
        "discard" => Verb::Discard,
        "compress" => {
            let algo = tokens.next().map(str::to_owned);
            if !disable && algo.is_none() {
                return Err(ConfigError::MissingCompressorName {
                    pattern: pattern.to_owned(),
                });
            }
            if let Some(name) = &algo {
                if name != "deflate" && name != "heatshrink" {
                    return Err(ConfigError::UnknownCompressor {
                        pattern: pattern.to_owned(),
                        name: name.clone(),
                    });
                }
            }
            Verb::Compress { algo }
        }
        // Any other word is taken as a transform name; parsing alone can't
        // tell a real one from a typo (no `tool_dirs` in scope here), so
        // existence is checked once, separately, by `validate::validate_transforms`.
        other => Verb::Transform(other.to_owned()),
    };

    if tokens.next().is_some() {
        return Err(ConfigError::UnknownVerb {
            pattern: pattern.to_owned(),
            verb: text.to_owned(),
        });
    }

    Ok((disable, verb))
}

/// Normalizes one raw action item for a given filter `pattern`.
pub fn parse_action(pattern: &str, raw: RawAction) -> Result<ParsedAction, ConfigError> {
    let (text, args) = match raw {
        RawAction::Bare(text) => (text, ArgMap::new()),
        RawAction::WithArgs(mut map) => {
            if map.len() != 1 {
                return Err(ConfigError::UnknownVerb {
                    pattern: pattern.to_owned(),
                    verb: format!("{map:?}"),
                });
            }
            let (text, raw_args) = map.pop_first().expect("checked len == 1");
            let args = raw_args
                .unwrap_or_default()
                .into_iter()
                .map(|(k, v)| (k, value_to_arg(v)))
                .collect();
            (text, args)
        }
    };

    let (disable, verb) = parse_verb_tokens(pattern, &text)?;
    Ok(ParsedAction { disable, verb, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_string_becomes_verb_with_empty_args() {
        let action = parse_action("*", RawAction::Bare("cache".into())).unwrap();
        assert!(!action.disable);
        assert_eq!(action.verb, Verb::Cache);
        assert!(action.args.is_empty());
    }

    #[test]
    fn no_prefix_sets_disable() {
        let action = parse_action("*", RawAction::Bare("no cache".into())).unwrap();
        assert!(action.disable);
        assert_eq!(action.verb, Verb::Cache);
    }

    #[test]
    fn compress_requires_algorithm_name() {
        let err = parse_action("*", RawAction::Bare("compress".into())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCompressorName { .. }));
    }

    #[test]
    fn unknown_compressor_name_is_rejected() {
        let err = parse_action("*", RawAction::Bare("compress lzma".into())).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCompressor { .. }));
    }

    #[test]
    fn no_compress_has_no_algorithm() {
        let action = parse_action("*", RawAction::Bare("no compress".into())).unwrap();
        assert_eq!(action.verb, Verb::Compress { algo: None });
        assert!(action.disable);
    }

    #[test]
    fn bare_word_becomes_transform_name() {
        let action = parse_action("*", RawAction::Bare("js_minify".into())).unwrap();
        assert_eq!(action.verb, Verb::Transform("js_minify".into()));
    }

    #[test]
    fn mapping_with_args_is_parsed() {
        let mut map = BTreeMap::new();
        let mut args = BTreeMap::new();
        args.insert("level".to_owned(), serde_yaml::Value::from(9));
        map.insert("compress deflate".to_owned(), Some(args));
        let action = parse_action("*", RawAction::WithArgs(map)).unwrap();
        assert_eq!(action.verb, Verb::Compress { algo: Some("deflate".into()) });
        assert_eq!(action.args.get("level"), Some(&Some("9".to_owned())));
    }
}

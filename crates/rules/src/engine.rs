//! Action plan resolution (spec §4.2): for each entry, iterate filters in
//! declaration order, applying every matching rule's actions in order.

use image::{ArgMap, Entry, EntryKind};

use crate::action::Verb;
use crate::config::FilterTable;

/// The resolved set of transforms, compressor choice, and cache/discard
/// flags for a single entry, before it is narrowed to the fields that apply
/// to the entry's kind.
#[derive(Debug, Clone, Default)]
pub struct ActionPlan {
    /// Whether the preprocess cache may be reused (default `true`).
    pub cache: bool,
    /// Whether the entry is excluded from the image.
    pub discard: bool,
    /// The resolved compressor choice, if any.
    pub compressor: Option<(String, ArgMap)>,
    /// The resolved transform list, in application order.
    pub transforms: Vec<(String, ArgMap)>,
}

impl ActionPlan {
    fn new() -> Self {
        Self {
            cache: true,
            discard: false,
            compressor: None,
            transforms: Vec::new(),
        }
    }
}

/// Resolves the action plan for a single `path` by applying every matching
/// filter rule's actions, in declaration order, across the whole table.
#[must_use]
pub fn resolve(table: &FilterTable, path: &str) -> ActionPlan {
    let mut plan = ActionPlan::new();

    for rule in &table.rules {
        if !rule.matcher.is_match(path) {
            continue;
        }
        for action in &rule.actions {
            apply(&mut plan, action);
        }
    }

    plan
}

fn apply(plan: &mut ActionPlan, action: &crate::action::ParsedAction) {
    match &action.verb {
        Verb::Cache => plan.cache = !action.disable,
        Verb::Discard => plan.discard = !action.disable,
        Verb::Compress { algo } => {
            if action.disable {
                plan.compressor = None;
            } else if plan.compressor.is_none() {
                // "the first non-disabling compress action seen takes effect"
                if let Some(name) = algo {
                    plan.compressor = Some((name.clone(), action.args.clone()));
                }
            }
        }
        Verb::Transform(name) => {
            if action.disable {
                plan.transforms.retain(|(existing, _)| existing != name);
            } else if !plan.transforms.iter().any(|(existing, _)| existing == name) {
                plan.transforms.push((name.clone(), action.args.clone()));
            }
        }
    }
}

/// Resolves `table` against every entry in `entries` and writes the result
/// back onto each entry, respecting spec §4.2's "compressors and transforms
/// apply only to files; directories only get cache/discard" rule.
pub fn apply_to_entries(table: &FilterTable, entries: &mut [Entry]) {
    for entry in entries.iter_mut() {
        let plan = resolve(table, &entry.path);
        entry.cache = plan.cache;
        entry.discard = plan.discard;
        if matches!(entry.kind, EntryKind::File) {
            entry.compressor = plan.compressor;
            entry.transforms = plan.transforms;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterTable;

    #[test]
    fn later_filters_override_earlier_ones() {
        let yaml = "filters:\n  \"*\":\n    - cache\n  \"*.tmp\":\n    - no cache\n";
        let table = FilterTable::from_yaml_str(yaml).unwrap();
        let plan = resolve(&table, "build/output.tmp");
        assert!(!plan.cache);
    }

    #[test]
    fn first_compress_action_wins() {
        let yaml = "filters:\n  \"*.js\":\n    - compress deflate\n    - compress heatshrink\n";
        let table = FilterTable::from_yaml_str(yaml).unwrap();
        let plan = resolve(&table, "app.js");
        assert_eq!(plan.compressor.as_ref().unwrap().0, "deflate");
    }

    #[test]
    fn no_compress_clears_then_a_later_compress_can_set_again() {
        let yaml =
            "filters:\n  \"*.js\":\n    - compress deflate\n    - no compress\n    - compress heatshrink\n";
        let table = FilterTable::from_yaml_str(yaml).unwrap();
        let plan = resolve(&table, "app.js");
        assert_eq!(plan.compressor.as_ref().unwrap().0, "heatshrink");
    }

    #[test]
    fn duplicate_transform_is_ignored_but_no_removes_it() {
        let yaml = "filters:\n  \"*.js\":\n    - js_minify\n    - js_minify\n  \"*.min.js\":\n    - no js_minify\n";
        let table = FilterTable::from_yaml_str(yaml).unwrap();
        assert_eq!(resolve(&table, "app.js").transforms.len(), 1);
        assert!(resolve(&table, "app.min.js").transforms.is_empty());
    }

    #[test]
    fn directories_only_keep_cache_and_discard() {
        let yaml = "filters:\n  \"*\":\n    - discard\n    - compress deflate\n    - js_minify\n";
        let table = FilterTable::from_yaml_str(yaml).unwrap();
        let mut entries = vec![Entry::new_directory("a".into(), "a".into(), 0)];
        apply_to_entries(&table, &mut entries);
        assert!(entries[0].discard);
        assert!(entries[0].compressor.is_none());
        assert!(entries[0].transforms.is_empty());
    }
}

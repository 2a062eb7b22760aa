//! Property tests for the rule engine (spec §4.2, §9 "ad-hoc glob matching
//! order must preserve filter declaration order").

use proptest::prelude::*;
use rules::{resolve, FilterTable};

/// Transform-name-shaped strings, excluding the three reserved verbs so a
/// generated name can never accidentally resolve as `cache`/`discard`/
/// `compress` instead of a transform.
fn arb_transform_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("must not be a reserved verb", |s| {
        !matches!(s.as_str(), "cache" | "discard" | "compress")
    })
}

proptest! {
    #[test]
    fn resolving_the_same_path_twice_is_deterministic(name in "[a-z]{1,8}") {
        let yaml = format!(
            "filters:\n  \"*\":\n    - cache\n  \"*.{name}\":\n    - compress deflate\n    - js_minify\n"
        );
        let table = FilterTable::from_yaml_str(&yaml).unwrap();
        let path = format!("app.{name}");
        let first = resolve(&table, &path);
        let second = resolve(&table, &path);
        prop_assert_eq!(first.cache, second.cache);
        prop_assert_eq!(first.discard, second.discard);
        prop_assert_eq!(first.transforms.len(), second.transforms.len());
        prop_assert_eq!(
            first.compressor.map(|(n, _)| n),
            second.compressor.map(|(n, _)| n)
        );
    }

    #[test]
    fn a_later_blanket_no_cache_always_overrides_an_earlier_cache(name in "[a-z]{1,8}") {
        let yaml = format!(
            "filters:\n  \"*.{name}\":\n    - cache\n  \"*\":\n    - no cache\n"
        );
        let table = FilterTable::from_yaml_str(&yaml).unwrap();
        let plan = resolve(&table, &format!("x.{name}"));
        prop_assert!(!plan.cache);
    }

    #[test]
    fn repeating_the_same_transform_verb_never_duplicates_it(name in arb_transform_name(), reps in 1usize..6) {
        let mut yaml = format!("filters:\n  \"*\":\n");
        for _ in 0..reps {
            yaml.push_str(&format!("    - {name}\n"));
        }
        let table = FilterTable::from_yaml_str(&yaml).unwrap();
        let plan = resolve(&table, "anything.txt");
        prop_assert_eq!(plan.transforms.len(), 1);
    }
}

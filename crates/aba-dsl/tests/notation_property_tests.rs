use std::collections::BTreeMap;

use aba_dsl::framework::{Framework, Preferences, Rule};
use aba_dsl::notation::{format_notation, parse_notation};
use aba_dsl::set_key::canonical_key;
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    // Notation tokens: alphanumeric/underscore only.
    proptest::string::string_regex("[a-z][a-z0-9_]{0,6}").unwrap()
}

fn ident_list(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(ident(), min..=max)
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn framework() -> impl Strategy<Value = Framework> {
    (
        ident_list(1, 8),
        ident_list(0, 4),
        proptest::collection::btree_map(ident(), ident(), 0..4),
        proptest::collection::vec((ident(), ident_list(0, 3)), 0..5),
        proptest::option::of("[a-z]( > [a-z]){0,3}"),
    )
        .prop_map(|(literals, assumptions, contraries, rules, pref)| Framework {
            literals: dedup(literals),
            assumptions,
            contraries: contraries.into_iter().collect::<BTreeMap<_, _>>(),
            rules: rules
                .into_iter()
                .map(|(head, body)| Rule { head, body })
                .collect(),
            preferences: pref.map(Preferences::Expression).unwrap_or_default(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn canonical_key_is_permutation_and_duplication_invariant(
        items in ident_list(0, 8),
        seed in any::<u64>(),
    ) {
        let mut shuffled = items.clone();
        // Deterministic rotation + duplication of the first element.
        if !shuffled.is_empty() {
            let k = (seed as usize) % shuffled.len();
            shuffled.rotate_left(k);
            shuffled.push(shuffled[0].clone());
        }
        shuffled.reverse();
        prop_assert_eq!(canonical_key(&items), canonical_key(&shuffled));
    }

    #[test]
    fn formatted_notation_parses_back(fw in framework()) {
        let text = format_notation(&fw);
        let parsed = parse_notation(&text).expect("formatted notation is non-empty");
        prop_assert_eq!(parsed, fw);
    }
}

use aba_dsl::framework::RunOptions;
use aba_results::view_model::{build_view_model, DisplayKind};
use aba_results::{AttackKind, AttackSet, SolverResponse};
use proptest::prelude::*;

fn kind() -> impl Strategy<Value = AttackKind> {
    prop_oneof![
        Just(AttackKind::Normal),
        Just(AttackKind::Reverse),
        Just(AttackKind::Both),
    ]
}

fn assumption_set() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(proptest::string::string_regex("[a-d]").unwrap(), 0..4)
}

fn set_attack() -> impl Strategy<Value = AttackSet> {
    (assumption_set(), assumption_set(), kind()).prop_map(|(x, y, kind)| AttackSet {
        x,
        y,
        kind,
        witness: None,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn both_never_collapses(attacks in proptest::collection::vec(set_attack(), 0..12)) {
        let expected: usize = attacks
            .iter()
            .map(|a| if a.kind == AttackKind::Both { 2 } else { 1 })
            .sum();
        let resp = SolverResponse {
            attacks_sets: attacks.clone(),
            ..SolverResponse::default()
        };
        let view = build_view_model(&resp, &RunOptions::default());
        prop_assert_eq!(view.preference_attacks.len(), expected);

        let mut rows = view.preference_attacks.iter();
        for attack in &attacks {
            let row = rows.next().expect("row per attack");
            prop_assert_eq!(&row.x, &attack.x);
            match attack.kind {
                AttackKind::Normal => prop_assert_eq!(row.kind, DisplayKind::Normal),
                AttackKind::Reverse => prop_assert_eq!(row.kind, DisplayKind::Reverse),
                AttackKind::Both => {
                    let twin = rows.next().expect("reverse twin");
                    prop_assert_eq!(row.kind, DisplayKind::Normal);
                    prop_assert_eq!(twin.kind, DisplayKind::Reverse);
                    prop_assert_eq!(&twin.x_label, &row.x_label);
                    prop_assert_eq!(&twin.y_label, &row.y_label);
                }
            }
        }
    }
}

use aba_dsl::framework::RunOptions;
use aba_results::view_model::{build_view_model, AttackView, DisplayKind, SelectedView};
use aba_results::SolverResponse;
use serde_json::json;

fn prefs(enabled: bool) -> RunOptions {
    RunOptions {
        use_preferences: enabled,
        ..RunOptions::default()
    }
}

fn sample_response() -> SolverResponse {
    SolverResponse::from_value(json!({
        "arguments": [
            {"id": 0, "conclusion": "a", "assumptions": ["a"]},
            {"id": 1, "conclusion": "b", "assumptions": ["b"]},
            {"id": 2, "conclusion": "r", "assumptions": ["b", "c"]},
            {"id": 3, "conclusion": "q", "assumptions": []},
            {"id": 4, "conclusion": "p", "assumptions": ["a"]}
        ],
        "attacks": [
            {"attacker": 2, "target": 0, "kind": "normal", "witness": "a"},
            {"attacker": 0, "target": 1, "kind": "both", "witness": "b"},
            {"attacker": 1, "target": 4, "kind": "reverse", "witness": "a"}
        ],
        "attacks_sets": [
            {"X": ["a"], "Y": ["b"], "kind": "both", "witness": "b"},
            {"X": ["c", "b"], "Y": ["a"], "kind": "normal", "witness": "a"}
        ],
        "options": {"use_preferences": true}
    }))
}

#[test]
fn both_set_attack_expands_into_normal_and_reverse_rows() {
    let resp = SolverResponse::from_value(json!({
        "attacks_sets": [{"X": ["a"], "Y": ["b"], "kind": "both"}]
    }));
    let view = build_view_model(&resp, &prefs(true));

    assert_eq!(view.preference_attacks.len(), 2);
    let kinds: Vec<DisplayKind> = view.preference_attacks.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![DisplayKind::Normal, DisplayKind::Reverse]);
    assert_eq!(view.preference_attacks[0].x_label, view.preference_attacks[1].x_label);
    assert_eq!(view.preference_attacks[0].y_label, view.preference_attacks[1].y_label);
    assert_eq!(view.preference_attacks[0].x_label, "{a}");
    assert_eq!(view.selected, SelectedView::Preference);
}

#[test]
fn pairwise_both_renders_as_normal_in_identity_view() {
    let view = build_view_model(&sample_response(), &prefs(false));
    let row = &view.identity_attacks[1];
    assert_eq!(row.kind, DisplayKind::Normal);
    assert_eq!(row.attacker_label, "a1: {a} ⊢ a");
    assert_eq!(row.target_label, "a2: {b} ⊢ b");

    let serialized = serde_json::to_value(row).expect("serialize");
    assert_eq!(serialized["kind"], json!("normal"));
}

#[test]
fn missing_attack_sets_fall_back_to_identity_view() {
    let resp = SolverResponse::from_value(json!({
        "arguments": [{"id": 0, "conclusion": "a", "assumptions": ["a"]}],
        "attacks": [{"attacker": 0, "target": 0, "kind": "normal"}]
    }));
    let view = build_view_model(&resp, &prefs(true));

    assert!(view.preference_attacks.is_empty());
    assert_eq!(view.selected, SelectedView::Identity);
    match view.selected_attacks() {
        AttackView::Identity(rows) => assert_eq!(rows.len(), 1),
        AttackView::Preference(_) => panic!("identity view expected"),
    }
}

#[test]
fn set_labels_resolve_through_support_equality() {
    let view = build_view_model(&sample_response(), &prefs(true));
    assert_eq!(view.preference_attacks.len(), 3);

    // {a} is the support of both a1 and a5; the first one names the row.
    let first = &view.preference_attacks[0];
    assert_eq!(first.x_label, "a1: {a} ⊢ a");
    assert_eq!(first.x_argument, Some(0));
    assert_eq!(first.y_label, "a2: {b} ⊢ b");

    // ["c", "b"] matches a3's support ["b", "c"]; its own order is displayed.
    let last = &view.preference_attacks[2];
    assert_eq!(last.kind, DisplayKind::Normal);
    assert_eq!(last.x_label, "a3: {b, c} ⊢ r");
    assert_eq!(last.x, vec!["c".to_string(), "b".to_string()]);
    assert_eq!(last.witness.as_deref(), Some("a"));
}

#[test]
fn both_views_are_always_computed() {
    let view = build_view_model(&sample_response(), &prefs(false));
    assert_eq!(view.identity_attacks.len(), 3);
    assert_eq!(view.preference_attacks.len(), 3);
    assert_eq!(view.selected, SelectedView::Identity);
    assert_eq!(view.selected_attacks().len(), 3);
}

#[test]
fn view_model_serializes_rows_without_indices() {
    let view = build_view_model(&sample_response(), &prefs(true));
    let value = serde_json::to_value(&view).expect("serialize");
    assert_eq!(value["selected"], json!("preference"));
    assert_eq!(value["arguments"][3]["support"], json!("{}"));
    assert!(value.get("by_support").is_none());
}

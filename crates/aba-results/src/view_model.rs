//! Render-ready view of one solver response.
//!
//! Two attack views are always computed:
//!
//! - **identity** rows: one per pairwise attack between arguments. `both` is
//!   displayed as `normal`; this view does not distinguish preference-reversed
//!   duplicates.
//! - **preference** rows: one per set-level attack `(X, Y, kind)`, except that
//!   `both` expands into a `normal` row followed by a `reverse` row with the
//!   same labels. A `both` relation is two coexisting defeats and is never
//!   collapsed.
//!
//! `X`/`Y` labels resolve through the support index: the first argument whose
//! assumption set equals the attacked set (by `canonical_key`) names the row.
//! Later arguments with the same support are not addressable through that
//! index, so a preference row can only ever name one representative argument.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use aba_dsl::framework::RunOptions;
use aba_dsl::set_key::{canonical_key, set_literal};
use serde::Serialize;

use crate::response::{argument_label, Argument, ArgumentId, AttackKind, SolverResponse};

/// Kind as shown to the user. `both` never reaches the screen as such.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    Normal,
    Reverse,
}

impl DisplayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Reverse => "reverse",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ArgumentRow {
    pub id: ArgumentId,
    pub label: String,
    pub conclusion: String,
    /// Support set in the solver's order (not canonicalised).
    pub assumptions: Vec<String>,
    pub support: String,
}

impl ArgumentRow {
    fn from_argument(arg: &Argument) -> Self {
        Self {
            id: arg.id,
            label: arg.label(),
            conclusion: arg.conclusion.clone(),
            assumptions: arg.assumptions.clone(),
            support: arg.support(),
        }
    }

    /// `a1: {a, b} ⊢ p`
    pub fn full_label(&self) -> String {
        format!("{}: {} ⊢ {}", self.label, self.support, self.conclusion)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdentityAttackRow {
    pub kind: DisplayKind,
    pub attacker: ArgumentId,
    pub target: ArgumentId,
    pub attacker_label: String,
    pub target_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PreferenceAttackRow {
    pub kind: DisplayKind,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    /// Representative argument for `X`, when one has exactly that support.
    pub x_argument: Option<ArgumentId>,
    pub y_argument: Option<ArgumentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectedView {
    Identity,
    Preference,
}

/// Borrowed rows of whichever attack view is selected for display.
#[derive(Debug, Clone, Copy)]
pub enum AttackView<'a> {
    Identity(&'a [IdentityAttackRow]),
    Preference(&'a [PreferenceAttackRow]),
}

impl AttackView<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Identity(rows) => rows.len(),
            Self::Preference(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub arguments: Vec<ArgumentRow>,
    pub identity_attacks: Vec<IdentityAttackRow>,
    pub preference_attacks: Vec<PreferenceAttackRow>,
    pub selected: SelectedView,
    #[serde(skip)]
    by_id: HashMap<ArgumentId, usize>,
    #[serde(skip)]
    by_support: HashMap<String, usize>,
}

impl ViewModel {
    /// Exact lookup by argument id.
    pub fn argument(&self, id: ArgumentId) -> Option<&ArgumentRow> {
        self.by_id.get(&id).map(|&i| &self.arguments[i])
    }

    /// First argument whose support equals `assumptions` as a set.
    pub fn argument_for_support<I, S>(&self, assumptions: I) -> Option<&ArgumentRow>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.by_support
            .get(&canonical_key(assumptions))
            .map(|&i| &self.arguments[i])
    }

    pub fn selected_attacks(&self) -> AttackView<'_> {
        match self.selected {
            SelectedView::Identity => AttackView::Identity(&self.identity_attacks),
            SelectedView::Preference => AttackView::Preference(&self.preference_attacks),
        }
    }
}

pub fn build_view_model(response: &SolverResponse, options: &RunOptions) -> ViewModel {
    let mut arguments: Vec<ArgumentRow> = Vec::with_capacity(response.arguments.len());
    let mut by_id: HashMap<ArgumentId, usize> = HashMap::new();
    let mut by_support: HashMap<String, usize> = HashMap::new();

    for arg in &response.arguments {
        let index = arguments.len();
        match by_id.entry(arg.id) {
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
            Entry::Occupied(_) => {
                tracing::warn!(id = arg.id, "duplicate argument id in solver response; keeping the first");
            }
        }
        by_support
            .entry(canonical_key(&arg.assumptions))
            .or_insert(index);
        arguments.push(ArgumentRow::from_argument(arg));
    }

    let endpoint_label = |id: ArgumentId| match by_id.get(&id) {
        Some(&i) => arguments[i].full_label(),
        None => format!("{}: {{}} ⊢ ?", argument_label(id)),
    };

    let identity_attacks: Vec<IdentityAttackRow> = response
        .attacks
        .iter()
        .map(|attack| IdentityAttackRow {
            kind: match attack.kind {
                AttackKind::Reverse => DisplayKind::Reverse,
                AttackKind::Normal | AttackKind::Both => DisplayKind::Normal,
            },
            attacker: attack.attacker,
            target: attack.target,
            attacker_label: endpoint_label(attack.attacker),
            target_label: endpoint_label(attack.target),
            witness: attack.witness.clone(),
        })
        .collect();

    let set_label = |set: &[String]| -> (String, Option<ArgumentId>) {
        match by_support.get(&canonical_key(set)) {
            Some(&i) => (arguments[i].full_label(), Some(arguments[i].id)),
            None => (set_literal(set), None),
        }
    };

    let mut preference_attacks: Vec<PreferenceAttackRow> = Vec::new();
    for set_attack in &response.attacks_sets {
        let (x_label, x_argument) = set_label(&set_attack.x);
        let (y_label, y_argument) = set_label(&set_attack.y);
        let kinds: &[DisplayKind] = match set_attack.kind {
            AttackKind::Normal => &[DisplayKind::Normal],
            AttackKind::Reverse => &[DisplayKind::Reverse],
            AttackKind::Both => &[DisplayKind::Normal, DisplayKind::Reverse],
        };
        for &kind in kinds {
            preference_attacks.push(PreferenceAttackRow {
                kind,
                x: set_attack.x.clone(),
                y: set_attack.y.clone(),
                x_label: x_label.clone(),
                y_label: y_label.clone(),
                x_argument,
                y_argument,
                witness: set_attack.witness.clone(),
            });
        }
    }

    let selected = if options.use_preferences && !preference_attacks.is_empty() {
        SelectedView::Preference
    } else {
        SelectedView::Identity
    };

    tracing::debug!(
        arguments = arguments.len(),
        identity_attacks = identity_attacks.len(),
        preference_attacks = preference_attacks.len(),
        ?selected,
        "built result view model"
    );

    ViewModel {
        arguments,
        identity_attacks,
        preference_attacks,
        selected,
        by_id,
        by_support,
    }
}

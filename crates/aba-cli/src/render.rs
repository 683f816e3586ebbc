//! Terminal tables for a built view model.

use colored::{ColoredString, Colorize};

use aba_results::summary::FrameworkSummary;
use aba_results::view_model::{
    ArgumentRow, AttackView, IdentityAttackRow, PreferenceAttackRow, SelectedView, ViewModel,
};
use aba_results::DisplayKind;

const EMPTY: &str = "—";

fn kind_badge(kind: DisplayKind) -> ColoredString {
    match kind {
        DisplayKind::Normal => kind.as_str().blue().bold(),
        DisplayKind::Reverse => kind.as_str().red().bold(),
    }
}

fn or_empty(s: &str) -> &str {
    if s.trim().is_empty() {
        EMPTY
    } else {
        s
    }
}

pub fn print_summary(summary: &FrameworkSummary) {
    println!("{}", "Framework".green().bold());
    for (name, value) in summary.rows() {
        println!("  {:<12} {}", name.cyan(), or_empty(value));
    }
}

pub fn print_arguments(rows: &[ArgumentRow]) {
    println!("{} ({})", "Arguments".green().bold(), rows.len());
    if rows.is_empty() {
        println!("  {EMPTY}");
        return;
    }
    println!("  {:<6} {:<24} {:<2} {}", "ID", "Support", "", "Conclusion");
    for row in rows {
        println!(
            "  {:<6} {:<24} {:<2} {}",
            row.label.yellow(),
            row.support,
            "⊢",
            row.conclusion
        );
    }
}

fn print_identity_attacks(rows: &[IdentityAttackRow]) {
    for row in rows {
        println!(
            "  {:<8} {} → {}{}",
            kind_badge(row.kind),
            row.attacker_label,
            row.target_label,
            witness_suffix(row.witness.as_deref())
        );
    }
}

fn print_preference_attacks(rows: &[PreferenceAttackRow]) {
    for row in rows {
        println!(
            "  {:<8} {} → {}{}",
            kind_badge(row.kind),
            row.x_label,
            row.y_label,
            witness_suffix(row.witness.as_deref())
        );
    }
}

fn witness_suffix(witness: Option<&str>) -> String {
    match witness {
        Some(w) if !w.is_empty() => format!("  (on {})", w.dimmed()),
        _ => String::new(),
    }
}

pub fn print_attacks(view: &ViewModel) {
    let title = match view.selected {
        SelectedView::Identity => "Attacks",
        SelectedView::Preference => "Attacks (preference-aware, between assumption sets)",
    };
    let attacks = view.selected_attacks();
    println!("{} ({})", title.green().bold(), attacks.len());
    if attacks.is_empty() {
        println!("  {EMPTY}");
        return;
    }
    match attacks {
        AttackView::Identity(rows) => print_identity_attacks(rows),
        AttackView::Preference(rows) => print_preference_attacks(rows),
    }
}

pub fn print_view(summary: &FrameworkSummary, view: &ViewModel) {
    print_summary(summary);
    println!();
    print_arguments(&view.arguments);
    println!();
    print_attacks(view);
}

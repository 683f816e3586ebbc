//! Canonical keys for unordered assumption sets.
//!
//! Arguments are identified by their support set, and the solver reports
//! preference attacks between assumption *sets*. Both sides list assumptions in
//! whatever order they like, so lookups go through a canonical string key:
//!
//! - duplicates removed
//! - sorted lexicographically (byte order)
//! - joined with `SET_KEY_SEPARATOR`
//!
//! Two inputs produce the same key iff they denote the same set.

use std::collections::BTreeSet;

/// Separator used between members of a canonical key.
///
/// `U+001F` (unit separator) cannot appear in notation tokens, so joined keys
/// stay unambiguous for everything the text parser can produce.
pub const SET_KEY_SEPARATOR: char = '\u{1f}';

/// Compute the canonical key of a set of literal tokens.
pub fn canonical_key<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique: BTreeSet<String> = tokens
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .collect();

    let mut out = String::new();
    for (i, token) in unique.iter().enumerate() {
        if i > 0 {
            out.push(SET_KEY_SEPARATOR);
        }
        out.push_str(token);
    }
    out
}

/// Brace-delimited display form, `{a, b}`, in the order given.
pub fn set_literal<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = tokens
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .collect();
    format!("{{{}}}", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_order_and_duplicates() {
        assert_eq!(canonical_key(["a", "b", "a"]), canonical_key(["b", "a"]));
    }

    #[test]
    fn key_distinguishes_different_sets() {
        assert_ne!(canonical_key(["a", "b"]), canonical_key(["a", "c"]));
        assert_ne!(canonical_key(["a"]), canonical_key(["a", "b"]));
    }

    #[test]
    fn empty_set_has_empty_key() {
        let none: [&str; 0] = [];
        assert_eq!(canonical_key(none), "");
    }

    #[test]
    fn set_literal_keeps_given_order() {
        assert_eq!(set_literal(["b", "a"]), "{b, a}");
        let none: [&str; 0] = [];
        assert_eq!(set_literal(none), "{}");
    }
}

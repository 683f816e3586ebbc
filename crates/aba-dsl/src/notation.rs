//! Compact line-oriented ABA notation.
//!
//! ```text
//! L: [a,b,c,q,p,r,s,t]
//! A: [a,b,c]
//! C(a): r
//! [r1]: p <- q,a
//! [r2]: q <-
//! PREF: a > b
//! ```
//!
//! Parsing is deliberately lenient: every line is offered to an ordered list of
//! directive matchers and lines no matcher accepts are skipped. The only hard
//! failure is an input with no content at all.
//!
//! Notes:
//! - `L`, `A`, `C` and `PREF` keys are case-insensitive.
//! - Rule labels (`[r1]`) are accepted but not kept.
//! - Without an `L:` line the literal set is the union of every token seen in
//!   the other directives, in order of first appearance.
//! - `PREF:` is stored verbatim (trimmed). Its grammar belongs to the solver.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::framework::{Framework, Literal, Preferences, Rule};

/// Reference framework used by `aba sample` and the tests.
pub const SAMPLE_NOTATION: &str = "\
L: [a,b,c,q,p,r,s,t]
A: [a,b,c]
C(a): r
C(b): s
C(c): t
[r1]: p <- q,a
[r2]: q <-
[r3]: r <- b,c
[r4]: t <- p,c
[r5]: s <- t
PREF: a > b";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("input is empty")]
    EmptyInput,
}

/// One recognised notation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Literals(Vec<Literal>),
    Assumptions(Vec<Literal>),
    Contrary {
        assumption: Literal,
        contrary: Literal,
    },
    Rule(Rule),
    Preference(String),
}

struct DirectiveMatcher {
    name: &'static str,
    regex: Regex,
    extract: fn(&Captures) -> Option<Directive>,
}

fn pattern(src: &str) -> Regex {
    Regex::new(src).expect("directive patterns are valid regexes")
}

fn matchers() -> &'static [DirectiveMatcher] {
    static MATCHERS: OnceLock<Vec<DirectiveMatcher>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        vec![
            // L: [x1,x2,...]
            DirectiveMatcher {
                name: "literals",
                regex: pattern(r"(?i)^L\s*:\s*\[(.+)\]\s*$"),
                extract: |cap| Some(Directive::Literals(bracket_items(&cap[1]))),
            },
            // A: [x1,x2,...]
            DirectiveMatcher {
                name: "assumptions",
                regex: pattern(r"(?i)^A\s*:\s*\[(.+)\]\s*$"),
                extract: |cap| Some(Directive::Assumptions(bracket_items(&cap[1]))),
            },
            // C(x): y
            DirectiveMatcher {
                name: "contrary",
                regex: pattern(r"(?i)^C\s*\(\s*([A-Za-z0-9_]+)\s*\)\s*:\s*([A-Za-z0-9_]+)\s*$"),
                extract: |cap| {
                    Some(Directive::Contrary {
                        assumption: cap[1].to_string(),
                        contrary: cap[2].to_string(),
                    })
                },
            },
            // [label]: head <- b1,b2   |   [label]: head <-
            DirectiveMatcher {
                name: "rule",
                regex: pattern(r"^\[[^\]]*\]\s*:\s*([A-Za-z0-9_]+)\s*<-\s*(.*)$"),
                extract: |cap| {
                    let body = cap.get(2).map(|m| list_items(m.as_str())).unwrap_or_default();
                    Some(Directive::Rule(Rule {
                        head: cap[1].to_string(),
                        body,
                    }))
                },
            },
            // PREF: <rest of line>
            DirectiveMatcher {
                name: "preference",
                regex: pattern(r"(?i)^PREF\s*:\s*(.+)$"),
                extract: |cap| Some(Directive::Preference(cap[1].trim().to_string())),
            },
        ]
    })
}

fn list_items(s: &str) -> Vec<Literal> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn bracket_items(s: &str) -> Vec<Literal> {
    let s = s.strip_prefix('[').unwrap_or(s);
    let s = s.strip_suffix(']').unwrap_or(s);
    list_items(s)
}

/// Match a single trimmed line against the directive table.
///
/// Returns `None` for lines that are not notation (comments, prose, typos).
pub fn match_directive(line: &str) -> Option<Directive> {
    let line = line.trim();
    matchers().iter().find_map(|m| {
        let cap = m.regex.captures(line)?;
        let directive = (m.extract)(&cap)?;
        tracing::trace!(directive = m.name, "matched notation line");
        Some(directive)
    })
}

/// Insertion-ordered token set used to synthesize the literal set.
#[derive(Default)]
struct SeenTokens {
    order: Vec<Literal>,
    seen: HashSet<Literal>,
}

impl SeenTokens {
    fn insert(&mut self, token: &str) {
        if self.seen.insert(token.to_string()) {
            self.order.push(token.to_string());
        }
    }

    fn extend<'a>(&mut self, tokens: impl IntoIterator<Item = &'a Literal>) {
        for token in tokens {
            self.insert(token);
        }
    }

    fn into_vec(self) -> Vec<Literal> {
        self.order
    }
}

pub fn parse_notation(text: &str) -> Result<Framework, NotationError> {
    if text.trim().is_empty() {
        return Err(NotationError::EmptyInput);
    }

    let mut framework = Framework::default();
    let mut explicit_literals: Option<Vec<Literal>> = None;
    let mut preference: Option<String> = None;
    let mut seen = SeenTokens::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match match_directive(line) {
            // `L: [ , ]` names nothing; keep synthesizing.
            Some(Directive::Literals(items)) if items.is_empty() => {}
            Some(Directive::Literals(items)) => {
                let mut unique = SeenTokens::default();
                unique.extend(&items);
                explicit_literals = Some(unique.into_vec());
            }
            Some(Directive::Assumptions(items)) => {
                seen.extend(&items);
                framework.assumptions = items;
            }
            Some(Directive::Contrary {
                assumption,
                contrary,
            }) => {
                seen.insert(&assumption);
                seen.insert(&contrary);
                framework.contraries.insert(assumption, contrary);
            }
            Some(Directive::Rule(rule)) => {
                seen.insert(&rule.head);
                seen.extend(&rule.body);
                framework.rules.push(rule);
            }
            Some(Directive::Preference(expr)) => {
                preference = Some(expr);
            }
            None => {
                tracing::trace!(line = index + 1, text = line, "skipping unrecognized notation line");
            }
        }
    }

    framework.literals = explicit_literals.unwrap_or_else(|| seen.into_vec());
    framework.preferences = preference
        .map(Preferences::Expression)
        .unwrap_or_default();
    Ok(framework)
}

/// Render a framework back into notation.
///
/// Rules are relabelled `r1..rN`. Structured (object) preferences have no
/// notation form and are omitted; so are empty literal/assumption lists.
pub fn format_notation(framework: &Framework) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !framework.literals.is_empty() {
        lines.push(format!("L: [{}]", framework.literals.join(",")));
    }
    if !framework.assumptions.is_empty() {
        lines.push(format!("A: [{}]", framework.assumptions.join(",")));
    }
    for (assumption, contrary) in &framework.contraries {
        lines.push(format!("C({assumption}): {contrary}"));
    }
    for (i, rule) in framework.rules.iter().enumerate() {
        if rule.is_fact() {
            lines.push(format!("[r{}]: {} <-", i + 1, rule.head));
        } else {
            lines.push(format!("[r{}]: {} <- {}", i + 1, rule.head, rule.body.join(",")));
        }
    }
    if let Some(expr) = framework.preferences.as_expression() {
        if !expr.trim().is_empty() {
            lines.push(format!("PREF: {}", expr.trim()));
        }
    }

    lines.join("\n")
}

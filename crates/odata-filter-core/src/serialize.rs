//! Deterministic rendering of a rule tree into filter text.
//!
//! Serialization is a pure function of the tree: no configuration, no
//! ambient state, and structurally identical trees always produce identical
//! text.

use crate::rule::{Rule, RuleGroup};

/// Render a rule tree as minimally parenthesized filter text.
///
/// Rendering rules:
/// - a clause renders as its text, never self-wrapped
/// - a group with no effective rules renders as nothing
/// - a group with one effective rule is transparent: it renders as that rule
///   alone, adding no parentheses of its own
/// - a group with several effective rules joins them with its condition
///   token; group children are parenthesized, clause children are not
/// - the root is never parenthesized
#[must_use]
pub fn serialize(group: &RuleGroup) -> String {
    let mut out = String::new();
    write_group(&mut out, group, false);
    out
}

fn write_rule(out: &mut String, rule: &Rule, wrap: bool) {
    match rule {
        Rule::Clause(text) => out.push_str(text),
        Rule::Group(group) => write_group(out, group, wrap),
    }
}

fn write_group(out: &mut String, group: &RuleGroup, wrap: bool) {
    // Empty rules contribute nothing; skipping them here keeps hand-built
    // trees from rendering dangling condition tokens or `()`.
    let rules: Vec<&Rule> = group.rules.iter().filter(|rule| !rule.is_empty()).collect();

    match rules.as_slice() {
        [] => {}
        [only] => {
            // A single-element group is transparent: no join and no
            // parentheses of its own. The parent's wrap request still
            // applies around the collapsed text.
            wrapped(out, wrap, |out| write_rule(out, only, false));
        }
        many => {
            wrapped(out, wrap, |out| {
                for (i, rule) in many.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                        out.push_str(group.condition.token());
                        out.push(' ');
                    }
                    write_rule(out, rule, true);
                }
            });
        }
    }
}

fn wrapped(out: &mut String, wrap: bool, write: impl FnOnce(&mut String)) {
    if wrap {
        out.push('(');
        write(out);
        out.push(')');
    } else {
        write(out);
    }
}

///
/// TESTS
///

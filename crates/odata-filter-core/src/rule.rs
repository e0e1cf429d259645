use crate::{condition::Condition, serialize::serialize};
use serde::{Deserialize, Serialize};
use std::{fmt, mem};

///
/// Rule
///
/// One entry in a group: either a clause (opaque text already in final
/// target syntax, e.g. `Id eq 1` or `contains(Name, 'a')`) or a nested
/// group carrying its own condition.
///
/// Clauses are atomic; the tree never parses or re-validates their contents.
/// Serde uses the untagged form, so a serialized tree reads as plain strings
/// and `{ condition, rules }` objects.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rule {
    Clause(String),
    Group(RuleGroup),
}

impl Rule {
    /// Build a clause rule, mapping empty text to `None` so optional rule
    /// sources thread through [`RuleGroup::merge`] as a no-op.
    #[must_use]
    pub fn clause(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self::Clause(text))
        }
    }

    /// True when the rule contributes no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Clause(text) => text.is_empty(),
            Self::Group(group) => group.is_empty(),
        }
    }
}

impl From<RuleGroup> for Rule {
    fn from(group: RuleGroup) -> Self {
        Self::Group(group)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clause(text) => f.write_str(text),
            Self::Group(group) => f.write_str(&serialize(group)),
        }
    }
}

///
/// RuleGroup
///
/// An ordered list of rules joined by a single condition. The root of every
/// filter is a group; nested groups only ever appear with a condition that
/// differs from their parent's, which is what keeps serialized output
/// minimally parenthesized.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RuleGroup {
    pub condition: Condition,
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    /// Create an empty group joined by `condition`.
    #[must_use]
    pub const fn new(condition: Condition) -> Self {
        Self {
            condition,
            rules: Vec::new(),
        }
    }

    /// True when the group renders no text: it holds no rules, or only
    /// empty ones. Merge-built trees never contain empty rules, so for them
    /// this is simply "no rules yet"; the recursion only matters for
    /// hand-built trees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(Rule::is_empty)
    }

    /// Merge a rule into the group under `condition`:
    /// - `None` (or an empty rule) leaves the group untouched
    /// - a differing condition with more than one existing rule demotes the
    ///   whole group into a nested child of a fresh root
    /// - a differing condition with at most one existing rule relabels the
    ///   group in place
    /// - the rule is then appended; a same-condition sub-group is spliced
    ///   into the rule list rather than nested
    ///
    /// Merging under the group's current condition is always a flat append.
    pub fn merge(&mut self, rule: Option<Rule>, condition: Condition) {
        let Some(rule) = rule else { return };
        if rule.is_empty() {
            return;
        }

        if condition != self.condition {
            if self.rules.len() > 1 {
                let demoted = mem::replace(self, Self::new(condition));
                self.rules.push(Rule::Group(demoted));
            } else {
                // Relabeling may expose a lone group child that now shares
                // our condition; re-appending it splices such a child and
                // keeps same-condition nesting out of the tree.
                self.condition = condition;
                if let Some(only) = self.rules.pop() {
                    self.append(only);
                }
            }
        }

        self.append(rule);
    }

    // Append one rule, flattening a sub-group that shares our condition so
    // same-condition nesting never exists in the tree.
    fn append(&mut self, rule: Rule) {
        match rule {
            Rule::Group(group) if group.condition == self.condition => {
                self.rules.extend(group.rules);
            }
            rule => self.rules.push(rule),
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

///
/// TESTS
///

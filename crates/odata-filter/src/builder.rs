use crate::{
    Field, Value,
    expr::{self, CompareOp},
};
use odata_filter_core::{Condition, Rule, RuleGroup, serialize};
use std::fmt;

///
/// Filter
///
/// A fluent builder that assembles an AND/OR rule tree and renders it as
/// OData v4 `$filter` text. Every method consumes and returns the builder,
/// so filters are written as a single chain:
///
/// `Filter::all().eq("TypeId", "1").contains("Name", "a")`
///
/// Comparisons join under the builder's construction condition; `and`, `or`
/// and `not` take finished rules (text, sub-builders, or callbacks) and may
/// regroup the tree when the condition switches.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    source: RuleGroup,
    condition: Condition,
}

impl Filter {
    /// Create a builder whose comparisons join with `and`.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_condition(Condition::And)
    }

    /// Create a builder with an explicit join condition for comparisons.
    #[must_use]
    pub const fn with_condition(condition: Condition) -> Self {
        Self {
            source: RuleGroup::new(condition),
            condition,
        }
    }

    /// An `and` builder: every added rule must hold.
    #[must_use]
    pub const fn all() -> Self {
        Self::with_condition(Condition::And)
    }

    /// An `or` builder: at least one added rule must hold.
    #[must_use]
    pub const fn any() -> Self {
        Self::with_condition(Condition::Or)
    }

    // ------------------------------------------------------------------
    // Logical joins
    // ------------------------------------------------------------------

    /// Merge a rule under `and`.
    #[must_use]
    pub fn and(mut self, rule: impl Into<RuleArg>) -> Self {
        self.source.merge(rule.into().into_rule(), Condition::And);
        self
    }

    /// Merge a rule under `or`.
    #[must_use]
    pub fn or(mut self, rule: impl Into<RuleArg>) -> Self {
        self.source.merge(rule.into().into_rule(), Condition::Or);
        self
    }

    /// Merge `not (rule)` under the builder's default condition.
    ///
    /// The rule is reduced to text first; empty input is a no-op.
    #[must_use]
    pub fn not(mut self, rule: impl Into<RuleArg>) -> Self {
        let negated = rule.into().into_text().map(|text| expr::negate(&text));
        self.source
            .merge(negated.and_then(Rule::clause), self.condition);
        self
    }

    // ------------------------------------------------------------------
    // Comparisons
    // ------------------------------------------------------------------

    /// `field eq value`
    #[must_use]
    pub fn eq(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.compare(field, CompareOp::Eq, value)
    }

    /// `field ne value`
    #[must_use]
    pub fn ne(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.compare(field, CompareOp::Ne, value)
    }

    /// `field gt value`
    #[must_use]
    pub fn gt(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.compare(field, CompareOp::Gt, value)
    }

    /// `field ge value`
    #[must_use]
    pub fn ge(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.compare(field, CompareOp::Ge, value)
    }

    /// `field lt value`
    #[must_use]
    pub fn lt(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.compare(field, CompareOp::Lt, value)
    }

    /// `field le value`
    #[must_use]
    pub fn le(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.compare(field, CompareOp::Le, value)
    }

    // ------------------------------------------------------------------
    // Membership
    // ------------------------------------------------------------------

    /// Membership test, expanded to `field eq a or field eq b` and added as
    /// a single rule. An empty list is a no-op.
    #[must_use]
    pub fn in_list<I>(mut self, field: impl Into<Field>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let joined = expr::membership(&field.into(), &values);
        self.source.merge(joined.and_then(Rule::clause), self.condition);
        self
    }

    /// Negated membership: `not (field eq a or field eq b)`.
    #[must_use]
    pub fn not_in_list<I>(mut self, field: impl Into<Field>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let negated = expr::membership(&field.into(), &values).map(|text| expr::negate(&text));
        self.source
            .merge(negated.and_then(Rule::clause), self.condition);
        self
    }

    // ------------------------------------------------------------------
    // String functions
    // ------------------------------------------------------------------

    /// `contains(field, value)`
    #[must_use]
    pub fn contains(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.call("contains", field, value)
    }

    /// `startswith(field, value)`
    #[must_use]
    pub fn starts_with(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.call("startswith", field, value)
    }

    /// `endswith(field, value)`
    #[must_use]
    pub fn ends_with(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.call("endswith", field, value)
    }

    /// Add `name(field, args…)` as a rule, for functions without a dedicated
    /// method. With `reversed` the field trails the arguments, as in
    /// `substringof('Alfreds', CompanyName)`.
    #[must_use]
    pub fn function<I>(
        mut self,
        name: &str,
        field: impl Into<Field>,
        args: I,
        reversed: bool,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        let clause = expr::function_call(name, &field.into(), &args, reversed);
        self.source.merge(Rule::clause(clause), self.condition);
        self
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// True when no rules have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Render as `$filter` text; an empty builder renders as `""`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        serialize(&self.source)
    }

    /// Consume the builder and expose the assembled rule tree.
    #[must_use]
    pub fn into_group(self) -> RuleGroup {
        self.source
    }

    fn into_rule(self) -> Option<Rule> {
        if self.source.is_empty() {
            None
        } else {
            Some(Rule::Group(self.source))
        }
    }

    fn compare(mut self, field: impl Into<Field>, op: CompareOp, value: impl Into<Value>) -> Self {
        let clause = expr::compare(&field.into(), op, &value.into());
        self.source.merge(Rule::clause(clause), self.condition);
        self
    }

    fn call(mut self, name: &str, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        let clause = expr::function_call(name, &field.into(), &[value.into()], false);
        self.source.merge(Rule::clause(clause), self.condition);
        self
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Rebuild a filter around a previously assembled tree, e.g. one persisted
/// through serde. Comparisons resume joining under the tree's condition.
impl From<RuleGroup> for Filter {
    fn from(source: RuleGroup) -> Self {
        Self {
            condition: source.condition,
            source,
        }
    }
}

///
/// RuleArg
///
/// Anything accepted where a rule is expected: finished clause text, a
/// sub-builder, or a callback that receives a fresh `and` builder.
///

pub enum RuleArg {
    Builder(Filter),
    Callback(Box<dyn FnOnce(Filter) -> Filter>),
    Text(String),
}

impl RuleArg {
    /// Reduce to a structural rule; empty inputs reduce to `None`.
    fn into_rule(self) -> Option<Rule> {
        match self {
            Self::Builder(filter) => filter.into_rule(),
            Self::Callback(callback) => callback(Filter::new()).into_rule(),
            Self::Text(text) => Rule::clause(text),
        }
    }

    /// Reduce to rendered text; empty inputs reduce to `None`.
    fn into_text(self) -> Option<String> {
        self.into_rule().map(|rule| rule.to_string())
    }
}

/// Wrap a callback for use where a rule is expected. The callback receives
/// a fresh `and` builder:
///
/// `filter.or(group(|q| q.eq("Type/Id", 2).eq("Type/Id", 3)))`
#[must_use]
pub fn group<F>(callback: F) -> RuleArg
where
    F: FnOnce(Filter) -> Filter + 'static,
{
    RuleArg::Callback(Box::new(callback))
}

impl From<&str> for RuleArg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RuleArg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Filter> for RuleArg {
    fn from(filter: Filter) -> Self {
        Self::Builder(filter)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builders_render_empty_text() {
        assert!(Filter::new().is_empty());
        assert_eq!(Filter::new().to_query_string(), "");
        assert_eq!(Filter::any().to_string(), "");
    }

    #[test]
    fn comparisons_join_under_the_construction_condition() {
        let and = Filter::all().eq("a", 1).eq("b", 2);
        assert_eq!(and.to_query_string(), "a eq 1 and b eq 2");

        let or = Filter::any().eq("a", 1).eq("b", 2);
        assert_eq!(or.to_query_string(), "a eq 1 or b eq 2");
    }

    #[test]
    fn and_accepts_text_builders_and_callbacks() {
        let from_text = Filter::new().eq("a", 1).and("b eq 2");
        assert_eq!(from_text.to_query_string(), "a eq 1 and b eq 2");

        let from_builder = Filter::new().eq("a", 1).and(Filter::new().eq("b", 2));
        assert_eq!(from_builder.to_query_string(), "a eq 1 and b eq 2");

        let from_callback = Filter::new().eq("a", 1).and(group(|q| q.eq("b", 2)));
        assert_eq!(from_callback.to_query_string(), "a eq 1 and b eq 2");
    }

    #[test]
    fn empty_rule_inputs_are_no_ops() {
        let filter = Filter::new()
            .eq("a", 1)
            .and("")
            .or(Filter::new())
            .not(String::new())
            .and(group(|q| q));
        assert_eq!(filter.to_query_string(), "a eq 1");
    }

    #[test]
    fn switching_condition_regroups_existing_rules() {
        let filter = Filter::all().eq("a", 1).eq("b", 2).or("c eq 3");
        assert_eq!(filter.to_query_string(), "(a eq 1 and b eq 2) or c eq 3");
    }

    #[test]
    fn switching_condition_with_one_rule_relabels() {
        let filter = Filter::any().eq("a", 1).and("b eq 2");
        assert_eq!(filter.to_query_string(), "a eq 1 and b eq 2");
    }

    #[test]
    fn sub_builders_keep_their_grouping() {
        let filter = Filter::all()
            .eq("a", 1)
            .eq("b", 2)
            .or(Filter::all().eq("c", 3));
        assert_eq!(filter.to_query_string(), "(a eq 1 and b eq 2) or (c eq 3)");
    }

    #[test]
    fn same_condition_sub_builders_flatten() {
        let filter = Filter::all()
            .eq("a", 1)
            .and(group(|q| q.eq("b", 2).eq("c", 3)));
        assert_eq!(filter.to_query_string(), "a eq 1 and b eq 2 and c eq 3");
    }

    #[test]
    fn not_renders_the_rule_in_parens() {
        let filter = Filter::new().not("contains(Name, 'a')");
        assert_eq!(filter.to_query_string(), "not (contains(Name, 'a'))");

        let nested = Filter::new().not(group(|q| q.eq("a", 1).or("b eq 2")));
        assert_eq!(nested.to_query_string(), "not (a eq 1 or b eq 2)");
    }

    #[test]
    fn membership_expands_to_an_or_join() {
        let filter = Filter::new().in_list("Type/Id", [1, 2, 3]);
        assert_eq!(
            filter.to_query_string(),
            "Type/Id eq 1 or Type/Id eq 2 or Type/Id eq 3"
        );
    }

    #[test]
    fn membership_joins_siblings_as_one_leaf() {
        // The expansion is a single opaque leaf, so no parentheses are
        // introduced around it when siblings join in.
        let filter = Filter::new().eq("a", 1).in_list("Id", [1, 2]);
        assert_eq!(filter.to_query_string(), "a eq 1 and Id eq 1 or Id eq 2");
    }

    #[test]
    fn negated_membership_wraps_the_join() {
        let filter = Filter::new().not_in_list("Type/Id", [1, 2]);
        assert_eq!(
            filter.to_query_string(),
            "not (Type/Id eq 1 or Type/Id eq 2)"
        );
    }

    #[test]
    fn empty_membership_lists_are_no_ops() {
        let filter = Filter::new().eq("a", 1).in_list("Id", Vec::<i64>::new());
        assert_eq!(filter.to_query_string(), "a eq 1");

        let negated = Filter::new().eq("a", 1).not_in_list("Id", Vec::<i64>::new());
        assert_eq!(negated.to_query_string(), "a eq 1");
    }

    #[test]
    fn string_functions_render_with_the_field_first() {
        let filter = Filter::new()
            .contains("Name", "a")
            .starts_with("CompanyName", "Alfr")
            .ends_with("CompanyName", "s");
        assert_eq!(
            filter.to_query_string(),
            "contains(Name, 'a') and startswith(CompanyName, 'Alfr') and endswith(CompanyName, 's')"
        );
    }

    #[test]
    fn custom_functions_support_reversed_fields() {
        let filter = Filter::new().function("substringof", "CompanyName", ["Alfreds"], true);
        assert_eq!(
            filter.to_query_string(),
            "substringof('Alfreds', CompanyName)"
        );

        let plain = Filter::new().function("year", "Published", Vec::<i64>::new(), false);
        assert_eq!(plain.to_query_string(), "year(Published)");
    }

    #[test]
    fn into_group_exposes_the_tree() {
        let group = Filter::new().eq("a", 1).or("b eq 2").into_group();
        assert_eq!(group.condition, Condition::Or);
        assert_eq!(group.rules.len(), 2);
    }

    #[test]
    fn filters_resume_from_a_saved_tree() {
        let saved = Filter::new().eq("a", 1).or("b eq 2").into_group();

        let resumed = Filter::from(saved).eq("c", 3);
        assert_eq!(resumed.to_query_string(), "a eq 1 or b eq 2 or c eq 3");
    }

    #[test]
    fn display_matches_to_query_string() {
        let filter = Filter::new().eq("a", 1).or("b eq 2");
        assert_eq!(filter.to_string(), filter.to_query_string());
    }
}

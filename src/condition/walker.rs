//! Field and predicate extraction over parsed condition trees
//!
//! Extraction never judges names; unknown fields and predicates are
//! collected like any other so the validators can report all of them.

use crate::condition::ast::{Clause, Condition, Rule, RuleEntry};
use ahash::AHashSet;

/// Field names referenced by `conditions`, first occurrence first, no duplicates
pub fn fields_of(conditions: &[Condition]) -> Vec<String> {
    let mut fields = Vec::new();
    for condition in conditions {
        collect_fields(condition, &mut fields);
    }
    dedup(fields)
}

/// Predicate names referenced by `conditions`, first occurrence first, no duplicates
pub fn predicates_of(conditions: &[Condition]) -> Vec<String> {
    let mut predicates = Vec::new();
    for condition in conditions {
        collect_condition(condition, &mut predicates);
    }
    dedup(predicates)
}

/// Predicate names referenced by a single condition, duplicates kept.
///
/// Field nodes contribute the predicates of their rules. Each branch of a
/// top-level `and`/`or` is read as a rule map instead, so
/// `{or: [{is: 1}, {less: 10}]}` gives `["is", "less"]`. Validation goes
/// through [`predicates_of`], which reads those branches as conditions.
pub fn predicates_from_condition(condition: &Condition) -> Vec<String> {
    let mut predicates = Vec::new();
    for clause in &condition.clauses {
        match clause {
            Clause::All(branches) | Clause::Any(branches) => {
                for branch in branches {
                    collect_branch(branch, &mut predicates);
                }
            }
            Clause::Not(inner) => predicates.extend(predicates_from_condition(inner)),
            Clause::Field { rule, .. } => collect_rule(rule, &mut predicates),
        }
    }
    predicates
}

/// Predicate names referenced by a field's rule, duplicates kept
pub fn predicates_from_rule(rule: &Rule) -> Vec<String> {
    let mut predicates = Vec::new();
    collect_rule(rule, &mut predicates);
    predicates
}

/// Emit the predicates of `operand` (if any), then `name` itself.
///
/// This post-order step lets a misspelled wrapper key surface on its own
/// while the predicates nested under it are still reported.
pub fn emit_after(name: &str, operand: Option<&Rule>, out: &mut Vec<String>) {
    if let Some(rule) = operand {
        collect_rule(rule, out);
    }
    out.push(name.to_string());
}

fn collect_fields(condition: &Condition, out: &mut Vec<String>) {
    for clause in &condition.clauses {
        match clause {
            Clause::All(branches) | Clause::Any(branches) => {
                for branch in branches {
                    collect_fields(branch, out);
                }
            }
            Clause::Not(inner) => collect_fields(inner, out),
            Clause::Field { name, .. } => out.push(name.clone()),
        }
    }
}

fn collect_condition(condition: &Condition, out: &mut Vec<String>) {
    for clause in &condition.clauses {
        match clause {
            Clause::All(branches) | Clause::Any(branches) => {
                for branch in branches {
                    collect_condition(branch, out);
                }
            }
            Clause::Not(inner) => collect_condition(inner, out),
            Clause::Field { rule, .. } => collect_rule(rule, out),
        }
    }
}

/// A branch of `and`/`or` is read as a rule map: its keys are predicates,
/// emitted after whatever they wrap. Combinators stay transparent.
fn collect_branch(condition: &Condition, out: &mut Vec<String>) {
    for clause in &condition.clauses {
        match clause {
            Clause::All(branches) | Clause::Any(branches) => {
                for branch in branches {
                    collect_branch(branch, out);
                }
            }
            Clause::Not(inner) => collect_branch(inner, out),
            Clause::Field { name, rule } => {
                let operand = rule.as_map().map(|_| rule);
                emit_after(name, operand, out);
            }
        }
    }
}

fn collect_rule(rule: &Rule, out: &mut Vec<String>) {
    match rule {
        Rule::Literal(name) => out.push(name.clone()),
        Rule::Map(entries) => {
            for entry in entries {
                match entry {
                    RuleEntry::Any(alternatives) => {
                        for alternative in alternatives {
                            collect_rule(alternative, out);
                        }
                    }
                    RuleEntry::Predicate { name, operand } => {
                        emit_after(name, operand.as_ref(), out);
                    }
                }
            }
        }
    }
}

/// Drop repeated names, keeping the first occurrence of each
pub(crate) fn dedup(names: Vec<String>) -> Vec<String> {
    let mut seen = AHashSet::with_capacity(names.len());
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::parser::{parse_condition, parse_conditions, parse_rule};
    use serde_json::json;

    fn conditions(values: serde_json::Value) -> Vec<Condition> {
        let values = values.as_array().unwrap().clone();
        parse_conditions(&values).unwrap()
    }

    #[test]
    fn test_two_field_rules() {
        let conditions = conditions(json!([
            { "firstName": "empty" },
            { "age": { "greater": 10 } },
            { "age": { "less": 20 } },
        ]));

        assert_eq!(fields_of(&conditions), ["firstName", "age"]);
        assert_eq!(predicates_of(&conditions), ["empty", "greater", "less"]);
    }

    #[test]
    fn test_repeated_rules_deduplicate() {
        let conditions = conditions(json!([
            { "firstName": "empty" },
            { "age": { "greater": 10 } },
            { "age": { "less": 20 } },
            { "firstName": "empty" },
        ]));

        assert_eq!(fields_of(&conditions), ["firstName", "age"]);
        assert_eq!(predicates_of(&conditions), ["empty", "greater", "less"]);
    }

    #[test]
    fn test_nested_predicates_come_first() {
        let conditions = conditions(json!([
            { "age": { "wtf": { "greater": 5, "less": 70 } } }
        ]));

        assert_eq!(fields_of(&conditions), ["age"]);
        assert_eq!(predicates_of(&conditions), ["greater", "less", "wtf"]);
    }

    #[test]
    fn test_fields_under_combinators() {
        let conditions = conditions(json!([
            { "lastName": "empty" },
            { "or": [{ "lastName": "empty" }, { "firstName": "empty" }] },
            { "not": { "and": [{ "password": "empty" }, { "age": "empty" }] } },
        ]));

        assert_eq!(fields_of(&conditions), ["lastName", "firstName", "password", "age"]);
    }

    #[test]
    fn test_rule_literal() {
        let rule = parse_rule(&json!("empty")).unwrap();
        assert_eq!(predicates_from_rule(&rule), ["empty"]);
    }

    #[test]
    fn test_rule_scalar_operand() {
        let rule = parse_rule(&json!({ "greater": 5 })).unwrap();
        assert_eq!(predicates_from_rule(&rule), ["greater"]);
    }

    #[test]
    fn test_rule_or_is_not_a_predicate() {
        let rule = parse_rule(&json!({ "or": [{ "is": 10 }, { "is": 25 }] })).unwrap();
        assert_eq!(predicates_from_rule(&rule), ["is", "is"]);

        let rule = parse_rule(&json!({ "or": ["empty", { "less": 3 }], "greater": 1 })).unwrap();
        assert_eq!(predicates_from_rule(&rule), ["empty", "less", "greater"]);
    }

    #[test]
    fn test_condition_keeps_duplicates() {
        let condition = parse_condition(&json!({
            "firstName": { "or": [{ "is": 10 }, { "is": 25 }] }
        }))
        .unwrap();
        assert_eq!(predicates_from_condition(&condition), ["is", "is"]);
    }

    #[test]
    fn test_condition_combinator_branches() {
        let any = parse_condition(&json!({ "or": [{ "is": 1 }, { "less": 10 }] })).unwrap();
        assert_eq!(predicates_from_condition(&any), ["is", "less"]);

        let all = parse_condition(&json!({ "and": [{ "is": 1 }, { "less": 10 }] })).unwrap();
        assert_eq!(predicates_from_condition(&all), ["is", "less"]);
    }

    #[test]
    fn test_branch_keys_wrap_nested_predicates() {
        let condition = parse_condition(&json!({
            "and": [{ "between": { "greater": 1, "less": 5 } }, { "not": { "empty": true } }]
        }))
        .unwrap();
        assert_eq!(predicates_from_condition(&condition), ["greater", "less", "between", "empty"]);
    }

    #[test]
    fn test_combinator_branches_are_conditions_when_validating() {
        let conditions = conditions(json!([
            { "or": [{ "firstName": "epty" }, { "password": { "greater": 5 } }] }
        ]));
        assert_eq!(predicates_of(&conditions), ["epty", "greater"]);

        let conditions = self::conditions(json!([
            { "and": [{ "firstName": "empty" }, { "age": { "between": { "less": 3 } } }] }
        ]));
        assert_eq!(predicates_of(&conditions), ["empty", "less", "between"]);
    }

    #[test]
    fn test_nesting_does_not_change_predicates() {
        let plain = conditions(json!([{ "not": { "firstName": "empty" } }]));
        let nested = conditions(json!([{ "not": { "or": [{ "firstName": "empty" }] } }]));
        assert_eq!(predicates_of(&plain), ["empty"]);
        assert_eq!(predicates_of(&nested), ["empty"]);
    }

    #[test]
    fn test_literal_or_under_not() {
        let conditions = conditions(json!([{ "not": { "firstName": "or" } }]));
        assert_eq!(predicates_of(&conditions), ["or"]);
        assert_eq!(fields_of(&conditions), ["firstName"]);
    }

    #[test]
    fn test_emit_after() {
        let mut out = Vec::new();
        emit_after("wtf", None, &mut out);
        assert_eq!(out, ["wtf"]);

        let inner = parse_rule(&json!({ "innerK": 1 })).unwrap();
        let mut out = Vec::new();
        emit_after("k", Some(&inner), &mut out);
        assert_eq!(out, ["innerK", "k"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let names = ["b", "a", "b", "c", "a"].map(String::from).to_vec();
        assert_eq!(dedup(names), ["b", "a", "c"]);
    }
}

//! Typed trees for conditions and rules

/// Key of the `and` combinator
pub const AND: &str = "and";
/// Key of the `or` combinator, at condition level and inside rule maps
pub const OR: &str = "or";
/// Key of the `not` combinator
pub const NOT: &str = "not";

/// A node of the boolean condition tree.
///
/// Clauses keep the key order of the source object. A node normally holds
/// either a single combinator clause or only field clauses, but mixed
/// objects are accepted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Condition {
    pub clauses: Vec<Clause>,
}

/// One key of a condition object
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `and: [...]`
    All(Vec<Condition>),
    /// `or: [...]`
    Any(Vec<Condition>),
    /// `not: {...}`
    Not(Box<Condition>),
    /// `fieldName: <rule>`
    Field { name: String, rule: Rule },
}

/// The value attached to a field
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Bare scalar, read as a single predicate name
    Literal(String),
    /// Predicate-name keys in source order
    Map(Vec<RuleEntry>),
}

/// One key of a rule map
#[derive(Debug, Clone, PartialEq)]
pub enum RuleEntry {
    /// Rule-level `or: [...]`, each alternative walked on its own
    Any(Vec<Rule>),
    /// A predicate key. `operand` is set only when the value is itself a
    /// rule map; scalar operands carry no predicate names.
    Predicate { name: String, operand: Option<Rule> },
}

impl Condition {
    /// Build a single-field condition
    pub fn field(name: impl Into<String>, rule: Rule) -> Self {
        Condition {
            clauses: vec![Clause::Field {
                name: name.into(),
                rule,
            }],
        }
    }

    /// Whether this node is a single combinator clause
    pub fn is_combinator(&self) -> bool {
        matches!(
            self.clauses.as_slice(),
            [Clause::All(_) | Clause::Any(_) | Clause::Not(_)]
        )
    }
}

impl Rule {
    /// Shorthand for a literal rule
    pub fn literal(value: impl Into<String>) -> Self {
        Rule::Literal(value.into())
    }

    /// The nested rule map, if this is one
    pub fn as_map(&self) -> Option<&[RuleEntry]> {
        match self {
            Rule::Map(entries) => Some(entries),
            Rule::Literal(_) => None,
        }
    }
}

/// Whether `key` names a condition-level combinator
pub fn is_combinator_key(key: &str) -> bool {
    matches!(key, AND | OR | NOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinator_keys() {
        assert!(is_combinator_key("and"));
        assert!(is_combinator_key("or"));
        assert!(is_combinator_key("not"));
        assert!(!is_combinator_key("is"));
        assert!(!is_combinator_key("OR"));
    }

    #[test]
    fn test_is_combinator() {
        let field = Condition::field("age", Rule::literal("empty"));
        assert!(!field.is_combinator());

        let negated = Condition {
            clauses: vec![Clause::Not(Box::new(field.clone()))],
        };
        assert!(negated.is_combinator());

        let mixed = Condition {
            clauses: vec![Clause::Any(vec![field.clone()]), field.clauses[0].clone()],
        };
        assert!(!mixed.is_combinator());
    }
}

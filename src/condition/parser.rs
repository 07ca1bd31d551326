//! Condition and rule parser
//!
//! Turns raw JSON values into [`Condition`] / [`Rule`] trees. Shape checks
//! happen here once; the walker never looks at raw JSON.

use crate::condition::ast::{Clause, Condition, Rule, RuleEntry, AND, NOT, OR};
use crate::error::StructureError;
use serde_json::{Map, Value};

/// How the parser reacts to a malformed node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Fail on the first malformed node
    #[default]
    Strict,
    /// Log the malformed node and leave it out of the tree
    Lenient,
}

/// Parse a single condition object in strict mode
pub fn parse_condition(value: &Value) -> Result<Condition, StructureError> {
    Parser::default().condition(value, "")
}

/// Parse a list of conditions in strict mode. Paths are rooted at the index.
pub fn parse_conditions(values: &[Value]) -> Result<Vec<Condition>, StructureError> {
    Parser::default().conditions(values)
}

/// Parse the rule attached to a field in strict mode
pub fn parse_rule(value: &Value) -> Result<Rule, StructureError> {
    Parser::default().rule(value, "")
}

/// Parser carrying its [`ParseMode`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    mode: ParseMode,
}

impl Parser {
    pub fn new(mode: ParseMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse a list of conditions; dropped entries vanish in lenient mode
    pub fn conditions(&self, values: &[Value]) -> Result<Vec<Condition>, StructureError> {
        let mut conditions = Vec::with_capacity(values.len());
        for (i, value) in values.iter().enumerate() {
            let path = child_path("", &i.to_string());
            if let Some(condition) = self.recover(self.condition(value, &path))? {
                conditions.push(condition);
            }
        }
        Ok(conditions)
    }

    /// Parse one condition node found at `path`
    pub fn condition(&self, value: &Value, path: &str) -> Result<Condition, StructureError> {
        let object = value.as_object().ok_or_else(|| StructureError::ExpectedObject {
            path: path.to_string(),
        })?;

        let mut clauses = Vec::with_capacity(object.len());
        for (key, child) in object {
            let child_path = child_path(path, key);
            let clause = match key.as_str() {
                AND => self.combinator(AND, child, &child_path),
                OR => self.combinator(OR, child, &child_path),
                NOT => self.negation(child, &child_path),
                _ => self.rule(child, &child_path).map(|rule| Clause::Field {
                    name: key.clone(),
                    rule,
                }),
            };
            if let Some(clause) = self.recover(clause)? {
                clauses.push(clause);
            }
        }

        Ok(Condition { clauses })
    }

    /// Parse a field's rule found at `path`
    pub fn rule(&self, value: &Value, path: &str) -> Result<Rule, StructureError> {
        match value {
            Value::Object(map) => self.rule_map(map, path).map(Rule::Map),
            Value::Array(_) => Err(StructureError::InvalidRule {
                path: path.to_string(),
            }),
            scalar => Ok(Rule::Literal(literal_name(scalar))),
        }
    }

    fn rule_map(
        &self,
        map: &Map<String, Value>,
        path: &str,
    ) -> Result<Vec<RuleEntry>, StructureError> {
        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            let entry_path = child_path(path, key);
            let entry = if key == OR {
                self.rule_alternatives(value, &entry_path)
            } else {
                self.predicate(key, value, &entry_path)
            };
            if let Some(entry) = self.recover(entry)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn rule_alternatives(&self, value: &Value, path: &str) -> Result<RuleEntry, StructureError> {
        let items = value.as_array().ok_or_else(|| StructureError::ExpectedArray {
            combinator: OR,
            path: path.to_string(),
        })?;

        let mut alternatives = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let item_path = child_path(path, &i.to_string());
            if let Some(rule) = self.recover(self.rule(item, &item_path))? {
                alternatives.push(rule);
            }
        }
        Ok(RuleEntry::Any(alternatives))
    }

    fn predicate(&self, name: &str, value: &Value, path: &str) -> Result<RuleEntry, StructureError> {
        // Array operands (e.g. ranges) carry no predicate names
        let operand = match value {
            Value::Object(map) => Some(Rule::Map(self.rule_map(map, path)?)),
            _ => None,
        };
        Ok(RuleEntry::Predicate {
            name: name.to_string(),
            operand,
        })
    }

    fn combinator(
        &self,
        combinator: &'static str,
        value: &Value,
        path: &str,
    ) -> Result<Clause, StructureError> {
        let items = value.as_array().ok_or_else(|| StructureError::ExpectedArray {
            combinator,
            path: path.to_string(),
        })?;
        if items.is_empty() {
            return Err(StructureError::EmptyCombinator {
                combinator,
                path: path.to_string(),
            });
        }

        let mut branches = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let item_path = child_path(path, &i.to_string());
            if let Some(branch) = self.recover(self.condition(item, &item_path))? {
                branches.push(branch);
            }
        }

        Ok(if combinator == AND {
            Clause::All(branches)
        } else {
            Clause::Any(branches)
        })
    }

    fn negation(&self, value: &Value, path: &str) -> Result<Clause, StructureError> {
        if value.is_array() {
            return Err(StructureError::ExpectedSingle {
                path: path.to_string(),
            });
        }
        let inner = self.condition(value, path)?;
        Ok(Clause::Not(Box::new(inner)))
    }

    pub(crate) fn recover<T>(
        &self,
        result: Result<T, StructureError>,
    ) -> Result<Option<T>, StructureError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.mode == ParseMode::Lenient => {
                tracing::warn!(path = err.path(), error = %err, "skipping malformed node");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Predicate name spelled by a scalar rule
fn literal_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Append a JSON-pointer segment to `path`
fn child_path(path: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{}/{}", path, escaped)
}

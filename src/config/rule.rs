//! Rule definition structures

use crate::condition::{Condition, Parser};
use crate::error::StructureError;
use serde::Deserialize;
use serde_json::Value;

/// One rule of a rule set
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// Condition tree deciding when the rule fires
    pub conditions: Value,
    /// Action side of the rule, carried along but never inspected
    #[serde(default)]
    pub event: Option<Value>,
}

/// Ordered list of rule definitions
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    pub rules: Vec<RuleDefinition>,
}

impl RuleSet {
    pub fn new(rules: Vec<RuleDefinition>) -> Self {
        Self { rules }
    }

    /// Parse every rule's `conditions`. Error paths look like `/2/conditions/or`.
    pub fn parse_conditions(&self, parser: &Parser) -> Result<Vec<Condition>, StructureError> {
        let mut conditions = Vec::with_capacity(self.rules.len());
        for (i, rule) in self.rules.iter().enumerate() {
            let path = format!("/{}/conditions", i);
            if let Some(condition) = parser.recover(parser.condition(&rule.conditions, &path))? {
                conditions.push(condition);
            }
        }
        Ok(conditions)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<RuleDefinition>> for RuleSet {
    fn from(rules: Vec<RuleDefinition>) -> Self {
        Self::new(rules)
    }
}

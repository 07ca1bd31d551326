//! Whole-rule-set validation

use crate::condition::{Condition, ParseMode, Parser};
use crate::config::{RuleSet, Schema};
use crate::error::{Result, RuleValidationError};
use crate::registry::{FieldRegistry, NameRegistry};
use crate::validation::fields::invalid_fields;
use crate::validation::predicates::invalid_predicates;

/// Validate every rule of `rules` in strict mode.
///
/// Both checks always run. A failure carries every unknown field and every
/// unknown predicate; structural errors stop validation before either check.
pub fn validate<P>(rules: &RuleSet, schema: &Schema, predicates: &P) -> Result<()>
where
    P: NameRegistry + ?Sized,
{
    validate_with(rules, schema, predicates, ParseMode::Strict)
}

/// [`validate`] with an explicit parse mode
pub fn validate_with<P>(
    rules: &RuleSet,
    schema: &Schema,
    predicates: &P,
    mode: ParseMode,
) -> Result<()>
where
    P: NameRegistry + ?Sized,
{
    let conditions = rules.parse_conditions(&Parser::new(mode))?;
    let fields = FieldRegistry::from(schema);
    tracing::debug!(
        rules = rules.len(),
        fields = fields.len(),
        "validating rule set"
    );
    validate_conditions(&conditions, &fields, predicates)
}

/// Run both validators over already parsed conditions and merge their findings
pub fn validate_conditions<F, P>(
    conditions: &[Condition],
    fields: &F,
    predicates: &P,
) -> Result<()>
where
    F: NameRegistry + ?Sized,
    P: NameRegistry + ?Sized,
{
    let unknown_fields = invalid_fields(conditions, fields);
    let unknown_predicates = invalid_predicates(conditions, predicates);

    let err = match (unknown_fields.is_empty(), unknown_predicates.is_empty()) {
        (true, true) => return Ok(()),
        (false, true) => RuleValidationError::UnknownFields(unknown_fields),
        (true, false) => RuleValidationError::UnknownPredicates(unknown_predicates),
        (false, false) => RuleValidationError::Rejected {
            fields: unknown_fields,
            predicates: unknown_predicates,
        },
    };

    tracing::debug!(error = %err, "rule set rejected");
    Err(err)
}

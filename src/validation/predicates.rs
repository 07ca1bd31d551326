//! Predicate validation against the engine's predicate registry

use crate::condition::{predicates_of, Condition};
use crate::error::{Result, RuleValidationError};
use crate::registry::NameRegistry;

/// Predicates referenced by `conditions` that the registry does not know.
/// First occurrence order, no duplicates.
pub fn invalid_predicates<R>(conditions: &[Condition], registry: &R) -> Vec<String>
where
    R: NameRegistry + ?Sized,
{
    predicates_of(conditions)
        .into_iter()
        .filter(|predicate| !registry.contains(predicate))
        .collect()
}

/// Fail with [`RuleValidationError::UnknownPredicates`] if any predicate is unknown
pub fn validate_predicates<R>(conditions: &[Condition], registry: &R) -> Result<()>
where
    R: NameRegistry + ?Sized,
{
    let invalid = invalid_predicates(conditions, registry);
    if invalid.is_empty() {
        return Ok(());
    }

    tracing::debug!(
        count = invalid.len(),
        predicates = ?invalid,
        "unknown predicates in conditions"
    );
    Err(RuleValidationError::UnknownPredicates(invalid))
}

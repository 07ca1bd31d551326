//! Field validation against a schema's field registry

use crate::condition::{fields_of, Condition};
use crate::error::{Result, RuleValidationError};
use crate::registry::NameRegistry;

/// Fields referenced by `conditions` that the registry does not declare.
/// First occurrence order, no duplicates.
pub fn invalid_fields<R>(conditions: &[Condition], registry: &R) -> Vec<String>
where
    R: NameRegistry + ?Sized,
{
    fields_of(conditions)
        .into_iter()
        .filter(|field| !registry.contains(field))
        .collect()
}

/// Fail with [`RuleValidationError::UnknownFields`] if any field is undeclared
pub fn validate_fields<R>(conditions: &[Condition], registry: &R) -> Result<()>
where
    R: NameRegistry + ?Sized,
{
    let invalid = invalid_fields(conditions, registry);
    if invalid.is_empty() {
        return Ok(());
    }

    tracing::debug!(count = invalid.len(), fields = ?invalid, "unknown fields in conditions");
    Err(RuleValidationError::UnknownFields(invalid))
}

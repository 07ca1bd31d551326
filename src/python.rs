//! Python bindings
//!
//! List and validate helpers over JSON-like Python values (dicts, lists,
//! strings, numbers). The predicate registry can be configured once per process with
//! `init_predicates`, or passed explicitly to each call.

use crate::condition::{self, Condition, ParseMode, Parser};
use crate::config::{
    deserialize_conditions, deserialize_rule_set, deserialize_schema, json_from_py,
};
use crate::registry::{install, FieldRegistry, PredicateRegistry, SharedRegistry};
use crate::validation;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Process-wide predicate registry
static CACHED_PREDICATES: SharedRegistry<PredicateRegistry> = SharedRegistry::new();

// ============================================================================
// Helper Functions
// ============================================================================

fn parser(lenient: bool) -> Parser {
    Parser::new(if lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    })
}

fn conditions_from_py(conditions: &Bound<'_, PyAny>, lenient: bool) -> PyResult<Vec<Condition>> {
    let values = deserialize_conditions(conditions)?;
    Ok(parser(lenient).conditions(&values)?)
}

/// Run `f` against explicit predicate names, or the cached registry when
/// none are given
fn with_predicates<T>(
    names: Option<Vec<String>>,
    f: impl FnOnce(&PredicateRegistry) -> T,
) -> PyResult<T> {
    match names {
        Some(names) => Ok(f(&PredicateRegistry::new(names))),
        None => {
            let cached = CACHED_PREDICATES.get().ok_or_else(|| {
                PyRuntimeError::new_err("Predicates not initialized. Call init_predicates() first.")
            })?;
            let registry = cached.read();
            Ok(f(&*registry))
        }
    }
}

// ============================================================================
// Python Functions
// ============================================================================

/// Initialize the process-wide predicate registry (call once at startup)
///
/// # Arguments
/// * `predicates` - Predicate names the engine implements (default: the builtin catalogue)
#[pyfunction]
#[pyo3(signature = (predicates=None))]
fn init_predicates(predicates: Option<Vec<String>>) -> PyResult<()> {
    let registry = match predicates {
        Some(names) => PredicateRegistry::new(names),
        None => PredicateRegistry::builtin(),
    };
    install(&CACHED_PREDICATES, registry);
    Ok(())
}

/// Check if the predicate registry is initialized
#[pyfunction]
fn is_predicates_initialized() -> bool {
    CACHED_PREDICATES.get().is_some()
}

/// List every field referenced by `conditions`, without duplicates
#[pyfunction]
#[pyo3(signature = (conditions, lenient=false))]
fn list_all_fields(conditions: &Bound<'_, PyAny>, lenient: bool) -> PyResult<Vec<String>> {
    let conditions = conditions_from_py(conditions, lenient)?;
    Ok(condition::fields_of(&conditions))
}

/// List every predicate referenced by `conditions`, without duplicates
#[pyfunction]
#[pyo3(signature = (conditions, lenient=false))]
fn list_all_predicates(conditions: &Bound<'_, PyAny>, lenient: bool) -> PyResult<Vec<String>> {
    let conditions = conditions_from_py(conditions, lenient)?;
    Ok(condition::predicates_of(&conditions))
}

/// List the fields of `conditions` missing from `schema["properties"]`
#[pyfunction]
#[pyo3(signature = (conditions, schema, lenient=false))]
fn list_invalid_fields(
    conditions: &Bound<'_, PyAny>,
    schema: &Bound<'_, PyAny>,
    lenient: bool,
) -> PyResult<Vec<String>> {
    let conditions = conditions_from_py(conditions, lenient)?;
    let fields = FieldRegistry::from(&deserialize_schema(schema)?);
    Ok(validation::invalid_fields(&conditions, &fields))
}

/// List the predicates of `conditions` missing from the predicate registry
#[pyfunction]
#[pyo3(signature = (conditions, predicates=None, lenient=false))]
fn list_invalid_predicates(
    conditions: &Bound<'_, PyAny>,
    predicates: Option<Vec<String>>,
    lenient: bool,
) -> PyResult<Vec<String>> {
    let conditions = conditions_from_py(conditions, lenient)?;
    with_predicates(predicates, |registry| {
        validation::invalid_predicates(&conditions, registry)
    })
}

/// Predicates referenced by a single field rule, duplicates kept
///
/// # Raises
/// ValueError if a rule-level `or` does not hold a list (unless `lenient`)
#[pyfunction]
#[pyo3(signature = (rule, lenient=false))]
fn predicates_from_rule(rule: &Bound<'_, PyAny>, lenient: bool) -> PyResult<Vec<String>> {
    let rule = parser(lenient).rule(&json_from_py(rule)?, "")?;
    Ok(condition::predicates_from_rule(&rule))
}

/// Predicates referenced by a single condition, duplicates kept
#[pyfunction]
#[pyo3(signature = (condition, lenient=false))]
fn predicates_from_condition(
    condition: &Bound<'_, PyAny>,
    lenient: bool,
) -> PyResult<Vec<String>> {
    let condition = parser(lenient).condition(&json_from_py(condition)?, "")?;
    Ok(condition::predicates_from_condition(&condition))
}

/// Raise ValueError listing every field of `conditions` the schema lacks
#[pyfunction]
fn validate_condition_fields(
    conditions: &Bound<'_, PyAny>,
    schema: &Bound<'_, PyAny>,
) -> PyResult<()> {
    let conditions = conditions_from_py(conditions, false)?;
    let fields = FieldRegistry::from(&deserialize_schema(schema)?);
    Ok(validation::validate_fields(&conditions, &fields)?)
}

/// Raise ValueError listing every unknown predicate of `conditions`
#[pyfunction]
#[pyo3(signature = (conditions, predicates=None))]
fn validate_predicates(
    conditions: &Bound<'_, PyAny>,
    predicates: Option<Vec<String>>,
) -> PyResult<()> {
    let conditions = conditions_from_py(conditions, false)?;
    let result = with_predicates(predicates, |registry| {
        validation::validate_predicates(&conditions, registry)
    })?;
    Ok(result?)
}

/// Validate a whole rule set: `[{"conditions": ..., "event": ...}, ...]`
///
/// # Raises
/// ValueError carrying every unknown field and predicate, or the first
/// structural problem found
#[pyfunction]
#[pyo3(signature = (rules, schema, predicates=None, lenient=false))]
fn validate(
    rules: &Bound<'_, PyAny>,
    schema: &Bound<'_, PyAny>,
    predicates: Option<Vec<String>>,
    lenient: bool,
) -> PyResult<()> {
    let rules = deserialize_rule_set(rules)?;
    let schema = deserialize_schema(schema)?;
    let mode = parser(lenient).mode();
    let result = with_predicates(predicates, |registry| {
        validation::validate_with(&rules, &schema, registry, mode)
    })?;
    Ok(result?)
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn rule_validation_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_predicates, m)?)?;
    m.add_function(wrap_pyfunction!(is_predicates_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(list_all_fields, m)?)?;
    m.add_function(wrap_pyfunction!(list_all_predicates, m)?)?;
    m.add_function(wrap_pyfunction!(list_invalid_fields, m)?)?;
    m.add_function(wrap_pyfunction!(list_invalid_predicates, m)?)?;
    m.add_function(wrap_pyfunction!(predicates_from_rule, m)?)?;
    m.add_function(wrap_pyfunction!(predicates_from_condition, m)?)?;
    m.add_function(wrap_pyfunction!(validate_condition_fields, m)?)?;
    m.add_function(wrap_pyfunction!(validate_predicates, m)?)?;
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    Ok(())
}

//! Rule Validation Core - static checks for declarative rule definitions
//!
//! Rules are authored as data: a condition tree of `and`/`or`/`not`
//! combinators over field-keyed predicate maps. This crate walks those
//! trees, extracts every referenced field and predicate name, and checks
//! them against a schema's fields and the engine's predicate registry.
//!
//! ```
//! use rule_validation_core::{config, validate, PredicateRegistry};
//!
//! let rules = config::rule_set_from_json(
//!     r#"[{"conditions": {"age": {"greater": 10}}, "event": {"type": "hide"}}]"#,
//! )
//! .unwrap();
//! let schema = config::schema_from_json(r#"{"properties": {"age": {"type": "integer"}}}"#).unwrap();
//!
//! assert!(validate(&rules, &schema, &PredicateRegistry::builtin()).is_ok());
//! ```
//!
//! With the `python` feature the same operations are exported as a Python
//! extension module.

pub mod condition;
pub mod config;
pub mod error;
pub mod registry;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use condition::{
    fields_of, parse_condition, parse_conditions, parse_rule, predicates_from_condition,
    predicates_from_rule, predicates_of, Condition, ParseMode, Parser, Rule,
};
pub use config::{RuleDefinition, RuleSet, Schema};
pub use error::{Result, RuleValidationError, StructureError};
pub use registry::{FieldRegistry, NameRegistry, PredicateRegistry, BUILTIN_PREDICATES};
pub use validation::{
    invalid_fields, invalid_predicates, validate, validate_conditions, validate_fields,
    validate_predicates, validate_with,
};

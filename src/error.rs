//! Error types for rule validation

#[cfg(feature = "python")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python")]
use pyo3::PyErr;
use thiserror::Error;

/// A condition or rule tree has the wrong shape.
///
/// Every variant carries the JSON-pointer path of the offending node,
/// relative to the value handed to the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("`{combinator}` requires an array at {path}")]
    ExpectedArray {
        combinator: &'static str,
        path: String,
    },

    #[error("`{combinator}` requires at least one condition at {path}")]
    EmptyCombinator {
        combinator: &'static str,
        path: String,
    },

    #[error("`not` requires a single condition, not an array, at {path}")]
    ExpectedSingle { path: String },

    #[error("condition must be an object at {path}")]
    ExpectedObject { path: String },

    #[error("rule must be a literal or an object at {path}")]
    InvalidRule { path: String },
}

impl StructureError {
    /// Path of the malformed node
    pub fn path(&self) -> &str {
        match self {
            StructureError::ExpectedArray { path, .. }
            | StructureError::EmptyCombinator { path, .. }
            | StructureError::ExpectedSingle { path }
            | StructureError::ExpectedObject { path }
            | StructureError::InvalidRule { path } => path,
        }
    }
}

/// Main error type for rule validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleValidationError {
    #[error("Invalid structure: {0}")]
    Structure(#[from] StructureError),

    #[error("Unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("Unknown predicates: {}", .0.join(", "))]
    UnknownPredicates(Vec<String>),

    #[error(
        "Unknown fields: {}; unknown predicates: {}",
        .fields.join(", "),
        .predicates.join(", ")
    )]
    Rejected {
        fields: Vec<String>,
        predicates: Vec<String>,
    },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl RuleValidationError {
    /// Field names this error reports as unknown
    pub fn invalid_fields(&self) -> &[String] {
        match self {
            RuleValidationError::UnknownFields(fields)
            | RuleValidationError::Rejected { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Predicate names this error reports as unknown
    pub fn invalid_predicates(&self) -> &[String] {
        match self {
            RuleValidationError::UnknownPredicates(predicates)
            | RuleValidationError::Rejected { predicates, .. } => predicates,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for RuleValidationError {
    fn from(err: serde_json::Error) -> Self {
        RuleValidationError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<RuleValidationError> for PyErr {
    fn from(err: RuleValidationError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<StructureError> for PyErr {
    fn from(err: StructureError) -> PyErr {
        RuleValidationError::from(err).into()
    }
}

/// Result type alias for rule validation
pub type Result<T> = std::result::Result<T, RuleValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_exposes_both_lists() {
        let err = RuleValidationError::Rejected {
            fields: vec!["lastName".to_string()],
            predicates: vec!["wtf".to_string()],
        };
        assert_eq!(err.invalid_fields(), ["lastName".to_string()]);
        assert_eq!(err.invalid_predicates(), ["wtf".to_string()]);
        assert_eq!(
            err.to_string(),
            "Unknown fields: lastName; unknown predicates: wtf"
        );
    }

    #[test]
    fn test_structure_error_path() {
        let err = StructureError::ExpectedArray {
            combinator: "or",
            path: "/0/or".to_string(),
        };
        assert_eq!(err.path(), "/0/or");
        assert_eq!(err.to_string(), "`or` requires an array at /0/or");

        let wrapped: RuleValidationError = err.into();
        assert!(wrapped.invalid_fields().is_empty());
        assert!(wrapped.invalid_predicates().is_empty());
    }
}

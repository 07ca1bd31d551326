//! Configuration module for rule sets and schemas
//!
//! This module handles deserialization of rule sets and schemas from JSON
//! text and, with the `python` feature, from Python objects.

mod rule;
mod schema;

pub use rule::*;
pub use schema::*;

use crate::error::Result;

/// Deserialize a rule set from a JSON array of `{conditions, event}` objects
pub fn rule_set_from_json(json: &str) -> Result<RuleSet> {
    Ok(serde_json::from_str(json)?)
}

/// Deserialize a schema from JSON text
pub fn schema_from_json(json: &str) -> Result<Schema> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(feature = "python")]
pub use self::python::*;

#[cfg(feature = "python")]
mod python {
    use super::{RuleDefinition, RuleSet, Schema};
    use crate::error::RuleValidationError;
    use pyo3::prelude::*;
    use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};
    use serde_json::{Map, Number, Value};

    /// Helper to get attribute from either dict or object
    fn get_attr<'py>(obj: &Bound<'py, PyAny>, name: &str) -> PyResult<Bound<'py, PyAny>> {
        if let Ok(dict) = obj.downcast::<PyDict>() {
            dict.get_item(name)?
                .ok_or_else(|| pyo3::exceptions::PyKeyError::new_err(name.to_string()))
        } else {
            obj.getattr(name)
        }
    }

    /// Helper to get optional attribute from either dict or object
    fn get_attr_opt<'py>(obj: &Bound<'py, PyAny>, name: &str) -> Option<Bound<'py, PyAny>> {
        if let Ok(dict) = obj.downcast::<PyDict>() {
            dict.get_item(name).ok().flatten()
        } else {
            obj.getattr(name).ok()
        }
    }

    /// Convert a JSON-like Python value (dict, list, str, number, bool, None)
    /// into a `serde_json::Value`, keeping dict insertion order
    pub fn json_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
        if obj.is_none() {
            return Ok(Value::Null);
        }
        // bool before int: Python's bool is an int subclass
        if let Ok(flag) = obj.downcast::<PyBool>() {
            return Ok(Value::Bool(flag.is_true()));
        }
        if obj.is_instance_of::<PyInt>() {
            if let Ok(i) = obj.extract::<i64>() {
                return Ok(Value::from(i));
            }
            let u: u64 = obj.extract()?;
            return Ok(Value::from(u));
        }
        if let Ok(float) = obj.downcast::<PyFloat>() {
            let value = float.value();
            return Number::from_f64(value).map(Value::Number).ok_or_else(|| {
                RuleValidationError::DeserializationError(format!(
                    "Non-finite number: {}",
                    value
                ))
                .into()
            });
        }
        if obj.is_instance_of::<PyString>() {
            return Ok(Value::String(obj.extract()?));
        }
        if let Ok(dict) = obj.downcast::<PyDict>() {
            let mut map = Map::with_capacity(dict.len());
            for (key, value) in dict.iter() {
                let key: String = key.extract().map_err(|_| {
                    RuleValidationError::DeserializationError(format!(
                        "Object keys must be strings, got: {}",
                        key
                    ))
                })?;
                map.insert(key, json_from_py(&value)?);
            }
            return Ok(Value::Object(map));
        }
        if let Ok(list) = obj.downcast::<PyList>() {
            return list.iter().map(|item| json_from_py(&item)).collect();
        }
        if let Ok(tuple) = obj.downcast::<PyTuple>() {
            return tuple.iter().map(|item| json_from_py(&item)).collect();
        }

        Err(RuleValidationError::DeserializationError(format!(
            "Unsupported value type: {}",
            obj.get_type().name()?
        ))
        .into())
    }

    /// Deserialize a list of conditions
    pub fn deserialize_conditions(conditions: &Bound<'_, PyAny>) -> PyResult<Vec<Value>> {
        let list: Vec<Bound<'_, PyAny>> = conditions.extract()?;
        list.iter().map(json_from_py).collect()
    }

    /// Deserialize rules from a Python list
    /// Expected format: [{"conditions": {...}, "event": {...}}, ...]
    pub fn deserialize_rule_set(rules: &Bound<'_, PyAny>) -> PyResult<RuleSet> {
        let list: Vec<Bound<'_, PyAny>> = rules.extract()?;
        let mut definitions = Vec::with_capacity(list.len());

        for item in &list {
            let conditions = json_from_py(&get_attr(item, "conditions")?)?;
            let event = match get_attr_opt(item, "event") {
                Some(event) if !event.is_none() => Some(json_from_py(&event)?),
                _ => None,
            };
            definitions.push(RuleDefinition { conditions, event });
        }

        Ok(RuleSet::new(definitions))
    }

    /// Deserialize a schema from a Python dict
    /// Expected format: {"properties": {field: descriptor, ...}}
    pub fn deserialize_schema(schema: &Bound<'_, PyAny>) -> PyResult<Schema> {
        let properties = match get_attr_opt(schema, "properties") {
            Some(properties) if !properties.is_none() => json_from_py(&properties)?,
            _ => return Ok(Schema::default()),
        };

        match properties {
            Value::Object(properties) => Ok(Schema { properties }),
            _ => Err(RuleValidationError::DeserializationError(
                "properties must be a dict".to_string(),
            )
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{ParseMode, Parser};
    use crate::error::{RuleValidationError, StructureError};

    #[test]
    fn test_rule_set_from_json() {
        let rules = rule_set_from_json(
            r#"[
                {"conditions": {"firstName": "empty"}, "event": {"type": "remove"}},
                {"conditions": {"age": {"greater": 10}}}
            ]"#,
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert!(rules.rules[0].event.is_some());
        assert!(rules.rules[1].event.is_none());
    }

    #[test]
    fn test_rule_set_rejects_missing_conditions() {
        let err = rule_set_from_json(r#"[{"event": {"type": "hide"}}]"#).unwrap_err();
        assert!(matches!(err, RuleValidationError::DeserializationError(_)));
    }

    #[test]
    fn test_schema_field_order() {
        let schema = schema_from_json(
            r#"{"properties": {"password": {"type": "string"}, "firstName": {"type": "string"}}}"#,
        )
        .unwrap();
        let fields: Vec<_> = schema.field_names().collect();
        assert_eq!(fields, ["password", "firstName"]);
    }

    #[test]
    fn test_schema_without_properties() {
        let schema = schema_from_json("{}").unwrap();
        assert_eq!(schema.field_names().count(), 0);
    }

    #[test]
    fn test_parse_conditions_paths() {
        let rules = rule_set_from_json(
            r#"[
                {"conditions": {"firstName": "empty"}},
                {"conditions": {"or": {"firstName": "empty"}}}
            ]"#,
        )
        .unwrap();

        let err = rules.parse_conditions(&Parser::default()).unwrap_err();
        assert_eq!(
            err,
            StructureError::ExpectedArray {
                combinator: "or",
                path: "/1/conditions/or".to_string(),
            }
        );

        let lenient = rules
            .parse_conditions(&Parser::new(ParseMode::Lenient))
            .unwrap();
        assert_eq!(lenient.len(), 2);
        assert!(lenient[1].clauses.is_empty());
    }
}

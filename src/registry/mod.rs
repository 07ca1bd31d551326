//! Name registries consulted by the validators
//!
//! Both registries are plain membership sets. They are built once per
//! validation call (or once at startup) and only read afterwards.

use crate::config::Schema;
use ahash::AHashSet;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::hash::BuildHasher;
use std::sync::Arc;

/// Predicates implemented by the standard rule-engine runtime
pub const BUILTIN_PREDICATES: &[&str] = &[
    "null",
    "undefined",
    "exists",
    "defined",
    "truthy",
    "falsey",
    "empty",
    "notEmpty",
    "is",
    "isnt",
    "equal",
    "notEqual",
    "less",
    "lessEq",
    "greater",
    "greaterEq",
    "between",
    "even",
    "odd",
    "positive",
    "negative",
    "zero",
    "mod",
    "primitive",
    "string",
    "number",
    "boolean",
    "object",
    "array",
    "date",
    "regexp",
    "instance",
    "has",
    "includes",
    "contains",
    "startsWith",
    "endsWith",
    "matches",
    "ternary",
];

/// Membership test over known names
pub trait NameRegistry {
    fn contains(&self, name: &str) -> bool;
}

/// Field names declared by a schema
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    names: AHashSet<String>,
}

impl FieldRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Registry of the keys of the schema's `properties` map
    pub fn from_schema(schema: &Schema) -> Self {
        Self::new(schema.field_names())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<&Schema> for FieldRegistry {
    fn from(schema: &Schema) -> Self {
        Self::from_schema(schema)
    }
}

impl NameRegistry for FieldRegistry {
    #[inline]
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// Predicate names the rule engine implements
#[derive(Debug, Clone, Default)]
pub struct PredicateRegistry {
    names: AHashSet<String>,
}

impl PredicateRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Registry holding [`BUILTIN_PREDICATES`]
    pub fn builtin() -> Self {
        Self::new(BUILTIN_PREDICATES.iter().copied())
    }

    /// Add engine-specific predicates on top of the current set
    pub fn with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameRegistry for PredicateRegistry {
    #[inline]
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl<S: BuildHasher> NameRegistry for HashSet<String, S> {
    fn contains(&self, name: &str) -> bool {
        HashSet::contains(self, name)
    }
}

impl NameRegistry for [&str] {
    fn contains(&self, name: &str) -> bool {
        self.iter().any(|known| *known == name)
    }
}

/// Registry slot shared across threads, filled on first use
pub type SharedRegistry<T> = OnceCell<Arc<RwLock<T>>>;

/// Store `registry` in `slot`, replacing whatever an earlier call stored.
///
/// Concurrent first calls never lose a value: exactly one of them fills the
/// slot and the others overwrite it under the write lock.
pub fn install<T: Default>(slot: &SharedRegistry<T>, registry: T) {
    let mut pending = Some(registry);
    let shared =
        slot.get_or_init(|| Arc::new(RwLock::new(pending.take().unwrap_or_default())));
    if let Some(registry) = pending {
        *shared.write() = registry;
    }
}

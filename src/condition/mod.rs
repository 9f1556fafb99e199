//! # Condition Engine
//!
//! Decides whether a conditionally included property contributes to the output. A
//! [`Condition`] names a [`ConditionKind`] and, optionally, the property whose value is
//! tested; by default the property carrying the condition tests its own value.
//!
//! Structured values are never silently classified: kinds that have no sensible answer
//! for a list, map or object fail with `UnsupportedType` instead of defaulting.
//!
//! ```rust
//! use siren::condition::ConditionKind;
//! use siren::value::Value;
//! assert!(ConditionKind::True.evaluate(&Value::from(-5)).unwrap());
//! assert!(!ConditionKind::True.evaluate(&Value::from("True")).unwrap());
//! assert!(ConditionKind::True.evaluate(&Value::List(vec![])).is_err());
//! ```

mod kinds;

pub use kinds::{
    ConditionFn, CONDITION_EMPTY, CONDITION_FALSE, CONDITION_NOT_EMPTY, CONDITION_NOT_NULL,
    CONDITION_NULL, CONDITION_TRUE,
};

use crate::errors::Result;
use crate::value::Value;
use std::fmt;

/// A named predicate over a runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    True,
    False,
    Null,
    NotNull,
    Empty,
    NotEmpty,
    /// Structural equality with a literal; numbers compare across widths and objects
    /// never equal a literal.
    Equals(serde_json::Value),
}

impl ConditionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionKind::True => "TRUE",
            ConditionKind::False => "FALSE",
            ConditionKind::Null => "NULL",
            ConditionKind::NotNull => "NOT_NULL",
            ConditionKind::Empty => "EMPTY",
            ConditionKind::NotEmpty => "NOT_EMPTY",
            ConditionKind::Equals(_) => "EQUALS",
        }
    }

    pub fn evaluate(&self, value: &Value) -> Result<bool> {
        match self {
            ConditionKind::True => CONDITION_TRUE(value),
            ConditionKind::False => CONDITION_FALSE(value),
            ConditionKind::Null => CONDITION_NULL(value),
            ConditionKind::NotNull => CONDITION_NOT_NULL(value),
            ConditionKind::Empty => CONDITION_EMPTY(value),
            ConditionKind::NotEmpty => CONDITION_NOT_EMPTY(value),
            ConditionKind::Equals(expected) => Ok(equals_literal(value, expected)),
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn equals_literal(value: &Value, expected: &serde_json::Value) -> bool {
    use serde_json::Value as Json;
    match (value, expected) {
        (Value::Null, Json::Null) => true,
        (Value::Bool(a), Json::Bool(b)) => a == b,
        (Value::String(a), Json::String(b)) => a == b,
        (number, Json::Number(n)) if number.is_number() => {
            let literal = n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_u64().map(Value::UInt))
                .or_else(|| n.as_f64().map(Value::Float));
            literal.map_or(false, |literal| *number == literal)
        }
        (Value::List(items), Json::Array(expected)) => {
            items.len() == expected.len()
                && items.iter().zip(expected).all(|(v, e)| equals_literal(v, e))
        }
        (Value::Map(map), Json::Object(expected)) => {
            map.len() == expected.len()
                && expected
                    .iter()
                    .all(|(k, e)| map.get(k).map_or(false, |v| equals_literal(v, e)))
        }
        _ => false,
    }
}

/// Conditional-inclusion rule attached to a property, link or action.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    kind: ConditionKind,
    property: Option<String>,
}

impl Condition {
    /// Tests the value of the property the condition is attached to.
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            property: None,
        }
    }

    /// Tests the value of another property of the same object.
    pub fn on(property: impl Into<String>, kind: ConditionKind) -> Self {
        Self {
            kind,
            property: Some(property.into()),
        }
    }

    pub fn kind(&self) -> &ConditionKind {
        &self.kind
    }

    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }
}

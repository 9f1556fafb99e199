//!
//! One pure evaluator per condition kind.
//!
//! ## Truth Tables
//!
//! | kind      | null  | bool | string        | number  | list / map        | object      |
//! |-----------|-------|------|---------------|---------|-------------------|-------------|
//! | TRUE      | false | b    | `== "true"`   | `!= 0`  | unsupported       | unsupported |
//! | FALSE     | false | !b   | `== "false"`  | `== 0`  | unsupported       | unsupported |
//! | NULL      | true  | false| false         | false   | false             | false       |
//! | NOT_NULL  | false | true | true          | true    | true              | true        |
//! | EMPTY     | true  | unsupported | `is_empty` | unsupported | `is_empty` | unsupported |
//! | NOT_EMPTY | false | unsupported | `!is_empty`| unsupported | `!is_empty`| unsupported |
//!
//! Negative numbers are non-zero and therefore TRUE. NaN is non-zero as well.

use crate::errors::{Result, SirenError};
use crate::value::Value;

/// Condition evaluator: classifies a runtime value or rejects its type.
pub type ConditionFn = fn(value: &Value) -> Result<bool>;

// ============================================================================
// TRUTHINESS
// ============================================================================

fn is_zero(value: &Value) -> Option<bool> {
    match value {
        Value::Int(n) => Some(*n == 0),
        Value::UInt(n) => Some(*n == 0),
        Value::Float(n) => Some(*n == 0.0),
        _ => None,
    }
}

/// Holds for `true`, the exact string `"true"` and any non-zero number.
pub const CONDITION_TRUE: ConditionFn = |value| match value {
    Value::Null => Ok(false),
    Value::Bool(b) => Ok(*b),
    Value::String(s) => Ok(s == "true"),
    number if number.is_number() => Ok(is_zero(number) == Some(false)),
    other => Err(SirenError::unsupported_type("TRUE", other.type_name())),
};

/// Holds for `false`, the exact string `"false"` and numeric zero. Null is neither.
pub const CONDITION_FALSE: ConditionFn = |value| match value {
    Value::Null => Ok(false),
    Value::Bool(b) => Ok(!*b),
    Value::String(s) => Ok(s == "false"),
    number if number.is_number() => Ok(is_zero(number) == Some(true)),
    other => Err(SirenError::unsupported_type("FALSE", other.type_name())),
};

// ============================================================================
// PRESENCE
// ============================================================================

pub const CONDITION_NULL: ConditionFn = |value| Ok(value.is_null());

pub const CONDITION_NOT_NULL: ConditionFn = |value| Ok(!value.is_null());

// ============================================================================
// EMPTINESS
// ============================================================================

fn is_empty(kind: &'static str, value: &Value) -> Result<bool> {
    match value {
        Value::Null => Ok(true),
        Value::String(s) => Ok(s.is_empty()),
        Value::List(items) => Ok(items.is_empty()),
        Value::Map(map) => Ok(map.is_empty()),
        other => Err(SirenError::unsupported_type(kind, other.type_name())),
    }
}

pub const CONDITION_EMPTY: ConditionFn = |value| is_empty("EMPTY", value);

pub const CONDITION_NOT_EMPTY: ConditionFn = |value| is_empty("NOT_EMPTY", value).map(|e| !e);

#[cfg(test)]
mod tests {
    use super::*;
    use im::OrdMap;

    #[test]
    fn test_false_mirrors_true_on_scalars() {
        assert!(CONDITION_FALSE(&Value::from(0)).unwrap());
        assert!(!CONDITION_FALSE(&Value::from(-1)).unwrap());
        assert!(CONDITION_FALSE(&Value::from("false")).unwrap());
        assert!(!CONDITION_FALSE(&Value::Null).unwrap());
        assert!(CONDITION_FALSE(&Value::List(vec![])).is_err());
    }

    #[test]
    fn test_nan_is_truthy() {
        assert!(CONDITION_TRUE(&Value::Float(f64::NAN)).unwrap());
    }

    #[test]
    fn test_emptiness_on_collections() {
        assert!(CONDITION_EMPTY(&Value::List(vec![])).unwrap());
        assert!(CONDITION_EMPTY(&Value::Map(OrdMap::new())).unwrap());
        assert!(CONDITION_NOT_EMPTY(&Value::from("x")).unwrap());
        let err = CONDITION_NOT_EMPTY(&Value::from(3)).unwrap_err();
        assert!(err.to_string().contains("NOT_EMPTY"));
    }
}

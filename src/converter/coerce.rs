//! Coercion between runtime [`Value`]s and entity property JSON.
//!
//! JSON numbers are ambiguous: `30`, `30.0` and `3e1` all decode to the same
//! `serde_json::Number` family. Going back into a domain object, the declared
//! [`PropertyType`] decides how a number is read:
//!
//! - `Integer` accepts any integral number, including integral floats like `30.0`
//! - `Unsigned` accepts non-negative integral numbers
//! - `Float` accepts any number
//! - `Any` and `Map` pick the narrowest lossless reading (`i64`, then `u64`, then `f64`)
//!
//! `Date` and `DateTime` travel as ISO-8601 strings and must parse as such.

use crate::errors::{Result, SirenError};
use crate::meta::PropertyType;
use crate::value::Value;
use chrono::{DateTime, NaiveDate};
use im::OrdMap;
use serde_json::{Number, Value as Json};

fn json_type_name(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

/// Renders a property value as JSON. Non-finite floats become `null`.
pub fn to_json(value: &Value) -> Result<Json> {
    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(n) => Json::from(*n),
        Value::UInt(n) => Json::from(*n),
        Value::Float(n) => Number::from_f64(*n).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::List(items) => Json::Array(items.iter().map(to_json).collect::<Result<_>>()?),
        Value::Map(map) => Json::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), to_json(v)?)))
                .collect::<Result<_>>()?,
        ),
        Value::Object(object) => {
            return Err(SirenError::type_mismatch(
                "property value",
                object.type_ref().name(),
            ))
        }
    })
}

fn integral(n: &Number) -> Option<f64> {
    n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0)
}

fn natural_number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::UInt(u)
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

fn natural(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => natural_number(n),
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::List(items.iter().map(natural).collect()),
        Json::Object(map) => Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), natural(v)))
                .collect::<OrdMap<_, _>>(),
        ),
    }
}

/// Reads decoded JSON back as a value of the declared type.
pub fn from_json(json: &Json, declared: &PropertyType) -> Result<Value> {
    let mismatch = || SirenError::type_mismatch(declared.to_string(), json_type_name(json));
    match (declared, json) {
        (_, Json::Null) => Ok(Value::Null),
        (PropertyType::Any, _) => Ok(natural(json)),
        (PropertyType::String, Json::String(s)) => Ok(Value::String(s.clone())),
        (PropertyType::Boolean, Json::Bool(b)) => Ok(Value::Bool(*b)),
        (PropertyType::Integer, Json::Number(n)) => n
            .as_i64()
            .or_else(|| {
                integral(n)
                    .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .map(Value::Int)
            .ok_or_else(mismatch),
        (PropertyType::Unsigned, Json::Number(n)) => n
            .as_u64()
            .or_else(|| {
                integral(n)
                    .filter(|f| *f >= 0.0 && *f < u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .map(Value::UInt)
            .ok_or_else(mismatch),
        (PropertyType::Float, Json::Number(n)) => n.as_f64().map(Value::Float).ok_or_else(mismatch),
        (PropertyType::Date, Json::String(s)) => s
            .parse::<NaiveDate>()
            .map(|_| Value::String(s.clone()))
            .map_err(|_| mismatch()),
        (PropertyType::DateTime, Json::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|_| Value::String(s.clone()))
            .map_err(|_| mismatch()),
        (PropertyType::Map, Json::Object(_)) => Ok(natural(json)),
        (PropertyType::List(inner), Json::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| from_json(item, inner).map_err(|e| e.at(format!("[{i}]"))))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        _ => Err(mismatch()),
    }
}

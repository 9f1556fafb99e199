//! # Runtime Values
//!
//! [`Value`] is the dynamically typed view the converter has of a modeled property.
//! Accessors produce it, conditions classify it, and `to_object` feeds it back into
//! setters. Nested domain objects travel as [`ObjectRef`], a shared handle whose
//! pointer identity is what the cycle guard tracks.
//!
//! Typed domain fields cross into and out of `Value` through [`ValueType`].

use crate::errors::{Result, SirenError};
use crate::meta::{PropertyType, Resource, TypeRef};
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use im::OrdMap;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A runtime value of a modeled property.
///
/// # Examples
///
/// ```rust
/// use siren::value::Value;
/// let n = Value::from(-5);
/// assert_eq!(n.type_name(), "Int");
/// assert!(Value::default().is_null());
/// assert_eq!(Value::from(2u8), Value::from(2.0));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(OrdMap<String, Value>),
    Object(ObjectRef),
}

impl Value {
    /// Returns the runtime type name; objects report their Rust type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::UInt(_) => "UInt",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Object(object) => object.type_ref().rust_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_) | Value::Float(_))
    }

    /// Numeric view of any width; `None` for non-numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::UInt(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// True for a single object or a non-empty list made only of objects.
    pub fn is_object_like(&self) -> bool {
        match self {
            Value::Object(_) => true,
            Value::List(items) => !items.is_empty() && items.iter().all(|v| v.as_object().is_some()),
            _ => false,
        }
    }

    fn numeric_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Int(a), Value::UInt(b)) | (Value::UInt(b), Value::Int(a)) => {
                u64::try_from(*a).map_or(false, |a| a == *b)
            }
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (a, b) if a.is_number() && b.is_number() => a.numeric_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(n) => {
                // Integral floats outside the i64 range would saturate on the cast.
                if n.fract() == 0.0 && n.abs() < 9.2e18 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                write!(f, "}}")
            }
            Value::Object(object) => write!(f, "{object:?}"),
        }
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )*
    };
}

value_from!(Int as i64: i8, i16, i32, i64, isize);
value_from!(UInt as u64: u8, u16, u32, u64, usize);
value_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<OrdMap<String, Value>> for Value {
    fn from(map: OrdMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

// ============================================================================
// OBJECT REFERENCES
// ============================================================================

/// Shared, identity-carrying handle to a domain object.
///
/// The handle keeps the object as `Rc<RefCell<T>>` behind `dyn Any` so that typed
/// accessors can downcast back to `T` while the converter only sees identities
/// and [`TypeRef`]s.
#[derive(Clone)]
pub struct ObjectRef {
    inner: Rc<dyn Any>,
    ty: TypeRef,
}

impl ObjectRef {
    /// Wraps an owned domain object.
    pub fn new<T: Resource>(object: T) -> Self {
        Self::from_rc(Rc::new(RefCell::new(object)))
    }

    /// Wraps an already shared domain object without copying it.
    pub fn from_rc<T: Resource>(object: Rc<RefCell<T>>) -> Self {
        Self {
            inner: object,
            ty: TypeRef::of::<T>(),
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    /// Pointer identity of the referenced object.
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        self.identity() == other.identity()
    }

    /// Borrows the typed cell when the object is a `T`.
    pub fn cell<T: Resource>(&self) -> Option<&RefCell<T>> {
        self.inner.downcast_ref::<RefCell<T>>()
    }

    /// Recovers the typed shared handle when the object is a `T`.
    pub fn downcast<T: Resource>(&self) -> Option<Rc<RefCell<T>>> {
        Rc::clone(&self.inner).downcast::<RefCell<T>>().ok()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({}@{:#x})", self.ty.name(), self.identity())
    }
}

// ============================================================================
// TYPED CONVERSION
// ============================================================================

/// Conversion between a typed field and [`Value`], plus the declared type the
/// converter uses when coercing text-decoded data back into the field.
pub trait ValueType: Sized {
    fn declared_type() -> PropertyType;
    fn into_value(self) -> Value;
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(expected: &str, found: &Value) -> Result<T> {
    Err(SirenError::type_mismatch(expected, found.type_name()))
}

macro_rules! signed_value_type {
    ($($ty:ty),*) => {
        $(
            impl ValueType for $ty {
                fn declared_type() -> PropertyType {
                    PropertyType::Integer
                }

                fn into_value(self) -> Value {
                    Value::Int(self as i64)
                }

                fn from_value(value: Value) -> Result<Self> {
                    let converted = match &value {
                        Value::Int(n) => <$ty>::try_from(*n).ok(),
                        Value::UInt(n) => <$ty>::try_from(*n).ok(),
                        _ => None,
                    };
                    converted.map_or_else(|| mismatch(stringify!($ty), &value), Ok)
                }
            }
        )*
    };
}

macro_rules! unsigned_value_type {
    ($($ty:ty),*) => {
        $(
            impl ValueType for $ty {
                fn declared_type() -> PropertyType {
                    PropertyType::Unsigned
                }

                fn into_value(self) -> Value {
                    Value::UInt(self as u64)
                }

                fn from_value(value: Value) -> Result<Self> {
                    let converted = match &value {
                        Value::Int(n) => <$ty>::try_from(*n).ok(),
                        Value::UInt(n) => <$ty>::try_from(*n).ok(),
                        _ => None,
                    };
                    converted.map_or_else(|| mismatch(stringify!($ty), &value), Ok)
                }
            }
        )*
    };
}

signed_value_type!(i8, i16, i32, i64);
unsigned_value_type!(u8, u16, u32, u64);

impl ValueType for f64 {
    fn declared_type() -> PropertyType {
        PropertyType::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_f64().map_or_else(|| mismatch("f64", &value), Ok)
    }
}

impl ValueType for f32 {
    fn declared_type() -> PropertyType {
        PropertyType::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self as f64)
    }

    fn from_value(value: Value) -> Result<Self> {
        value
            .as_f64()
            .map_or_else(|| mismatch("f32", &value), |n| Ok(n as f32))
    }
}

impl ValueType for bool {
    fn declared_type() -> PropertyType {
        PropertyType::Boolean
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_bool().map_or_else(|| mismatch("bool", &value), Ok)
    }
}

impl ValueType for String {
    fn declared_type() -> PropertyType {
        PropertyType::String
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => mismatch("String", &other),
        }
    }
}

impl ValueType for Value {
    fn declared_type() -> PropertyType {
        PropertyType::Any
    }

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl ValueType for OrdMap<String, Value> {
    fn declared_type() -> PropertyType {
        PropertyType::Map
    }

    fn into_value(self) -> Value {
        Value::Map(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(map) => Ok(map),
            other => mismatch("Map", &other),
        }
    }
}

// ============================================================================
// TEMPORAL VALUES
// ============================================================================

// Dates and timestamps are carried as ISO-8601 strings.

impl ValueType for DateTime<Utc> {
    fn declared_type() -> PropertyType {
        PropertyType::DateTime
    }

    fn into_value(self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    fn from_value(value: Value) -> Result<Self> {
        DateTime::<FixedOffset>::from_value(value).map(|t| t.with_timezone(&Utc))
    }
}

impl ValueType for DateTime<FixedOffset> {
    fn declared_type() -> PropertyType {
        PropertyType::DateTime
    }

    fn into_value(self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }

    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .map_err(|_| SirenError::type_mismatch("ISO-8601 timestamp", format!("'{s}'"))),
            other => mismatch("DateTime", other),
        }
    }
}

impl ValueType for NaiveDate {
    fn declared_type() -> PropertyType {
        PropertyType::Date
    }

    fn into_value(self) -> Value {
        Value::String(self.format("%Y-%m-%d").to_string())
    }

    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::String(s) => s
                .parse::<NaiveDate>()
                .map_err(|_| SirenError::type_mismatch("ISO-8601 date", format!("'{s}'"))),
            other => mismatch("Date", other),
        }
    }
}

// ============================================================================
// ENUMERATIONS
// ============================================================================

/// Implements [`ValueType`] for a fieldless enum carried as its wire name.
///
/// ```rust
/// use siren::value::{Value, ValueType};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Rating { G, Pg, R }
///
/// siren::value_enum!(Rating { G => "G", Pg => "PG", R => "R" });
///
/// assert_eq!(Rating::Pg.into_value(), Value::from("PG"));
/// assert_eq!(Rating::from_value(Value::from("R")).unwrap(), Rating::R);
/// assert!(Rating::from_value(Value::from("NC-17")).is_err());
/// ```
#[macro_export]
macro_rules! value_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $crate::value::ValueType for $ty {
            fn declared_type() -> $crate::meta::PropertyType {
                $crate::meta::PropertyType::String
            }

            fn into_value(self) -> $crate::value::Value {
                let name = match self {
                    $($ty::$variant => $name,)+
                };
                $crate::value::Value::String(name.to_string())
            }

            fn from_value(value: $crate::value::Value) -> $crate::errors::Result<Self> {
                match &value {
                    $($crate::value::Value::String(s) if s == $name => Ok($ty::$variant),)+
                    $crate::value::Value::String(s) => Err($crate::errors::SirenError::type_mismatch(
                        stringify!($ty),
                        format!("'{s}'"),
                    )),
                    other => Err($crate::errors::SirenError::type_mismatch(
                        stringify!($ty),
                        other.type_name(),
                    )),
                }
            }
        }
    };
}

impl<V: ValueType> ValueType for Option<V> {
    fn declared_type() -> PropertyType {
        V::declared_type()
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, ValueType::into_value)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => V::from_value(other).map(Some),
        }
    }
}

impl<V: ValueType> ValueType for Vec<V> {
    fn declared_type() -> PropertyType {
        PropertyType::List(Box::new(V::declared_type()))
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(ValueType::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(V::from_value).collect(),
            Value::Null => Ok(Vec::new()),
            other => mismatch("List", &other),
        }
    }
}

impl<T: Resource> ValueType for Rc<RefCell<T>> {
    fn declared_type() -> PropertyType {
        PropertyType::Object(TypeRef::of::<T>())
    }

    fn into_value(self) -> Value {
        Value::Object(ObjectRef::from_rc(self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Object(object) => object
                .downcast::<T>()
                .map_or_else(|| mismatch(std::any::type_name::<T>(), &value), Ok),
            _ => mismatch(std::any::type_name::<T>(), &value),
        }
    }
}

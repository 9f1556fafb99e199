//! # Declarative Metadata
//!
//! Everything the converter knows about a domain type comes from a [`TypeDescriptor`]:
//! the entity name and class, the self uri, type-level links and actions, and the
//! ordered list of modeled properties. Each [`PropertyDescriptor`] pairs a read/write
//! accessor with routing and condition metadata.
//!
//! Descriptors are pure data. They are produced once per type by [`Resource::describe`],
//! cached by a [`DescriptorProvider`], and never mutated afterwards.
//!
//! ## Design Principles
//!
//! - **No per-type logic in the converter**: the converter only ever sees descriptors
//! - **Accessor pairs**: typed closures behind [`ObjectRef`] replace getter/setter lookup
//! - **Read-only after registration**: descriptors are shared through `Arc`

mod property;
mod registry;
mod routing;

pub use property::{PropertyDescriptor, Reader, Writer};
pub use registry::{DescriptorProvider, TypeRegistry};
pub use routing::{ActionMeta, FieldMeta, LinkMeta, Routing, SubEntityMeta};

use crate::value::ObjectRef;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// RESOURCE TYPES
// ============================================================================

/// A domain type the converter can walk.
///
/// `Default` supplies the fresh instance `to_object` populates.
pub trait Resource: Any + Default {
    fn describe() -> TypeDescriptor;
}

fn create_object<T: Resource>() -> ObjectRef {
    ObjectRef::new(T::default())
}

/// Runtime handle to a [`Resource`] type.
#[derive(Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    rust_name: &'static str,
    describe: fn() -> TypeDescriptor,
    create: fn() -> ObjectRef,
}

impl TypeRef {
    pub fn of<T: Resource>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            rust_name: std::any::type_name::<T>(),
            describe: T::describe,
            create: create_object::<T>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name.
    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    /// Rust type name without its module path.
    pub fn name(&self) -> &'static str {
        self.rust_name.rsplit("::").next().unwrap_or(self.rust_name)
    }

    /// Computes the descriptor. Prefer a [`DescriptorProvider`], which caches.
    pub fn describe(&self) -> TypeDescriptor {
        (self.describe)()
    }

    /// Creates a default instance.
    pub fn instantiate(&self) -> ObjectRef {
        (self.create)()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.rust_name)
    }
}

/// Declared type of a modeled property, used to coerce decoded JSON back into it.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyType {
    Any,
    String,
    Integer,
    Unsigned,
    Float,
    Boolean,
    /// ISO-8601 calendar date, `YYYY-MM-DD`.
    Date,
    /// RFC 3339 / ISO-8601 timestamp with offset.
    DateTime,
    Map,
    List(Box<PropertyType>),
    Object(TypeRef),
}

impl PropertyType {
    /// The nested resource type of an object or list-of-objects property.
    pub fn object_type(&self) -> Option<TypeRef> {
        match self {
            PropertyType::Object(ty) => Some(*ty),
            PropertyType::List(inner) => match inner.as_ref() {
                PropertyType::Object(ty) => Some(*ty),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, PropertyType::List(_))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Any => f.write_str("Any"),
            PropertyType::String => f.write_str("String"),
            PropertyType::Integer => f.write_str("Integer"),
            PropertyType::Unsigned => f.write_str("Unsigned"),
            PropertyType::Float => f.write_str("Float"),
            PropertyType::Boolean => f.write_str("Boolean"),
            PropertyType::Date => f.write_str("Date"),
            PropertyType::DateTime => f.write_str("DateTime"),
            PropertyType::Map => f.write_str("Map"),
            PropertyType::List(inner) => write!(f, "List<{inner}>"),
            PropertyType::Object(ty) => f.write_str(ty.name()),
        }
    }
}

// ============================================================================
// TYPE DESCRIPTORS
// ============================================================================

/// Metadata of one resource type.
///
/// ```rust
/// use siren::meta::{PropertyDescriptor, Resource, TypeDescriptor};
/// #[derive(Default)]
/// struct Order { id: u64 }
/// impl Resource for Order {
///     fn describe() -> TypeDescriptor {
///         TypeDescriptor::new("order")
///             .self_uri("/orders/{id}")
///             .property(PropertyDescriptor::field("id", |o: &Order| o.id, |o: &mut Order, id| o.id = id))
///     }
/// }
/// let descriptor = Order::describe();
/// assert_eq!(descriptor.component_class(), ["order".to_string()]);
/// assert!(descriptor.get("id").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    class: Vec<String>,
    uri: Option<String>,
    override_uri: Option<String>,
    links: Vec<LinkMeta>,
    actions: Vec<ActionMeta>,
    properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class: Vec::new(),
            uri: None,
            override_uri: None,
            links: Vec::new(),
            actions: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Overrides the component class, which otherwise is `[name]`.
    pub fn class<I, S>(mut self, class: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class = class.into_iter().map(Into::into).collect();
        self
    }

    /// Uri template of the `self` link.
    pub fn self_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Names the property whose runtime string value, when set, replaces the
    /// `self` link href of each instance.
    pub fn override_uri(mut self, property: impl Into<String>) -> Self {
        self.override_uri = Some(property.into());
        self
    }

    pub fn link(mut self, link: LinkMeta) -> Self {
        self.links.push(link);
        self
    }

    pub fn action(mut self, action: ActionMeta) -> Self {
        self.actions.push(action);
        self
    }

    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_class(&self) -> Vec<String> {
        if self.class.is_empty() {
            vec![self.name.clone()]
        } else {
            self.class.clone()
        }
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn override_property(&self) -> Option<&str> {
        self.override_uri.as_deref()
    }

    pub fn links(&self) -> &[LinkMeta] {
        &self.links
    }

    pub fn actions(&self) -> &[ActionMeta] {
        &self.actions
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// The property flagged as identity, else the one named `id`.
    pub fn identity_property(&self) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .find(|p| p.is_identity())
            .or_else(|| self.get("id"))
    }
}

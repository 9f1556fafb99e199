//! # Siren
//!
//! Converts domain objects into Siren hypermedia entities and back.
//!
//! - [`builder`]: validating, step-recording builders for the tree model
//! - [`component`]: the tree model (`Entity`, `Link`, `Action`, `Field`)
//! - [`condition`]: predicates gating conditional inclusion
//! - [`meta`]: per-type descriptors and the process-wide registry
//! - [`converter`]: the reflective object ⇄ entity converter
//! - [`resource`]: ready-made resources such as [`CollectionResource`]
//! - [`codec`]: Siren JSON text encoding

pub use crate::builder::{ActionBuilder, Builder, EntityBuilder, FieldBuilder, LinkBuilder};
pub use crate::component::{Action, Entity, EntityKind, Field, FieldType, Link, Method};
pub use crate::condition::{Condition, ConditionKind};
pub use crate::config::ConverterConfig;
pub use crate::converter::{ReflectingConverter, ResourceConverter};
pub use crate::errors::{ErrorCategory, Result, SirenError};
pub use crate::meta::{PropertyDescriptor, Resource, TypeDescriptor, TypeRegistry};
pub use crate::resource::CollectionResource;
pub use crate::value::{ObjectRef, Value};

pub mod builder;
pub mod codec;
pub mod component;
pub mod condition;
pub mod config;
pub mod converter;
pub mod errors;
pub mod meta;
pub mod resource;
pub mod value;

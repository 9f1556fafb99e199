//! # Hypermedia Tree Model
//!
//! Immutable value types for the Siren document tree. Instances are produced by the
//! builders in [`crate::builder`] (or decoded by [`crate::codec`]) and expose read-only
//! accessors; nothing outside the crate mutates a node after construction.
//!
//! Serde field names follow the Siren wire format: `class`, `rel`, `href`, `title`,
//! `type`, `properties`, `entities`, `actions`, `links`, `name`, `method`, `fields`,
//! `value`.

mod action;
mod entity;
mod field;
mod link;

pub use action::{Action, Method};
pub use entity::{Entity, EntityKind};
pub use field::{Field, FieldType};
pub use link::Link;

/// Ordered property map of an entity. Insertion order is preserved.
pub type Properties = serde_json::Map<String, serde_json::Value>;

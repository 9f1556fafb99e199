//! # Collection Resources
//!
//! [`CollectionResource`] is a ready-made resource for a list of items that is itself
//! an entity: it converts to an entity of class `collection` whose sub-entities are the
//! items (rel `item`), either at the root of a conversion or nested under a property.
//!
//! The `self` link of a collection can be replaced at runtime through
//! [`set_override_uri`](CollectionResource::set_override_uri), for example when the same
//! collection is served from more than one location.

use crate::meta::{PropertyDescriptor, Resource, SubEntityMeta, TypeDescriptor};
use std::cell::RefCell;
use std::rc::Rc;

/// An ordered collection of shared items with an optional runtime self uri.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionResource<T> {
    items: Vec<Rc<RefCell<T>>>,
    override_uri: Option<String>,
}

impl<T> Default for CollectionResource<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            override_uri: None,
        }
    }
}

impl<T> CollectionResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(Rc::new(RefCell::new(item)));
    }

    /// Adds an item that is also referenced elsewhere in the graph.
    pub fn push_shared(&mut self, item: Rc<RefCell<T>>) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Rc<RefCell<T>>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn override_uri(&self) -> Option<&str> {
        self.override_uri.as_deref()
    }

    /// Replaces the `self` link href of the converted collection.
    pub fn set_override_uri(&mut self, uri: impl Into<String>) {
        self.override_uri = Some(uri.into());
    }
}

impl<T> FromIterator<T> for CollectionResource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|item| Rc::new(RefCell::new(item))).collect(),
            override_uri: None,
        }
    }
}

impl<T: Resource> Resource for CollectionResource<T> {
    /// Named after the item type (`review.collection`) so collections of different
    /// item types resolve independently in `to_object`.
    fn describe() -> TypeDescriptor {
        let item = T::describe();
        TypeDescriptor::new(format!("{}.collection", item.name()))
            .class(["collection"])
            .override_uri("overrideUri")
            .property(PropertyDescriptor::computed("size", |c: &Self| c.items.len() as u64))
            .property(
                PropertyDescriptor::field(
                    "items",
                    |c: &Self| c.items.clone(),
                    |c: &mut Self, items| c.items = items,
                )
                .sub_entity(SubEntityMeta::new().rel(["item"])),
            )
            .property(
                PropertyDescriptor::field(
                    "overrideUri",
                    |c: &Self| c.override_uri.clone(),
                    |c: &mut Self, uri| c.override_uri = uri,
                )
                .ignore(),
            )
    }
}

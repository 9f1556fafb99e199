use super::{Action, Link, Properties};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an entity is carried by value or by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A full representation with its own properties, links and actions.
    Representation,
    /// A sub-entity represented only by reference; `href` is required.
    EmbeddedLink,
}

/// A node of the hypermedia tree.
///
/// An entity whose `href` is set is an embedded link. Sub-entities always carry a
/// relationship; the [`EntityBuilder`](crate::builder::EntityBuilder) refuses to
/// build a parent otherwise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "class", default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) component_class: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) rel: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub(crate) media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub(crate) properties: Properties,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) entities: Vec<Entity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) links: Vec<Link>,
}

impl Entity {
    /// A fresh embedded-link instance; the builder replays the real href over the
    /// empty placeholder.
    pub(crate) fn embedded_link() -> Self {
        Self {
            href: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn kind(&self) -> EntityKind {
        if self.href.is_some() {
            EntityKind::EmbeddedLink
        } else {
            EntityKind::Representation
        }
    }

    pub fn is_embedded_link(&self) -> bool {
        self.kind() == EntityKind::EmbeddedLink
    }

    pub fn component_class(&self) -> &[String] {
        &self.component_class
    }

    pub fn rel(&self) -> &[String] {
        &self.rel
    }

    /// True when `rel` lists the given relationship name.
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.iter().any(|r| r == rel)
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// First link carrying the given relationship.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.has_rel(rel))
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name() == name)
    }
}

/// Renders the Siren JSON encoding.
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

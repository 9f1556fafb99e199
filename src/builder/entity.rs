use super::{collect_strings, is_blank, require_non_blank, Builder};
use crate::component::{Action, Entity, EntityKind, Link, Properties};
use crate::errors::{Result, SirenError};

const REL_REQUIRED: &str = "Sub entities are required to have a <rel> property set.";
const HREF_REQUIRED_FOR_EMBED: &str =
    "Sub entities that are embedded links are required to have a <href> property set.";

/// A recorded [`EntityBuilder`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityStep {
    SetComponentClass(Vec<String>),
    SetRel(Vec<String>),
    SetTitle(String),
    SetType(String),
    SetHref(String),
    AddProperty(String, serde_json::Value),
    AddSubEntity(Entity),
    AddLink(Link),
    AddAction(Action),
}

#[derive(Default)]
pub struct EntityAccumulator {
    properties: Properties,
    entities: Vec<Entity>,
    links: Vec<Link>,
    actions: Vec<Action>,
}

/// Fluent construction of an [`Entity`].
///
/// Setting an href turns the result into an embedded link; an entity whose href was
/// never set is always a plain representation.
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    steps: Vec<EntityStep>,
    embedded: bool,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn step(mut self, step: EntityStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Component class of the entity; the last call wins.
    pub fn set_component_class<I, S>(self, class: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step(EntityStep::SetComponentClass(collect_strings(class)))
    }

    /// Relationship of the entity to its parent; required for sub-entities. The last
    /// call wins.
    pub fn set_rel<I, S>(self, rel: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step(EntityStep::SetRel(collect_strings(rel)))
    }

    pub fn set_title(self, title: impl Into<String>) -> Self {
        self.step(EntityStep::SetTitle(title.into()))
    }

    pub fn set_type(self, media_type: impl Into<String>) -> Self {
        self.step(EntityStep::SetType(media_type.into()))
    }

    /// Marks the entity as an embedded link to `href`.
    pub fn set_href(mut self, href: impl Into<String>) -> Result<Self> {
        let href = require_non_blank("href", href)?;
        self.embedded = true;
        Ok(self.step(EntityStep::SetHref(href)))
    }

    /// Adds one property. Repeating a name overwrites the earlier value.
    pub fn add_property(
        self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<Self> {
        let name = require_non_blank("name", name)?;
        Ok(self.step(EntityStep::AddProperty(name, value.into())))
    }

    pub fn add_properties(mut self, properties: Properties) -> Result<Self> {
        if properties.is_empty() {
            return Err(SirenError::blank_argument("properties"));
        }
        for (name, value) in properties {
            self = self.add_property(name, value)?;
        }
        Ok(self)
    }

    pub fn add_sub_entity(self, entity: Entity) -> Self {
        self.step(EntityStep::AddSubEntity(entity))
    }

    pub fn add_sub_entities(self, entities: impl IntoIterator<Item = Entity>) -> Self {
        entities.into_iter().fold(self, Self::add_sub_entity)
    }

    pub fn add_link(self, link: Link) -> Self {
        self.step(EntityStep::AddLink(link))
    }

    pub fn add_links(self, links: impl IntoIterator<Item = Link>) -> Self {
        links.into_iter().fold(self, Self::add_link)
    }

    pub fn add_action(self, action: Action) -> Self {
        self.step(EntityStep::AddAction(action))
    }

    pub fn add_actions(self, actions: impl IntoIterator<Item = Action>) -> Self {
        actions.into_iter().fold(self, Self::add_action)
    }
}

impl Builder for EntityBuilder {
    type Target = Entity;
    type Step = EntityStep;
    type Accumulator = EntityAccumulator;

    const TARGET: &'static str = "Entity";

    fn steps(&self) -> &[EntityStep] {
        &self.steps
    }

    fn create_instance(&self) -> Entity {
        if self.embedded {
            Entity::embedded_link()
        } else {
            Entity::default()
        }
    }

    fn apply(target: &mut Entity, acc: &mut EntityAccumulator, step: &EntityStep) {
        match step {
            EntityStep::SetComponentClass(class) => target.component_class = class.clone(),
            EntityStep::SetRel(rel) => target.rel = rel.clone(),
            EntityStep::SetTitle(title) => target.title = Some(title.clone()),
            EntityStep::SetType(media_type) => target.media_type = Some(media_type.clone()),
            EntityStep::SetHref(href) => target.href = Some(href.clone()),
            EntityStep::AddProperty(name, value) => {
                acc.properties.insert(name.clone(), value.clone());
            }
            EntityStep::AddSubEntity(entity) => acc.entities.push(entity.clone()),
            EntityStep::AddLink(link) => acc.links.push(link.clone()),
            EntityStep::AddAction(action) => acc.actions.push(action.clone()),
        }
    }

    fn post_process(target: &mut Entity, acc: EntityAccumulator) {
        if !acc.properties.is_empty() {
            target.properties = acc.properties;
        }
        if !acc.entities.is_empty() {
            target.entities = acc.entities;
        }
        if !acc.links.is_empty() {
            target.links = acc.links;
        }
        if !acc.actions.is_empty() {
            target.actions = acc.actions;
        }
    }

    fn validate(target: &Entity) -> Result<()> {
        for sub in target.entities() {
            if sub.rel().iter().all(|r| is_blank(r)) {
                return Err(SirenError::validation("entities", Self::TARGET, REL_REQUIRED));
            }
            if sub.kind() == EntityKind::EmbeddedLink && sub.href().map_or(true, is_blank) {
                return Err(SirenError::validation(
                    "entities",
                    Self::TARGET,
                    HREF_REQUIRED_FOR_EMBED,
                ));
            }
        }
        Ok(())
    }
}

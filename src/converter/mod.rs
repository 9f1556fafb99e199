//! # Reflective Converter
//!
//! Maps domain objects to Siren entities and back, driven entirely by the
//! [`TypeDescriptor`]s a [`DescriptorProvider`] hands out.
//!
//! `to_entity` snapshots every modeled property of an object, evaluates conditions
//! against the snapshot, routes each surviving property (plain property, sub-entity,
//! link), then adds the self link and the type-level links and actions. Nested objects
//! are converted recursively through the same path and assembled with the
//! [`EntityBuilder`], so builder validation applies at every level.
//!
//! `to_object` is the lossy inverse: scalar properties are read back through their
//! declared types and nested objects are rebuilt from sub-entities matched by rel.
//! Links, actions and classes never flow back into the object.
//!
//! ## Cycles
//!
//! The identities of the objects on the current conversion stack are tracked per call.
//! Meeting one of them again truncates that branch: the sub-entity is left out and no
//! error is raised. A node shared by two siblings is not a cycle and is converted
//! under each of them.
//!
//! ## Errors
//!
//! Every failure raised while walking a property is wrapped with the property path,
//! e.g. `reviews[1].reviewer`.

mod coerce;
mod inverse;
mod uri;

pub use coerce::{from_json, to_json};
pub use uri::{Scope, TokenResolver, UriResolver, UriScope};

use crate::builder::{ActionBuilder, Builder, EntityBuilder, FieldBuilder, LinkBuilder};
use crate::component::{Action, Entity, Field, Link};
use crate::condition::Condition;
use crate::config::ConverterConfig;
use crate::errors::{Result, SirenError};
use crate::meta::{
    ActionMeta, DescriptorProvider, FieldMeta, LinkMeta, PropertyDescriptor, Resource, Routing,
    SubEntityMeta, TypeDescriptor, TypeRef, TypeRegistry,
};
use crate::value::{ObjectRef, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, trace};

// ============================================================================
// PUBLIC INTERFACE
// ============================================================================

/// Bidirectional mapping between domain objects and entities.
pub trait ResourceConverter {
    fn to_entity(&self, object: &ObjectRef) -> Result<Entity>;
    fn to_object(&self, entity: &Entity) -> Result<ObjectRef>;
}

/// The descriptor-driven [`ResourceConverter`].
///
/// Holds no per-call state; one converter may serve any number of conversions.
#[derive(Clone)]
pub struct ReflectingConverter {
    provider: Arc<dyn DescriptorProvider>,
    resolver: Arc<dyn UriResolver>,
    config: ConverterConfig,
}

impl Default for ReflectingConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReflectingConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectingConverter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReflectingConverter {
    /// A converter over the global [`TypeRegistry`] with `{token}` uri resolution.
    pub fn new() -> Self {
        let provider: Arc<dyn DescriptorProvider> = TypeRegistry::global();
        Self {
            provider,
            resolver: Arc::new(TokenResolver),
            config: ConverterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_provider(mut self, provider: Arc<dyn DescriptorProvider>) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn UriResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Converts a shared typed object.
    pub fn convert<T: Resource>(&self, object: &Rc<RefCell<T>>) -> Result<Entity> {
        self.to_entity(&ObjectRef::from_rc(Rc::clone(object)))
    }

    /// Rebuilds a `T` without consulting the entity's type property.
    pub fn to_object_as<T: Resource>(&self, entity: &Entity) -> Result<Rc<RefCell<T>>> {
        let object = self.restore(TypeRef::of::<T>(), entity)?;
        object.downcast::<T>().ok_or_else(|| {
            SirenError::type_mismatch(std::any::type_name::<T>(), object.type_ref().rust_name())
        })
    }
}

impl ResourceConverter for ReflectingConverter {
    fn to_entity(&self, object: &ObjectRef) -> Result<Entity> {
        let type_name = object.type_ref().name();
        debug!(type_name, "converting object to entity");
        let converted = Traversal::new(self).entity(object, None, None)?;
        let entity = converted.builder.build()?;
        debug!(
            type_name,
            entities = entity.entities().len(),
            links = entity.links().len(),
            actions = entity.actions().len(),
            "converted object to entity"
        );
        Ok(entity)
    }

    fn to_object(&self, entity: &Entity) -> Result<ObjectRef> {
        let ty = self.root_type(entity)?;
        debug!(type_name = ty.name(), "converting entity to object");
        let object = self.restore(ty, entity)?;
        debug!(type_name = ty.name(), "converted entity to object");
        Ok(object)
    }
}

// ============================================================================
// TRAVERSAL
// ============================================================================

/// Reads every readable property of `object`.
fn snapshot(descriptor: &TypeDescriptor, object: &ObjectRef) -> Result<Scope> {
    let mut scope = Scope::with_capacity(descriptor.properties().len());
    for property in descriptor.properties() {
        if !property.is_readable() && matches!(property.routing(), Routing::Ignore) {
            continue;
        }
        let value = property
            .read(object)
            .map_err(|e| e.at(property.name()))?;
        scope.insert(property.name().to_string(), value);
    }
    Ok(scope)
}

fn tested(condition: &Condition, value: &Value) -> Result<bool> {
    condition.kind().evaluate(value)
}

fn lookup<'s>(scope: &'s Scope, name: &str) -> Result<&'s Value> {
    scope
        .get(name)
        .ok_or_else(|| SirenError::illegal_argument(name, "is not a modeled property."))
}

/// Evaluates a property condition; without a named property it tests `value`.
fn included(property: &PropertyDescriptor, value: &Value, scope: &Scope) -> Result<bool> {
    match property.condition() {
        None => Ok(true),
        Some(condition) => match condition.property() {
            Some(other) => tested(condition, lookup(scope, other)?),
            None => tested(condition, value),
        },
    }
}

/// Evaluates a link or action condition, which must name the property it tests.
fn holds(condition: Option<&Condition>, scope: &Scope) -> Result<bool> {
    let Some(condition) = condition else {
        return Ok(true);
    };
    let name = condition.property().ok_or_else(|| {
        SirenError::illegal_argument("condition", "must name the property it tests.")
    })?;
    tested(condition, lookup(scope, name)?)
}

fn rel_or_default(rel: &[String], property: &PropertyDescriptor) -> Vec<String> {
    if rel.is_empty() {
        vec![property.json_name().to_string()]
    } else {
        rel.to_vec()
    }
}

struct Converted {
    builder: EntityBuilder,
    scope: Scope,
    descriptor: Arc<TypeDescriptor>,
}

/// State of one `to_entity` call.
struct Traversal<'c> {
    converter: &'c ReflectingConverter,
    visiting: HashSet<usize>,
}

impl<'c> Traversal<'c> {
    fn new(converter: &'c ReflectingConverter) -> Self {
        Self {
            converter,
            visiting: HashSet::new(),
        }
    }

    fn entity(
        &mut self,
        object: &ObjectRef,
        self_uri: Option<&str>,
        parent: Option<&Scope>,
    ) -> Result<Converted> {
        let descriptor = self.converter.provider.descriptor(object.type_ref());
        let scope = snapshot(&descriptor, object)?;
        self.visiting.insert(object.identity());
        let builder = self.populate(&descriptor, &scope, self_uri, parent);
        self.visiting.remove(&object.identity());
        Ok(Converted {
            builder: builder?,
            scope,
            descriptor,
        })
    }

    fn populate(
        &mut self,
        descriptor: &TypeDescriptor,
        scope: &Scope,
        self_uri: Option<&str>,
        parent: Option<&Scope>,
    ) -> Result<EntityBuilder> {
        let converter = self.converter;
        let scopes = UriScope::new(scope, parent);
        let mut builder =
            EntityBuilder::new().set_component_class(descriptor.component_class());
        if converter.config.include_type_info {
            builder = builder.add_property(converter.config.type_property.clone(), descriptor.name())?;
        }

        for property in descriptor.properties() {
            if matches!(property.routing(), Routing::Ignore) {
                continue;
            }
            let value = scope.get(property.name()).cloned().unwrap_or_default();
            if !included(property, &value, scope).map_err(|e| e.at(property.name()))? {
                trace!(property = property.name(), "condition not met, property omitted");
                continue;
            }
            trace!(property = property.name(), "routing property");
            builder = self
                .route(builder, property, value, scopes)
                .map_err(|e| e.at(property.name()))?;
        }

        let overridden = descriptor
            .override_property()
            .and_then(|name| scope.get(name))
            .and_then(Value::as_str)
            .filter(|uri| !uri.trim().is_empty());
        if let Some(template) = overridden.or(self_uri).or(descriptor.uri()) {
            let href = converter.href(template, &scopes)?;
            builder = builder.add_link(LinkBuilder::new().set_rel(["self"])?.set_href(href)?.build()?);
        }
        converter.decorate(builder, descriptor.links(), descriptor.actions(), &scopes)
    }

    fn route(
        &mut self,
        builder: EntityBuilder,
        property: &PropertyDescriptor,
        value: Value,
        scopes: UriScope<'_>,
    ) -> Result<EntityBuilder> {
        match property.routing() {
            Routing::Ignore => Ok(builder),
            Routing::Auto
                if value.is_object_like() || property.declared().object_type().is_some() =>
            {
                let meta = SubEntityMeta::default();
                self.sub_entities(builder, property, &meta, value, scopes.current)
            }
            Routing::Auto | Routing::Property => self.converter.plain(builder, property, &value),
            Routing::SubEntity(meta) => {
                self.sub_entities(builder, property, meta, value, scopes.current)
            }
            Routing::Link(meta) => self.converter.link_property(builder, property, meta, &value, &scopes),
        }
    }

    fn sub_entities(
        &mut self,
        mut builder: EntityBuilder,
        property: &PropertyDescriptor,
        meta: &SubEntityMeta,
        value: Value,
        parent: &Scope,
    ) -> Result<EntityBuilder> {
        match value {
            Value::Null => Ok(builder),
            Value::Object(child) => {
                if let Some(entity) = self.sub_entity(property, meta, &child, None, parent)? {
                    builder = builder.add_sub_entity(entity);
                }
                Ok(builder)
            }
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    let at = move |e: SirenError| e.at(format!("[{i}]"));
                    let child = item
                        .as_object()
                        .ok_or_else(|| SirenError::type_mismatch("object", item.type_name()))
                        .map_err(at)?;
                    if let Some(entity) = self
                        .sub_entity(property, meta, child, Some(i), parent)
                        .map_err(at)?
                    {
                        builder = builder.add_sub_entity(entity);
                    }
                }
                Ok(builder)
            }
            other => Err(SirenError::type_mismatch("object", other.type_name())),
        }
    }

    fn sub_entity(
        &mut self,
        property: &PropertyDescriptor,
        meta: &SubEntityMeta,
        child: &ObjectRef,
        index: Option<usize>,
        parent: &Scope,
    ) -> Result<Option<Entity>> {
        let converter = self.converter;
        let rel = rel_or_default(&meta.rel, property);
        if meta.embedded_link {
            return converter.embedded_link(meta, rel, child, parent).map(Some);
        }
        if self.visiting.contains(&child.identity()) {
            debug!(
                property = property.name(),
                type_name = child.type_ref().name(),
                "cycle detected, branch truncated"
            );
            return Ok(None);
        }

        let Converted {
            mut builder,
            scope,
            descriptor,
        } = self.entity(child, meta.uri.as_deref(), Some(parent))?;
        let scopes = UriScope::new(&scope, Some(parent));
        builder = builder.set_rel(rel);
        if let Some(title) = &meta.title {
            builder = builder.set_title(title.clone());
        }
        builder = converter.decorate(builder, &meta.links, &meta.actions, &scopes)?;

        if let (Some(_), Some(base)) = (index, &meta.collection_uri) {
            let id = descriptor
                .identity_property()
                .and_then(|p| scope.get(p.name()))
                .filter(|v| !v.is_null())
                .ok_or_else(|| {
                    SirenError::validation(
                        "id",
                        "SubEntity",
                        "Collection elements require an identity value.",
                    )
                })?;
            let base = converter.resolver.resolve(base, &scopes)?;
            let href = converter
                .config
                .absolute(format!("{}/{}", base.trim_end_matches('/'), id));
            builder = builder.set_href(href)?;
        }
        builder.build().map(Some)
    }
}

// ============================================================================
// NODE CONSTRUCTION
// ============================================================================

impl ReflectingConverter {
    fn href(&self, template: &str, scopes: &UriScope<'_>) -> Result<String> {
        Ok(self.config.absolute(self.resolver.resolve(template, scopes)?))
    }

    fn plain(
        &self,
        builder: EntityBuilder,
        property: &PropertyDescriptor,
        value: &Value,
    ) -> Result<EntityBuilder> {
        if value.is_null() && self.config.skip_null_properties {
            return Ok(builder);
        }
        if value.is_object_like() {
            return Err(SirenError::type_mismatch("plain property", value.type_name()));
        }
        builder.add_property(property.json_name(), to_json(value)?)
    }

    fn embedded_link(
        &self,
        meta: &SubEntityMeta,
        rel: Vec<String>,
        child: &ObjectRef,
        parent: &Scope,
    ) -> Result<Entity> {
        let descriptor = self.provider.descriptor(child.type_ref());
        let scope = snapshot(&descriptor, child)?;
        let template = meta.uri.as_deref().or(descriptor.uri()).ok_or_else(|| {
            SirenError::validation("uri", "SubEntity", "Embedded links require a uri.")
        })?;
        let href = self.href(template, &UriScope::new(&scope, Some(parent)))?;
        let mut builder = EntityBuilder::new()
            .set_component_class(descriptor.component_class())
            .set_rel(rel)
            .set_href(href)?;
        if let Some(title) = &meta.title {
            builder = builder.set_title(title.clone());
        }
        builder.build()
    }

    fn link_property(
        &self,
        builder: EntityBuilder,
        property: &PropertyDescriptor,
        meta: &LinkMeta,
        value: &Value,
        scopes: &UriScope<'_>,
    ) -> Result<EntityBuilder> {
        if !holds(meta.condition.as_ref(), scopes.current)? {
            return Ok(builder);
        }
        let href = match (&meta.uri, value) {
            (Some(template), _) => self.href(template, scopes)?,
            (None, Value::Null) => return Ok(builder),
            (None, Value::String(href)) => self.config.absolute(href.clone()),
            (None, other) => return Err(SirenError::type_mismatch("String", other.type_name())),
        };
        let rel = rel_or_default(&meta.rel, property);
        Ok(builder.add_link(self.link_builder(meta, rel, href)?.build()?))
    }

    fn link_builder(&self, meta: &LinkMeta, rel: Vec<String>, href: String) -> Result<LinkBuilder> {
        let mut builder = LinkBuilder::new().set_rel(rel)?.set_href(href)?;
        if !meta.class.is_empty() {
            builder = builder.set_component_class(meta.class.clone());
        }
        if let Some(title) = &meta.title {
            builder = builder.set_title(title.clone());
        }
        if let Some(media_type) = &meta.media_type {
            builder = builder.set_type(media_type.clone());
        }
        Ok(builder)
    }

    fn link(&self, meta: &LinkMeta, scopes: &UriScope<'_>) -> Result<Link> {
        let template = meta
            .uri
            .as_deref()
            .ok_or_else(|| SirenError::validation("href", "Link", "Required property."))?;
        let href = self.href(template, scopes)?;
        self.link_builder(meta, meta.rel.clone(), href)?.build()
    }

    fn action(&self, meta: &ActionMeta, scopes: &UriScope<'_>) -> Result<Action> {
        let mut builder = ActionBuilder::new()
            .set_name(meta.name.clone())?
            .set_href(self.href(&meta.uri, scopes)?)?;
        if let Some(method) = meta.method {
            builder = builder.set_method(method);
        }
        if let Some(title) = &meta.title {
            builder = builder.set_title(title.clone());
        }
        if let Some(media_type) = &meta.media_type {
            builder = builder.set_type(media_type.clone());
        }
        if !meta.class.is_empty() {
            builder = builder.set_component_class(meta.class.clone());
        }
        if !meta.meta_data.is_empty() {
            builder = builder.set_meta_data(meta.meta_data.clone());
        }
        builder
            .add_fields(self.fields(&meta.fields, scopes)?)
            .add_url_params(self.fields(&meta.url_params, scopes)?)
            .add_headers(self.fields(&meta.headers, scopes)?)
            .build()
    }

    fn fields(&self, metas: &[FieldMeta], scopes: &UriScope<'_>) -> Result<Vec<Field>> {
        metas
            .iter()
            .map(|meta| self.field(meta, scopes).map_err(|e| e.at(&meta.name)))
            .collect()
    }

    fn field(&self, meta: &FieldMeta, scopes: &UriScope<'_>) -> Result<Field> {
        let mut builder = FieldBuilder::new()
            .set_name(meta.name.clone())?
            .set_type(meta.field_type)
            .set_required(meta.required);
        if let Some(template) = &meta.value {
            builder = builder.set_value(self.resolver.resolve(template, scopes)?);
        }
        if let Some(title) = &meta.title {
            builder = builder.set_title(title.clone());
        }
        if let Some(pattern) = &meta.pattern {
            builder = builder.set_pattern(pattern.clone());
        }
        if let Some(placeholder) = &meta.placeholder {
            builder = builder.set_placeholder(placeholder.clone());
        }
        if let Some(max_length) = meta.max_length {
            builder = builder.set_max_length(max_length);
        }
        builder.build()
    }

    /// Adds the declared links and actions whose conditions hold.
    fn decorate(
        &self,
        mut builder: EntityBuilder,
        links: &[LinkMeta],
        actions: &[ActionMeta],
        scopes: &UriScope<'_>,
    ) -> Result<EntityBuilder> {
        for meta in links {
            let at = |e: SirenError| e.at("links");
            if holds(meta.condition.as_ref(), scopes.current).map_err(at)? {
                builder = builder.add_link(self.link(meta, scopes).map_err(at)?);
            }
        }
        for meta in actions {
            let at = |e: SirenError| e.at(meta.name()).at("actions");
            if holds(meta.condition.as_ref(), scopes.current).map_err(at)? {
                builder = builder.add_action(self.action(meta, scopes).map_err(at)?);
            }
        }
        Ok(builder)
    }
}

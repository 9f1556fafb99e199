use super::{coerce, ReflectingConverter};
use crate::component::Entity;
use crate::errors::{Result, SirenError};
use crate::meta::{PropertyDescriptor, Routing, TypeRef};
use crate::value::{ObjectRef, Value};
use tracing::trace;

impl ReflectingConverter {
    /// Finds the root type from the type property, then from the component class.
    pub(super) fn root_type(&self, entity: &Entity) -> Result<TypeRef> {
        let named = entity
            .property(&self.config.type_property)
            .and_then(|v| v.as_str());
        if let Some(ty) = named.and_then(|name| self.provider.resolve(name)) {
            return Ok(ty);
        }
        entity
            .component_class()
            .iter()
            .find_map(|class| self.provider.resolve(class))
            .ok_or_else(|| {
                let name = named
                    .map(str::to_string)
                    .unwrap_or_else(|| entity.component_class().join(","));
                SirenError::unknown_type(name)
            })
    }

    /// Creates a `ty` and writes back every restorable property found in `entity`.
    pub(super) fn restore(&self, ty: TypeRef, entity: &Entity) -> Result<ObjectRef> {
        let descriptor = self.provider.descriptor(&ty);
        let object = ty.instantiate();
        for property in descriptor.properties() {
            if property.is_read_only() {
                continue;
            }
            let at = |e: SirenError| e.at(property.name());
            if let Some(value) = self.restore_property(property, entity).map_err(at)? {
                trace!(property = property.name(), "restoring property");
                property.write(&object, value).map_err(at)?;
            }
        }
        Ok(object)
    }

    /// `None` leaves the property at its default.
    fn restore_property(
        &self,
        property: &PropertyDescriptor,
        entity: &Entity,
    ) -> Result<Option<Value>> {
        match property.routing() {
            Routing::Ignore | Routing::Link(_) => Ok(None),
            Routing::SubEntity(meta) if meta.embedded_link => Ok(None),
            Routing::SubEntity(meta) => {
                let rel = super::rel_or_default(&meta.rel, property);
                self.restore_children(property, &rel, entity)
            }
            Routing::Auto if property.declared().object_type().is_some() => {
                let rel = [property.json_name().to_string()];
                self.restore_children(property, &rel, entity)
            }
            Routing::Auto | Routing::Property => entity
                .property(property.json_name())
                .map(|json| coerce::from_json(json, property.declared()))
                .transpose(),
        }
    }

    /// Rebuilds nested objects from the sub-entities carrying one of `rel`.
    fn restore_children(
        &self,
        property: &PropertyDescriptor,
        rel: &[String],
        entity: &Entity,
    ) -> Result<Option<Value>> {
        let declared = property.declared();
        let ty = declared
            .object_type()
            .ok_or_else(|| SirenError::type_mismatch("object", declared.to_string()))?;
        let mut matching = entity
            .entities()
            .iter()
            .filter(|sub| rel.iter().any(|r| sub.has_rel(r)));

        if declared.is_list() {
            let items = matching
                .enumerate()
                .map(|(i, sub)| {
                    self.restore(ty, sub)
                        .map(Value::Object)
                        .map_err(|e| e.at(format!("[{i}]")))
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(Some(Value::List(items)));
        }
        matching
            .next()
            .map(|sub| self.restore(ty, sub).map(Value::Object))
            .transpose()
    }
}

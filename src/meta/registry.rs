use super::{Resource, TypeDescriptor, TypeRef};
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Source of type metadata for the converter.
///
/// Implementations must be safe for concurrent reads: one provider serves every
/// conversion call in the process.
pub trait DescriptorProvider: Send + Sync {
    /// The descriptor of `ty`, computed on first use.
    fn descriptor(&self, ty: &TypeRef) -> Arc<TypeDescriptor>;

    /// The type registered under an entity name.
    fn resolve(&self, name: &str) -> Option<TypeRef>;
}

static GLOBAL: Lazy<Arc<TypeRegistry>> = Lazy::new(|| Arc::new(TypeRegistry::new()));

/// Process-wide descriptor cache keyed by type.
///
/// Each descriptor is computed once and shared read-only afterwards. Registering a
/// type also registers every resource type reachable through its properties, so the
/// entity names of a whole object graph resolve for `to_object`.
#[derive(Default)]
pub struct TypeRegistry {
    descriptors: RwLock<HashMap<TypeId, Arc<TypeDescriptor>>>,
    names: RwLock<HashMap<String, TypeRef>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry used by default-constructed converters.
    pub fn global() -> Arc<TypeRegistry> {
        Arc::clone(&GLOBAL)
    }

    pub fn register<T: Resource>(&self) -> Arc<TypeDescriptor> {
        self.register_type(TypeRef::of::<T>())
    }

    pub fn register_type(&self, ty: TypeRef) -> Arc<TypeDescriptor> {
        if let Some(cached) = self.cached(&ty) {
            return cached;
        }

        let descriptor = Arc::new(ty.describe());
        let descriptor = {
            let mut descriptors = self
                .descriptors
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let cached = descriptors.entry(ty.id()).or_insert(descriptor);
            Arc::clone(cached)
        };
        let owner = *self
            .names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(descriptor.name().to_string())
            .or_insert(ty);
        if owner != ty {
            warn!(
                entity = descriptor.name(),
                kept = owner.rust_name(),
                ignored = ty.rust_name(),
                "entity name already registered to another type"
            );
        }
        debug!(
            type_name = ty.name(),
            entity = descriptor.name(),
            "cached type descriptor"
        );

        // Nested types; the cache check above stops recursive type graphs.
        for property in descriptor.properties() {
            if let Some(nested) = property.declared().object_type() {
                self.register_type(nested);
            }
        }
        descriptor
    }

    fn cached(&self, ty: &TypeRef) -> Option<Arc<TypeDescriptor>> {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&ty.id())
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.descriptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DescriptorProvider for TypeRegistry {
    fn descriptor(&self, ty: &TypeRef) -> Arc<TypeDescriptor> {
        self.register_type(*ty)
    }

    fn resolve(&self, name: &str) -> Option<TypeRef> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }
}

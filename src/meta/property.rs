use super::{LinkMeta, PropertyType, Resource, Routing, SubEntityMeta};
use crate::condition::Condition;
use crate::errors::{Result, SirenError};
use crate::value::{ObjectRef, Value, ValueType};
use std::fmt;
use std::sync::Arc;

/// Read accessor of a modeled property.
pub type Reader = Arc<dyn Fn(&ObjectRef) -> Result<Value> + Send + Sync>;

/// Write accessor of a modeled property.
pub type Writer = Arc<dyn Fn(&ObjectRef, Value) -> Result<()> + Send + Sync>;

fn wrong_object<T: Resource>(object: &ObjectRef) -> SirenError {
    SirenError::type_mismatch(std::any::type_name::<T>(), object.type_ref().rust_name())
}

fn borrowed(object: &ObjectRef) -> SirenError {
    SirenError::ObjectBorrowed {
        type_name: object.type_ref().name().to_string(),
    }
}

/// One modeled property: name, declared type, accessor pair and metadata.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: String,
    declared: PropertyType,
    read: Option<Reader>,
    write: Option<Writer>,
    read_only: bool,
    routing: Routing,
    condition: Option<Condition>,
    rename: Option<String>,
    identity: bool,
}

impl PropertyDescriptor {
    /// A property without accessors; attach them with [`reader`](Self::reader) and
    /// [`writer`](Self::writer).
    pub fn new(name: impl Into<String>, declared: PropertyType) -> Self {
        Self {
            name: name.into(),
            declared,
            read: None,
            write: None,
            read_only: false,
            routing: Routing::Auto,
            condition: None,
            rename: None,
            identity: false,
        }
    }

    /// A property backed by a typed getter and setter on `T`.
    pub fn field<T, V, G, S>(name: impl Into<String>, get: G, set: S) -> Self
    where
        T: Resource,
        V: ValueType + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self::new(name, V::declared_type())
            .reader(move |object| {
                let cell = object.cell::<T>().ok_or_else(|| wrong_object::<T>(object))?;
                let guard = cell.try_borrow().map_err(|_| borrowed(object))?;
                Ok(get(&*guard).into_value())
            })
            .writer(move |object, value| {
                let cell = object.cell::<T>().ok_or_else(|| wrong_object::<T>(object))?;
                let converted = V::from_value(value)?;
                let mut guard = cell.try_borrow_mut().map_err(|_| borrowed(object))?;
                set(&mut *guard, converted);
                Ok(())
            })
    }

    /// A read-only property derived from `T`; emitted, never restored.
    pub fn computed<T, V, G>(name: impl Into<String>, get: G) -> Self
    where
        T: Resource,
        V: ValueType + 'static,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        let mut property = Self::new(name, V::declared_type()).reader(move |object| {
            let cell = object.cell::<T>().ok_or_else(|| wrong_object::<T>(object))?;
            let guard = cell.try_borrow().map_err(|_| borrowed(object))?;
            Ok(get(&*guard).into_value())
        });
        property.read_only = true;
        property
    }

    pub fn reader<F>(mut self, read: F) -> Self
    where
        F: Fn(&ObjectRef) -> Result<Value> + Send + Sync + 'static,
    {
        self.read = Some(Arc::new(read));
        self
    }

    pub fn writer<F>(mut self, write: F) -> Self
    where
        F: Fn(&ObjectRef, Value) -> Result<()> + Send + Sync + 'static,
    {
        self.write = Some(Arc::new(write));
        self
    }

    pub fn sub_entity(mut self, meta: SubEntityMeta) -> Self {
        self.routing = Routing::SubEntity(meta);
        self
    }

    pub fn link(mut self, meta: LinkMeta) -> Self {
        self.routing = Routing::Link(meta);
        self
    }

    /// Forces plain-property routing.
    pub fn as_property(mut self) -> Self {
        self.routing = Routing::Property;
        self
    }

    pub fn ignore(mut self) -> Self {
        self.routing = Routing::Ignore;
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Emits the property under another name.
    pub fn rename(mut self, json_name: impl Into<String>) -> Self {
        self.rename = Some(json_name.into());
        self
    }

    /// Marks the property as the object's identity (used for collection hrefs).
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the property in the entity.
    pub fn json_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }

    pub fn declared(&self) -> &PropertyType {
        &self.declared
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_identity(&self) -> bool {
        self.identity
    }

    pub fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    pub fn read(&self, object: &ObjectRef) -> Result<Value> {
        let read = self.read.as_ref().ok_or_else(|| self.missing(object, "read"))?;
        read(object)
    }

    pub fn write(&self, object: &ObjectRef, value: Value) -> Result<()> {
        let write = self.write.as_ref().ok_or_else(|| self.missing(object, "write"))?;
        write(object, value)
    }

    fn missing(&self, object: &ObjectRef, accessor: &'static str) -> SirenError {
        SirenError::MissingAccessor {
            type_name: object.type_ref().name().to_string(),
            property: self.name.clone(),
            accessor,
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("readable", &self.read.is_some())
            .field("writable", &self.write.is_some())
            .field("read_only", &self.read_only)
            .field("routing", &self.routing)
            .field("condition", &self.condition)
            .field("rename", &self.rename)
            .field("identity", &self.identity)
            .finish()
    }
}

use crate::component::{FieldType, Method};
use crate::condition::Condition;
use std::collections::BTreeMap;

fn strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

/// Where a modeled property ends up in the entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Routing {
    /// Objects and lists of objects become sub-entities, everything else a property.
    #[default]
    Auto,
    Property,
    SubEntity(SubEntityMeta),
    Link(LinkMeta),
    Ignore,
}

/// Metadata of a property converted into sub-entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubEntityMeta {
    pub(crate) rel: Vec<String>,
    pub(crate) uri: Option<String>,
    pub(crate) embedded_link: bool,
    pub(crate) collection_uri: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) links: Vec<LinkMeta>,
    pub(crate) actions: Vec<ActionMeta>,
}

impl SubEntityMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relationship names; defaults to the property name.
    pub fn rel<I, S>(mut self, rel: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rel = strings(rel);
        self
    }

    /// Uri template overriding the nested type's own self uri.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Emit the nested object by reference only.
    pub fn embedded_link(mut self) -> Self {
        self.embedded_link = true;
        self
    }

    /// Base uri of collection elements; each element gets `<base>/<identity>` as href.
    pub fn collection_uri(mut self, uri: impl Into<String>) -> Self {
        self.collection_uri = Some(uri.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
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
}

/// A declared link. Uri templates may reference `{property}` and `{parent.property}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkMeta {
    pub(crate) rel: Vec<String>,
    pub(crate) uri: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) media_type: Option<String>,
    pub(crate) class: Vec<String>,
    pub(crate) condition: Option<Condition>,
}

impl LinkMeta {
    pub fn new<I, S>(rel: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rel: strings(rel),
            ..Self::default()
        }
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn class<I, S>(mut self, class: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class = strings(class);
        self
    }

    /// Includes the link only when the condition holds; it must name a property.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A declared action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionMeta {
    pub(crate) name: String,
    pub(crate) uri: String,
    pub(crate) method: Option<Method>,
    pub(crate) title: Option<String>,
    pub(crate) media_type: Option<String>,
    pub(crate) class: Vec<String>,
    pub(crate) fields: Vec<FieldMeta>,
    pub(crate) url_params: Vec<FieldMeta>,
    pub(crate) headers: Vec<FieldMeta>,
    pub(crate) meta_data: BTreeMap<String, String>,
    pub(crate) condition: Option<Condition>,
}

impl ActionMeta {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            method: None,
            title: None,
            media_type: None,
            class: Vec::new(),
            fields: Vec::new(),
            url_params: Vec::new(),
            headers: Vec::new(),
            meta_data: BTreeMap::new(),
            condition: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn class<I, S>(mut self, class: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class = strings(class);
        self
    }

    pub fn field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }

    pub fn url_param(mut self, param: FieldMeta) -> Self {
        self.url_params.push(param);
        self
    }

    pub fn header(mut self, header: FieldMeta) -> Self {
        self.headers.push(header);
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta_data.insert(key.into(), value.into());
        self
    }

    /// Includes the action only when the condition holds; it must name a property.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// A declared action field, url parameter or header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMeta {
    pub(crate) name: String,
    pub(crate) field_type: FieldType,
    /// Template resolved like a uri.
    pub(crate) value: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) required: bool,
    pub(crate) pattern: Option<String>,
    pub(crate) placeholder: Option<String>,
    pub(crate) max_length: Option<u32>,
}

impl FieldMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

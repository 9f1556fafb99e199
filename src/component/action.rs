use super::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// HTTP method of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state transition the client may perform on an entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "class", default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) component_class: Vec<String>,
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) method: Option<Method>,
    pub(crate) href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub(crate) media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) fields: Vec<Field>,
    #[serde(rename = "urlParams", default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) url_params: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) headers: Vec<Field>,
    #[serde(rename = "metaData", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) meta_data: BTreeMap<String, String>,
}

impl Action {
    pub fn component_class(&self) -> &[String] {
        &self.component_class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared method; Siren clients assume GET when absent.
    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn url_params(&self) -> &[Field] {
        &self.url_params
    }

    pub fn headers(&self) -> &[Field] {
        &self.headers
    }

    pub fn meta_data(&self) -> &BTreeMap<String, String> {
        &self.meta_data
    }
}

use serde::{Deserialize, Serialize};

/// A navigational link. `rel` is non-empty and `href` non-blank once built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "class", default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) class: Vec<String>,
    pub(crate) rel: Vec<String>,
    pub(crate) href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub(crate) media_type: Option<String>,
}

impl Link {
    pub fn class(&self) -> &[String] {
        &self.class
    }

    pub fn rel(&self) -> &[String] {
        &self.rel
    }

    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel.iter().any(|r| r == rel)
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
}

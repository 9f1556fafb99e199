//! Converter configuration.
//!
//! ```yaml
//! include_type_info: true
//! type_property: resourceType
//! skip_null_properties: false
//! base_uri: https://api.example.com
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use crate::errors::{Result, SirenError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Adds `type_property` to every converted entity so `to_object` can find the type.
    pub include_type_info: bool,
    pub type_property: String,
    /// Leaves null plain properties out instead of emitting `null`.
    pub skip_null_properties: bool,
    /// Prefixed to resolved hrefs that start with `/`.
    pub base_uri: Option<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            include_type_info: true,
            type_property: "resourceType".to_string(),
            skip_null_properties: false,
            base_uri: None,
        }
    }
}

impl ConverterConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source).map_err(SirenError::ConfigJson)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.include_type_info && self.type_property.trim().is_empty() {
            return Err(SirenError::blank_argument("type_property"));
        }
        Ok(())
    }

    /// Applies `base_uri` to a resolved href.
    pub fn absolute(&self, href: String) -> String {
        match &self.base_uri {
            Some(base) if href.starts_with('/') => {
                format!("{}{}", base.trim_end_matches('/'), href)
            }
            _ => href,
        }
    }
}

//! Siren JSON text codec.
//!
//! Field names follow the Siren format (`class`, `properties`, `entities`, `links`,
//! `actions`, `rel`, `href`, `title`, `type`, `name`, `method`, `fields`, `value`).
//! Property order is preserved in both directions.

use crate::component::Entity;
use crate::errors::Result;

pub fn encode(entity: &Entity) -> Result<String> {
    Ok(serde_json::to_string(entity)?)
}

pub fn encode_pretty(entity: &Entity) -> Result<String> {
    Ok(serde_json::to_string_pretty(entity)?)
}

pub fn decode(text: &str) -> Result<Entity> {
    Ok(serde_json::from_str(text)?)
}

/// Encodes to a JSON tree rather than text.
pub fn to_value(entity: &Entity) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(entity)?)
}

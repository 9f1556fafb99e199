//! Uri template resolution.
//!
//! A template such as `/videos/{id}/reviews/{parent.id}` names properties of the
//! object being converted, or of its enclosing object with the `parent.` prefix.

use crate::errors::{Result, SirenError};
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Snapshot of an object's modeled property values, keyed by property name.
pub type Scope = HashMap<String, Value>;

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(parent\.)?([A-Za-z_][A-Za-z0-9_]*)\}").expect("uri token pattern")
});

/// The objects a template may reference.
#[derive(Debug, Clone, Copy)]
pub struct UriScope<'a> {
    pub current: &'a Scope,
    pub parent: Option<&'a Scope>,
}

impl<'a> UriScope<'a> {
    pub fn new(current: &'a Scope, parent: Option<&'a Scope>) -> Self {
        Self { current, parent }
    }
}

/// Turns a uri template into an href.
pub trait UriResolver: Send + Sync {
    fn resolve(&self, template: &str, scope: &UriScope<'_>) -> Result<String>;
}

/// Substitutes `{property}` and `{parent.property}` tokens.
///
/// Unknown tokens fail with `UnresolvedToken`; null values resolve to the empty
/// string; object values cannot be rendered and fail with `TypeMismatch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenResolver;

impl UriResolver for TokenResolver {
    fn resolve(&self, template: &str, scope: &UriScope<'_>) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;
        for caps in TOKEN.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            let source = if caps.get(1).is_some() {
                scope.parent
            } else {
                Some(scope.current)
            };
            let value = source.and_then(|s| s.get(name.as_str())).ok_or_else(|| {
                SirenError::UnresolvedToken {
                    token: whole.as_str().trim_start_matches('{').trim_end_matches('}').to_string(),
                    template: template.to_string(),
                }
            })?;
            if value.is_object_like() {
                return Err(SirenError::type_mismatch("scalar", value.type_name()));
            }
            out.push_str(&template[last..whole.start()]);
            out.push_str(&value.to_string());
            last = whole.end();
        }
        out.push_str(&template[last..]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(pairs: &[(&str, Value)]) -> Scope {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_resolves_current_and_parent_tokens() {
        let current = scope(&[("id", Value::from(7))]);
        let parent = scope(&[("id", Value::from("abc"))]);
        let href = TokenResolver
            .resolve("/videos/{parent.id}/reviews/{id}", &UriScope::new(&current, Some(&parent)))
            .unwrap();
        assert_eq!(href, "/videos/abc/reviews/7");
    }

    #[test]
    fn test_null_resolves_to_empty() {
        let current = scope(&[("q", Value::Null)]);
        let href = TokenResolver
            .resolve("/search?q={q}", &UriScope::new(&current, None))
            .unwrap();
        assert_eq!(href, "/search?q=");
    }

    #[test]
    fn test_integral_floats_render_without_saturating() {
        let current = scope(&[("id", Value::Float(1e20)), ("n", Value::Float(30.0))]);
        let scopes = UriScope::new(&current, None);
        assert_eq!(
            TokenResolver.resolve("/items/{id}", &scopes).unwrap(),
            "/items/100000000000000000000"
        );
        assert_eq!(TokenResolver.resolve("/items/{n}", &scopes).unwrap(), "/items/30");
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let current = Scope::new();
        let err = TokenResolver
            .resolve("/a/{parent.id}", &UriScope::new(&current, None))
            .unwrap_err();
        assert!(matches!(err, SirenError::UnresolvedToken { ref token, .. } if token == "parent.id"));
    }
}

//! Siren Error Handling
//!
//! Every failure mode of the crate is a variant of [`SirenError`]. Builders report
//! `IllegalArgument` at call time and `BuilderValidation` from `build()`, the condition
//! engine reports `UnsupportedType`, and the converter wraps whatever it hits in
//! `Conversion` together with the property path it was walking.
//!
//! ## Design Principles
//!
//! - **Never swallowed**: a malformed tree is never returned in place of an error
//! - **Diagnostic codes**: each variant carries a stable `siren::<area>::<kind>` code
//! - **Flat paths**: nested conversion failures extend one path instead of nesting wrappers

use miette::Diagnostic;
use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type Result<T, E = SirenError> = std::result::Result<T, E>;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Unified error type for builders, conditions, conversion, codec and configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum SirenError {
    #[error("Illegal argument: {name} {reason}")]
    #[diagnostic(code(siren::builder::illegal_argument))]
    IllegalArgument { name: String, reason: String },

    #[error("Builder validation failed for property '{property}' of {target}: {reason}")]
    #[diagnostic(code(siren::builder::validation))]
    BuilderValidation {
        property: String,
        target: &'static str,
        reason: String,
    },

    #[error("Condition {condition} cannot be evaluated against a value of type {type_name}")]
    #[diagnostic(
        code(siren::condition::unsupported_type),
        help("structured values are never classified; pick a condition kind such as NOT_EMPTY")
    )]
    UnsupportedType {
        condition: String,
        type_name: &'static str,
    },

    #[error("Missing {accessor} accessor for property '{property}' of {type_name}")]
    #[diagnostic(code(siren::meta::missing_accessor))]
    MissingAccessor {
        type_name: String,
        property: String,
        accessor: &'static str,
    },

    #[error("Object of type {type_name} is already mutably borrowed")]
    #[diagnostic(code(siren::convert::borrowed))]
    ObjectBorrowed { type_name: String },

    #[error("Unknown resource type '{name}'")]
    #[diagnostic(
        code(siren::meta::unknown_type),
        help("register the type with TypeRegistry::register or convert with to_object_as")
    )]
    UnknownType { name: String },

    #[error("Type mismatch: expected {expected}, found {actual}")]
    #[diagnostic(code(siren::convert::type_mismatch))]
    TypeMismatch { expected: String, actual: String },

    #[error("Unresolved token '{{{token}}}' in uri '{template}'")]
    #[diagnostic(code(siren::convert::unresolved_token))]
    UnresolvedToken { token: String, template: String },

    #[error("Conversion failed at '{path}': {source}")]
    #[diagnostic(code(siren::convert::failed))]
    Conversion {
        path: String,
        #[source]
        source: Box<SirenError>,
    },

    #[error("Codec error: {0}")]
    #[diagnostic(code(siren::codec))]
    Codec(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(siren::config))]
    Config(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(siren::config::json))]
    ConfigJson(#[source] serde_json::Error),
}

/// Coarse classification used by tests and callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Builder,
    Condition,
    Conversion,
    Codec,
    Config,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Builder => "Builder",
            ErrorCategory::Condition => "Condition",
            ErrorCategory::Conversion => "Conversion",
            ErrorCategory::Codec => "Codec",
            ErrorCategory::Config => "Config",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CONSTRUCTION HELPERS
// ============================================================================

impl SirenError {
    pub fn illegal_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SirenError::IllegalArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for the common "cannot be blank" argument failure.
    pub fn blank_argument(name: &str) -> Self {
        Self::illegal_argument(name, "cannot be null or empty.")
    }

    pub fn validation(
        property: impl Into<String>,
        target: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        SirenError::BuilderValidation {
            property: property.into(),
            target,
            reason: reason.into(),
        }
    }

    pub fn unsupported_type(condition: impl Into<String>, type_name: &'static str) -> Self {
        SirenError::UnsupportedType {
            condition: condition.into(),
            type_name,
        }
    }

    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        SirenError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn unknown_type(name: impl Into<String>) -> Self {
        SirenError::UnknownType { name: name.into() }
    }

    /// Attaches a property path segment.
    ///
    /// Segments accumulate outward: an error raised at `reviewer` inside `reviews[1]`
    /// reads `reviews[1].reviewer` once both frames have wrapped it.
    pub fn at(self, segment: impl AsRef<str>) -> Self {
        let segment = segment.as_ref();
        match self {
            SirenError::Conversion { path, source } => {
                let joined = if path.starts_with('[') {
                    format!("{segment}{path}")
                } else {
                    format!("{segment}.{path}")
                };
                SirenError::Conversion {
                    path: joined,
                    source,
                }
            }
            other => SirenError::Conversion {
                path: segment.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The error underneath any `Conversion` wrapping.
    pub fn root_cause(&self) -> &SirenError {
        match self {
            SirenError::Conversion { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The property path, when this error came out of a conversion.
    pub fn path(&self) -> Option<&str> {
        match self {
            SirenError::Conversion { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SirenError::IllegalArgument { .. } | SirenError::BuilderValidation { .. } => {
                ErrorCategory::Builder
            }
            SirenError::UnsupportedType { .. } => ErrorCategory::Condition,
            SirenError::MissingAccessor { .. }
            | SirenError::UnknownType { .. }
            | SirenError::ObjectBorrowed { .. }
            | SirenError::TypeMismatch { .. }
            | SirenError::UnresolvedToken { .. }
            | SirenError::Conversion { .. } => ErrorCategory::Conversion,
            SirenError::Codec(_) => ErrorCategory::Codec,
            SirenError::Config(_) | SirenError::ConfigJson(_) => ErrorCategory::Config,
        }
    }
}

//! # Builder Framework
//!
//! Fluent, validating factories for the tree model. Setter and adder calls never touch a
//! target instance; they append a step to an ordered log. `build()` then:
//!
//! 1. creates a fresh instance (`create_instance`),
//! 2. replays every step in call order (setters overwrite, adders append to a
//!    builder-local accumulator),
//! 3. attaches the accumulated collections (`post_process`),
//! 4. validates the fully populated instance (`validate`).
//!
//! Either a valid instance comes back or an error does; nothing partially built escapes.
//! Because `build` only reads the log, calling it again after more steps replays the
//! whole log from scratch.
//!
//! Required string arguments are checked at call time and fail with
//! [`SirenError::IllegalArgument`](crate::errors::SirenError::IllegalArgument);
//! structural invariants are checked at build time and fail with
//! [`SirenError::BuilderValidation`](crate::errors::SirenError::BuilderValidation).
//!
//! ```rust
//! use siren::builder::{Builder, EntityBuilder, LinkBuilder};
//! # fn main() -> siren::errors::Result<()> {
//! let link = LinkBuilder::new().set_rel(["self"])?.set_href("/orders/123")?.build()?;
//! let order = EntityBuilder::new()
//!     .set_rel(["order"])
//!     .add_property("total", 30.0)?
//!     .add_link(link)
//!     .build()?;
//! assert_eq!(order.property("total"), Some(&serde_json::json!(30.0)));
//! # Ok(())
//! # }
//! ```

mod action;
mod entity;
mod field;
mod link;

pub use action::{ActionBuilder, ActionStep};
pub use entity::{EntityBuilder, EntityStep};
pub use field::{FieldBuilder, FieldStep};
pub use link::{LinkBuilder, LinkStep};

use crate::errors::{Result, SirenError};

// ============================================================================
// CORE TRAIT
// ============================================================================

/// Step-recording builder with deferred replay and validation.
pub trait Builder {
    /// The tree node produced by `build`.
    type Target;
    /// One recorded setter or adder call.
    type Step;
    /// Builder-local state gathered while replaying (collections attached in
    /// `post_process`).
    type Accumulator: Default;

    /// Target name reported by validation failures.
    const TARGET: &'static str;

    fn steps(&self) -> &[Self::Step];

    fn create_instance(&self) -> Self::Target;

    /// Applies one recorded step to the instance under construction.
    fn apply(target: &mut Self::Target, acc: &mut Self::Accumulator, step: &Self::Step);

    fn post_process(_target: &mut Self::Target, _acc: Self::Accumulator) {}

    fn validate(target: &Self::Target) -> Result<()>;

    /// Replays the step log into a fresh instance and validates it.
    fn build(&self) -> Result<Self::Target> {
        let mut target = self.create_instance();
        let mut acc = Self::Accumulator::default();
        for step in self.steps() {
            Self::apply(&mut target, &mut acc, step);
        }
        Self::post_process(&mut target, acc);
        Self::validate(&target)?;
        Ok(target)
    }
}

// ============================================================================
// SHARED ARGUMENT CHECKS
// ============================================================================

/// Rejects blank required strings at call time.
pub(crate) fn require_non_blank(name: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(SirenError::blank_argument(name));
    }
    Ok(value)
}

/// Collects a list of strings, rejecting blank entries and an empty list.
pub(crate) fn require_non_blank_list<I, S>(name: &str, values: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values = values
        .into_iter()
        .map(|v| require_non_blank(name, v))
        .collect::<Result<Vec<_>>>()?;
    if values.is_empty() {
        return Err(SirenError::blank_argument(name));
    }
    Ok(values)
}

pub(crate) fn collect_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) const REQUIRED: &str = "Required property.";

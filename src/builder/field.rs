use super::{is_blank, require_non_blank, Builder, REQUIRED};
use crate::component::{Field, FieldType};
use crate::errors::{Result, SirenError};

/// A recorded [`FieldBuilder`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldStep {
    SetName(String),
    SetType(FieldType),
    SetValue(serde_json::Value),
    SetTitle(String),
    SetRequired(bool),
    SetPattern(String),
    SetPlaceholder(String),
    SetMaxLength(u32),
}

/// Fluent construction of a [`Field`]; `name` is required.
#[derive(Debug, Clone, Default)]
pub struct FieldBuilder {
    steps: Vec<FieldStep>,
}

impl FieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn step(mut self, step: FieldStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn set_name(self, name: impl Into<String>) -> Result<Self> {
        let name = require_non_blank("name", name)?;
        Ok(self.step(FieldStep::SetName(name)))
    }

    pub fn set_type(self, field_type: FieldType) -> Self {
        self.step(FieldStep::SetType(field_type))
    }

    pub fn set_value(self, value: impl Into<serde_json::Value>) -> Self {
        self.step(FieldStep::SetValue(value.into()))
    }

    pub fn set_title(self, title: impl Into<String>) -> Self {
        self.step(FieldStep::SetTitle(title.into()))
    }

    pub fn set_required(self, required: bool) -> Self {
        self.step(FieldStep::SetRequired(required))
    }

    pub fn set_pattern(self, pattern: impl Into<String>) -> Self {
        self.step(FieldStep::SetPattern(pattern.into()))
    }

    pub fn set_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.step(FieldStep::SetPlaceholder(placeholder.into()))
    }

    pub fn set_max_length(self, max_length: u32) -> Self {
        self.step(FieldStep::SetMaxLength(max_length))
    }
}

impl Builder for FieldBuilder {
    type Target = Field;
    type Step = FieldStep;
    type Accumulator = ();

    const TARGET: &'static str = "Field";

    fn steps(&self) -> &[FieldStep] {
        &self.steps
    }

    fn create_instance(&self) -> Field {
        Field::default()
    }

    fn apply(target: &mut Field, _acc: &mut (), step: &FieldStep) {
        match step {
            FieldStep::SetName(name) => target.name = name.clone(),
            FieldStep::SetType(field_type) => target.field_type = *field_type,
            FieldStep::SetValue(value) => target.value = Some(value.clone()),
            FieldStep::SetTitle(title) => target.title = Some(title.clone()),
            FieldStep::SetRequired(required) => target.required = *required,
            FieldStep::SetPattern(pattern) => target.pattern = Some(pattern.clone()),
            FieldStep::SetPlaceholder(placeholder) => {
                target.placeholder = Some(placeholder.clone())
            }
            FieldStep::SetMaxLength(max_length) => target.max_length = Some(*max_length),
        }
    }

    fn validate(target: &Field) -> Result<()> {
        if is_blank(target.name()) {
            return Err(SirenError::validation("name", Self::TARGET, REQUIRED));
        }
        Ok(())
    }
}

use super::{collect_strings, is_blank, require_non_blank, Builder, REQUIRED};
use crate::component::{Action, Field, Method};
use crate::errors::{Result, SirenError};
use std::collections::BTreeMap;

/// A recorded [`ActionBuilder`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionStep {
    SetComponentClass(Vec<String>),
    SetName(String),
    SetMethod(Method),
    SetHref(String),
    SetTitle(String),
    SetType(String),
    SetMetaData(BTreeMap<String, String>),
    AddField(Field),
    AddUrlParam(Field),
    AddHeader(Field),
}

#[derive(Default)]
pub struct ActionAccumulator {
    fields: Vec<Field>,
    url_params: Vec<Field>,
    headers: Vec<Field>,
}

/// Fluent construction of an [`Action`]; `name` and `href` are required.
#[derive(Debug, Clone, Default)]
pub struct ActionBuilder {
    steps: Vec<ActionStep>,
}

impl ActionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn step(mut self, step: ActionStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn set_component_class<I, S>(self, class: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step(ActionStep::SetComponentClass(collect_strings(class)))
    }

    pub fn set_name(self, name: impl Into<String>) -> Result<Self> {
        let name = require_non_blank("name", name)?;
        Ok(self.step(ActionStep::SetName(name)))
    }

    pub fn set_method(self, method: Method) -> Self {
        self.step(ActionStep::SetMethod(method))
    }

    pub fn set_href(self, href: impl Into<String>) -> Result<Self> {
        let href = require_non_blank("href", href)?;
        Ok(self.step(ActionStep::SetHref(href)))
    }

    pub fn set_title(self, title: impl Into<String>) -> Self {
        self.step(ActionStep::SetTitle(title.into()))
    }

    pub fn set_type(self, media_type: impl Into<String>) -> Self {
        self.step(ActionStep::SetType(media_type.into()))
    }

    pub fn set_meta_data(self, meta_data: BTreeMap<String, String>) -> Self {
        self.step(ActionStep::SetMetaData(meta_data))
    }

    pub fn add_field(self, field: Field) -> Self {
        self.step(ActionStep::AddField(field))
    }

    pub fn add_fields(self, fields: impl IntoIterator<Item = Field>) -> Self {
        fields.into_iter().fold(self, Self::add_field)
    }

    pub fn add_url_param(self, param: Field) -> Self {
        self.step(ActionStep::AddUrlParam(param))
    }

    pub fn add_url_params(self, params: impl IntoIterator<Item = Field>) -> Self {
        params.into_iter().fold(self, Self::add_url_param)
    }

    pub fn add_header(self, header: Field) -> Self {
        self.step(ActionStep::AddHeader(header))
    }

    pub fn add_headers(self, headers: impl IntoIterator<Item = Field>) -> Self {
        headers.into_iter().fold(self, Self::add_header)
    }
}

impl Builder for ActionBuilder {
    type Target = Action;
    type Step = ActionStep;
    type Accumulator = ActionAccumulator;

    const TARGET: &'static str = "Action";

    fn steps(&self) -> &[ActionStep] {
        &self.steps
    }

    fn create_instance(&self) -> Action {
        Action::default()
    }

    fn apply(target: &mut Action, acc: &mut ActionAccumulator, step: &ActionStep) {
        match step {
            ActionStep::SetComponentClass(class) => target.component_class = class.clone(),
            ActionStep::SetName(name) => target.name = name.clone(),
            ActionStep::SetMethod(method) => target.method = Some(*method),
            ActionStep::SetHref(href) => target.href = href.clone(),
            ActionStep::SetTitle(title) => target.title = Some(title.clone()),
            ActionStep::SetType(media_type) => target.media_type = Some(media_type.clone()),
            ActionStep::SetMetaData(meta_data) => target.meta_data = meta_data.clone(),
            ActionStep::AddField(field) => acc.fields.push(field.clone()),
            ActionStep::AddUrlParam(param) => acc.url_params.push(param.clone()),
            ActionStep::AddHeader(header) => acc.headers.push(header.clone()),
        }
    }

    fn post_process(target: &mut Action, acc: ActionAccumulator) {
        if !acc.fields.is_empty() {
            target.fields = acc.fields;
        }
        if !acc.url_params.is_empty() {
            target.url_params = acc.url_params;
        }
        if !acc.headers.is_empty() {
            target.headers = acc.headers;
        }
    }

    fn validate(target: &Action) -> Result<()> {
        if is_blank(target.name()) {
            return Err(SirenError::validation("name", Self::TARGET, REQUIRED));
        }
        if is_blank(target.href()) {
            return Err(SirenError::validation("href", Self::TARGET, REQUIRED));
        }
        Ok(())
    }
}

use super::{collect_strings, is_blank, require_non_blank, require_non_blank_list, Builder, REQUIRED};
use crate::component::Link;
use crate::errors::{Result, SirenError};

/// A recorded [`LinkBuilder`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkStep {
    SetRel(Vec<String>),
    SetHref(String),
    SetTitle(String),
    SetType(String),
    SetClass(Vec<String>),
}

/// Fluent construction of a [`Link`]; `rel` and `href` are required.
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    steps: Vec<LinkStep>,
}

impl LinkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn step(mut self, step: LinkStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn set_rel<I, S>(self, rel: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rel = require_non_blank_list("rel", rel)?;
        Ok(self.step(LinkStep::SetRel(rel)))
    }

    pub fn set_href(self, href: impl Into<String>) -> Result<Self> {
        let href = require_non_blank("href", href)?;
        Ok(self.step(LinkStep::SetHref(href)))
    }

    pub fn set_title(self, title: impl Into<String>) -> Self {
        self.step(LinkStep::SetTitle(title.into()))
    }

    pub fn set_type(self, media_type: impl Into<String>) -> Self {
        self.step(LinkStep::SetType(media_type.into()))
    }

    pub fn set_component_class<I, S>(self, class: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.step(LinkStep::SetClass(collect_strings(class)))
    }
}

impl Builder for LinkBuilder {
    type Target = Link;
    type Step = LinkStep;
    type Accumulator = ();

    const TARGET: &'static str = "Link";

    fn steps(&self) -> &[LinkStep] {
        &self.steps
    }

    fn create_instance(&self) -> Link {
        Link::default()
    }

    fn apply(target: &mut Link, _acc: &mut (), step: &LinkStep) {
        match step {
            LinkStep::SetRel(rel) => target.rel = rel.clone(),
            LinkStep::SetHref(href) => target.href = href.clone(),
            LinkStep::SetTitle(title) => target.title = Some(title.clone()),
            LinkStep::SetType(media_type) => target.media_type = Some(media_type.clone()),
            LinkStep::SetClass(class) => target.class = class.clone(),
        }
    }

    fn validate(target: &Link) -> Result<()> {
        if target.rel().is_empty() {
            return Err(SirenError::validation("rel", Self::TARGET, REQUIRED));
        }
        if is_blank(target.href()) {
            return Err(SirenError::validation("href", Self::TARGET, REQUIRED));
        }
        Ok(())
    }
}

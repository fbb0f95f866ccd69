//! Template mutations
//!
//! Every edit goes through a [`TemplateAction`]. Applying an action never
//! touches the input snapshot: the result is a new [`Template`] that shares
//! all untouched components with the old one and holds a fresh copy of the
//! component that changed.

use std::sync::Arc;

use thiserror::Error;

use crate::scanner::scan;

use super::types::{Button, ButtonSet, ButtonType, Category, Header, HeaderFormat, Template};

/// Hard platform limit on buttons per template
pub const MAX_BUTTONS: usize = 10;

/// Errors that can occur while applying an action
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("button index {index} out of range ({len} buttons)")]
    ButtonIndexOutOfRange { index: usize, len: usize },

    #[error("example index {index} out of range ({len} body variables)")]
    ExampleIndexOutOfRange { index: usize, len: usize },

    #[error("template '{name}' already exists; its name cannot change")]
    NameLocked { name: String },
}

/// A single field of a button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonField {
    Type(ButtonType),
    Text(String),
    Url(Option<String>),
    PhoneNumber(Option<String>),
    Example(Option<String>),
}

/// An edit to a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateAction {
    SetName(String),
    SetLanguage(String),
    SetCategory(Category),
    SetHeaderEnabled(bool),
    SetHeaderFormat(HeaderFormat),
    SetHeaderText(String),
    SetHeaderMediaUrl(Option<String>),
    SetHeaderExample(Option<String>),
    SetBodyText(String),
    SetBodyExample { index: usize, value: String },
    SetFooterEnabled(bool),
    SetFooterText(String),
    SetButtonsEnabled(bool),
    AddButton,
    RemoveButton(usize),
    SetButtonField { index: usize, field: ButtonField },
}

impl Template {
    /// Apply an action, returning the next snapshot
    pub fn apply(&self, action: TemplateAction) -> Result<Template, ModelError> {
        apply(self, action)
    }
}

/// Apply `action` to `template`, returning the next snapshot.
pub fn apply(template: &Template, action: TemplateAction) -> Result<Template, ModelError> {
    tracing::debug!(?action, "applying template action");
    let mut next = template.clone();

    match action {
        TemplateAction::SetName(name) => {
            if next.is_created() && next.name != name {
                return Err(ModelError::NameLocked { name: next.name });
            }
            next.name = name;
        }
        TemplateAction::SetLanguage(language) => next.language = language,
        TemplateAction::SetCategory(category) => next.category = Some(category),

        TemplateAction::SetHeaderEnabled(enabled) => header_mut(&mut next).enabled = enabled,
        TemplateAction::SetHeaderFormat(format) => {
            let header = header_mut(&mut next);
            if format.is_media() {
                header.text.clear();
                header.example = None;
            } else {
                header.media_url = None;
            }
            header.format = format;
        }
        TemplateAction::SetHeaderText(text) => header_mut(&mut next).text = text,
        TemplateAction::SetHeaderMediaUrl(url) => header_mut(&mut next).media_url = url,
        TemplateAction::SetHeaderExample(example) => header_mut(&mut next).example = example,

        TemplateAction::SetBodyText(text) => {
            let body = Arc::make_mut(&mut next.body);
            let slots = scan(&text).len();
            body.examples.resize(slots, String::new());
            body.text = text;
        }
        TemplateAction::SetBodyExample { index, value } => {
            let body = Arc::make_mut(&mut next.body);
            let len = body.examples.len();
            let slot = body
                .examples
                .get_mut(index)
                .ok_or(ModelError::ExampleIndexOutOfRange { index, len })?;
            *slot = value;
        }

        TemplateAction::SetFooterEnabled(enabled) => {
            Arc::make_mut(next.footer.get_or_insert_with(Default::default)).enabled = enabled
        }
        TemplateAction::SetFooterText(text) => {
            Arc::make_mut(next.footer.get_or_insert_with(Default::default)).text = text
        }

        TemplateAction::SetButtonsEnabled(enabled) => buttons_mut(&mut next).enabled = enabled,
        TemplateAction::AddButton => {
            let set = buttons_mut(&mut next);
            if set.items.len() >= MAX_BUTTONS {
                tracing::debug!("button limit reached; ignoring add");
                return Ok(template.clone());
            }
            set.items
                .push(Button::new(ButtonType::QuickReply, String::new()));
            set.enabled = true;
        }
        TemplateAction::RemoveButton(index) => {
            let set = buttons_mut(&mut next);
            check_index(set, index)?;
            set.items.remove(index);
            if set.items.is_empty() {
                set.enabled = false;
            }
        }
        TemplateAction::SetButtonField { index, field } => {
            let set = buttons_mut(&mut next);
            check_index(set, index)?;
            let button = &mut set.items[index];
            match field {
                ButtonField::Type(kind) => button.kind = kind,
                ButtonField::Text(text) => button.text = text,
                ButtonField::Url(url) => button.url = url,
                ButtonField::PhoneNumber(phone) => button.phone_number = phone,
                ButtonField::Example(example) => button.example = example,
            }
        }
    }

    Ok(next)
}

fn header_mut(template: &mut Template) -> &mut Header {
    Arc::make_mut(template.header.get_or_insert_with(Default::default))
}

fn buttons_mut(template: &mut Template) -> &mut ButtonSet {
    Arc::make_mut(template.buttons.get_or_insert_with(Default::default))
}

fn check_index(set: &ButtonSet, index: usize) -> Result<(), ModelError> {
    if index < set.items.len() {
        Ok(())
    } else {
        Err(ModelError::ButtonIndexOutOfRange {
            index,
            len: set.items.len(),
        })
    }
}

//! Mapping between templates and the platform's `components[]` payload
//!
//! The mapping is lossless for everything the platform stores: converting a
//! template to a payload and back yields the same active components.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{
    Body, Button, ButtonSet, ButtonType, Category, Footer, Header, HeaderFormat, Template,
};
use crate::scanner::scan;

/// Body of a template creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Component {
    Header {
        format: HeaderFormat,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example: Option<HeaderExample>,
    },
    Body {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        example: Option<BodyExample>,
    },
    Footer {
        text: String,
    },
    Buttons {
        buttons: Vec<ButtonComponent>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_text: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_handle: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyExample {
    /// One row of sample values, one per body variable
    pub body_text: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ButtonComponent {
    QuickReply {
        text: String,
    },
    Url {
        text: String,
        url: String,
    },
    PhoneNumber {
        text: String,
        phone_number: String,
    },
    CopyCode {
        text: String,
        example: String,
    },
}

impl From<&Button> for ButtonComponent {
    fn from(button: &Button) -> Self {
        let text = button.text.clone();
        // Validation checks trimmed values; send what was checked
        let or_empty = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };
        match button.kind {
            ButtonType::QuickReply => ButtonComponent::QuickReply { text },
            ButtonType::Url => ButtonComponent::Url {
                text,
                url: or_empty(&button.url),
            },
            ButtonType::PhoneNumber => ButtonComponent::PhoneNumber {
                text,
                phone_number: or_empty(&button.phone_number),
            },
            ButtonType::CopyCode => ButtonComponent::CopyCode {
                text,
                example: or_empty(&button.example),
            },
        }
    }
}

impl From<ButtonComponent> for Button {
    fn from(component: ButtonComponent) -> Self {
        match component {
            ButtonComponent::QuickReply { text } => Button::new(ButtonType::QuickReply, text),
            ButtonComponent::Url { text, url } => Button::new(ButtonType::Url, text).with_url(url),
            ButtonComponent::PhoneNumber { text, phone_number } => {
                Button::new(ButtonType::PhoneNumber, text).with_phone_number(phone_number)
            }
            ButtonComponent::CopyCode { text, example } => {
                Button::new(ButtonType::CopyCode, text).with_example(example)
            }
        }
    }
}

/// Serialize the active parts of `template` into a submission payload.
pub fn to_payload(template: &Template) -> SubmissionPayload {
    let mut components = Vec::new();

    if let Some(header) = template.active_header() {
        components.push(header_component(header));
    }

    let slots = scan(&template.body.text).len();
    components.push(Component::Body {
        text: template.body.text.clone(),
        example: (slots > 0).then(|| BodyExample {
            body_text: vec![template
                .body
                .examples
                .iter()
                .take(slots)
                .cloned()
                .collect()],
        }),
    });

    if let Some(footer) = template.active_footer() {
        if !footer.text.trim().is_empty() {
            components.push(Component::Footer {
                text: footer.text.clone(),
            });
        }
    }

    let buttons = template.active_buttons();
    if !buttons.is_empty() {
        components.push(Component::Buttons {
            buttons: buttons.iter().map(ButtonComponent::from).collect(),
        });
    }

    SubmissionPayload {
        name: template.name.clone(),
        language: template.language.clone(),
        category: template.category,
        components,
    }
}

fn header_component(header: &Header) -> Component {
    if header.format.is_media() {
        return Component::Header {
            format: header.format,
            text: None,
            example: header.media_url.as_ref().map(|url| HeaderExample {
                header_text: None,
                header_handle: Some(vec![url.clone()]),
            }),
        };
    }

    let has_variable = !scan(&header.text).is_empty();
    Component::Header {
        format: header.format,
        text: Some(header.text.clone()),
        example: header
            .example
            .as_ref()
            .filter(|_| has_variable)
            .map(|value| HeaderExample {
                header_text: Some(vec![value.clone()]),
                header_handle: None,
            }),
    }
}

/// Rebuild a template from a submission payload.
pub fn from_payload(payload: SubmissionPayload) -> Template {
    let mut template = Template {
        name: payload.name,
        language: payload.language,
        category: payload.category,
        ..Default::default()
    };

    for component in payload.components {
        match component {
            Component::Header {
                format,
                text,
                example,
            } => {
                let example = example.unwrap_or(HeaderExample {
                    header_text: None,
                    header_handle: None,
                });
                template.header = Some(Arc::new(Header {
                    enabled: true,
                    format,
                    text: text.unwrap_or_default(),
                    media_url: example.header_handle.and_then(|h| h.into_iter().next()),
                    example: example.header_text.and_then(|h| h.into_iter().next()),
                }));
            }
            Component::Body { text, example } => {
                template.body = Arc::new(Body {
                    text,
                    examples: example
                        .and_then(|e| e.body_text.into_iter().next())
                        .unwrap_or_default(),
                });
            }
            Component::Footer { text } => {
                template.footer = Some(Arc::new(Footer {
                    enabled: true,
                    text,
                }));
            }
            Component::Buttons { buttons } => {
                template.buttons = Some(Arc::new(ButtonSet {
                    enabled: true,
                    items: buttons.into_iter().map(Button::from).collect(),
                }));
            }
        }
    }

    template
}

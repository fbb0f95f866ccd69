//! Template data types
//!
//! Components are held behind `Arc` so that a snapshot produced by the
//! reducer shares every component it did not touch with its predecessor.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// WhatsApp classification of template intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Marketing,
    Utility,
    Authentication,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Marketing => write!(f, "MARKETING"),
            Category::Utility => write!(f, "UTILITY"),
            Category::Authentication => write!(f, "AUTHENTICATION"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderFormat {
    #[default]
    Text,
    Image,
    Video,
    Document,
}

impl HeaderFormat {
    pub fn is_media(&self) -> bool {
        !matches!(self, HeaderFormat::Text)
    }
}

impl fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderFormat::Text => write!(f, "TEXT"),
            HeaderFormat::Image => write!(f, "IMAGE"),
            HeaderFormat::Video => write!(f, "VIDEO"),
            HeaderFormat::Document => write!(f, "DOCUMENT"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ButtonType {
    #[default]
    QuickReply,
    Url,
    PhoneNumber,
    CopyCode,
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonType::QuickReply => write!(f, "QUICK_REPLY"),
            ButtonType::Url => write!(f, "URL"),
            ButtonType::PhoneNumber => write!(f, "PHONE_NUMBER"),
            ButtonType::CopyCode => write!(f, "COPY_CODE"),
        }
    }
}

/// Optional block shown above the body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Header {
    pub enabled: bool,
    pub format: HeaderFormat,
    /// Only meaningful for `HeaderFormat::Text`
    pub text: String,
    /// Sample media for non-text formats
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Sample value for the header placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Body {
    pub text: String,
    /// One sample value per placeholder slot
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Footer {
    pub enabled: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: ButtonType,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Button {
    pub fn new(kind: ButtonType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonSet {
    pub enabled: bool,
    pub items: Vec<Button>,
}

/// A structured outbound message template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    /// Assigned by the backend; once set the template name is locked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub language: String,
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Arc<Header>>,
    pub body: Arc<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Arc<Footer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Arc<ButtonSet>>,
}

impl Template {
    /// Create an empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a template from JSON
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Whether the backend has already stored this template
    pub fn is_created(&self) -> bool {
        self.id.is_some()
    }

    /// The header, if present and enabled
    pub fn active_header(&self) -> Option<&Header> {
        self.header.as_deref().filter(|h| h.enabled)
    }

    /// The footer, if present and enabled
    pub fn active_footer(&self) -> Option<&Footer> {
        self.footer.as_deref().filter(|f| f.enabled)
    }

    /// Buttons that will be sent; empty when the set is absent or disabled
    pub fn active_buttons(&self) -> &[Button] {
        match self.buttons.as_deref() {
            Some(set) if set.enabled => &set.items,
            _ => &[],
        }
    }

    /// Text of a field addressed by its validation path
    pub fn field_text(&self, field: &str) -> Option<&str> {
        match field {
            "body.text" => Some(&self.body.text),
            "header.text" => self.header.as_deref().map(|h| h.text.as_str()),
            "footer.text" => self.footer.as_deref().map(|f| f.text.as_str()),
            _ => None,
        }
    }
}

//! Structural message preview
//!
//! [`compose`] turns a template and a set of values into a tree that any
//! surface can draw. Each text passes through [`substitute`] and then
//! [`format`]. Composing never fails: incomplete templates produce
//! placeholders instead of errors.

use serde::{Deserialize, Serialize};

use crate::format::{format, substitute, StyledText};
use crate::model::{ButtonType, HeaderFormat, Template};

/// Values to substitute into the preview
///
/// A blank or missing value falls back to the template's own example for
/// that slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewValues {
    pub header: Vec<String>,
    pub body: Vec<String>,
}

impl PreviewValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_body<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = values.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HeaderBlock {
    Text { content: StyledText },
    Media { format: HeaderFormat, url: String },
    /// Media header whose sample has not been provided yet
    Placeholder { format: HeaderFormat },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPreview {
    #[serde(rename = "type")]
    pub kind: ButtonType,
    pub text: String,
    /// URL, phone number or code the button acts on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderBlock>,
    pub body: StyledText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<StyledText>,
    pub buttons: Vec<ButtonPreview>,
}

/// Merge live values over template examples, slot by slot
fn merge(live: &[String], examples: &[String]) -> Vec<String> {
    let len = live.len().max(examples.len());
    (0..len)
        .map(|i| {
            live.get(i)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| examples.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .collect()
}

fn render(text: &str, values: &[String]) -> StyledText {
    format(&substitute(text, values))
}

/// Build the preview tree for `template`.
pub fn compose(template: &Template, values: &PreviewValues) -> Preview {
    let header = template.active_header().map(|h| match h.format {
        HeaderFormat::Text => {
            let examples: Vec<String> = h.example.iter().cloned().collect();
            HeaderBlock::Text {
                content: render(&h.text, &merge(&values.header, &examples)),
            }
        }
        media => match h.media_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => HeaderBlock::Media {
                format: media,
                url: url.to_string(),
            },
            _ => HeaderBlock::Placeholder { format: media },
        },
    });

    let body = render(
        &template.body.text,
        &merge(&values.body, &template.body.examples),
    );

    let footer = template
        .active_footer()
        .filter(|f| !f.text.trim().is_empty())
        .map(|f| format(&f.text));

    let buttons = template
        .active_buttons()
        .iter()
        .map(|b| ButtonPreview {
            kind: b.kind,
            text: b.text.clone(),
            target: match b.kind {
                ButtonType::QuickReply => None,
                ButtonType::Url => b.url.clone(),
                ButtonType::PhoneNumber => b.phone_number.clone(),
                ButtonType::CopyCode => b.example.clone(),
            },
        })
        .collect();

    Preview {
        header,
        body,
        footer,
        buttons,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::format::{Segment, Style};
    use crate::model::{Body, Button, ButtonSet, Footer, Header};
    use pretty_assertions::assert_eq;

    fn template() -> Template {
        Template {
            name: "receipt".into(),
            header: Some(Arc::new(Header {
                enabled: true,
                text: "Receipt for {{1}}".into(),
                example: Some("Ana".into()),
                ..Default::default()
            })),
            body: Arc::new(Body {
                text: "Total: *{{1}}*, paid {{2}}".into(),
                examples: vec!["$10".into(), "today".into()],
            }),
            footer: Some(Arc::new(Footer {
                enabled: true,
                text: "_Thanks!_".into(),
            })),
            buttons: Some(Arc::new(ButtonSet {
                enabled: true,
                items: vec![
                    Button::new(ButtonType::Url, "View").with_url("https://r.example/1"),
                    Button::new(ButtonType::QuickReply, "OK"),
                ],
            })),
            ..Default::default()
        }
    }

    #[test]
    fn test_compose_with_examples() {
        let preview = compose(&template(), &PreviewValues::new());
        assert_eq!(
            preview.header,
            Some(HeaderBlock::Text {
                content: format("Receipt for Ana")
            })
        );
        assert_eq!(
            preview.body.segments,
            vec![
                Segment {
                    style: Style::Plain,
                    text: "Total: ".into()
                },
                Segment {
                    style: Style::Bold,
                    text: "$10".into()
                },
                Segment {
                    style: Style::Plain,
                    text: ", paid today".into()
                },
            ]
        );
        assert_eq!(preview.footer.unwrap().segments[0].style, Style::Italic);
        assert_eq!(preview.buttons.len(), 2);
        assert_eq!(preview.buttons[0].target.as_deref(), Some("https://r.example/1"));
        assert_eq!(preview.buttons[1].target, None);
    }

    #[test]
    fn test_live_values_override_examples_per_slot() {
        let values = PreviewValues::new().with_body(["$99", ""]);
        let preview = compose(&template(), &values);
        assert_eq!(preview.body.plain_text(), "Total: $99, paid today");
    }

    #[test]
    fn test_missing_values_render_placeholders() {
        let mut t = template();
        t.body = Arc::new(Body {
            text: "Hi {{1}} and {{2}}".into(),
            examples: vec![],
        });
        let preview = compose(&t, &PreviewValues::new());
        assert_eq!(
            preview.body.plain_text(),
            "Hi [Variable 1] and [Variable 2]"
        );
    }

    #[test]
    fn test_media_header_without_url_is_placeholder() {
        let mut t = template();
        t.header = Some(Arc::new(Header {
            enabled: true,
            format: HeaderFormat::Document,
            ..Default::default()
        }));
        let preview = compose(&t, &PreviewValues::new());
        assert_eq!(
            preview.header,
            Some(HeaderBlock::Placeholder {
                format: HeaderFormat::Document
            })
        );
    }

    #[test]
    fn test_empty_template_still_composes() {
        let preview = compose(&Template::new(), &PreviewValues::new());
        assert!(preview.header.is_none());
        assert!(preview.body.is_empty());
        assert!(preview.footer.is_none());
        assert!(preview.buttons.is_empty());
    }

    #[test]
    fn test_preview_json_shape() {
        let mut t = template();
        t.buttons = None;
        t.footer = None;
        t.header = Some(Arc::new(Header {
            enabled: true,
            format: HeaderFormat::Image,
            ..Default::default()
        }));
        t.body = Arc::new(Body {
            text: "Hi".into(),
            examples: vec![],
        });
        let value = serde_json::to_value(compose(&t, &PreviewValues::new())).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "header": {"kind": "placeholder", "format": "IMAGE"},
                "body": [{"style": "plain", "text": "Hi"}],
                "buttons": []
            })
        );
    }
}

//! Field and cross-field checks, grouped by wizard step

use std::sync::OnceLock;

use regex::Regex;

use crate::config::{EngineConfig, Limits};
use crate::error::Issue;
use crate::model::{Body, Button, ButtonType, Footer, Header, Template};
use crate::scanner::{first_gap, occurrences, scan};

use super::category::rules_for;
use super::Collector;

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9_]+$").expect("name pattern is valid"))
}

fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+[0-9]{8,15}$").expect("phone pattern is valid"))
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

// ── Step 1: details ───────────────────────────────────────────────

pub(super) fn check_details(template: &Template, config: &EngineConfig, out: &mut Collector) {
    let name = template.name.as_str();
    if name.is_empty() {
        out.error(Issue::new("name", "Template name is required"));
    } else {
        if !name_pattern().is_match(name) {
            out.error(Issue::new(
                "name",
                "Template name may only contain lowercase letters, numbers and underscores",
            ));
        }
        if char_len(name) > config.limits.name {
            out.error(Issue::new(
                "name",
                format!(
                    "Template name must be at most {} characters",
                    config.limits.name
                ),
            ));
        }
    }

    if template.category.is_none() {
        out.error(Issue::new("category", "Template category is required"));
    }

    let language = template.language.as_str();
    if language.trim().is_empty() {
        out.error(Issue::new("language", "Template language is required"));
    } else if !config.is_supported_language(language) {
        out.error(Issue::new(
            "language",
            format!("Unsupported language code '{}'", language),
        ));
    }
}

// ── Step 2: content ───────────────────────────────────────────────

pub(super) fn check_content(template: &Template, config: &EngineConfig, out: &mut Collector) {
    check_body(&template.body, &config.limits, out);
    if let Some(header) = template.active_header() {
        check_header(header, &config.limits, out);
    }
    if let Some(footer) = template.active_footer() {
        check_footer(footer, &config.limits, out);
    }
    check_category(template, out);
}

fn check_body(body: &Body, limits: &Limits, out: &mut Collector) {
    let text = body.text.as_str();

    if text.trim().is_empty() {
        out.error(Issue::new("body.text", "Body text is required"));
    }
    let len = char_len(text);
    if len > limits.body_text {
        out.error(Issue::new(
            "body.text",
            format!(
                "Body text must be at most {} characters (currently {})",
                limits.body_text, len
            ),
        ));
    }

    let occ = occurrences(text);
    let ordinals = scan(text);

    if let Some((expected, found)) = first_gap(&ordinals) {
        let mut issue = Issue::new(
            "body.text",
            format!(
                "Variables must be numbered sequentially from {{{{1}}}}: expected {{{{{}}}}} but found {{{{{}}}}}",
                expected, found
            ),
        );
        if let Some(o) = occ.iter().find(|o| o.ordinal == found) {
            issue = issue.with_span(o.span.clone());
        }
        out.error(issue);
    }

    let slots = ordinals.len();
    let missing = (0..slots)
        .filter(|i| is_blank(body.examples.get(*i).map(String::as_str)))
        .count();
    if missing > 0 {
        out.error(Issue::new(
            "body.examples",
            format!(
                "Missing {} example value(s) for {} body variable(s)",
                missing, slots
            ),
        ));
    }
    let extra = body
        .examples
        .iter()
        .skip(slots)
        .filter(|e| !e.trim().is_empty())
        .count();
    if extra > 0 {
        out.warn(Issue::new(
            "body.examples",
            format!("{} extra example value(s) will be ignored", extra),
        ));
    }

    let content_start = text.len() - text.trim_start().len();
    if let Some(first) = occ.first().filter(|o| o.span.start == content_start) {
        out.warn(
            Issue::new("body.text", "Body text should not start with a variable")
                .with_span(first.span.clone()),
        );
    }
    let content_end = text.trim_end().len();
    if let Some(last) = occ.last().filter(|o| o.span.end == content_end) {
        out.warn(
            Issue::new("body.text", "Body text should not end with a variable")
                .with_span(last.span.clone()),
        );
    }
}

fn check_header(header: &Header, limits: &Limits, out: &mut Collector) {
    if header.format.is_media() {
        if is_blank(header.media_url.as_deref()) {
            out.warn(Issue::new(
                "header.media",
                format!(
                    "A sample {} will be required before submission",
                    header.format.to_string().to_lowercase()
                ),
            ));
        }
        return;
    }

    let text = header.text.as_str();
    if text.trim().is_empty() {
        out.error(Issue::new("header.text", "Header text is required"));
    }
    let len = char_len(text);
    if len > limits.header_text {
        out.error(Issue::new(
            "header.text",
            format!(
                "Header text must be at most {} characters (currently {})",
                limits.header_text, len
            ),
        ));
    }

    let occ = occurrences(text);
    match scan(text).as_slice() {
        [] => {}
        [1] => {
            if is_blank(header.example.as_deref()) {
                out.warn(Issue::new(
                    "header.example",
                    "Provide an example value for the header variable",
                ));
            }
        }
        [_] => {
            let mut issue = Issue::new("header.text", "The header variable must be {{1}}");
            if let Some(o) = occ.first() {
                issue = issue.with_span(o.span.clone());
            }
            out.error(issue);
        }
        _ => out.error(Issue::new(
            "header.text",
            "Header text can contain at most one variable",
        )),
    }
}

fn check_footer(footer: &Footer, limits: &Limits, out: &mut Collector) {
    let text = footer.text.as_str();
    if text.trim().is_empty() {
        out.warn(Issue::new(
            "footer.text",
            "Footer is enabled but empty; it will be left out",
        ));
    }
    let len = char_len(text);
    if len > limits.footer_text {
        out.error(Issue::new(
            "footer.text",
            format!(
                "Footer text must be at most {} characters (currently {})",
                limits.footer_text, len
            ),
        ));
    }
    if let Some(o) = occurrences(text).first() {
        out.error(
            Issue::new("footer.text", "Footer text cannot contain variables")
                .with_span(o.span.clone()),
        );
    }
}

fn check_category(template: &Template, out: &mut Collector) {
    let Some(category) = template.category else {
        return;
    };
    let rules = rules_for(category);

    if !rules.allows_header && template.active_header().is_some() {
        out.error(Issue::new(
            "header",
            format!("{} templates cannot include a header", category),
        ));
    }
    if rules.requires_code_variable
        && !occurrences(&template.body.text)
            .iter()
            .any(|o| o.ordinal == 1)
    {
        out.error(Issue::new(
            "body.text",
            format!(
                "{} templates must include the {{{{1}}}} code variable in the body",
                category
            ),
        ));
    }
}

// ── Step 3: buttons ───────────────────────────────────────────────

pub(super) fn check_buttons(template: &Template, config: &EngineConfig, out: &mut Collector) {
    let Some(set) = template.buttons.as_deref().filter(|s| s.enabled) else {
        return;
    };
    let limits = &config.limits;

    if set.items.is_empty() {
        out.warn(Issue::new(
            "buttons",
            "Buttons are enabled but none have been added",
        ));
        return;
    }

    for (i, button) in set.items.iter().enumerate() {
        check_button(i, button, limits, out);
    }

    let count = |kind: ButtonType| set.items.iter().filter(|b| b.kind == kind).count();
    let caps = [
        ("URL", count(ButtonType::Url), limits.url_buttons),
        (
            "phone number",
            count(ButtonType::PhoneNumber),
            limits.phone_buttons,
        ),
        (
            "copy code",
            count(ButtonType::CopyCode),
            limits.copy_code_buttons,
        ),
    ];

    if set.items.len() > limits.buttons {
        out.error(Issue::new(
            "buttons.items",
            format!(
                "Too many buttons: {} (maximum {})",
                set.items.len(),
                limits.buttons
            ),
        ));
    }
    for (label, found, max) in caps {
        if found > max {
            out.error(Issue::new(
                "buttons.items",
                format!("Too many {} buttons: {} (maximum {})", label, found, max),
            ));
        }
    }
}

fn check_button(index: usize, button: &Button, limits: &Limits, out: &mut Collector) {
    let field = |name: &str| format!("buttons.items.{}.{}", index, name);

    let len = char_len(&button.text);
    if button.text.trim().is_empty() {
        out.error(Issue::new(field("text"), "Button text is required"));
    } else if len > limits.button_text {
        out.error(Issue::new(
            field("text"),
            format!(
                "Button text must be at most {} characters (currently {})",
                limits.button_text, len
            ),
        ));
    }

    match button.kind {
        ButtonType::QuickReply => {}
        ButtonType::Url => match button.url.as_deref().map(str::trim) {
            None | Some("") => {
                out.error(Issue::new(field("url"), "URL is required for URL buttons"))
            }
            Some(url) if !url.starts_with("https://") || url.len() <= "https://".len() => {
                out.error(Issue::new(field("url"), "URL must start with https://"))
            }
            Some(_) => {}
        },
        ButtonType::PhoneNumber => match button.phone_number.as_deref().map(str::trim) {
            None | Some("") => out.error(Issue::new(
                field("phoneNumber"),
                "Phone number is required for phone number buttons",
            )),
            Some(phone) => {
                let digits: String = phone
                    .chars()
                    .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
                    .collect();
                if !phone_pattern().is_match(&digits) {
                    out.error(Issue::new(
                        field("phoneNumber"),
                        "Phone number must be in international format, e.g. +14155550123",
                    ));
                }
            }
        },
        ButtonType::CopyCode => match button.example.as_deref().map(str::trim) {
            None | Some("") => out.error(Issue::new(
                field("example"),
                "An example code is required for copy code buttons",
            )),
            Some(code) if char_len(code) > limits.copy_code => out.error(Issue::new(
                field("example"),
                format!(
                    "Example code must be at most {} characters",
                    limits.copy_code
                ),
            )),
            Some(_) => {}
        },
    }
}

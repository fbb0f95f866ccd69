//! Inline formatting and placeholder substitution
//!
//! WhatsApp renders four inline spans: `*bold*`, `_italic_`, `~strike~` and
//! ```` ```monospace``` ````. Spans are flat (a span's contents are literal),
//! must be non-empty, and end at the first matching delimiter on the same
//! line. A delimiter without a partner is kept as a literal character.

use serde::{Deserialize, Serialize};

use crate::scanner::{lex, occurrences, Token};

/// Visual style of a text segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Plain,
    Bold,
    Italic,
    Strikethrough,
    Monospace,
}

impl Style {
    fn for_delimiter(tok: Token) -> Option<Style> {
        match tok {
            Token::Star => Some(Style::Bold),
            Token::Underscore => Some(Style::Italic),
            Token::Tilde => Some(Style::Strikethrough),
            Token::Fence => Some(Style::Monospace),
            _ => None,
        }
    }
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub style: Style,
    pub text: String,
}

/// Formatted text as a flat list of styled segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyledText {
    pub segments: Vec<Segment>,
}

impl StyledText {
    /// Append text, merging with the previous segment when the style matches
    fn push(&mut self, style: Style, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.segments.push(Segment {
                style,
                text: text.to_string(),
            }),
        }
    }

    /// The visible text with all styling dropped
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split `text` into styled segments.
pub fn format(text: &str) -> StyledText {
    let tokens: Vec<_> = lex(text).collect();
    let mut out = StyledText::default();
    let mut i = 0;

    while i < tokens.len() {
        let (tok, span) = &tokens[i];
        let style = Style::for_delimiter(*tok);

        if let Some(style) = style {
            if let Some(close) = find_closing(&tokens, i) {
                let inner = tokens[i].1.end..tokens[close].1.start;
                out.push(style, &text[inner]);
                i = close + 1;
                continue;
            }
        }

        out.push(Style::Plain, &text[span.clone()]);
        i += 1;
    }

    out
}

/// Index of the delimiter closing the one at `open`, if any.
fn find_closing(tokens: &[(Token, crate::scanner::Span)], open: usize) -> Option<usize> {
    let delimiter = tokens[open].0;
    for (j, (tok, _)) in tokens.iter().enumerate().skip(open + 1) {
        if *tok == Token::Newline {
            return None;
        }
        if *tok == delimiter {
            // Empty spans such as `**` stay literal
            return (j > open + 1).then_some(j);
        }
    }
    None
}

/// Replace placeholders positionally.
///
/// The i-th placeholder occurrence in reading order takes `values[i]`,
/// regardless of its number. A missing or blank value renders as
/// `[Variable i+1]`.
pub fn substitute(text: &str, values: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for (i, occ) in occurrences(text).into_iter().enumerate() {
        out.push_str(&text[cursor..occ.span.start]);
        match values.get(i).filter(|v| !v.trim().is_empty()) {
            Some(value) => out.push_str(value),
            None => out.push_str(&format!("[Variable {}]", i + 1)),
        }
        cursor = occ.span.end;
    }

    out.push_str(&text[cursor..]);
    out
}

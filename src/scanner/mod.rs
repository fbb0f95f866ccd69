//! Placeholder scanning for template text
//!
//! Template fields reference per-send values through numbered placeholders
//! of the exact form `{{n}}`. This module extracts them either as the
//! sorted ordinal set (what sequencing checks care about) or as the list of
//! occurrences in reading order (what positional substitution consumes).

pub mod lexer;

use std::collections::BTreeSet;

pub use lexer::{lex, Span, Token};

/// A single placeholder occurrence in a text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// The number inside the braces
    pub ordinal: u32,
    /// Byte range of the whole `{{n}}` token
    pub span: Span,
}

/// Sorted, de-duplicated placeholder ordinals found in `text`.
pub fn scan(text: &str) -> Vec<u32> {
    occurrences(text)
        .into_iter()
        .map(|o| o.ordinal)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every placeholder occurrence in left-to-right order.
pub fn occurrences(text: &str) -> Vec<Occurrence> {
    lex(text)
        .filter_map(|(tok, span)| match tok {
            Token::Variable(ordinal) => Some(Occurrence { ordinal, span }),
            _ => None,
        })
        .collect()
}

/// First position where `ordinals` (sorted, distinct) departs from `1..=k`.
///
/// Returns `(expected, found)`.
pub fn first_gap(ordinals: &[u32]) -> Option<(u32, u32)> {
    ordinals
        .iter()
        .zip(1u32..)
        .find(|(found, expected)| **found != *expected)
        .map(|(found, expected)| (expected, *found))
}

//! Error types for validation results and engine failures

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::model::ModelError;
use crate::wizard::WizardError;

/// Byte range in a field's text
pub type Span = std::ops::Range<usize>;

/// How much a validation issue matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks step advancement and submission
    Error,
    /// Informational only
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A validation finding attributed to one template field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Dotted path of the originating input, e.g. `buttons.items.1.url`
    pub field: String,
    pub message: String,
    /// Offending range inside the field's text, when it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Issue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Format the issue with source context using ariadne
    ///
    /// `source` is the text of the field the issue points at. Issues without
    /// a span are reported against the whole field.
    pub fn format(&self, severity: Severity, source: &str, filename: &str) -> String {
        let (kind, color) = match severity {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };
        let span = self
            .span
            .clone()
            .filter(|s| source.get(s.clone()).is_some())
            .unwrap_or(0..source.len());
        // ariadne counts characters, spans are byte offsets
        let chars = |offset: usize| source[..offset].chars().count();
        let span = chars(span.start)..chars(span.end);

        let mut buf = Vec::new();
        let written = Report::build(kind, filename, span.start)
            .with_message(format!("{}: {}", self.field, self.message))
            .with_label(
                Label::new((filename, span))
                    .with_message(&self.message)
                    .with_color(color),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur outside of validation
///
/// Validation findings are never errors; they are returned as data in a
/// [`crate::ValidationResult`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("api error: {0}")]
    Api(#[from] ApiError),
}

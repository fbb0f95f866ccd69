//! WhatsApp message template engine
//!
//! This library models outbound message templates, validates them step by
//! step, drives the creation wizard and composes previews.
//!
//! # Example
//!
//! ```rust
//! use wa_templates::{check, WizardStep};
//!
//! let result = check(r#"{"name": "welcome", "language": "en", "category": "MARKETING"}"#,
//!     WizardStep::Details).unwrap();
//! assert!(result.valid);
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod preview;
pub mod renderer;
pub mod scanner;
pub mod session;
pub mod submission;
pub mod validate;
pub mod wizard;

pub use api::{ApiError, RequestClient, TemplateService};
pub use config::{EngineConfig, Limits};
pub use error::{EngineError, Issue, Severity};
pub use model::{Category, Template, TemplateAction};
pub use preview::{compose, Preview, PreviewValues};
pub use renderer::{render_text, TextConfig};
pub use session::EditorSession;
pub use submission::{to_payload, SubmissionPayload};
pub use validate::{ValidationResult, Validator};
pub use wizard::{Wizard, WizardStep};

/// Validate template JSON for one wizard step with the default configuration
pub fn check(source: &str, step: WizardStep) -> Result<ValidationResult, EngineError> {
    check_with_config(source, step, &Validator::default())
}

/// Validate template JSON for one wizard step
///
/// # Example
///
/// ```rust
/// use wa_templates::{check_with_config, EngineConfig, Limits, Validator, WizardStep};
///
/// let config = EngineConfig::default().with_limits(Limits { name: 4, ..Limits::default() });
/// let result = check_with_config(
///     r#"{"name": "welcome", "language": "en", "category": "UTILITY"}"#,
///     WizardStep::Details,
///     &Validator::new(config),
/// ).unwrap();
/// assert!(result.has_error("name"));
/// ```
pub fn check_with_config(
    source: &str,
    step: WizardStep,
    validator: &Validator,
) -> Result<ValidationResult, EngineError> {
    let template = Template::from_json(source)?;
    Ok(validator.validate(step, &template))
}

/// Parse template JSON and compose its preview
///
/// # Example
///
/// ```rust
/// use wa_templates::{preview, PreviewValues};
///
/// let out = preview(
///     r#"{"body": {"text": "Hi *{{1}}*", "examples": ["Ana"]}}"#,
///     &PreviewValues::new(),
/// ).unwrap();
/// assert_eq!(out.body.plain_text(), "Hi Ana");
/// ```
pub fn preview(source: &str, values: &PreviewValues) -> Result<Preview, EngineError> {
    let template = Template::from_json(source)?;
    Ok(compose(&template, values))
}

/// Parse template JSON and render its preview as terminal text
pub fn render(
    source: &str,
    values: &PreviewValues,
    config: &TextConfig,
) -> Result<String, EngineError> {
    Ok(render_text(&preview(source, values)?, config))
}

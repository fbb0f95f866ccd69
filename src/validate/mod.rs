//! Template validation
//!
//! Validation never fails: every check runs and every finding is collected
//! into a [`ValidationResult`], so an editor can show all problems at once.
//! Checks are grouped by wizard step; the review step runs all of them.

mod category;
mod rules;

use serde::{Deserialize, Serialize};

pub use category::{rules_for, CategoryRules, CATEGORY_RULES};

pub use crate::error::{Issue, Severity};
use crate::config::EngineConfig;
use crate::model::Template;
use crate::wizard::WizardStep;

/// Outcome of validating a template for one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` when there are no errors; warnings do not count
    pub valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    /// Whether any error is attributed to `field`
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Whether any warning is attributed to `field`
    pub fn has_warning(&self, field: &str) -> bool {
        self.warnings.iter().any(|w| w.field == field)
    }

    /// All findings with their severity, errors first
    pub fn issues(&self) -> impl Iterator<Item = (Severity, &Issue)> {
        self.errors
            .iter()
            .map(|e| (Severity::Error, e))
            .chain(self.warnings.iter().map(|w| (Severity::Warning, w)))
    }
}

/// Accumulates findings while checks run
#[derive(Debug, Default)]
pub(crate) struct Collector {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl Collector {
    pub(crate) fn error(&mut self, issue: Issue) {
        self.errors.push(issue);
    }

    pub(crate) fn warn(&mut self, issue: Issue) {
        self.warnings.push(issue);
    }

    pub(crate) fn finish(self) -> ValidationResult {
        ValidationResult {
            valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

/// Validates templates against a configuration
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: EngineConfig,
}

impl Validator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the checks belonging to `step`
    pub fn validate(&self, step: WizardStep, template: &Template) -> ValidationResult {
        let mut out = Collector::default();
        match step {
            WizardStep::Details => rules::check_details(template, &self.config, &mut out),
            WizardStep::Content => rules::check_content(template, &self.config, &mut out),
            WizardStep::Buttons => rules::check_buttons(template, &self.config, &mut out),
            WizardStep::Review => {
                rules::check_details(template, &self.config, &mut out);
                rules::check_content(template, &self.config, &mut out);
                rules::check_buttons(template, &self.config, &mut out);
            }
        }
        let result = out.finish();
        tracing::debug!(
            step = step.number(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated template"
        );
        result
    }
}

/// Validate `template` for `step` with the platform defaults.
pub fn validate(step: WizardStep, template: &Template) -> ValidationResult {
    Validator::default().validate(step, template)
}

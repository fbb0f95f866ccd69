//! Step-by-step template construction
//!
//! The wizard walks through Details → Content → Buttons → Review. Moving
//! forward one step requires the current step to validate; moving back to
//! any earlier step is always allowed. Drafts can be saved at any time;
//! submission is only possible from a valid review step.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Issue;
use crate::model::Template;
use crate::submission::{to_payload, SubmissionPayload};
use crate::validate::{ValidationResult, Validator};

/// Ordered wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Details,
    Content,
    Buttons,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Details,
        WizardStep::Content,
        WizardStep::Buttons,
        WizardStep::Review,
    ];

    /// 1-based position of the step
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::Content => 2,
            WizardStep::Buttons => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Details => Some(WizardStep::Content),
            WizardStep::Content => Some(WizardStep::Buttons),
            WizardStep::Buttons => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Details => "Details",
            WizardStep::Content => "Content",
            WizardStep::Buttons => "Buttons",
            WizardStep::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.number(), self.title())
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = WizardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        WizardStep::ALL
            .into_iter()
            .find(|s| s.number() == value)
            .ok_or(WizardError::InvalidStep(value))
    }
}

/// Errors from wizard navigation and submission
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("no wizard step {0} (expected 1-4)")]
    InvalidStep(u8),

    #[error("step {step} has {} error(s)", errors.len())]
    StepInvalid { step: WizardStep, errors: Vec<Issue> },

    #[error("already at the last step")]
    AtLastStep,

    #[error("cannot jump ahead from {current} to {requested}")]
    NotVisited {
        current: WizardStep,
        requested: WizardStep,
    },

    #[error("templates can only be submitted from the review step (currently {current})")]
    NotAtReview { current: WizardStep },
}

/// An incomplete template saved for later
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub step: WizardStep,
    pub template: Template,
}

/// Wizard position plus the validator gating it
#[derive(Debug, Clone)]
pub struct Wizard {
    current: WizardStep,
    validator: Validator,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(Validator::default())
    }
}

impl Wizard {
    pub fn new(validator: Validator) -> Self {
        Self {
            current: WizardStep::Details,
            validator,
        }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validate the current step
    pub fn validate(&self, template: &Template) -> ValidationResult {
        self.validator.validate(self.current, template)
    }

    /// Whether "Next" is enabled
    pub fn can_advance(&self, template: &Template) -> bool {
        self.current.next().is_some() && self.validate(template).valid
    }

    /// Move to the next step if the current one validates
    pub fn advance(&mut self, template: &Template) -> Result<WizardStep, WizardError> {
        let next = self.current.next().ok_or(WizardError::AtLastStep)?;
        let result = self.validate(template);
        if !result.valid {
            return Err(WizardError::StepInvalid {
                step: self.current,
                errors: result.errors,
            });
        }
        tracing::debug!(from = %self.current, to = %next, "wizard advanced");
        self.current = next;
        Ok(next)
    }

    /// Move back to the previous step; stays put on the first step
    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = WizardStep::ALL
            .into_iter()
            .rev()
            .find(|s| *s < self.current)
        {
            self.current = prev;
        }
        self.current
    }

    /// Jump to `step`, which must not be ahead of the current step
    pub fn go_to(&mut self, step: WizardStep) -> Result<WizardStep, WizardError> {
        if step > self.current {
            return Err(WizardError::NotVisited {
                current: self.current,
                requested: step,
            });
        }
        tracing::debug!(from = %self.current, to = %step, "wizard moved back");
        self.current = step;
        Ok(step)
    }

    /// Snapshot the template as a draft; never requires validity
    pub fn save_draft(&self, template: &Template) -> Draft {
        Draft {
            step: self.current,
            template: template.clone(),
        }
    }

    /// Whether "Submit" is enabled
    pub fn can_submit(&self, template: &Template) -> bool {
        self.current == WizardStep::Review
            && self.validator.validate(WizardStep::Review, template).valid
    }

    /// Produce the submission payload from a valid review step
    pub fn submit(&self, template: &Template) -> Result<SubmissionPayload, WizardError> {
        if self.current != WizardStep::Review {
            return Err(WizardError::NotAtReview {
                current: self.current,
            });
        }
        let result = self.validator.validate(WizardStep::Review, template);
        if !result.valid {
            return Err(WizardError::StepInvalid {
                step: WizardStep::Review,
                errors: result.errors,
            });
        }
        Ok(to_payload(template))
    }
}

//! Editing session
//!
//! An [`EditorSession`] owns the only mutable reference to the template being
//! edited. Every dispatch replaces the template snapshot and re-validates the
//! current step before returning, so readers never observe a template whose
//! validation result is stale.

use crate::model::{ModelError, Template, TemplateAction};
use crate::preview::{compose, Preview, PreviewValues};
use crate::submission::SubmissionPayload;
use crate::validate::ValidationResult;
use crate::wizard::{Draft, Wizard, WizardError, WizardStep};

pub struct EditorSession {
    template: Template,
    validation: ValidationResult,
    wizard: Wizard,
    undo: Vec<Template>,
    redo: Vec<Template>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Template::new(), Wizard::default())
    }
}

impl EditorSession {
    pub fn new(template: Template, wizard: Wizard) -> Self {
        let validation = wizard.validate(&template);
        Self {
            template,
            validation,
            wizard,
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Validation of the current step against the current template
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.current()
    }

    /// Apply an edit and re-validate
    pub fn dispatch(&mut self, action: TemplateAction) -> Result<&ValidationResult, ModelError> {
        let next = self.template.apply(action)?;
        let previous = std::mem::replace(&mut self.template, next);
        self.undo.push(previous);
        self.redo.clear();
        self.revalidate();
        Ok(&self.validation)
    }

    /// Restore the previous snapshot; returns false when there is none
    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.template, previous);
                self.redo.push(current);
                self.revalidate();
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone snapshot; returns false when there is none
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.template, next);
                self.undo.push(current);
                self.revalidate();
                true
            }
            None => false,
        }
    }

    pub fn can_advance(&self) -> bool {
        self.wizard.can_advance(&self.template)
    }

    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let step = self.wizard.advance(&self.template)?;
        self.revalidate();
        Ok(step)
    }

    pub fn go_to(&mut self, step: WizardStep) -> Result<WizardStep, WizardError> {
        let step = self.wizard.go_to(step)?;
        self.revalidate();
        Ok(step)
    }

    pub fn preview(&self, values: &PreviewValues) -> Preview {
        compose(&self.template, values)
    }

    pub fn save_draft(&self) -> Draft {
        self.wizard.save_draft(&self.template)
    }

    pub fn can_submit(&self) -> bool {
        self.wizard.can_submit(&self.template)
    }

    pub fn submit(&self) -> Result<SubmissionPayload, WizardError> {
        self.wizard.submit(&self.template)
    }

    fn revalidate(&mut self) {
        self.validation = self.wizard.validate(&self.template);
    }
}

//! Persistence boundary
//!
//! The backend is reached through a generic [`RequestClient`]; transport,
//! authentication and retries belong to its implementation. The engine only
//! decides what to send and where.

use serde_json::Value;
use thiserror::Error;

use crate::error::EngineError;
use crate::model::Template;
use crate::wizard::Wizard;

/// Request client errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} returned status {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Trait that backend clients implement
pub trait RequestClient {
    /// Send a request and return the decoded JSON response
    fn request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ApiError>;

    fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(Method::Get, endpoint, None)
    }

    fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, ApiError> {
        self.request(Method::Post, endpoint, Some(payload))
    }

    fn put(&self, endpoint: &str, payload: &Value) -> Result<Value, ApiError> {
        self.request(Method::Put, endpoint, Some(payload))
    }

    fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(Method::Delete, endpoint, None)
    }
}

const TEMPLATES: &str = "/templates";
const DRAFTS: &str = "/templates/drafts";

/// Saves, submits and loads templates through a [`RequestClient`]
pub struct TemplateService<C> {
    client: C,
}

impl<C: RequestClient> TemplateService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Store a draft; the returned template carries the backend id
    ///
    /// Drafts are never validated.
    pub fn save_draft(&self, wizard: &Wizard, template: &Template) -> Result<Template, EngineError> {
        let draft = wizard.save_draft(template);
        let payload = serde_json::to_value(&draft).map_err(ApiError::from)?;

        let response = match &template.id {
            Some(id) => self.client.put(&format!("{}/{}", DRAFTS, id), &payload)?,
            None => self.client.post(DRAFTS, &payload)?,
        };

        let mut saved = template.clone();
        if let Some(id) = response.get("id").and_then(id_string) {
            saved.id = Some(id);
        }
        tracing::info!(name = %saved.name, id = ?saved.id, "saved template draft");
        Ok(saved)
    }

    /// Submit a template from the wizard's review step
    pub fn submit(&self, wizard: &Wizard, template: &Template) -> Result<Value, EngineError> {
        let payload = wizard.submit(template)?;
        let body = serde_json::to_value(&payload).map_err(ApiError::from)?;
        let response = self.client.post(TEMPLATES, &body)?;
        tracing::info!(name = %payload.name, "submitted template");
        Ok(response)
    }

    /// Load a stored template
    pub fn fetch(&self, id: &str) -> Result<Template, ApiError> {
        let value = self.client.get(&format!("{}/{}", TEMPLATES, id))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Delete a stored template
    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("{}/{}", TEMPLATES, id))?;
        Ok(())
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::model::{Body, Category};
    use crate::wizard::{WizardError, WizardStep};

    /// Records every request and replies with a canned response
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(Method, String, Option<Value>)>>,
        reply: Value,
    }

    impl RequestClient for Recorder {
        fn request(
            &self,
            method: Method,
            endpoint: &str,
            payload: Option<&Value>,
        ) -> Result<Value, ApiError> {
            self.calls
                .borrow_mut()
                .push((method, endpoint.to_string(), payload.cloned()));
            Ok(self.reply.clone())
        }
    }

    struct Failing;

    impl RequestClient for Failing {
        fn request(&self, _: Method, endpoint: &str, _: Option<&Value>) -> Result<Value, ApiError> {
            Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: 500,
                message: "boom".into(),
            })
        }
    }

    fn template() -> Template {
        Template {
            name: "otp_login".into(),
            language: "en".into(),
            category: Some(Category::Authentication),
            body: Arc::new(Body {
                text: "Your code is {{1}}".into(),
                examples: vec!["482913".into()],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_draft_posts_and_takes_id() {
        let service = TemplateService::new(Recorder {
            reply: json!({"id": 42}),
            ..Default::default()
        });
        let saved = service
            .save_draft(&Wizard::default(), &Template::new())
            .unwrap();
        assert_eq!(saved.id.as_deref(), Some("42"));

        let calls = service.client().calls.borrow();
        assert_eq!(calls[0].0, Method::Post);
        assert_eq!(calls[0].1, "/templates/drafts");
        assert_eq!(calls[0].2.as_ref().unwrap()["step"], json!("details"));
    }

    #[test]
    fn test_existing_draft_is_put() {
        let service = TemplateService::new(Recorder::default());
        let mut t = template();
        t.id = Some("abc".into());
        let saved = service.save_draft(&Wizard::default(), &t).unwrap();
        assert_eq!(saved.id.as_deref(), Some("abc"));
        let calls = service.client().calls.borrow();
        assert_eq!(calls[0].0, Method::Put);
        assert_eq!(calls[0].1, "/templates/drafts/abc");
    }

    #[test]
    fn test_submit_requires_review() {
        let service = TemplateService::new(Recorder::default());
        let err = service.submit(&Wizard::default(), &template()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Wizard(WizardError::NotAtReview {
                current: WizardStep::Details
            })
        ));
        assert!(service.client().calls.borrow().is_empty());
    }

    #[test]
    fn test_submit_posts_components() {
        let service = TemplateService::new(Recorder {
            reply: json!({"status": "PENDING"}),
            ..Default::default()
        });
        let t = template();
        let mut wizard = Wizard::default();
        for _ in 0..3 {
            wizard.advance(&t).unwrap();
        }
        let response = service.submit(&wizard, &t).unwrap();
        assert_eq!(response["status"], json!("PENDING"));

        let calls = service.client().calls.borrow();
        let body = calls[0].2.as_ref().unwrap();
        assert_eq!(calls[0].1, "/templates");
        assert_eq!(body["category"], json!("AUTHENTICATION"));
        assert_eq!(body["components"][0]["type"], json!("BODY"));
    }

    #[test]
    fn test_transport_errors_propagate() {
        let service = TemplateService::new(Failing);
        let err = service.fetch("1").unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert!(service.delete("1").is_err());
    }
}

//! In-memory template model
//!
//! [`Template`] is a plain value. Edits are expressed as [`TemplateAction`]s
//! and applied through [`apply`], which yields a new snapshot.

mod reducer;
mod types;

pub use reducer::{apply, ButtonField, ModelError, TemplateAction, MAX_BUTTONS};
pub use types::{Body, Button, ButtonSet, ButtonType, Category, Footer, Header, HeaderFormat, Template};

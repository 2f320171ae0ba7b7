//! Form pipelines
//!
//! One submodule per form. Each resolves its aliased input names into a
//! raw form struct, runs the full rule set, and produces a normalized
//! record ready for persistence.

mod application;
mod contact;

pub use application::{generate_application_id, ApplicationForm, ApplicationRecord};
pub use contact::{ContactForm, ContactRecord};

//! Request intake
//!
//! Everything between the raw request body and the business logic: content
//! negotiation into one flat key/value structure, then alias-aware field
//! resolution. Downstream code never sees whether a submission arrived as
//! JSON or as a form post.

mod body;
mod resolver;

pub use body::{parse_body, FieldMap, IntakeError};
pub use resolver::FieldSpec;

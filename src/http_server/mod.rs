//! HTTP surface
//!
//! Two POST endpoints plus a health check, every form response wrapped in
//! the uniform JSON envelope.

mod config;
mod envelope;
mod form_routes;
mod server;

pub use config::HttpServerConfig;
pub use envelope::Envelope;
pub use server::{build_router, AppState};

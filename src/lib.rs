//! formgate - a small, self-hostable form submission backend for a school
//! website.
//!
//! Two POST endpoints (admissions application, contact message) validate
//! input, persist one row per submission to MySQL, and send a best-effort
//! notification email.

pub mod cli;
pub mod config;
pub mod db;
pub mod forms;
pub mod http_server;
pub mod intake;
pub mod notify;
pub mod validation;

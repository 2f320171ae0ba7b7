//! Best-effort email notification
//!
//! Nothing in this module may fail a request. A submission that reached
//! the notifier is already persisted; delivery problems are logged,
//! appended to the failure log, and surfaced to the caller only as
//! `emailSent: false`.

mod failure_log;
mod smtp;
mod templates;

pub use failure_log::FailureLog;
pub use smtp::{SendmailMailer, SmtpMailer};
pub use templates::{application_notice, contact_notice};

use std::sync::{Arc, RwLock};

use lettre::message::Mailbox;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{SchoolInfo, SmtpConfig};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    BuildFailed(String),

    #[error("transport error: {0}")]
    TransportFailed(String),
}

/// A fully composed outgoing message: multipart alternative with the
/// plain-text body first and the HTML body preferred.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    /// `Name <address>` of the submitter, when their address parses.
    pub reply_to: Option<String>,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Transport abstraction so tests can observe sends without a network.
pub trait Mailer: Send + Sync {
    fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError>;
}

/// Mock mailer for testing.
#[derive(Default)]
pub struct MockMailer {
    /// Sent messages, in order.
    pub sent: RwLock<Vec<OutgoingMail>>,
    fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that refuses every send.
    pub fn failing() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

impl Mailer for MockMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::TransportFailed("mock transport refused".to_string()));
        }
        self.sent.write().unwrap().push(mail.clone());
        Ok(())
    }
}

/// Best-effort delivery: primary transport first, fallback second. Every
/// failure is recorded; none propagates.
pub struct Notifier {
    primary: Arc<dyn Mailer>,
    fallback: Option<Arc<dyn Mailer>>,
    failure_log: FailureLog,
}

impl Notifier {
    pub fn new(
        primary: Arc<dyn Mailer>,
        fallback: Option<Arc<dyn Mailer>>,
        failure_log: FailureLog,
    ) -> Self {
        Self {
            primary,
            fallback,
            failure_log,
        }
    }

    /// Wire up transports from configuration. With an SMTP host the
    /// primary is SMTP and sendmail is the fallback; without one, mail
    /// goes straight through sendmail.
    pub fn from_config(
        smtp: &SmtpConfig,
        school: &SchoolInfo,
        failure_log: FailureLog,
    ) -> Result<Self, NotifyError> {
        let from = from_mailbox(smtp, school)?;

        if smtp.host.is_empty() {
            let sendmail: Arc<dyn Mailer> = Arc::new(SendmailMailer::new(from));
            return Ok(Self::new(sendmail, None, failure_log));
        }

        let primary: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(smtp.clone(), from.clone()));
        let fallback: Arc<dyn Mailer> = Arc::new(SendmailMailer::new(from));
        Ok(Self::new(primary, Some(fallback), failure_log))
    }

    /// Returns whether the mail went out. Never errors.
    pub fn deliver(&self, mail: &OutgoingMail) -> bool {
        match self.primary.send(mail) {
            Ok(()) => {
                info!("notification sent to {}", mail.to);
                return true;
            }
            Err(e) => warn!("primary mailer failed for {}: {e}", mail.to),
        }

        if let Some(fallback) = &self.fallback {
            match fallback.send(mail) {
                Ok(()) => {
                    info!("notification sent to {} via fallback", mail.to);
                    return true;
                }
                Err(e) => warn!("fallback mailer failed for {}: {e}", mail.to),
            }
        }

        self.failure_log.record(&mail.to, &mail.subject);
        false
    }
}

/// From mailbox for outgoing mail, falling back to the school identity
/// when the SMTP-specific fields are unset.
fn from_mailbox(smtp: &SmtpConfig, school: &SchoolInfo) -> Result<Mailbox, NotifyError> {
    let email = if smtp.from.is_empty() { &school.email } else { &smtp.from };
    let name = if smtp.from_name.is_empty() { &school.name } else { &smtp.from_name };

    format!("{name} <{email}>")
        .parse()
        .map_err(|_| NotifyError::InvalidAddress(email.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            to: "ops@example.com".to_string(),
            reply_to: Some("Ngozi Obi <ngozi@example.com>".to_string()),
            subject: "New Contact Message: Fees".to_string(),
            text_body: "body".to_string(),
            html_body: "<p>body</p>".to_string(),
        }
    }

    fn failure_log() -> (tempfile::TempDir, FailureLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = FailureLog::new(dir.path().to_path_buf());
        (dir, log)
    }

    #[test]
    fn test_mock_mailer_records_sends() {
        let mock = MockMailer::new();
        mock.send(&mail()).unwrap();
        assert_eq!(mock.sent_count(), 1);
    }

    #[test]
    fn test_delivery_success_reports_true() {
        let (_dir, log) = failure_log();
        let notifier = Notifier::new(Arc::new(MockMailer::new()), None, log);
        assert!(notifier.deliver(&mail()));
    }

    #[test]
    fn test_delivery_failure_reports_false_without_erroring() {
        let (dir, log) = failure_log();
        let notifier = Notifier::new(Arc::new(MockMailer::failing()), None, log);

        assert!(!notifier.deliver(&mail()));

        // The failure landed in the date-keyed log file.
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let content = std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
        assert!(content.contains("TO: ops@example.com"));
        assert!(content.contains("SUBJECT: New Contact Message: Fees"));
    }

    #[test]
    fn test_fallback_rescues_a_failed_primary() {
        let (dir, log) = failure_log();
        let fallback = Arc::new(MockMailer::new());
        let notifier = Notifier::new(Arc::new(MockMailer::failing()), Some(fallback.clone()), log);

        assert!(notifier.deliver(&mail()));
        assert_eq!(fallback.sent_count(), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_from_mailbox_falls_back_to_school_identity() {
        let smtp = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            secure: crate::config::SmtpSecurity::Tls,
            user: String::new(),
            password: String::new(),
            from: String::new(),
            from_name: String::new(),
        };
        let school = SchoolInfo {
            name: "Beautiful Minds Schools".to_string(),
            email: "ops@school.example".to_string(),
            phone: String::new(),
            address: String::new(),
        };

        let mailbox = from_mailbox(&smtp, &school).unwrap();
        assert_eq!(mailbox.email.to_string(), "ops@school.example");
    }
}

//! Mail transports
//!
//! The primary transport speaks SMTP through lettre; the fallback hands
//! the message to the local sendmail binary. Both build the same
//! multipart message, so a submission summary looks identical whichever
//! path it took.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SendmailTransport, SmtpTransport, Transport};

use super::{Mailer, NotifyError, OutgoingMail};
use crate::config::{SmtpConfig, SmtpSecurity};

/// SMTP delivery. The transport is rebuilt per send; submission volume
/// for a school website does not justify a connection pool.
pub struct SmtpMailer {
    config: SmtpConfig,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig, from: Mailbox) -> Self {
        Self { config, from }
    }

    fn transport(&self) -> Result<SmtpTransport, NotifyError> {
        let builder = match self.config.secure {
            SmtpSecurity::Tls => SmtpTransport::starttls_relay(&self.config.host)
                .map_err(|e| NotifyError::TransportFailed(e.to_string()))?,
            SmtpSecurity::Ssl => SmtpTransport::relay(&self.config.host)
                .map_err(|e| NotifyError::TransportFailed(e.to_string()))?,
            SmtpSecurity::None => SmtpTransport::builder_dangerous(&self.config.host),
        };

        let builder = builder.port(self.config.port);
        let builder = if self.config.user.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                self.config.user.clone(),
                self.config.password.clone(),
            ))
        };

        Ok(builder.build())
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        let message = build_message(&self.from, mail)?;
        self.transport()?
            .send(&message)
            .map_err(|e| NotifyError::TransportFailed(e.to_string()))?;
        Ok(())
    }
}

/// Direct submission through the local sendmail binary, for hosts with
/// no reachable SMTP relay.
pub struct SendmailMailer {
    from: Mailbox,
}

impl SendmailMailer {
    pub fn new(from: Mailbox) -> Self {
        Self { from }
    }
}

impl Mailer for SendmailMailer {
    fn send(&self, mail: &OutgoingMail) -> Result<(), NotifyError> {
        let message = build_message(&self.from, mail)?;
        SendmailTransport::new()
            .send(&message)
            .map_err(|e| NotifyError::TransportFailed(e.to_string()))?;
        Ok(())
    }
}

fn build_message(from: &Mailbox, mail: &OutgoingMail) -> Result<Message, NotifyError> {
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|_| NotifyError::InvalidAddress(mail.to.clone()))?;

    let mut builder = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(mail.subject.clone());

    // Reply-to is a courtesy; a submitter address that does not parse is
    // simply dropped.
    if let Some(reply_to) = &mail.reply_to {
        if let Ok(mailbox) = reply_to.parse::<Mailbox>() {
            builder = builder.reply_to(mailbox);
        }
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            mail.text_body.clone(),
            mail.html_body.clone(),
        ))
        .map_err(|e| NotifyError::BuildFailed(e.to_string()))
}

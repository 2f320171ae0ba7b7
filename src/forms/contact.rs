//! Contact message form

use crate::intake::{FieldMap, FieldSpec};
use crate::validation::{self, ValidationReport};

const NAME: FieldSpec = FieldSpec::new("name", &["contactName", "contact_name", "name", "full_name"], "");
const EMAIL: FieldSpec = FieldSpec::new("email", &["contactEmail", "contact_email", "email"], "");
const PHONE: FieldSpec = FieldSpec::new("phone", &["contactPhone", "contact_phone", "phone", "mobile"], "");
const SUBJECT: FieldSpec =
    FieldSpec::new("subject", &["contactSubject", "contact_subject", "subject", "title"], "");
const MESSAGE: FieldSpec =
    FieldSpec::new("message", &["contactMessage", "contact_message", "message", "content"], "");

/// Fallback subject when the submitter leaves it blank.
pub const DEFAULT_SUBJECT: &str = "General Inquiry";

/// Raw contact fields after alias resolution, before validation.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// A validated contact message, phone canonicalized.
#[derive(Debug, Clone)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Resolve every field through its alias list.
    pub fn resolve(fields: &FieldMap) -> Self {
        Self {
            name: NAME.resolve(fields),
            email: EMAIL.resolve(fields),
            phone: PHONE.resolve(fields),
            subject: SUBJECT.resolve(fields),
            message: MESSAGE.resolve(fields),
        }
    }

    /// Run the full rule set; see [`ApplicationForm::validate`] for the
    /// error/warning split.
    ///
    /// [`ApplicationForm::validate`]: crate::forms::ApplicationForm::validate
    pub fn validate(&self) -> Result<(ContactRecord, ValidationReport), ValidationReport> {
        let mut report = ValidationReport::new();

        if self.name.is_empty() {
            report.error("contactName", "Please provide your name");
        } else if self.name.chars().count() < 2 {
            report.warn("contactName", "Name seems very short");
        }

        if self.email.is_empty() {
            report.error("contactEmail", "Please provide your email address");
        } else if !validation::email_looks_valid(&self.email) {
            report.error("contactEmail", "Please enter a valid email address");
        }

        let phone = validation::normalize_phone(&self.phone);
        if self.phone.is_empty() {
            report.error("contactPhone", "Please provide your phone number");
        } else if !(10..=15).contains(&phone.len()) {
            report.error("contactPhone", "Phone number must be 10-15 digits");
        }

        let subject = if self.subject.is_empty() {
            report.warn(
                "contactSubject",
                format!("No subject provided, using \"{DEFAULT_SUBJECT}\""),
            );
            DEFAULT_SUBJECT.to_string()
        } else {
            self.subject.clone()
        };

        if self.message.is_empty() {
            report.error("contactMessage", "Please enter your message");
        } else if self.message.chars().count() < 10 {
            report.warn("contactMessage", "Message seems very short");
        }

        if report.has_errors() {
            return Err(report);
        }

        let record = ContactRecord {
            name: self.name.clone(),
            email: self.email.clone(),
            phone,
            subject,
            message: self.message.clone(),
        };
        Ok((record, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> FieldMap {
        [
            ("contactName", "Chika Eze"),
            ("contactEmail", "chika@example.com"),
            ("contactPhone", "0803 123 4567"),
            ("contactSubject", "School fees"),
            ("contactMessage", "Please send me the current fee schedule."),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_valid_message_normalizes_phone() {
        let form = ContactForm::resolve(&valid_fields());
        let (record, report) = form.validate().unwrap();

        assert!(report.warnings.is_empty());
        assert_eq!(record.phone, "2348031234567");
        assert_eq!(record.subject, "School fees");
    }

    #[test]
    fn test_missing_fields_are_errors() {
        let form = ContactForm::resolve(&FieldMap::new());
        let report = form.validate().unwrap_err();

        for key in ["contactName", "contactEmail", "contactPhone", "contactMessage"] {
            assert!(report.errors.contains_key(key), "missing error for {key}");
        }
        assert!(!report.errors.contains_key("contactSubject"));
    }

    #[test]
    fn test_blank_subject_defaults_with_a_warning() {
        let mut fields = valid_fields();
        fields.remove("contactSubject");

        let form = ContactForm::resolve(&fields);
        let (record, report) = form.validate().unwrap();
        assert_eq!(record.subject, DEFAULT_SUBJECT);
        assert!(report.warnings.contains_key("contactSubject"));
    }

    #[test]
    fn test_short_message_warns() {
        let mut fields = valid_fields();
        fields.insert("contactMessage".to_string(), "Fees?".to_string());

        let form = ContactForm::resolve(&fields);
        let (_, report) = form.validate().unwrap();
        assert!(report.warnings.contains_key("contactMessage"));
    }

    #[test]
    fn test_bad_email_is_an_error() {
        let mut fields = valid_fields();
        fields.insert("contactEmail".to_string(), "not-an-email".to_string());

        let form = ContactForm::resolve(&fields);
        let report = form.validate().unwrap_err();
        assert!(report.errors.contains_key("contactEmail"));
    }

    #[test]
    fn test_generic_aliases_resolve() {
        let fields: FieldMap = [
            ("name", "Chika Eze"),
            ("email", "chika@example.com"),
            ("mobile", "08031234567"),
            ("title", "Admissions"),
            ("content", "When does the next term start?"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let form = ContactForm::resolve(&fields);
        assert_eq!(form.name, "Chika Eze");
        assert_eq!(form.phone, "08031234567");
        assert_eq!(form.subject, "Admissions");
        assert_eq!(form.message, "When does the next term start?");
    }
}

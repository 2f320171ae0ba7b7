//! Notification email bodies
//!
//! Each notice is composed twice: an HTML body built with maud (which
//! escapes submitted text) and a plain-text alternative. Both end with
//! the school signature block. Notices go to the operations address with
//! the submitter set as reply-to.

use maud::{html, Markup};

use super::OutgoingMail;
use crate::config::SchoolInfo;
use crate::forms::{ApplicationRecord, ContactRecord};
use crate::validation::display_phone;

/// Summary of a new admissions application.
pub fn application_notice(
    record: &ApplicationRecord,
    application_id: &str,
    school: &SchoolInfo,
) -> OutgoingMail {
    let dob = record.date_of_birth.format("%Y-%m-%d").to_string();

    let html_body = html! {
        h3 { "New Admission Application" }
        p { strong { "Application ID: " } (application_id) }
        p { strong { "Student: " } (record.full_name) }
        p { strong { "Date of birth: " } (dob) }
        p { strong { "Gender: " } (record.gender) }
        p { strong { "Religion: " } (record.religion) }
        p { strong { "Class of interest: " } (record.class_interest) }
        p { strong { "Address: " } (record.address) ", " (record.city) ", " (record.state) ", " (record.nationality) }
        @if !record.student_phone.is_empty() {
            p { strong { "Student phone: " } (display_phone(&record.student_phone)) }
        }
        @if !record.student_email.is_empty() {
            p { strong { "Student email: " } (record.student_email) }
        }
        h3 { "Parent Details" }
        p { strong { "Mother: " } (record.mother_name) ", " (display_phone(&record.mother_phone)) }
        p { strong { "Father: " } (record.father_name) ", " (display_phone(&record.father_phone)) }
        p { strong { "Email: " } (record.parent_email) }
        p { strong { "Address: " } (record.parent_address) }
        (signature_html(school))
    };

    let mut text_body = format!(
        "New Admission Application\n\n\
         Application ID: {application_id}\n\
         Student: {}\n\
         Date of birth: {dob}\n\
         Gender: {}\n\
         Religion: {}\n\
         Class of interest: {}\n\
         Address: {}, {}, {}, {}\n",
        record.full_name,
        record.gender,
        record.religion,
        record.class_interest,
        record.address,
        record.city,
        record.state,
        record.nationality,
    );
    if !record.student_phone.is_empty() {
        text_body.push_str(&format!("Student phone: {}\n", display_phone(&record.student_phone)));
    }
    if !record.student_email.is_empty() {
        text_body.push_str(&format!("Student email: {}\n", record.student_email));
    }
    text_body.push_str(&format!(
        "\nParent Details\n\
         Mother: {}, {}\n\
         Father: {}, {}\n\
         Email: {}\n\
         Address: {}\n",
        record.mother_name,
        display_phone(&record.mother_phone),
        record.father_name,
        display_phone(&record.father_phone),
        record.parent_email,
        record.parent_address,
    ));
    text_body.push_str(&signature_text(school));

    OutgoingMail {
        to: school.email.clone(),
        reply_to: Some(format!("{} <{}>", record.mother_name, record.parent_email)),
        subject: format!("New Application: {} ({application_id})", record.full_name),
        text_body,
        html_body: html_body.into_string(),
    }
}

/// Summary of a new contact message.
pub fn contact_notice(record: &ContactRecord, school: &SchoolInfo) -> OutgoingMail {
    let html_body = html! {
        h3 { "New Contact Form Submission" }
        p { strong { "Name: " } (record.name) }
        p { strong { "Email: " } (record.email) }
        @if !record.phone.is_empty() {
            p { strong { "Phone: " } (display_phone(&record.phone)) }
        }
        p { strong { "Subject: " } (record.subject) }
        p { strong { "Message:" } }
        div style="background: #f5f5f5; padding: 15px; border-radius: 5px;" {
            @for line in record.message.lines() {
                (line) br;
            }
        }
        (signature_html(school))
    };

    let mut text_body = format!(
        "New Contact Form Submission\n\n\
         Name: {}\n\
         Email: {}\n",
        record.name, record.email,
    );
    if !record.phone.is_empty() {
        text_body.push_str(&format!("Phone: {}\n", display_phone(&record.phone)));
    }
    text_body.push_str(&format!(
        "Subject: {}\n\nMessage:\n{}\n",
        record.subject, record.message
    ));
    text_body.push_str(&signature_text(school));

    OutgoingMail {
        to: school.email.clone(),
        reply_to: Some(format!("{} <{}>", record.name, record.email)),
        subject: format!("New Contact Message: {}", record.subject),
        text_body,
        html_body: html_body.into_string(),
    }
}

fn signature_html(school: &SchoolInfo) -> Markup {
    html! {
        div style="margin-top: 20px; padding-top: 20px; border-top: 1px solid #eee; color: #666; font-size: 14px;" {
            strong { (school.name) }
            br;
            (school.address)
            br;
            "Phone: " (school.phone) " | Email: " (school.email)
        }
    }
}

fn signature_text(school: &SchoolInfo) -> String {
    format!(
        "\n--\n{}\n{}\nPhone: {} | Email: {}",
        school.name, school.address, school.phone, school.email
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn school() -> SchoolInfo {
        SchoolInfo {
            name: "Beautiful Minds Schools".to_string(),
            email: "ops@school.example".to_string(),
            phone: "+234 703 354 6935".to_string(),
            address: "Makurdi, Nigeria".to_string(),
        }
    }

    fn application() -> ApplicationRecord {
        ApplicationRecord {
            full_name: "Adaeze <Obi>".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2018, 5, 14).unwrap(),
            religion: "Christianity".to_string(),
            class_interest: "Primary 3".to_string(),
            gender: "Female".to_string(),
            address: "12 Market Road".to_string(),
            nationality: "Nigeria".to_string(),
            state: "Benue".to_string(),
            city: "Makurdi".to_string(),
            student_phone: String::new(),
            student_email: String::new(),
            mother_name: "Ngozi Obi".to_string(),
            father_name: "Emeka Obi".to_string(),
            mother_phone: "2348031234567".to_string(),
            father_phone: "2348035550172".to_string(),
            parent_email: "ngozi@example.com".to_string(),
            parent_address: "12 Market Road".to_string(),
        }
    }

    #[test]
    fn test_application_notice_targets_operations_address() {
        let mail = application_notice(&application(), "APP20260806ABC123", &school());
        assert_eq!(mail.to, "ops@school.example");
        assert_eq!(
            mail.reply_to.as_deref().unwrap(),
            "Ngozi Obi <ngozi@example.com>"
        );
        assert!(mail.subject.contains("APP20260806ABC123"));
    }

    #[test]
    fn test_submitted_text_is_escaped_in_html() {
        let mail = application_notice(&application(), "APP20260806ABC123", &school());
        assert!(mail.html_body.contains("Adaeze &lt;Obi&gt;"));
        assert!(!mail.html_body.contains("Adaeze <Obi>"));
        // The plain body carries the text as written.
        assert!(mail.text_body.contains("Adaeze <Obi>"));
    }

    #[test]
    fn test_phones_render_in_display_form() {
        let mail = application_notice(&application(), "APP20260806ABC123", &school());
        assert!(mail.text_body.contains("+2348031234567"));
        assert!(mail.html_body.contains("+2348035550172"));
    }

    #[test]
    fn test_contact_notice_preserves_message_lines() {
        let record = ContactRecord {
            name: "Chika Eze".to_string(),
            email: "chika@example.com".to_string(),
            phone: "2348031234567".to_string(),
            subject: "Fees".to_string(),
            message: "line one\nline two".to_string(),
        };

        let mail = contact_notice(&record, &school());
        assert_eq!(mail.subject, "New Contact Message: Fees");
        assert!(mail.html_body.contains("line one<br>line two<br>"));
        assert!(mail.text_body.contains("line one\nline two"));
    }

    #[test]
    fn test_signature_present_in_both_bodies() {
        let mail = contact_notice(
            &ContactRecord {
                name: "Chika".to_string(),
                email: "chika@example.com".to_string(),
                phone: String::new(),
                subject: "Hello".to_string(),
                message: "A question about enrollment.".to_string(),
            },
            &school(),
        );
        assert!(mail.html_body.contains("Beautiful Minds Schools"));
        assert!(mail.text_body.contains("Beautiful Minds Schools"));
    }
}

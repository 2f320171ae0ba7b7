//! Admissions application form
//!
//! Seventeen logical fields across student, family, and contact details.
//! Field keys in errors and warnings are the camelCase names the HTML
//! form uses, so the front-end can attach messages to inputs directly.

use chrono::NaiveDate;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::intake::{FieldMap, FieldSpec};
use crate::validation::{self, ValidationReport};

// Alias precedence is part of the contract: generic names like `email`
// and `phone` are consulted only after the form-specific names.
const FULL_NAME: FieldSpec = FieldSpec::new("full_name", &["fullName", "full_name", "name"], "");
const DOB: FieldSpec = FieldSpec::new("dob", &["dob", "dateOfBirth", "birth_date", "birthdate"], "");
const RELIGION: FieldSpec = FieldSpec::new("religion", &["religion"], "");
const CLASS_INTEREST: FieldSpec =
    FieldSpec::new("class_interest", &["classInterest", "class_interest", "class"], "");
const GENDER: FieldSpec = FieldSpec::new("gender", &["gender", "sex"], "");
const ADDRESS: FieldSpec = FieldSpec::new("address", &["address", "home_address"], "");
const NATIONALITY: FieldSpec = FieldSpec::new("nationality", &["nationality", "country"], "Nigeria");
const STATE: FieldSpec = FieldSpec::new("state", &["state", "province", "region"], "");
const CITY: FieldSpec = FieldSpec::new("city", &["city", "town"], "");
const STUDENT_PHONE: FieldSpec =
    FieldSpec::new("student_phone", &["studentPhone", "student_phone", "phone"], "");
const STUDENT_EMAIL: FieldSpec =
    FieldSpec::new("student_email", &["studentEmail", "student_email"], "");
const MOTHER_NAME: FieldSpec =
    FieldSpec::new("mother_name", &["motherName", "mother_name", "mother"], "");
const FATHER_NAME: FieldSpec =
    FieldSpec::new("father_name", &["fatherName", "father_name", "father"], "");
const MOTHER_PHONE: FieldSpec =
    FieldSpec::new("mother_phone", &["motherPhone", "mother_phone", "mother_contact"], "");
const FATHER_PHONE: FieldSpec =
    FieldSpec::new("father_phone", &["fatherPhone", "father_phone", "father_contact"], "");
const PARENT_EMAIL: FieldSpec =
    FieldSpec::new("parent_email", &["parentEmail", "parent_email", "email"], "");
const PARENT_ADDRESS: FieldSpec =
    FieldSpec::new("parent_address", &["parentAddress", "parent_address"], "");

/// Raw application fields after alias resolution, before validation.
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    pub full_name: String,
    pub dob: String,
    pub religion: String,
    pub class_interest: String,
    pub gender: String,
    pub address: String,
    pub nationality: String,
    pub state: String,
    pub city: String,
    pub student_phone: String,
    pub student_email: String,
    pub mother_name: String,
    pub father_name: String,
    pub mother_phone: String,
    pub father_phone: String,
    pub parent_email: String,
    pub parent_address: String,
}

/// A validated application, phone numbers canonicalized and the date of
/// birth parsed. Ready for persistence.
#[derive(Debug, Clone)]
pub struct ApplicationRecord {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub religion: String,
    pub class_interest: String,
    pub gender: String,
    pub address: String,
    pub nationality: String,
    pub state: String,
    pub city: String,
    /// Canonical digits; empty when not supplied.
    pub student_phone: String,
    /// May be empty; a bad format only warns.
    pub student_email: String,
    pub mother_name: String,
    pub father_name: String,
    pub mother_phone: String,
    pub father_phone: String,
    pub parent_email: String,
    pub parent_address: String,
}

impl ApplicationForm {
    /// Resolve every field through its alias list.
    pub fn resolve(fields: &FieldMap) -> Self {
        Self {
            full_name: FULL_NAME.resolve(fields),
            dob: DOB.resolve(fields),
            religion: RELIGION.resolve(fields),
            class_interest: CLASS_INTEREST.resolve(fields),
            gender: GENDER.resolve(fields),
            address: ADDRESS.resolve(fields),
            nationality: NATIONALITY.resolve(fields),
            state: STATE.resolve(fields),
            city: CITY.resolve(fields),
            student_phone: STUDENT_PHONE.resolve(fields),
            student_email: STUDENT_EMAIL.resolve(fields),
            mother_name: MOTHER_NAME.resolve(fields),
            father_name: FATHER_NAME.resolve(fields),
            mother_phone: MOTHER_PHONE.resolve(fields),
            father_phone: FATHER_PHONE.resolve(fields),
            parent_email: PARENT_EMAIL.resolve(fields),
            parent_address: PARENT_ADDRESS.resolve(fields),
        }
    }

    /// Run the full rule set. Every field is checked regardless of earlier
    /// failures, so one response carries the complete picture. On success
    /// the report still carries any warnings.
    pub fn validate(&self, today: NaiveDate) -> Result<(ApplicationRecord, ValidationReport), ValidationReport> {
        let mut report = ValidationReport::new();

        if self.full_name.is_empty() {
            report.error("fullName", "Student full name is required");
        } else if self.full_name.chars().count() < 3 {
            report.warn("fullName", "Student name seems very short");
        }

        let mut date_of_birth = None;
        if self.dob.is_empty() {
            report.error("dob", "Date of birth is required");
        } else {
            match validation::normalize_dob(&self.dob, today) {
                Some(date) => date_of_birth = Some(date),
                None => report.error(
                    "dob",
                    "Please enter a valid date of birth (YYYY-MM-DD format preferred)",
                ),
            }
        }

        if self.religion.is_empty() {
            report.error("religion", "Religion is required");
        }
        if self.gender.is_empty() {
            report.error("gender", "Gender is required");
        }
        if self.class_interest.is_empty() {
            report.error("classInterest", "Class of interest is required");
        }
        if self.address.is_empty() {
            report.error("address", "Residential address is required");
        }
        if self.nationality.is_empty() {
            report.error("nationality", "Nationality is required");
        }
        if self.state.is_empty() {
            report.error("state", "State is required");
        }
        if self.city.is_empty() {
            report.error("city", "City is required");
        }

        if self.mother_name.is_empty() {
            report.error("motherName", "Mother's name is required");
        } else if self.mother_name.chars().count() < 3 {
            report.warn("motherName", "Mother's name seems very short");
        }

        if self.father_name.is_empty() {
            report.error("fatherName", "Father's name is required");
        } else if self.father_name.chars().count() < 3 {
            report.warn("fatherName", "Father's name seems very short");
        }

        let mother_phone = validation::normalize_phone(&self.mother_phone);
        if self.mother_phone.is_empty() {
            report.error("motherPhone", "Mother's phone number is required");
        } else if !phone_length_ok(&mother_phone) {
            report.error("motherPhone", "Mother phone number must be 10-15 digits");
        }

        let father_phone = validation::normalize_phone(&self.father_phone);
        if self.father_phone.is_empty() {
            report.error("fatherPhone", "Father's phone number is required");
        } else if !phone_length_ok(&father_phone) {
            report.error("fatherPhone", "Father phone number must be 10-15 digits");
        }

        let student_phone = validation::normalize_phone(&self.student_phone);
        if !self.student_phone.is_empty() && !phone_length_ok(&student_phone) {
            report.warn("studentPhone", "Student phone number may be invalid");
        }

        if self.parent_email.is_empty() {
            report.error("parentEmail", "Parent email address is required");
        } else if !validation::email_looks_valid(&self.parent_email) {
            report.error("parentEmail", "Please enter a valid parent email address");
        }

        if !self.student_email.is_empty() && !validation::email_looks_valid(&self.student_email) {
            report.warn("studentEmail", "Student email format appears incorrect");
        }

        if self.parent_address.is_empty() {
            report.error("parentAddress", "Parent address is required");
        }

        let date_of_birth = match date_of_birth {
            Some(date) if !report.has_errors() => date,
            _ => return Err(report),
        };

        let record = ApplicationRecord {
            full_name: self.full_name.clone(),
            date_of_birth,
            religion: self.religion.clone(),
            class_interest: self.class_interest.clone(),
            gender: self.gender.clone(),
            address: self.address.clone(),
            nationality: self.nationality.clone(),
            state: self.state.clone(),
            city: self.city.clone(),
            student_phone,
            student_email: self.student_email.clone(),
            mother_name: self.mother_name.clone(),
            father_name: self.father_name.clone(),
            mother_phone,
            father_phone,
            parent_email: self.parent_email.clone(),
            parent_address: self.parent_address.clone(),
        };
        Ok((record, report))
    }
}

fn phone_length_ok(normalized: &str) -> bool {
    (10..=15).contains(&normalized.len())
}

/// External identifier used in correspondence with the family, distinct
/// from the database key: `APP` + submission date + 6 uppercase
/// alphanumerics.
pub fn generate_application_id(date: NaiveDate) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("APP{}{}", date.format("%Y%m%d"), suffix)
}

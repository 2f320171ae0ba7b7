//! Form submission routes
//!
//! Both endpoints walk the same line: parse the body, resolve aliases,
//! validate everything, persist one row, then send the notification
//! email best-effort. Validation failure is the only short-circuit
//! before a side effect; once the insert lands, the response is a
//! success no matter what the mailer does.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{error, info};

use super::envelope::Envelope;
use super::server::AppState;
use crate::db;
use crate::forms::{
    generate_application_id, ApplicationForm, ApplicationRecord, ContactForm, ContactRecord,
};
use crate::intake;
use crate::notify::{self, OutgoingMail};

pub fn form_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/submit_application",
            post(submit_application)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/submit_contact",
            post(submit_contact)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

/// CORS preflight short-circuits to 200 with no body; the CORS layer
/// attaches the allow headers.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Envelope {
    Envelope::error(
        StatusCode::METHOD_NOT_ALLOWED,
        "Please submit the form using POST method.",
    )
}

async fn submit_application(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Envelope {
    let fields = match intake::parse_body(&headers, &body) {
        Ok(fields) => fields,
        Err(e) => return intake_rejection(&e),
    };

    let today = Utc::now().date_naive();
    let form = ApplicationForm::resolve(&fields);
    let (record, report) = match form.validate(today) {
        Ok(validated) => validated,
        Err(report) => {
            return Envelope::error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Please fix the following errors:",
            )
            .errors(&report.errors)
            .warnings(&report.warnings);
        }
    };

    let application_id = generate_application_id(today);
    let ip_address = client_ip(connect_info);

    let database_id = match db::insert_application(
        &state.pool,
        &record,
        &application_id,
        Utc::now(),
        &ip_address,
    )
    .await
    {
        Ok(id) => id,
        Err(e) => {
            error!("application insert failed: {e}");
            return Envelope::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "We could not save your application. Please try again later.",
            );
        }
    };
    info!("application saved: id={database_id} application_id={application_id}");

    let notice = notify::application_notice(&record, &application_id, &state.school);
    let email_sent = send_notice(&state, notice).await;

    Envelope::success(
        "Application submitted successfully! Our admissions team will contact you within 2-3 business days.",
    )
    .field("application_id", application_id.clone())
    .field("emailSent", email_sent)
    .field("databaseSaved", true)
    .warnings(&report.warnings)
    .data(application_data(&record, &application_id, database_id))
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Envelope {
    let fields = match intake::parse_body(&headers, &body) {
        Ok(fields) => fields,
        Err(e) => return intake_rejection(&e),
    };

    let form = ContactForm::resolve(&fields);
    let (record, report) = match form.validate() {
        Ok(validated) => validated,
        Err(report) => {
            return Envelope::error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Please fix the following errors:",
            )
            .errors(&report.errors)
            .warnings(&report.warnings);
        }
    };

    let ip_address = client_ip(connect_info);
    let contact_id = match db::insert_contact(&state.pool, &record, Utc::now(), &ip_address).await {
        Ok(id) => id,
        Err(e) => {
            error!("contact insert failed: {e}");
            return Envelope::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "We could not save your message. Please try again later.",
            );
        }
    };
    info!("contact saved: id={contact_id}");

    let notice = notify::contact_notice(&record, &state.school);
    let email_sent = send_notice(&state, notice).await;

    Envelope::success("Thank you! Your message has been received. We will contact you shortly.")
        .field("contactId", contact_id)
        .field("emailSent", email_sent)
        .field("databaseSaved", true)
        .warnings(&report.warnings)
        .data(contact_data(&record, contact_id))
}

/// Email delivery blocks on SMTP, so it runs off the async worker. A
/// panicked send counts as not sent.
async fn send_notice(state: &AppState, mail: OutgoingMail) -> bool {
    let notifier = state.notifier.clone();
    match tokio::task::spawn_blocking(move || notifier.deliver(&mail)).await {
        Ok(sent) => sent,
        Err(e) => {
            error!("notifier task failed: {e}");
            false
        }
    }
}

fn intake_rejection(error: &intake::IntakeError) -> Envelope {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    Envelope::error(status, error.to_string())
}

fn client_ip(connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Echo of the saved application. Optional fields appear only when the
/// submitter supplied them.
fn application_data(
    record: &ApplicationRecord,
    application_id: &str,
    database_id: u64,
) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("application_id".to_string(), application_id.into());
    data.insert("database_id".to_string(), database_id.into());
    data.insert("full_name".to_string(), record.full_name.clone().into());
    data.insert(
        "dob".to_string(),
        record.date_of_birth.format("%Y-%m-%d").to_string().into(),
    );
    data.insert("religion".to_string(), record.religion.clone().into());
    data.insert("class_interest".to_string(), record.class_interest.clone().into());
    data.insert("gender".to_string(), record.gender.clone().into());
    data.insert("address".to_string(), record.address.clone().into());
    data.insert("nationality".to_string(), record.nationality.clone().into());
    data.insert("state".to_string(), record.state.clone().into());
    data.insert("city".to_string(), record.city.clone().into());
    data.insert("mother_name".to_string(), record.mother_name.clone().into());
    data.insert("father_name".to_string(), record.father_name.clone().into());
    data.insert("mother_phone".to_string(), record.mother_phone.clone().into());
    data.insert("father_phone".to_string(), record.father_phone.clone().into());
    data.insert("parent_email".to_string(), record.parent_email.clone().into());
    data.insert("parent_address".to_string(), record.parent_address.clone().into());
    if !record.student_phone.is_empty() {
        data.insert("student_phone".to_string(), record.student_phone.clone().into());
    }
    if !record.student_email.is_empty() {
        data.insert("student_email".to_string(), record.student_email.clone().into());
    }
    data
}

/// Echo of the saved contact message, the message body truncated for the
/// response.
fn contact_data(record: &ContactRecord, contact_id: u64) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("contactId".to_string(), contact_id.into());
    data.insert("name".to_string(), record.name.clone().into());
    data.insert("email".to_string(), record.email.clone().into());
    data.insert("subject".to_string(), record.subject.clone().into());
    if !record.phone.is_empty() {
        data.insert("phone".to_string(), record.phone.clone().into());
    }
    data.insert("message".to_string(), truncate_message(&record.message).into());
    data
}

fn truncate_message(message: &str) -> String {
    let mut preview: String = message.chars().take(200).collect();
    if message.chars().count() > 200 {
        preview.push_str("...");
    }
    preview
}

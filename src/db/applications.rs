//! Application row persistence

use chrono::{DateTime, Utc};

use super::DbPool;
use crate::forms::ApplicationRecord;

/// Append one application row. One fully parameterized statement, one
/// round trip. Returns the engine-assigned key.
pub async fn insert_application(
    pool: &DbPool,
    record: &ApplicationRecord,
    application_id: &str,
    submitted_at: DateTime<Utc>,
    ip_address: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO applications (
            full_name, date_of_birth, religion, class_interest, gender, address,
            nationality, state, city, student_phone, student_email,
            mother_name, father_name, mother_phone, father_phone,
            parent_email, parent_address,
            submission_date, status, application_id, ip_address
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?)",
    )
    .bind(&record.full_name)
    .bind(record.date_of_birth)
    .bind(&record.religion)
    .bind(&record.class_interest)
    .bind(&record.gender)
    .bind(&record.address)
    .bind(&record.nationality)
    .bind(&record.state)
    .bind(&record.city)
    .bind(&record.student_phone)
    .bind(&record.student_email)
    .bind(&record.mother_name)
    .bind(&record.father_name)
    .bind(&record.mother_phone)
    .bind(&record.father_phone)
    .bind(&record.parent_email)
    .bind(&record.parent_address)
    .bind(submitted_at.naive_utc())
    .bind(application_id)
    .bind(ip_address)
    .execute(pool)
    .await?;

    Ok(result.last_insert_id())
}

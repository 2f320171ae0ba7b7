//! Contact row persistence

use chrono::{DateTime, Utc};

use super::DbPool;
use crate::forms::ContactRecord;

/// Append one contact row. Returns the engine-assigned key.
pub async fn insert_contact(
    pool: &DbPool,
    record: &ContactRecord,
    submitted_at: DateTime<Utc>,
    ip_address: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO contacts (name, email, phone, subject, message, submission_date, ip_address)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.subject)
    .bind(&record.message)
    .bind(submitted_at.naive_utc())
    .bind(ip_address)
    .execute(pool)
    .await?;

    Ok(result.last_insert_id())
}

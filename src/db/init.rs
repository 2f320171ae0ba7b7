//! Schema bootstrap
//!
//! Creates the two submission tables when they do not exist yet, so a
//! fresh database only needs credentials and a schema name.

use tracing::info;

use super::DbPool;

pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            full_name VARCHAR(255) NOT NULL,
            date_of_birth DATE NOT NULL,
            religion VARCHAR(100) NOT NULL,
            class_interest VARCHAR(100) NOT NULL,
            gender VARCHAR(20) NOT NULL,
            address TEXT NOT NULL,
            nationality VARCHAR(100) NOT NULL,
            state VARCHAR(100) NOT NULL,
            city VARCHAR(100) NOT NULL,
            student_phone VARCHAR(32) NULL,
            student_email VARCHAR(255) NULL,
            mother_name VARCHAR(255) NOT NULL,
            father_name VARCHAR(255) NOT NULL,
            mother_phone VARCHAR(32) NOT NULL,
            father_phone VARCHAR(32) NOT NULL,
            parent_email VARCHAR(255) NOT NULL,
            parent_address TEXT NOT NULL,
            submission_date DATETIME NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            application_id VARCHAR(32) NOT NULL UNIQUE,
            ip_address VARCHAR(45) NOT NULL DEFAULT 'unknown'
        ) CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            phone VARCHAR(32) NOT NULL,
            subject VARCHAR(255) NOT NULL,
            message TEXT NOT NULL,
            submission_date DATETIME NOT NULL,
            ip_address VARCHAR(45) NOT NULL DEFAULT 'unknown'
        ) CHARACTER SET utf8mb4 COLLATE utf8mb4_unicode_ci
        "#,
    )
    .execute(pool)
    .await?;

    info!("submission tables ready");
    Ok(())
}

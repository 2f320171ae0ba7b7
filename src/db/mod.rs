//! MySQL persistence
//!
//! The pool is created once at startup by the entry point and injected
//! into the HTTP state; request handlers only ever append rows. Raw
//! driver errors stay in the server logs — callers get a fixed, generic
//! message from the HTTP layer.

mod applications;
mod contacts;
mod init;

pub use applications::insert_application;
pub use contacts::insert_contact;
pub use init::ensure_schema;

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

pub type DbPool = MySqlPool;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// Initial connection could not be established within the configured
    /// attempt budget.
    #[error("database connection failed after {attempts} attempts: {source}")]
    ConnectionFailed {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
}

/// Establish the pool with a bounded retry loop: fixed attempt count,
/// fixed delay, no backoff. Exhausting the budget returns the last
/// connection error.
pub async fn connect_with_retry(config: &DatabaseConfig) -> DbResult<DbPool> {
    let url = config.url();
    let attempts = config.connect_retries.max(1);
    let delay = Duration::from_secs(config.connect_retry_delay);

    let mut attempt = 1;
    loop {
        match MySqlPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&url)
            .await
        {
            Ok(pool) => {
                info!("database connection established on attempt {attempt}");
                return Ok(pool);
            }
            Err(e) if attempt < attempts => {
                warn!("database connection attempt {attempt} failed: {e}");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(DbError::ConnectionFailed {
                    attempts,
                    source: e,
                });
            }
        }
    }
}

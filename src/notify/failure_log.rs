//! Email failure log
//!
//! Flat append-only record of messages that could not be delivered, one
//! file per day. There is no retry queue; this file is what an operator
//! works through by hand.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use tracing::error;

#[derive(Debug, Clone)]
pub struct FailureLog {
    dir: PathBuf,
}

impl FailureLog {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Append one failure line. Recording must never take the request
    /// down, so IO errors are traced and swallowed.
    pub fn record(&self, to: &str, subject: &str) {
        if let Err(e) = self.append(to, subject) {
            error!("could not record email failure: {e}");
        }
    }

    fn append(&self, to: &str, subject: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let now = Utc::now();
        let path = self.dir.join(format!("{}.log", now.format("%Y-%m-%d")));
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(
            file,
            "[{}] TO: {} | SUBJECT: {}",
            now.format("%Y-%m-%d %H:%M:%S"),
            to,
            subject
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_append_to_a_date_keyed_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = FailureLog::new(dir.path().to_path_buf());

        log.record("a@example.com", "first");
        log.record("b@example.com", "second");

        let expected = dir
            .path()
            .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));
        let content = std::fs::read_to_string(expected).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().next().unwrap().contains("TO: a@example.com"));
    }

    #[test]
    fn test_missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let log = FailureLog::new(dir.path().join("nested").join("email_failures"));
        log.record("a@example.com", "subject");
        assert!(dir.path().join("nested").join("email_failures").exists());
    }
}

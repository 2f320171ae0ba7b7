//! formgate entry point
//!
//! This is a minimal entrypoint that:
//! 1. Hands control to cli::run
//! 2. Prints errors to stderr
//! 3. Exits with non-zero on failure
//!
//! Configuration loading, pool setup, and serving all live in the CLI
//! module.

use formgate::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

//! querydown command-line tooling.
//!
//! The `qd` binary is a thin argument dispatcher; the work lives here so it
//! can be tested without spawning a process.
//!
//! - [`commands`]: `lex`, `check` and `kinds`
//! - [`problem`]: lexer errors rendered as [`qd_diagnostic::Diagnostic`]s
//! - [`CliError`]: failures that stop a command

pub mod commands;
mod error;
pub mod problem;

pub use error::CliError;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=qd_lexer=trace` to
/// see every mode transition, or `RUST_LOG=debug` for per-query summaries.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

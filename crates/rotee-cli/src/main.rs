#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Thin CLI entrypoint that delegates to the library implementation.

use std::process;

/// Copies standard input until end-of-input and exits with the run's status.
#[tokio::main]
async fn main() {
    let exit_code = rotee_cli::run().await;
    process::exit(exit_code);
}

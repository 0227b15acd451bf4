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

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (scratch directories), io.rs (scripted readers and failing writers),
//! logs.rs (captured tracing output).

pub mod fixtures;
pub mod io;
pub mod logs;

pub use fixtures::scratch_dir;
pub use io::{FailingReader, FailingWriter, ScriptedReader};
pub use logs::CapturedLogs;

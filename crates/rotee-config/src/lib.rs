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

//! Configuration record consumed by the rotation-aware copier.
//!
//! Layout: `model.rs` (the immutable `TeeConfig` and its enums), `validate.rs`
//! (duration parsing and path checks), `defaults.rs` (shared defaults),
//! `error.rs` (`ConfigError`).

pub mod defaults;
pub mod error;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use model::{OpenMode, ProbePolicy, TeeConfig};
pub use validate::parse_duration;

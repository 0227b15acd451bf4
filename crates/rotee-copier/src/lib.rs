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

//! Rotation-aware duplicating copier.
//!
//! Copies an input stream into a named file and a secondary output at the same
//! time, and follows the file across external rotation: when the path starts
//! naming a different on-disk object, the live handle is closed and the path is
//! opened again.
//!
//! Layout: `identity.rs` (device/inode identity tokens), `target.rs` (the live
//! target descriptor), `schedule.rs` (wall-clock gating of identity checks),
//! `copier.rs` (the read-check-write loop), `error.rs` (`CopyError`).

pub mod copier;
pub mod error;
pub mod identity;
pub mod schedule;
pub mod target;

pub use copier::{CopyReport, Copier, write_both};
pub use error::{CopyError, CopyResult};
pub use identity::FileIdentity;
pub use schedule::CheckSchedule;
pub use target::LiveTarget;

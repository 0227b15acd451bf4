//! Default values shared by the CLI and the copier.
//!
//! # Design
//! - Centralize defaults so the help text and the config record agree.

use std::time::Duration;

/// Interval between identity checks when `-i` is not supplied.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(5);
/// String form of [`CHECK_INTERVAL`] rendered in help output.
pub const CHECK_INTERVAL_DISPLAY: &str = "5s";
/// Size of the reusable read buffer.
pub const READ_BUFFER_SIZE: usize = 4096;

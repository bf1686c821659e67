//! # Logger
//!
//! Installs the global `tracing` subscriber for studio binaries and tests.
//!
//! * Console output goes to **stderr**, so command output on stdout stays machine-readable.
//! * Optional rolling file output with non-blocking I/O.
//! * Optional JSON formatting for both sinks.
//! * `RUST_LOG` is honoured unless [`LoggerBuilder::env_filter`] sets explicit directives.
//!
//! ## Example
//!
//! ```rust
//! # use studio_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("studio")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;
mod layers;

pub use crate::builder::{LoggerBuilder, NoFile, NoName, WithFile, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Handle to the installed subscriber.
///
/// Owns the worker guard of the file sink; buffered lines are flushed when it is dropped.
#[must_use = "Dropping this handle stops the background file writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// ```rust
    /// use studio_logger::{LevelFilter, Logger};
    ///
    /// let _logger = Logger::builder().name("studio").level(LevelFilter::DEBUG).init().unwrap();
    /// ```
    #[must_use = "The builder does nothing until .init() is called"]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Whether a file sink is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.writes_files() {
            tracing::debug!("Flushing file log sink");
        }
    }
}

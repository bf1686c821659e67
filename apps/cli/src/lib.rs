//! Command-line front end of the studio feature slices.
//!
//! [`run`] writes human-readable results to any [`std::io::Write`]; the binary passes stdout
//! while logs go to stderr.

pub mod args;
mod commands;

pub use crate::commands::run;

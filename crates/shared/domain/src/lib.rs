//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O, no async, no services. Just data and simple helpers.

pub mod config;
pub mod constants;
pub mod coupons;
pub mod course;
pub mod partitions;
pub mod registry;
pub mod roles;

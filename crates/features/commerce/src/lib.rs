//! # Commerce
//!
//! Coupons of a course's instructor dashboard: creation with discount validation, update,
//! one-way deactivation and the finance-gated purchase total.

pub mod coupons;
pub mod discount;
mod error;
pub mod repository;

pub use crate::coupons::{CouponForm, Coupons, Dashboard, parse_coupon_id};
pub use crate::discount::Discount;
pub use crate::error::{CouponError, CouponErrorExt};
pub use crate::repository::{CourseLedger, LedgerStore, MemoryLedgerStore, StoredLedger};
use studio_kernel::domain::registry::InitializedSlice;
use studio_storage::Storage;

/// Commerce feature state.
#[studio_derive::studio_slice]
pub struct Commerce {
    pub coupons: Coupons<StoredLedger>,
}

/// Initialize the commerce feature; `currency` labels dashboard totals.
#[must_use]
pub fn init(storage: &Storage, currency: &str) -> InitializedSlice {
    let inner = CommerceInner { coupons: Coupons::new(StoredLedger::new(storage.clone()), currency) };

    tracing::info!(currency, "Commerce slice initialized");
    InitializedSlice::new(Commerce::new(inner))
}

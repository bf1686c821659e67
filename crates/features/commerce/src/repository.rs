//! Persistence seam for a course's coupons and purchases.

use crate::error::{CouponError, CouponErrorExt};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use studio_kernel::course_storage;
use studio_kernel::domain::coupons::{Coupon, PaidRegistration};
use studio_kernel::domain::course::CourseKey;
use studio_storage::Storage;

const LEDGER_DOC: &str = "commerce.json";

/// Everything the commerce slice stores for one course, saved as a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseLedger {
    /// Last coupon id handed out; ids start at 1 and are never reused.
    pub last_coupon_id: u64,
    pub coupons: Vec<Coupon>,
    pub registrations: Vec<PaidRegistration>,
}

impl CourseLedger {
    pub(crate) const fn allocate_id(&mut self) -> u64 {
        self.last_coupon_id += 1;
        self.last_coupon_id
    }

    #[must_use]
    pub fn coupon(&self, id: u64) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.id == id)
    }

    pub fn coupon_mut(&mut self, id: u64) -> Option<&mut Coupon> {
        self.coupons.iter_mut().find(|c| c.id == id)
    }

    /// Sum of all paid registrations, saturating.
    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.registrations.iter().fold(0, |sum, r| sum.saturating_add(r.amount_cents))
    }
}

pub trait LedgerStore: Send + Sync + 'static {
    /// A course without a ledger reads as [`CourseLedger::default`].
    fn load(
        &self,
        course: &CourseKey,
    ) -> impl Future<Output = Result<CourseLedger, CouponError>> + Send;

    fn save(
        &self,
        course: &CourseKey,
        ledger: &CourseLedger,
    ) -> impl Future<Output = Result<(), CouponError>> + Send;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryLedgerStore {
    ledgers: Arc<RwLock<FxHashMap<CourseKey, CourseLedger>>>,
}

impl MemoryLedgerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryLedgerStore {
    async fn load(&self, course: &CourseKey) -> Result<CourseLedger, CouponError> {
        Ok(self.ledgers.read().get(course).cloned().unwrap_or_default())
    }

    async fn save(&self, course: &CourseKey, ledger: &CourseLedger) -> Result<(), CouponError> {
        self.ledgers.write().insert(course.clone(), ledger.clone());
        Ok(())
    }
}

/// Ledger kept in `<course>/commerce.json` through `studio-storage`.
#[derive(Debug, Clone)]
pub struct StoredLedger {
    storage: Storage,
}

impl StoredLedger {
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl LedgerStore for StoredLedger {
    async fn load(&self, course: &CourseKey) -> Result<CourseLedger, CouponError> {
        let ns = course_storage(&self.storage, course).context(course.to_string())?;
        Ok(ns.load_json::<CourseLedger>(LEDGER_DOC).await?.unwrap_or_default())
    }

    async fn save(&self, course: &CourseKey, ledger: &CourseLedger) -> Result<(), CouponError> {
        let ns = course_storage(&self.storage, course).context(course.to_string())?;
        ns.save_json(LEDGER_DOC, ledger).await?;
        Ok(())
    }
}

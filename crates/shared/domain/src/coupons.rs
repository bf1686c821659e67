//! Coupons and paid registrations of a course's e-commerce dashboard.

use crate::course::CourseKey;
use serde::{Deserialize, Serialize};

/// Lifecycle of a coupon. The only transition is `Active -> Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CouponState {
    Active,
    Inactive { deactivated_at: i64 },
}

/// Editable part of a coupon, as submitted on the create and update forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponDetails {
    pub code: String,
    pub description: String,
    /// Whole percent in `0..=100`.
    pub percentage_discount: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: u64,
    pub course_id: CourseKey,
    #[serde(flatten)]
    pub details: CouponDetails,
    pub created_by: String,
    /// Unix seconds.
    pub created_at: i64,
    state: CouponState,
}

impl Coupon {
    /// A freshly created coupon is always active.
    #[must_use]
    pub const fn new(
        id: u64,
        course_id: CourseKey,
        details: CouponDetails,
        created_by: String,
        created_at: i64,
    ) -> Self {
        Self { id, course_id, details, created_by, created_at, state: CouponState::Active }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.details.code
    }

    #[must_use]
    pub const fn state(&self) -> CouponState {
        self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, CouponState::Active)
    }

    /// Moves the coupon to `Inactive`; returns `false` if it already was.
    pub const fn deactivate(&mut self, at: i64) -> bool {
        if self.is_active() {
            self.state = CouponState::Inactive { deactivated_at: at };
            true
        } else {
            false
        }
    }
}

/// A completed course purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidRegistration {
    pub user: String,
    pub amount_cents: u64,
    /// Unix seconds.
    pub purchased_at: i64,
}

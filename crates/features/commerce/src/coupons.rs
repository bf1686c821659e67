//! Coupon lifecycle for the instructor e-commerce dashboard.

use crate::discount::Discount;
use crate::error::CouponError;
use crate::repository::{CourseLedger, LedgerStore};
use studio_kernel::domain::coupons::{Coupon, CouponDetails, PaidRegistration};
use studio_kernel::domain::course::CourseKey;
use studio_kernel::domain::roles::CourseRoles;
use tracing::{info, instrument};

/// Raw values of the coupon form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponForm {
    pub code: String,
    pub description: String,
    pub discount: String,
}

/// The dashboard's e-commerce section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub coupons: Vec<Coupon>,
    /// Only present for finance admins.
    pub total_sales_cents: Option<u64>,
    pub currency: String,
}

/// Confirmation texts shown after a successful action.
pub mod notices {
    #[must_use]
    pub fn added(code: &str) -> String {
        format!("coupon with the coupon code ({code}) added successfully")
    }

    #[must_use]
    pub fn updated(id: u64) -> String {
        format!("coupon with the coupon id ({id}) updated successfully")
    }

    #[must_use]
    pub fn saved(id: u64) -> String {
        format!("coupon with the coupon id ({id}) updated Successfully")
    }
}

/// Parses a coupon id field: blank means "not provided".
///
/// # Errors
/// [`CouponError::NotFound`] for text that is not an id.
pub fn parse_coupon_id(raw: &str) -> Result<Option<u64>, CouponError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| CouponError::NotFound { id: raw.to_owned().into(), context: None })
}

#[derive(Debug, Clone)]
pub struct Coupons<R> {
    ledger: R,
    currency: String,
}

impl<R: LedgerStore> Coupons<R> {
    pub fn new(ledger: R, currency: impl Into<String>) -> Self {
        Self { ledger, currency: currency.into() }
    }

    /// Adds an active coupon to the course.
    ///
    /// # Errors
    /// [`CouponError::DuplicateCode`] if an active coupon of the course already uses the code,
    /// then [`CouponError::InvalidDiscount`].
    #[instrument(skip_all, fields(course = %course, code = %form.code))]
    pub async fn create(
        &self,
        course: &CourseKey,
        form: &CouponForm,
        created_by: &str,
    ) -> Result<Coupon, CouponError> {
        let mut ledger = self.ledger.load(course).await?;

        if ledger.coupons.iter().any(|c| c.is_active() && c.code() == form.code) {
            return Err(CouponError::DuplicateCode {
                message: format!("coupon with the coupon code ({}) already exist", form.code).into(),
                context: None,
            });
        }
        let discount = Discount::parse(&form.discount)?;

        let coupon = Coupon::new(
            ledger.allocate_id(),
            course.clone(),
            details(form, discount),
            created_by.to_owned(),
            now(),
        );
        ledger.coupons.push(coupon.clone());
        self.ledger.save(course, &ledger).await?;

        info!(coupon_id = coupon.id, discount = discount.percent(), "Coupon created");
        Ok(coupon)
    }

    /// Replaces code, description and discount of a coupon.
    ///
    /// # Errors
    /// [`CouponError::MissingId`], [`CouponError::NotFound`], [`CouponError::DuplicateCode`]
    /// when another active coupon of the course uses the code, then
    /// [`CouponError::InvalidDiscount`].
    #[instrument(skip_all, fields(course = %course, coupon_id = ?id))]
    pub async fn update(
        &self,
        course: &CourseKey,
        id: Option<u64>,
        form: &CouponForm,
    ) -> Result<Coupon, CouponError> {
        let id = require_id(id, "coupon id not found")?;
        let mut ledger = self.ledger.load(course).await?;
        ensure_exists(&ledger, id)?;

        if ledger.coupons.iter().any(|c| c.id != id && c.is_active() && c.code() == form.code) {
            return Err(CouponError::DuplicateCode {
                message: format!("coupon with the coupon id ({id}) already exist").into(),
                context: None,
            });
        }
        let discount = Discount::parse(&form.discount)?;

        let coupon = ledger.coupon_mut(id).ok_or_else(|| CouponError::not_found(id))?;
        coupon.details = details(form, discount);
        let updated = coupon.clone();
        self.ledger.save(course, &ledger).await?;

        info!(discount = discount.percent(), "Coupon updated");
        Ok(updated)
    }

    /// Deactivates a coupon; the record is kept.
    ///
    /// # Errors
    /// [`CouponError::MissingId`], [`CouponError::NotFound`] or
    /// [`CouponError::AlreadyInactive`].
    #[instrument(skip_all, fields(course = %course, coupon_id = ?id))]
    pub async fn deactivate(&self, course: &CourseKey, id: Option<u64>) -> Result<Coupon, CouponError> {
        let id = require_id(id, "coupon id is None")?;
        let mut ledger = self.ledger.load(course).await?;

        let coupon = ledger.coupon_mut(id).ok_or_else(|| CouponError::not_found(id))?;
        if !coupon.deactivate(now()) {
            return Err(CouponError::AlreadyInactive { id, context: None });
        }
        let deactivated = coupon.clone();
        self.ledger.save(course, &ledger).await?;

        info!("Coupon deactivated");
        Ok(deactivated)
    }

    /// Loads a coupon for the edit form. Inactive coupons cannot be edited and are refused.
    ///
    /// # Errors
    /// [`CouponError::MissingId`], [`CouponError::NotFound`] or
    /// [`CouponError::AlreadyInactive`].
    pub async fn info(&self, course: &CourseKey, id: Option<u64>) -> Result<Coupon, CouponError> {
        let id = require_id(id, "coupon id not found")?;
        let ledger = self.ledger.load(course).await?;

        let coupon = ledger.coupon(id).ok_or_else(|| CouponError::not_found(id))?;
        if !coupon.is_active() {
            return Err(CouponError::AlreadyInactive { id, context: None });
        }
        Ok(coupon.clone())
    }

    /// All coupons of the course, active or not, in id order.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn list(&self, course: &CourseKey) -> Result<Vec<Coupon>, CouponError> {
        let mut coupons = self.ledger.load(course).await?.coupons;
        coupons.sort_by_key(|c| c.id);
        Ok(coupons)
    }

    /// Records a completed purchase of the course.
    ///
    /// # Errors
    /// Propagates store failures.
    #[instrument(skip_all, fields(course = %course, amount_cents = amount_cents))]
    pub async fn record_purchase(
        &self,
        course: &CourseKey,
        user: &str,
        amount_cents: u64,
    ) -> Result<PaidRegistration, CouponError> {
        let mut ledger = self.ledger.load(course).await?;
        let registration =
            PaidRegistration { user: user.to_owned(), amount_cents, purchased_at: now() };
        ledger.registrations.push(registration.clone());
        self.ledger.save(course, &ledger).await?;

        info!(registrations = ledger.registrations.len(), "Purchase recorded");
        Ok(registration)
    }

    /// Coupons for everyone with dashboard access; the sales total only for finance admins.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn dashboard(
        &self,
        course: &CourseKey,
        roles: CourseRoles,
    ) -> Result<Dashboard, CouponError> {
        let ledger = self.ledger.load(course).await?;
        let total_sales_cents = roles.can_view_sales().then(|| ledger.total_cents());

        let mut coupons = ledger.coupons;
        coupons.sort_by_key(|c| c.id);
        Ok(Dashboard { coupons, total_sales_cents, currency: self.currency.clone() })
    }
}

fn require_id(id: Option<u64>, message: &'static str) -> Result<u64, CouponError> {
    id.ok_or_else(|| CouponError::MissingId { message: message.into(), context: None })
}

fn ensure_exists(ledger: &CourseLedger, id: u64) -> Result<(), CouponError> {
    ledger.coupon(id).map(|_| ()).ok_or_else(|| CouponError::not_found(id))
}

fn details(form: &CouponForm, discount: Discount) -> CouponDetails {
    CouponDetails {
        code: form.code.clone(),
        description: form.description.clone(),
        percentage_discount: discount.percent(),
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

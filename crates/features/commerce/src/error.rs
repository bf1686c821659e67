use std::borrow::Cow;
use studio_storage::StorageError;

/// A specialized [`CouponError`] enum of this crate.
///
/// Display strings are the exact messages returned to the dashboard.
#[studio_derive::studio_error]
pub enum CouponError {
    #[error("{message}{}", format_context(.context))]
    DuplicateCode { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    InvalidDiscount { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("coupon with the coupon id ({id}) DoesNotExist{}", format_context(.context))]
    NotFound { id: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("coupon with the coupon id ({id}) is already inactive{}", format_context(.context))]
    AlreadyInactive { id: u64, context: Option<Cow<'static, str>> },

    #[error("{message}{}", format_context(.context))]
    MissingId { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Coupon storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal commerce error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CouponError {
    pub(crate) fn not_found(id: u64) -> Self {
        Self::NotFound { id: id.to_string().into(), context: None }
    }

    pub(crate) fn invalid_discount(message: &'static str) -> Self {
        Self::InvalidDiscount { message: message.into(), context: None }
    }
}

use crate::error::CouponError;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

const NOT_AN_INTEGER: &str = "Please Enter the Integer Value for Coupon Discount";
const ABOVE_MAX: &str = "Please Enter the Coupon Discount Value Less than or Equal to 100";
const BELOW_MIN: &str = "Please Enter the Coupon Discount Value Greater than or Equal to 0";

/// A whole-percent discount in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Discount(u8);

impl Discount {
    pub const MAX: u8 = 100;

    /// Parses form input such as `"25"`; surrounding whitespace is ignored.
    ///
    /// # Errors
    /// [`CouponError::InvalidDiscount`] carrying the form message for non-integers (`"25%"`),
    /// values above 100 and negative values.
    pub fn parse(input: &str) -> Result<Self, CouponError> {
        let value = match input.trim().parse::<i64>() {
            Ok(value) => value,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                return Err(CouponError::invalid_discount(ABOVE_MAX));
            },
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => {
                return Err(CouponError::invalid_discount(BELOW_MIN));
            },
            Err(_) => return Err(CouponError::invalid_discount(NOT_AN_INTEGER)),
        };

        if value < 0 {
            return Err(CouponError::invalid_discount(BELOW_MIN));
        }
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| CouponError::invalid_discount(ABOVE_MAX))
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl FromStr for Discount {
    type Err = CouponError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_inclusive_range() {
        assert_eq!(Discount::parse("0").unwrap().percent(), 0);
        assert_eq!(Discount::parse(" 25 ").unwrap().percent(), 25);
        assert_eq!(Discount::parse("100").unwrap().to_string(), "100%");
    }

    #[test]
    fn rejects_with_form_messages() {
        assert_eq!(Discount::parse("25%").unwrap_err().to_string(), NOT_AN_INTEGER);
        assert_eq!(Discount::parse("12.5").unwrap_err().to_string(), NOT_AN_INTEGER);
        assert_eq!(Discount::parse("").unwrap_err().to_string(), NOT_AN_INTEGER);
        assert_eq!(Discount::parse("199").unwrap_err().to_string(), ABOVE_MAX);
        assert_eq!(Discount::parse("101").unwrap_err().to_string(), ABOVE_MAX);
        assert_eq!(Discount::parse("99999999999999999999").unwrap_err().to_string(), ABOVE_MAX);
        assert_eq!(Discount::parse("-1").unwrap_err().to_string(), BELOW_MIN);
    }
}

use crate::constants::{FINANCE_ADMIN, INSTRUCTOR, STAFF};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Course-level roles of the acting user, supplied by the caller.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CourseRoles: u32 {
        const STAFF = 1 << 0;
        const INSTRUCTOR = 1 << 1;
        const FINANCE_ADMIN = 1 << 2;

        const ALL = Self::STAFF.bits() | Self::INSTRUCTOR.bits() | Self::FINANCE_ADMIN.bits();
    }
}

impl CourseRoles {
    /// Whether purchase totals may be shown on the dashboard.
    #[must_use]
    pub const fn can_view_sales(self) -> bool {
        self.contains(Self::FINANCE_ADMIN)
    }
}

impl From<&str> for CourseRoles {
    fn from(s: &str) -> Self {
        match s {
            STAFF => Self::STAFF,
            INSTRUCTOR => Self::INSTRUCTOR,
            FINANCE_ADMIN => Self::FINANCE_ADMIN,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl From<u32> for CourseRoles {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Serialize for CourseRoles {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for CourseRoles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

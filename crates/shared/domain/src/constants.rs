/// Advanced module that enables Group Configurations and split-test blocks.
pub const SPLIT_TEST: &str = "split_test";

/// Schema version written on every partition.
pub const PARTITION_VERSION: u32 = 1;
/// Schema version written on every group.
pub const GROUP_VERSION: u32 = 1;

// Course role names as accepted on the command line.
pub const STAFF: &str = "staff";
pub const INSTRUCTOR: &str = "instructor";
pub const FINANCE_ADMIN: &str = "finance_admin";

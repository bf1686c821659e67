//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports ergonomic helpers for IDs, config loading,
//! course namespaces and the application state.
//!
//! ## ID generation
//! Use `safe_nanoid!` for URL-safe, unambiguous IDs:
//! ```rust
//! # use studio_kernel::safe_nanoid;
//! let id = safe_nanoid!();
//! assert_eq!(id.len(), 12);
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use studio_kernel::config::load_config;
//! use studio_kernel::domain::config::StudioConfig;
//!
//! let cfg: StudioConfig = load_config(None::<&str>).unwrap();
//! ```
pub mod config;
pub mod state;

use studio_domain::course::CourseKey;
use studio_storage::{NamespacedStorage, Storage, StorageError};

// Alphabet excludes visually ambiguous characters (I, O, l, 0, 1).
pub const SAFE_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub use nanoid::nanoid;
pub use studio_domain as domain;

/// Generates an unambiguous `NanoID` (no visually confusing characters).
#[macro_export]
macro_rules! safe_nanoid {
    () => {
        $crate::nanoid!(12, $crate::SAFE_ALPHABET)
    };
    ($size:expr) => {
        $crate::nanoid!($size, $crate::SAFE_ALPHABET)
    };
}

/// Directory name holding a course's documents: the hex-encoded course key.
///
/// ```rust
/// # use studio_kernel::{course_namespace, domain::course::CourseKey};
/// let key: CourseKey = "course-v1:a+b+c".parse().unwrap();
/// assert_eq!(course_namespace(&key), hex::encode("course-v1:a+b+c"));
/// ```
#[must_use]
pub fn course_namespace(course: &CourseKey) -> String {
    hex::encode(course.to_string())
}

/// Opens the storage view of one course.
///
/// # Errors
/// Propagates [`StorageError::InvalidNamespace`]; hex output never triggers it in practice.
pub fn course_storage(
    storage: &Storage,
    course: &CourseKey,
) -> Result<NamespacedStorage, StorageError> {
    storage.namespace(course_namespace(course))
}

//! Sandboxed document storage.
//!
//! Every document lives below a canonical root, usually inside a [`NamespacedStorage`] view
//! (one directory per course). Writes are atomic swaps (unique temp file, `fsync`, rename),
//! and temp files left by a crash are purged when the store connects.
//!
//! ```rust
//! use studio_storage::{Storage, StorageError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), StorageError> {
//!     # let tmp = tempfile::tempdir().unwrap();
//!     let storage = Storage::builder().root(tmp.path().join("data")).connect().await?;
//!
//!     let course = storage.namespace("abc123")?;
//!     course.write("blocks/split.json", b"{}").await?;
//!     assert!(course.exists("blocks/split.json")?);
//!     assert_eq!(course.list_json("blocks").await?, vec!["split".to_owned()]);
//!     Ok(())
//! }
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod namespace;
mod security;

pub use builder::StorageBuilder;
pub use engine::Storage;
pub use error::{StorageError, StorageErrorExt};
pub use namespace::{NamespaceName, NamespacedStorage};

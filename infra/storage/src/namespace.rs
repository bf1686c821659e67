use crate::engine::Storage;
use crate::error::StorageError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// A validated directory name directly below the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceName(String);

impl NamespaceName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&String> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: &String) -> Result<Self, StorageError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for NamespaceName {
    type Error = StorageError;

    fn try_from(value: &str) -> Result<Self, StorageError> {
        let name = value.to_ascii_lowercase();

        if name.is_empty() {
            return Err(StorageError::InvalidNamespace {
                message: "EMPTY".into(),
                context: Some("Namespace cannot be empty".into()),
            });
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StorageError::InvalidNamespace {
                message: name.into(),
                context: Some("Namespace contains illegal characters".into()),
            });
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for NamespaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scoped view of the storage engine; every path lands below `<root>/<namespace>/`.
///
/// Cloning is cheap: it holds the engine handle and a shared name.
#[derive(Debug, Clone)]
pub struct NamespacedStorage {
    storage: Storage,
    namespace: Arc<NamespaceName>,
}

impl NamespacedStorage {
    pub(crate) fn new(storage: Storage, namespace: NamespaceName) -> Self {
        Self { storage, namespace: Arc::new(namespace) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.namespace.as_str()
    }

    fn ns(&self) -> Option<&str> {
        Some(self.namespace.as_str())
    }

    /// Resolves a path inside the namespace.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PathTraversalAttempt`] if the path tries to escape the sandbox.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
        crate::security::resolve(self.storage.root(), self.ns(), path)
    }

    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the document does not exist.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        self.storage.read_internal(self.ns(), path).await
    }

    /// Writes a document atomically; the target is never observed half-written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PathTraversalAttempt`] if the path escapes the sandbox and
    /// [`StorageError::Io`] on disk failures.
    pub async fn write(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        self.storage.write_internal(self.ns(), path, data).await
    }

    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the document does not exist.
    pub async fn delete(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        self.storage.delete_internal(self.ns(), path).await
    }

    /// # Errors
    ///
    /// Fails only if path resolution fails; a missing document is `Ok(false)`.
    pub fn exists(&self, path: impl AsRef<Path>) -> Result<bool, StorageError> {
        self.storage.exists_internal(self.ns(), path)
    }

    /// Loads a JSON document, returning `None` when it has never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] if the stored bytes do not decode into `T`.
    pub async fn load_json<T: DeserializeOwned>(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<T>, StorageError> {
        self.storage.load_json_internal(self.ns(), path).await
    }

    /// Serializes `document` as pretty JSON and writes it atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] on encoding failures and [`StorageError::Io`] on disk
    /// failures.
    pub async fn save_json<T: Serialize>(
        &self,
        path: impl AsRef<Path>,
        document: &T,
    ) -> Result<(), StorageError> {
        self.storage.save_json_internal(self.ns(), path, document).await
    }

    /// File stems of the `.json` documents in `dir`, sorted. A missing directory is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory exists but cannot be read.
    pub async fn list_json(&self, dir: impl AsRef<Path>) -> Result<Vec<String>, StorageError> {
        let resolved = self.resolve(dir)?;
        let mut entries = match fs::read_dir(&resolved).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StorageError::Io {
                    source: err,
                    context: Some(format!("Listing {}", resolved.display()).into()),
                });
            },
        };

        let mut stems = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                stems.push(stem.to_owned());
            }
        }
        stems.sort_unstable();
        Ok(stems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_names_are_lowercased() {
        let name = NamespaceName::try_from("C0FFEE_01").unwrap();
        assert_eq!(name.as_str(), "c0ffee_01");
    }

    #[test]
    fn illegal_namespace_names_are_rejected() {
        for bad in ["", "a/b", "..", "course-v1:x+y+z"] {
            let err = NamespaceName::try_from(bad).unwrap_err();
            assert_eq!(err.kind(), "InvalidNamespace", "{bad}");
        }
    }
}

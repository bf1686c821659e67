use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the binary and the feature slices.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StudioConfigInner {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub commerce: CommerceConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct StudioConfig {
    #[serde(flatten, default)]
    inner: Arc<StudioConfigInner>,
}

impl Deref for StudioConfig {
    type Target = StudioConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for StudioConfig {
    fn deref_mut(&mut self) -> &mut StudioConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Root directory of the per-course document store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// Rolling log files are written here when set.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommerceConfig {
    /// ISO currency code used when rendering purchase totals.
    pub currency: String,
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("data") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, directory: None }
    }
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self { currency: "usd".to_owned() }
    }
}

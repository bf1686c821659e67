//! Persistence seam for advanced settings and split-test blocks.

use crate::error::{ExperimentError, ExperimentErrorExt};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use studio_kernel::course_storage;
use studio_kernel::domain::course::CourseKey;
use studio_kernel::domain::partitions::{AdvancedSettings, SplitTestBlock};
use studio_storage::{NamespacedStorage, Storage};

const SETTINGS_DOC: &str = "advanced_settings.json";
const BLOCKS_DIR: &str = "blocks";

/// Course content used by the experiments slice.
///
/// Every save replaces one whole document, so a mutation is a single atomic write.
pub trait ContentStore: Send + Sync + 'static {
    /// Missing settings read as [`AdvancedSettings::default`].
    fn load_settings(
        &self,
        course: &CourseKey,
    ) -> impl Future<Output = Result<AdvancedSettings, ExperimentError>> + Send;

    fn save_settings(
        &self,
        course: &CourseKey,
        settings: &AdvancedSettings,
    ) -> impl Future<Output = Result<(), ExperimentError>> + Send;

    fn load_block(
        &self,
        course: &CourseKey,
        block_id: &str,
    ) -> impl Future<Output = Result<Option<SplitTestBlock>, ExperimentError>> + Send;

    fn save_block(
        &self,
        course: &CourseKey,
        block: &SplitTestBlock,
    ) -> impl Future<Output = Result<(), ExperimentError>> + Send;

    /// All split-test blocks of the course, ordered by id.
    fn list_blocks(
        &self,
        course: &CourseKey,
    ) -> impl Future<Output = Result<Vec<SplitTestBlock>, ExperimentError>> + Send;
}

#[derive(Debug, Default)]
struct CourseContent {
    settings: AdvancedSettings,
    blocks: BTreeMap<String, SplitTestBlock>,
}

/// Process-local store, used by tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryContentStore {
    courses: Arc<RwLock<FxHashMap<CourseKey, CourseContent>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryContentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents written so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl ContentStore for MemoryContentStore {
    async fn load_settings(&self, course: &CourseKey) -> Result<AdvancedSettings, ExperimentError> {
        Ok(self.courses.read().get(course).map(|c| c.settings.clone()).unwrap_or_default())
    }

    async fn save_settings(
        &self,
        course: &CourseKey,
        settings: &AdvancedSettings,
    ) -> Result<(), ExperimentError> {
        self.courses.write().entry(course.clone()).or_default().settings = settings.clone();
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn load_block(
        &self,
        course: &CourseKey,
        block_id: &str,
    ) -> Result<Option<SplitTestBlock>, ExperimentError> {
        Ok(self.courses.read().get(course).and_then(|c| c.blocks.get(block_id).cloned()))
    }

    async fn save_block(
        &self,
        course: &CourseKey,
        block: &SplitTestBlock,
    ) -> Result<(), ExperimentError> {
        self.courses
            .write()
            .entry(course.clone())
            .or_default()
            .blocks
            .insert(block.id.clone(), block.clone());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn list_blocks(&self, course: &CourseKey) -> Result<Vec<SplitTestBlock>, ExperimentError> {
        Ok(self
            .courses
            .read()
            .get(course)
            .map(|c| c.blocks.values().cloned().collect())
            .unwrap_or_default())
    }
}

/// Store backed by `studio-storage`: one JSON document per settings file and per block.
#[derive(Debug, Clone)]
pub struct StoredContent {
    storage: Storage,
}

impl StoredContent {
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    fn course(&self, course: &CourseKey) -> Result<NamespacedStorage, ExperimentError> {
        course_storage(&self.storage, course).context(course.to_string())
    }
}

/// `None` unless the id is a single non-empty segment of ASCII alphanumerics, `-` or `_`.
fn block_path(block_id: &str) -> Option<String> {
    let valid = !block_id.is_empty()
        && block_id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    valid.then(|| format!("{BLOCKS_DIR}/{block_id}.json"))
}

fn invalid_block_id(block_id: &str) -> ExperimentError {
    ExperimentError::not_found(format!("split test {block_id}"))
}

impl ContentStore for StoredContent {
    async fn load_settings(&self, course: &CourseKey) -> Result<AdvancedSettings, ExperimentError> {
        let settings = self.course(course)?.load_json(SETTINGS_DOC).await?;
        Ok(settings.unwrap_or_default())
    }

    async fn save_settings(
        &self,
        course: &CourseKey,
        settings: &AdvancedSettings,
    ) -> Result<(), ExperimentError> {
        self.course(course)?.save_json(SETTINGS_DOC, settings).await?;
        Ok(())
    }

    async fn load_block(
        &self,
        course: &CourseKey,
        block_id: &str,
    ) -> Result<Option<SplitTestBlock>, ExperimentError> {
        let Some(path) = block_path(block_id) else {
            return Ok(None);
        };
        Ok(self.course(course)?.load_json(path).await?)
    }

    async fn save_block(
        &self,
        course: &CourseKey,
        block: &SplitTestBlock,
    ) -> Result<(), ExperimentError> {
        let path = block_path(&block.id).ok_or_else(|| invalid_block_id(&block.id))?;
        self.course(course)?.save_json(path, block).await?;
        Ok(())
    }

    async fn list_blocks(&self, course: &CourseKey) -> Result<Vec<SplitTestBlock>, ExperimentError> {
        let ns = self.course(course)?;
        let mut blocks = Vec::new();
        for path in ns.list_json(BLOCKS_DIR).await?.iter().filter_map(|id| block_path(id)) {
            if let Some(block) = ns.load_json::<SplitTestBlock>(path).await? {
                blocks.push(block);
            }
        }
        Ok(blocks)
    }
}

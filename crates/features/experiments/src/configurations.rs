//! Group Configurations page: listing, editing and saving user partitions.

use crate::draft::PartitionDraft;
use crate::error::ExperimentError;
use crate::repository::ContentStore;
use studio_kernel::domain::constants::SPLIT_TEST;
use studio_kernel::domain::course::CourseKey;
use studio_kernel::domain::partitions::{AdvancedSettings, UserPartition};
use tracing::{debug, info, instrument};

/// Shown on the page when the course has no configurations.
pub const EMPTY_MESSAGE: &str = "You haven't created any group configurations yet.";

/// One row of the Group Configurations page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationDetails {
    pub partition: UserPartition,
    /// Per-group share, e.g. `"50%"`.
    pub allocation: String,
    /// Display names of the split tests bound to this configuration.
    pub used_by: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GroupConfigurations<S> {
    store: S,
}

impl<S: ContentStore> GroupConfigurations<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether the page (and its settings-menu link) is available for the course.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn is_available(&self, course: &CourseKey) -> Result<bool, ExperimentError> {
        Ok(self.store.load_settings(course).await?.split_test_enabled())
    }

    /// Advanced modules currently enabled for the course.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn modules(&self, course: &CourseKey) -> Result<Vec<String>, ExperimentError> {
        Ok(self.store.load_settings(course).await?.advanced_modules.value)
    }

    /// Enables or disables an advanced module; returns whether anything changed.
    ///
    /// # Errors
    /// Propagates store failures.
    #[instrument(skip_all, fields(course = %course, module = module, enabled = enabled))]
    pub async fn set_module(
        &self,
        course: &CourseKey,
        module: &str,
        enabled: bool,
    ) -> Result<bool, ExperimentError> {
        let mut settings = self.store.load_settings(course).await?;
        let changed =
            if enabled { settings.enable_module(module) } else { settings.disable_module(module) };

        if changed {
            self.store.save_settings(course, &settings).await?;
            info!("Advanced modules updated");
        }
        Ok(changed)
    }

    /// All configurations with their allocation and usage, in stored order.
    ///
    /// # Errors
    /// [`ExperimentError::FeatureDisabled`] unless the split-test module is enabled.
    #[instrument(skip_all, fields(course = %course))]
    pub async fn list(&self, course: &CourseKey) -> Result<Vec<ConfigurationDetails>, ExperimentError> {
        let settings = self.enabled_settings(course).await?;
        let blocks = self.store.list_blocks(course).await?;

        let details = settings
            .partitions()
            .iter()
            .map(|partition| ConfigurationDetails {
                allocation: partition.allocation_label(),
                used_by: blocks
                    .iter()
                    .filter(|b| b.user_partition_id == Some(partition.id))
                    .map(|b| b.display_name.clone())
                    .collect(),
                partition: partition.clone(),
            })
            .collect::<Vec<_>>();

        debug!(count = details.len(), "Listed group configurations");
        Ok(details)
    }

    /// # Errors
    /// [`ExperimentError::NotFound`] if no configuration has this id.
    pub async fn get(&self, course: &CourseKey, id: u64) -> Result<UserPartition, ExperimentError> {
        self.store
            .load_settings(course)
            .await?
            .partition(id)
            .cloned()
            .ok_or_else(|| ExperimentError::not_found(format!("group configuration {id}")))
    }

    /// Opens an existing configuration for editing.
    ///
    /// # Errors
    /// [`ExperimentError::NotFound`] if no configuration has this id.
    pub async fn edit(&self, course: &CourseKey, id: u64) -> Result<PartitionDraft, ExperimentError> {
        Ok(PartitionDraft::edit(&self.get(course, id).await?))
    }

    /// Validates and persists a draft; the draft itself is never consumed, so it stays
    /// editable after a validation failure.
    ///
    /// New drafts get the next free id and are appended; existing ones replace the stored
    /// configuration with the same id in place.
    ///
    /// # Errors
    /// A validation error, [`ExperimentError::FeatureDisabled`], or
    /// [`ExperimentError::NotFound`] when the edited configuration no longer exists.
    #[instrument(skip_all, fields(course = %course, partition_id = ?draft.id()))]
    pub async fn save(
        &self,
        course: &CourseKey,
        draft: &PartitionDraft,
    ) -> Result<UserPartition, ExperimentError> {
        draft.validate()?;

        let mut settings = self.enabled_settings(course).await?;
        let next_id = settings.next_partition_id();
        let partitions = &mut settings.user_partitions.value;

        let saved = match draft.id() {
            None => {
                let id = next_id.ok_or_else(|| ExperimentError::IdExhausted {
                    message: "no partition id above the highest stored one".into(),
                    context: Some(course.to_string().into()),
                })?;
                let partition = draft.to_partition(id);
                partitions.push(partition.clone());
                partition
            },
            Some(id) => {
                let slot = partitions
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ExperimentError::not_found(format!("group configuration {id}")))?;
                *slot = draft.to_partition(id);
                slot.clone()
            },
        };

        self.store.save_settings(course, &settings).await?;
        info!(partition_id = saved.id, groups = saved.groups.len(), "Group configuration saved");
        Ok(saved)
    }

    async fn enabled_settings(&self, course: &CourseKey) -> Result<AdvancedSettings, ExperimentError> {
        let settings = self.store.load_settings(course).await?;
        if settings.split_test_enabled() {
            Ok(settings)
        } else {
            Err(ExperimentError::FeatureDisabled {
                message: format!("'{SPLIT_TEST}' is not an enabled advanced module").into(),
                context: Some(course.to_string().into()),
            })
        }
    }
}

//! Group Configurations (user partitions) and the split-test blocks bound to them.

use crate::constants::{GROUP_VERSION, PARTITION_VERSION, SPLIT_TEST};
use serde::{Deserialize, Serialize};

/// A named bucket within a [`UserPartition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique within the owning partition.
    pub id: String,
    pub name: String,
    #[serde(default = "group_version")]
    pub version: u32,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), version: GROUP_VERSION }
    }
}

/// A Group Configuration: a named set of mutually exclusive experiment groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPartition {
    /// Unique per course and stable once referenced by a split-test block.
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "partition_version")]
    pub version: u32,
    pub groups: Vec<Group>,
}

impl UserPartition {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        description: impl Into<String>,
        groups: Vec<Group>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            version: PARTITION_VERSION,
            groups,
        }
    }

    #[must_use]
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Share of learners assigned to each group, in whole percent.
    #[must_use]
    pub const fn allocation(&self) -> usize {
        allocation_percent(self.groups.len())
    }

    /// [`Self::allocation`] rendered for display, e.g. `"33%"`.
    #[must_use]
    pub fn allocation_label(&self) -> String {
        format!("{}%", self.allocation())
    }
}

/// Equal share per group, rounded down; `0` for an empty partition.
#[must_use]
pub const fn allocation_percent(groups: usize) -> usize {
    if groups == 0 { 0 } else { 100 / groups }
}

/// A single advanced-settings entry as stored: `{"value": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingValue<T> {
    pub value: T,
}

/// The slice of a course's advanced settings this workspace owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedSettings {
    #[serde(default)]
    pub advanced_modules: SettingValue<Vec<String>>,
    #[serde(default)]
    pub user_partitions: SettingValue<Vec<UserPartition>>,
}

impl AdvancedSettings {
    /// Group Configurations are only reachable when the split-test module is enabled.
    #[must_use]
    pub fn split_test_enabled(&self) -> bool {
        self.advanced_modules.value.iter().any(|m| m == SPLIT_TEST)
    }

    /// Adds `module` unless present; returns whether the list changed.
    pub fn enable_module(&mut self, module: &str) -> bool {
        if self.advanced_modules.value.iter().any(|m| m == module) {
            return false;
        }
        self.advanced_modules.value.push(module.to_owned());
        true
    }

    /// Removes `module`; returns whether the list changed.
    pub fn disable_module(&mut self, module: &str) -> bool {
        let before = self.advanced_modules.value.len();
        self.advanced_modules.value.retain(|m| m != module);
        before != self.advanced_modules.value.len()
    }

    #[must_use]
    pub fn partitions(&self) -> &[UserPartition] {
        &self.user_partitions.value
    }

    #[must_use]
    pub fn partition(&self, id: u64) -> Option<&UserPartition> {
        self.user_partitions.value.iter().find(|p| p.id == id)
    }

    /// Next free partition id: one past the highest existing id, `0` for the first.
    ///
    /// `None` once the highest id is `u64::MAX`.
    #[must_use]
    pub fn next_partition_id(&self) -> Option<u64> {
        self.user_partitions.value.iter().map(|p| p.id).max().map_or(Some(0), |max| max.checked_add(1))
    }
}

/// A content block that shows one child per experiment group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitTestBlock {
    pub id: String,
    pub display_name: String,
    /// `None` until a Group Configuration is selected.
    #[serde(default)]
    pub user_partition_id: Option<u64>,
    #[serde(default)]
    pub children: Vec<ChildBlock>,
}

impl SplitTestBlock {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            user_partition_id: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn child(&self, id: &str) -> Option<&ChildBlock> {
        self.children.iter().find(|c| c.id == id)
    }
}

/// Content shown to one group of a split test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildBlock {
    pub id: String,
    pub display_name: String,
    /// Group this child serves; `None` once detached by a configuration switch.
    #[serde(default)]
    pub group_id: Option<String>,
}

impl ChildBlock {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        group_id: Option<String>,
    ) -> Self {
        Self { id: id.into(), display_name: display_name.into(), group_id }
    }
}

const fn group_version() -> u32 {
    GROUP_VERSION
}

const fn partition_version() -> u32 {
    PARTITION_VERSION
}

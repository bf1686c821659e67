//! In-memory editor for a Group Configuration before it is saved.

use crate::error::ExperimentError;
use crate::validator;
use studio_kernel::domain::partitions::{Group, UserPartition};

/// An editable Group Configuration.
///
/// Dropping a draft cancels the edit; nothing is persisted until it is saved through
/// [`GroupConfigurations::save`](crate::configurations::GroupConfigurations::save).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionDraft {
    id: Option<u64>,
    pub name: String,
    pub description: String,
    groups: Vec<Group>,
}

impl Default for PartitionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PartitionDraft {
    /// A new configuration with `Group A` and `Group B`.
    #[must_use]
    pub fn new() -> Self {
        let groups = (0..2_u8).map(|i| Group::new(i.to_string(), default_name(i.into()))).collect();
        Self { id: None, name: String::new(), description: String::new(), groups }
    }

    /// Starts editing an existing configuration.
    #[must_use]
    pub fn edit(partition: &UserPartition) -> Self {
        Self {
            id: Some(partition.id),
            name: partition.name.clone(),
            description: partition.description.clone(),
            groups: partition.groups.clone(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<u64> {
        self.id
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Label of the submit action.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        if self.is_new() { "Create" } else { "Save" }
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Appends `Group <letter>` with a fresh numeric id.
    ///
    /// # Errors
    /// [`ExperimentError::IdExhausted`] if a group already uses id `u64::MAX`.
    pub fn add_group(&mut self) -> Result<&Group, ExperimentError> {
        let highest = self.groups.iter().filter_map(|g| g.id.parse::<u64>().ok()).max();
        let id = highest.map_or(Some(0), |max| max.checked_add(1)).ok_or_else(|| {
            ExperimentError::IdExhausted {
                message: "no group id above the highest numeric one".into(),
                context: Some(self.name.clone().into()),
            }
        })?;

        let index = self.groups.len();
        self.groups.push(Group::new(id.to_string(), default_name(index)));
        Ok(&self.groups[index])
    }

    /// Removes the group at `index`, if any.
    pub fn remove_group(&mut self, index: usize) -> Option<Group> {
        (index < self.groups.len()).then(|| self.groups.remove(index))
    }

    /// # Errors
    /// Returns [`ExperimentError::NotFound`] if there is no group at `index`.
    pub fn rename_group(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), ExperimentError> {
        let group = self
            .groups
            .get_mut(index)
            .ok_or_else(|| ExperimentError::not_found(format!("group #{index}")))?;
        group.name = name.into();
        Ok(())
    }

    /// # Errors
    /// The first failing validation rule; see [`validator::validate`].
    pub fn validate(&self) -> Result<(), ExperimentError> {
        validator::validate(&self.name, &self.groups)
    }

    pub(crate) fn to_partition(&self, id: u64) -> UserPartition {
        UserPartition::new(id, self.name.clone(), self.description.clone(), self.groups.clone())
    }
}

fn default_name(index: usize) -> String {
    format!("Group {}", group_letter(index))
}

/// Spreadsheet-style letters for a zero-based index: `A`..`Z`, then `AA`, `AB`, ...
#[must_use]
pub fn group_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + u8::try_from(n % 26).unwrap_or(0)));
        n /= 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_has_two_default_groups() {
        let draft = PartitionDraft::new();
        assert!(draft.is_new());
        assert_eq!(draft.action_label(), "Create");

        let groups: Vec<_> = draft.groups().iter().map(|g| (g.id.as_str(), g.name.as_str())).collect();
        assert_eq!(groups, vec![("0", "Group A"), ("1", "Group B")]);
    }

    #[test]
    fn letters_continue_past_z() {
        assert_eq!(group_letter(0), "A");
        assert_eq!(group_letter(25), "Z");
        assert_eq!(group_letter(26), "AA");
        assert_eq!(group_letter(27), "AB");
        assert_eq!(group_letter(701), "ZZ");
        assert_eq!(group_letter(702), "AAA");
    }

    #[test]
    fn added_groups_get_fresh_ids_and_count_based_names() {
        let mut draft = PartitionDraft::new();
        draft.remove_group(0);
        let added = draft.add_group().unwrap().clone();

        // Ids never reuse a removed slot; names follow the current count.
        assert_eq!(added.id, "2");
        assert_eq!(added.name, "Group B");
    }

    #[test]
    fn non_numeric_ids_are_ignored_for_allocation() {
        let partition = UserPartition::new(
            3,
            "Legacy",
            "",
            vec![Group::new("alpha", "Alpha"), Group::new("7", "Seven")],
        );
        let mut draft = PartitionDraft::edit(&partition);
        assert_eq!(draft.action_label(), "Save");
        assert_eq!(draft.add_group().unwrap().id, "8");
    }

    #[test]
    fn group_ids_do_not_wrap() {
        let partition = UserPartition::new(
            0,
            "Full",
            "",
            vec![Group::new("0", "Group A"), Group::new(u64::MAX.to_string(), "Group B")],
        );
        let mut draft = PartitionDraft::edit(&partition);

        assert_eq!(draft.add_group().unwrap_err().kind(), "IdExhausted");
        assert_eq!(draft.groups().len(), 2);
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let mut draft = PartitionDraft::new();
        assert!(draft.remove_group(5).is_none());
        assert_eq!(draft.rename_group(9, "x").unwrap_err().kind(), "NotFound");

        draft.rename_group(1, "Control").unwrap();
        assert_eq!(draft.groups()[1].name, "Control");
    }
}

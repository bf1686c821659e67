//! Classification of a split test's children against its Group Configuration.
//!
//! Everything here is pure and recomputed on every read; nothing is persisted.

use fxhash::FxHashSet;
use studio_kernel::domain::partitions::{ChildBlock, Group, UserPartition};

/// A partition group that has content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveGroup {
    pub group: Group,
    pub child: ChildBlock,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Partition groups with a child, in partition order.
    pub active: Vec<ActiveGroup>,
    /// Children not used as an active entry, in child order.
    pub inactive: Vec<ChildBlock>,
    /// Partition groups without a child, in partition order.
    pub missing: Vec<Group>,
}

impl Reconciliation {
    /// Whether the "add missing groups" control is offered.
    #[must_use]
    pub fn can_add_missing(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Splits `children` into active and inactive entries and lists the groups with no content.
///
/// When several children reference the same group, the first one is active and the rest are
/// inactive. Without a partition every child is inactive and nothing is missing.
#[must_use]
pub fn classify(partition: Option<&UserPartition>, children: &[ChildBlock]) -> Reconciliation {
    let Some(partition) = partition else {
        return Reconciliation { inactive: children.to_vec(), ..Reconciliation::default() };
    };

    let mut used = FxHashSet::default();
    let mut result = Reconciliation::default();

    for group in &partition.groups {
        let child = children
            .iter()
            .enumerate()
            .find(|(_, c)| c.group_id.as_deref() == Some(group.id.as_str()));

        match child {
            Some((index, child)) => {
                used.insert(index);
                result.active.push(ActiveGroup { group: group.clone(), child: child.clone() });
            },
            None => result.missing.push(group.clone()),
        }
    }

    result.inactive = children
        .iter()
        .enumerate()
        .filter(|(index, _)| !used.contains(index))
        .map(|(_, c)| c.clone())
        .collect();

    result
}

/// New children for each missing group, named after the group and tagged with its id.
pub fn plan_missing(missing: &[Group], mut next_id: impl FnMut() -> String) -> Vec<ChildBlock> {
    missing
        .iter()
        .map(|group| ChildBlock::new(next_id(), group.name.clone(), Some(group.id.clone())))
        .collect()
}

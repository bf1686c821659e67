//! Pre-save checks for Group Configuration drafts.

use crate::error::ExperimentError;
use studio_kernel::domain::partitions::Group;

/// Fewest groups a saved configuration may have.
pub const MIN_GROUPS: usize = 2;

/// Validates a candidate configuration, reporting the first failing rule:
/// name, then group count, then group names.
///
/// # Errors
/// [`ExperimentError::NameRequired`], [`ExperimentError::MinimumGroups`] or
/// [`ExperimentError::GroupNameRequired`].
pub fn validate(name: &str, groups: &[Group]) -> Result<(), ExperimentError> {
    if is_blank(name) {
        return Err(ExperimentError::NameRequired { context: None });
    }

    if groups.len() < MIN_GROUPS {
        return Err(ExperimentError::MinimumGroups { context: None });
    }

    if groups.iter().any(|g| is_blank(&g.name)) {
        return Err(ExperimentError::GroupNameRequired { context: None });
    }

    Ok(())
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

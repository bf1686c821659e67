use std::borrow::Cow;
use studio_storage::StorageError;

/// A specialized [`ExperimentError`] enum of this crate.
///
/// The three validation variants render exactly the message shown next to the editor.
#[studio_derive::studio_error]
pub enum ExperimentError {
    #[error("Group Configuration name is required{}", format_context(.context))]
    NameRequired { context: Option<Cow<'static, str>> },

    #[error("There must be at least two groups{}", format_context(.context))]
    MinimumGroups { context: Option<Cow<'static, str>> },

    #[error("All groups must have a name{}", format_context(.context))]
    GroupNameRequired { context: Option<Cow<'static, str>> },

    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Feature disabled{}: {message}", format_context(.context))]
    FeatureDisabled { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Id space exhausted{}: {message}", format_context(.context))]
    IdExhausted { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Content storage failure{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal experiments error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ExperimentError {
    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound { message: message.into(), context: None }
    }

    /// Validation failures leave the draft editable; everything else aborts the edit.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NameRequired { .. } | Self::MinimumGroups { .. } | Self::GroupNameRequired { .. }
        )
    }
}

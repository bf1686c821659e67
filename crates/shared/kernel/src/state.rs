use fxhash::FxHashMap;
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;
use studio_domain::config::StudioConfig;
use studio_domain::registry::{FeatureSlice, InitializedSlice};
use studio_storage::Storage;

#[studio_derive::studio_error]
pub enum StateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct StudioStateInner {
    pub config: StudioConfig,
    pub storage: Storage,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Shared application state: configuration, the document store and the feature slices.
#[derive(Debug, Clone)]
pub struct StudioState {
    inner: Arc<StudioStateInner>,
}

impl StudioState {
    #[must_use]
    pub fn builder() -> StudioStateBuilder {
        StudioStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner
            .slices
            .get(&TypeId::of::<T>())
            .and_then(|initialized| initialized.state.as_any().downcast_ref::<T>())
    }

    /// Returns a reference to the slice if it is registered.
    ///
    /// # Errors
    /// Returns [`StateError::MissingSlice`] if the slice is not registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, StateError> {
        self.get_slice::<T>().ok_or_else(|| StateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }

    /// Names of the registered slices, sorted (for diagnostics).
    #[must_use]
    pub fn slice_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.inner.slices.values().map(|s| s.name).collect();
        names.sort_unstable();
        names
    }
}

impl Deref for StudioState {
    type Target = StudioStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Default)]
pub struct StudioStateBuilder {
    config: Option<StudioConfig>,
    storage: Option<Storage>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl StudioStateBuilder {
    #[must_use]
    pub fn config(mut self, config: StudioConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    /// Registers multiple slices at once.
    #[must_use]
    pub fn register_slices<I>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        for slice in slices {
            self.slices.insert(slice.id, slice);
        }
        self
    }

    /// # Errors
    /// Returns [`StateError::Validation`] if the storage handle was not provided.
    pub fn build(self) -> Result<StudioState, StateError> {
        let storage = self.storage.ok_or_else(|| StateError::Validation {
            message: "Storage not provided".into(),
            context: None,
        })?;
        let config = self.config.unwrap_or_default();

        Ok(StudioState {
            inner: Arc::new(StudioStateInner { config, storage, slices: self.slices }),
        })
    }
}

//! # Experiments
//!
//! Group Configurations (user partitions) and the split-test blocks bound to them.
//!
//! * [`draft`] and [`validator`] cover the editor: default groups, naming, pre-save rules.
//! * [`configurations`] lists and saves configurations with their allocation.
//! * [`reconcile`] classifies a block's children into active, inactive and missing groups.
//! * [`split_test`] binds blocks to configurations and repairs missing groups.
//! * [`repository`] is the storage seam, with an in-memory and a file-backed store.

pub mod configurations;
pub mod draft;
mod error;
pub mod reconcile;
pub mod repository;
pub mod validator;

pub use crate::configurations::GroupConfigurations;
pub use crate::draft::PartitionDraft;
pub use crate::error::{ExperimentError, ExperimentErrorExt};
pub use crate::repository::{ContentStore, MemoryContentStore, StoredContent};
pub use crate::split_test::{ConfigurationStatus, SplitTestView, SplitTests};
use studio_kernel::domain::registry::InitializedSlice;
use studio_storage::Storage;

/// Experiments feature state.
#[studio_derive::studio_slice]
pub struct Experiments {
    pub configurations: GroupConfigurations<StoredContent>,
    pub split_tests: SplitTests<StoredContent>,
}

/// Initialize the experiments feature on top of the document store.
#[must_use]
pub fn init(storage: &Storage) -> InitializedSlice {
    let content = StoredContent::new(storage.clone());
    let inner = ExperimentsInner {
        configurations: GroupConfigurations::new(content.clone()),
        split_tests: SplitTests::new(content),
    };

    tracing::info!("Experiments slice initialized");
    InitializedSlice::new(Experiments::new(inner))
}

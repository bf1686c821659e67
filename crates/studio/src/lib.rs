//! Facade crate for the studio feature slices and shared modules.
//! Re-exports domain/kernel/storage primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Depend on `studio` with the slices you need (`experiments`, `commerce`; both by default).
//! - Call [`init`] to build every enabled slice, or [`state`] for a ready [`StudioState`].

pub use studio_domain as domain;
pub use studio_kernel as kernel;
pub use studio_storage as storage;

use studio_domain::config::StudioConfig;
use studio_domain::registry::InitializedSlice;
use studio_kernel::state::{StateError, StudioState};
use studio_storage::Storage;

/// Feature registry for runtime introspection.
pub mod features {
    #[cfg(feature = "commerce")]
    pub use studio_commerce as commerce;
    #[cfg(feature = "experiments")]
    pub use studio_experiments as experiments;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "experiments")]
        "experiments",
        #[cfg(feature = "commerce")]
        "commerce",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled feature slices on top of the document store.
#[must_use]
#[allow(unused_variables)]
pub fn init(config: &StudioConfig, storage: &Storage) -> Vec<InitializedSlice> {
    let mut slices = Vec::new();

    // Group configurations and split tests
    #[cfg(feature = "experiments")]
    slices.push(features::experiments::init(storage));

    // Coupons and sales
    #[cfg(feature = "commerce")]
    slices.push(features::commerce::init(storage, &config.commerce.currency));

    slices
}

/// Builds the application state with every enabled slice registered.
///
/// # Errors
/// Propagates [`StateError`] from the state builder.
pub fn state(config: StudioConfig, storage: Storage) -> Result<StudioState, StateError> {
    let slices = init(&config, &storage);
    StudioState::builder().config(config).storage(storage).register_slices(slices).build()
}

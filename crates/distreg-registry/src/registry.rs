use distreg_lineage::LineageValidator;
use distreg_store::DistributiveStore;

use crate::config::RegistryConfig;
use crate::resolver::Resolver;

/// The distributive registry over a store `S`.
///
/// Mutations live in [`crate::mutation`], read paths in [`crate::query`].
/// Every operation is a short, synchronous sequence of store calls; the
/// registry holds no state of its own beyond configuration.
pub struct Registry<S: DistributiveStore> {
    pub(crate) store: S,
    pub(crate) config: RegistryConfig,
}

impl<S: DistributiveStore> Registry<S> {
    /// Create a registry with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, RegistryConfig::default())
    }

    pub fn with_config(store: S, config: RegistryConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub(crate) fn resolver(&self) -> Resolver<'_, S> {
        Resolver::new(&self.store)
    }

    pub(crate) fn lineage(&self) -> LineageValidator<'_, S> {
        LineageValidator::new(&self.store)
    }
}

impl<S: DistributiveStore + std::fmt::Debug> std::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}

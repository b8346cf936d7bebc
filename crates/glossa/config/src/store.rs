use crate::catalog::RuleCatalog;
use crate::classifier::ClassifierConfig;
use crate::error::ConfigError;
use std::sync::{Arc, RwLock};

/// Holds the current configuration snapshots and swaps them atomically on
/// reload.
///
/// Readers take an `Arc` to the snapshot that is current at that moment;
/// a reload installs a new snapshot without touching the old one, so
/// evaluations that already started keep a consistent view.
pub struct ConfigStore {
    classifier: RwLock<Arc<ClassifierConfig>>,
    catalog: RwLock<Arc<RuleCatalog>>,
}

impl ConfigStore {
    pub fn new(classifier: ClassifierConfig, catalog: RuleCatalog) -> Self {
        Self {
            classifier: RwLock::new(Arc::new(classifier)),
            catalog: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The current classifier snapshot.
    pub fn classifier(&self) -> Result<Arc<ClassifierConfig>, ConfigError> {
        Ok(self
            .classifier
            .read()
            .map_err(|_| ConfigError::Lock)?
            .clone())
    }

    /// The current catalog snapshot.
    pub fn catalog(&self) -> Result<Arc<RuleCatalog>, ConfigError> {
        Ok(self.catalog.read().map_err(|_| ConfigError::Lock)?.clone())
    }

    /// Install a new classifier snapshot. The config must already have
    /// been validated (its constructors enforce that).
    pub fn swap_classifier(&self, config: ClassifierConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let mut slot = self.classifier.write().map_err(|_| ConfigError::Lock)?;
        *slot = Arc::new(config);
        tracing::info!("classifier config snapshot swapped");
        Ok(())
    }

    /// Install a new catalog snapshot.
    pub fn swap_catalog(&self, catalog: RuleCatalog) -> Result<(), ConfigError> {
        let version = catalog.version.clone();
        let mut slot = self.catalog.write().map_err(|_| ConfigError::Lock)?;
        *slot = Arc::new(catalog);
        tracing::info!(version = %version, "rule catalog snapshot swapped");
        Ok(())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(ClassifierConfig::default(), RuleCatalog::builtin())
    }
}

//! Opening rasters by path
//!
//! Decoding raster files is left to the embedding application; it plugs a
//! `RasterOpener` into the engine. `InMemoryCatalog` serves rasters that are
//! already loaded.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::errors::{ProbeError, ProbeResult};

use super::source::RasterSource;

/// Resolves a raster path to an opened source
pub trait RasterOpener: Send + Sync {
    fn open(&self, path: &str) -> ProbeResult<Arc<dyn RasterSource>>;
}

/// Rasters held in memory and addressed by path
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    rasters: HashMap<String, Arc<dyn RasterSource>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        InMemoryCatalog::default()
    }

    /// Register a raster under `path`, replacing any previous entry
    pub fn insert<R: RasterSource + 'static>(&mut self, path: &str, raster: R) {
        debug!("Registering raster '{}' with {} band(s)", path, raster.band_count());
        self.rasters.insert(path.to_string(), Arc::new(raster));
    }

    /// Builder-style variant of `insert`
    pub fn with<R: RasterSource + 'static>(mut self, path: &str, raster: R) -> Self {
        self.insert(path, raster);
        self
    }

    pub fn len(&self) -> usize {
        self.rasters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rasters.is_empty()
    }
}

impl RasterOpener for InMemoryCatalog {
    fn open(&self, path: &str) -> ProbeResult<Arc<dyn RasterSource>> {
        self.rasters.get(path)
            .cloned()
            .ok_or_else(|| ProbeError::RasterNotFound(path.to_string()))
    }
}

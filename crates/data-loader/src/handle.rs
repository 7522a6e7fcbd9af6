//! Process-wide, load-once access to the catalog.
//!
//! The first caller of [`CatalogHandle::get`] performs the load; concurrent
//! callers block until it finishes. The outcome is cached for the life of
//! the handle, so a failed load keeps failing with the same error instead of
//! serving a partial catalog.

use crate::error::DataLoadError;
use crate::loader::LoadOptions;
use crate::types::Catalog;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tracing::error;

type LoadOutcome = Result<Arc<Catalog>, Arc<DataLoadError>>;

/// Lazily loaded, immutable catalog shared by every request
#[derive(Debug)]
pub struct CatalogHandle {
    data_dir: PathBuf,
    options: LoadOptions,
    cell: OnceLock<LoadOutcome>,
}

impl CatalogHandle {
    /// Handle that loads from `data_dir` on first use
    pub fn new(data_dir: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            data_dir: data_dir.into(),
            options,
            cell: OnceLock::new(),
        }
    }

    /// Handle around an already-built catalog
    pub fn preloaded(catalog: Catalog) -> Self {
        Self {
            data_dir: PathBuf::new(),
            options: LoadOptions::default(),
            cell: OnceLock::from(Ok(Arc::new(catalog))),
        }
    }

    /// Get the catalog, loading it if this is the first access
    pub fn get(&self) -> LoadOutcome {
        self.cell
            .get_or_init(|| {
                Catalog::load_from_dir(&self.data_dir, &self.options)
                    .map(Arc::new)
                    .map_err(|e| {
                        error!("Catalog load from {:?} failed: {}", self.data_dir, e);
                        Arc::new(e)
                    })
            })
            .clone()
    }

    /// Whether a load has completed (successfully or not)
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }
}

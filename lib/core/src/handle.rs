use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::item::ItemRecord;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared slot holding the active catalog
///
/// Readers take an `Arc` snapshot and keep using it for as long as they need;
/// a reload builds the replacement outside the lock and only holds the write
/// lock for the pointer swap.
#[derive(Clone)]
pub struct CatalogHandle {
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog.with_generation(1)))),
        }
    }

    /// The catalog in effect right now
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().clone()
    }

    pub fn generation(&self) -> u64 {
        self.current.read().generation()
    }

    /// Publish `catalog` and return the one it replaced
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut current = self.current.write();
        let next = Arc::new(catalog.with_generation(current.generation() + 1));
        std::mem::replace(&mut *current, next)
    }

    /// Build a catalog from `records` and publish it
    ///
    /// Axis names carry over from the catalog being replaced when the
    /// dimension is unchanged; they are read under the write lock. On a
    /// validation error the active catalog stays in place.
    pub fn reload<I>(&self, records: I) -> Result<Arc<Catalog>, CatalogError>
    where
        I: IntoIterator<Item = ItemRecord>,
    {
        let mut catalog = Catalog::from_records(records)?;

        let mut current = self.current.write();
        if let Some(axes) = current.axes() {
            if axes.len() == catalog.dim() {
                catalog = catalog.with_axes(axes.iter().cloned())?;
            }
        }
        let next = Arc::new(catalog.with_generation(current.generation() + 1));
        Ok(std::mem::replace(&mut *current, next))
    }
}

impl std::fmt::Debug for CatalogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current.read();
        f.debug_struct("CatalogHandle")
            .field("generation", &current.generation())
            .field("items", &current.len())
            .finish()
    }
}

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

use crate::{AxisId, GridAxis, OrderTable, PerformanceGrid};

use super::{GridId, GridStore, StoreError};

#[derive(Debug, Default)]
struct Entries {
    axes: HashMap<AxisId, Arc<GridAxis>>,
    grids: HashMap<GridId, Arc<PerformanceGrid>>,
    order_table: Option<Arc<OrderTable>>,
}

/// A read-through cache in front of another [`GridStore`].
///
/// The first read of each axis, grid, or order table goes to the inner store;
/// later reads return the same shared handle. Failed reads are not cached.
#[derive(Debug)]
pub struct CachedGridStore<S> {
    inner: S,
    entries: Mutex<Entries>,
}

impl<S: GridStore> CachedGridStore<S> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: Mutex::new(Entries::default()),
        }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        *self.lock() = Entries::default();
        debug!("cleared grid cache");
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the cached value for `key`, loading and inserting it on a miss.
///
/// The lock is not held while loading.
fn read_through<K, V>(
    cache: &CachedGridStore<impl GridStore>,
    select: impl Fn(&mut Entries) -> &mut HashMap<K, Arc<V>>,
    key: K,
    load: impl FnOnce() -> Result<Arc<V>, StoreError>,
) -> Result<Arc<V>, StoreError>
where
    K: Eq + Hash + std::fmt::Debug,
{
    if let Some(hit) = select(&mut cache.lock()).get(&key) {
        return Ok(Arc::clone(hit));
    }

    debug!(?key, "grid cache miss");
    let loaded = load()?;
    let mut entries = cache.lock();
    Ok(Arc::clone(select(&mut entries).entry(key).or_insert(loaded)))
}

impl<S: GridStore> GridStore for CachedGridStore<S> {
    fn axis(&self, id: AxisId) -> Result<Arc<GridAxis>, StoreError> {
        read_through(self, |e| &mut e.axes, id, || self.inner.axis(id))
    }

    fn grid(&self, id: GridId) -> Result<Arc<PerformanceGrid>, StoreError> {
        read_through(self, |e| &mut e.grids, id, || self.inner.grid(id))
    }

    fn order_table(&self) -> Result<Arc<OrderTable>, StoreError> {
        if let Some(table) = &self.lock().order_table {
            return Ok(Arc::clone(table));
        }

        debug!("order table cache miss");
        let loaded = self.inner.order_table()?;
        Ok(Arc::clone(self.lock().order_table.get_or_insert(loaded)))
    }
}

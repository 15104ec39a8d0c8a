use std::sync::Arc;

use tracing::info;

use crate::store::markuprow::MarkupRow;
use crate::store::markupstore::MarkupStore;
use crate::store::storeerror::StoreError;

use super::breakpoint::MarkupInput;
use super::cachebackend::CacheBackend;
use super::markupcache::MarkupCache;

/// Administrative access to the markup table. Every successful mutation
/// clears the cache so the next lookup reloads from the store.
pub struct MarkupAdmin<C: CacheBackend> {
    store: Arc<MarkupStore>,
    cache: Arc<MarkupCache<C>>,
}

impl<C: CacheBackend> MarkupAdmin<C> {
    pub fn new(store: Arc<MarkupStore>, cache: Arc<MarkupCache<C>>) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &Arc<MarkupCache<C>> {
        &self.cache
    }

    pub fn list(&self) -> Vec<MarkupRow> {
        self.store.list()
    }

    pub fn get(&self, id: i64) -> Result<MarkupRow, StoreError> {
        self.store.get(id)
    }

    pub fn insert(&self, input: MarkupInput) -> Result<MarkupRow, StoreError> {
        let row = self.store.insert(input)?;
        self.cache.clear();
        info!(id = row.id(), value = ?row.value(), multiplier = row.multiplier(), "markup row created");
        Ok(row)
    }

    pub fn update(&self, id: i64, input: MarkupInput) -> Result<MarkupRow, StoreError> {
        let row = self.store.update(id, input)?;
        self.cache.clear();
        info!(id, value = ?row.value(), multiplier = row.multiplier(), "markup row updated");
        Ok(row)
    }

    pub fn delete(&self, id: i64) -> Result<MarkupRow, StoreError> {
        let row = self.store.delete(id)?;
        self.cache.clear();
        info!(id, "markup row deleted");
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::markupcache::{
        MultiThreadedMarkupCache,
        SingleThreadedMarkupCache
    };

    fn admin() -> MarkupAdmin<crate::markup::cachebackend::RwLockBackend> {
        let store = Arc::new(
            MarkupStore::from_inputs(&[
                MarkupInput::new(Some(10.0), 2.0),
                MarkupInput::new(Some(20.0), 1.0),
            ])
            .unwrap(),
        );
        let cache = Arc::new(MultiThreadedMarkupCache::new_threadsafe(store.clone()));
        MarkupAdmin::new(store, cache)
    }

    #[test]
    fn mutations_clear_the_cache() {
        let admin = admin();
        assert_eq!(admin.cache().multiplier(15.0).unwrap(), 1.5);

        admin.update(2, MarkupInput::new(Some(30.0), 1.0)).unwrap();
        assert!(!admin.cache().is_loaded());
        assert_eq!(admin.cache().multiplier(20.0).unwrap(), 1.5);

        admin.insert(MarkupInput::new(Some(20.0), 1.75)).unwrap();
        assert_eq!(admin.cache().multiplier(20.0).unwrap(), 1.75);

        admin.delete(3).unwrap();
        assert_eq!(admin.cache().multiplier(20.0).unwrap(), 1.5);
    }

    #[test]
    fn rejected_mutations_keep_the_cache() {
        let admin = admin();
        let before = admin.cache().snapshot().unwrap();
        assert!(admin.insert(MarkupInput::new(Some(10.0), 3.0)).is_err());
        assert!(admin.delete(99).is_err());
        assert!(admin.cache().is_loaded());
        assert_eq!(admin.cache().snapshot().unwrap().uuid(), before.uuid());
        assert_eq!(admin.list().len(), 2);
    }

    #[test]
    fn works_with_single_threaded_cache() {
        let store = Arc::new(MarkupStore::from_inputs(&[MarkupInput::new(Some(5.0), 3.0)]).unwrap());
        let cache = Arc::new(SingleThreadedMarkupCache::new(store.clone()));
        let admin = MarkupAdmin::new(store, cache);
        assert_eq!(admin.cache().apply_markup(2.0).unwrap(), 6.0);
        admin.update(1, MarkupInput::new(Some(5.0), 2.0)).unwrap();
        assert_eq!(admin.cache().apply_markup(2.0).unwrap(), 4.0);
        assert_eq!(admin.get(1).unwrap().multiplier(), 2.0);
    }
}

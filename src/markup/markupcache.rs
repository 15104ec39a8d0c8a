use std::sync::Arc;

use tracing::debug;

use crate::store::markupsource::MarkupSource;
use crate::store::storeerror::StoreError;

use super::cachebackend::{
    CacheBackend,
    MarkupSnapshot,
    RefCellBackend,
    RwLockBackend
};

/// Markup table loaded from a `MarkupSource` on first use and kept until
/// `clear` is called. Whoever mutates the source is responsible for calling
/// `clear`; lookups in between see the previous table.
///
/// Load failures are not cached, the next lookup tries again.
pub struct MarkupCache<C: CacheBackend> {
    source: Arc<dyn MarkupSource>,
    backend: C,
}

impl<C: CacheBackend> MarkupCache<C> {
    fn new_with_backend(source: Arc<dyn MarkupSource>, backend: C) -> Self {
        Self { source, backend }
    }

    pub fn snapshot(&self) -> Result<Arc<MarkupSnapshot>, StoreError> {
        self.backend.get_or_load(|| {
            let snapshot = MarkupSnapshot::new(self.source.load_table()?);
            debug!(snapshot = %snapshot.uuid(), "markup cache loaded");
            Ok(snapshot)
        })
    }

    pub fn multiplier(&self, x: f64) -> Result<f64, StoreError> {
        Ok(self.snapshot()?.table().multiplier(x))
    }

    pub fn apply_markup(&self, x: f64) -> Result<f64, StoreError> {
        Ok(self.snapshot()?.table().apply(x)?)
    }

    pub fn clear(&self) {
        self.backend.clear();
        debug!("markup cache cleared");
    }

    pub fn is_loaded(&self) -> bool {
        self.backend.cached().is_some()
    }
}

impl MarkupCache<RefCellBackend> {
    pub fn new(source: Arc<dyn MarkupSource>) -> Self {
        Self::new_with_backend(source, RefCellBackend::new())
    }
}

impl MarkupCache<RwLockBackend> {
    pub fn new_threadsafe(source: Arc<dyn MarkupSource>) -> Self {
        Self::new_with_backend(source, RwLockBackend::new())
    }
}

pub type SingleThreadedMarkupCache = MarkupCache<RefCellBackend>;
pub type MultiThreadedMarkupCache = MarkupCache<RwLockBackend>;

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering
    };

    use super::*;
    use crate::markup::breakpoint::MarkupInput;
    use crate::markup::markuptable::MarkupTable;
    use crate::store::markuprow::MarkupRow;
    use crate::store::markupstore::MarkupStore;

    struct CountingSource {
        store: MarkupStore,
        loads: AtomicUsize,
    }

    impl CountingSource {
        fn new(inputs: &[MarkupInput]) -> Arc<CountingSource> {
            Arc::new(CountingSource {
                store: MarkupStore::from_inputs(inputs).unwrap(),
                loads: AtomicUsize::new(0),
            })
        }

        fn loads(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    impl MarkupSource for CountingSource {
        fn load_rows(&self) -> Result<Vec<MarkupRow>, StoreError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.store.load_rows()
        }
    }

    fn inputs() -> Vec<MarkupInput> {
        vec![
            MarkupInput::new(Some(10.0), 2.0),
            MarkupInput::new(Some(20.0), 1.0),
        ]
    }

    #[test]
    fn loads_once_until_cleared() {
        let source = CountingSource::new(&inputs());
        let cache = SingleThreadedMarkupCache::new(source.clone());
        assert!(!cache.is_loaded());

        assert_eq!(cache.multiplier(15.0).unwrap(), 1.5);
        assert_eq!(cache.apply_markup(15.0).unwrap(), 22.5);
        assert!(cache.is_loaded());
        assert_eq!(source.loads(), 1);

        cache.clear();
        assert!(!cache.is_loaded());
        assert_eq!(cache.multiplier(15.0).unwrap(), 1.5);
        assert_eq!(source.loads(), 2);
    }

    #[test]
    fn serves_stale_table_until_cleared() {
        let source = CountingSource::new(&inputs());
        let cache = MultiThreadedMarkupCache::new_threadsafe(source.clone());
        let first = cache.snapshot().unwrap();

        source.store.update(2, MarkupInput::new(Some(20.0), 1.5)).unwrap();
        assert_eq!(cache.multiplier(20.0).unwrap(), 1.0);

        cache.clear();
        let second = cache.snapshot().unwrap();
        assert_eq!(second.table().multiplier(20.0), 1.5);
        assert_ne!(first.uuid(), second.uuid());
        // earlier readers keep their own snapshot
        assert_eq!(first.table().multiplier(20.0), 1.0);
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let source = CountingSource::new(&[]);
        let cache = SingleThreadedMarkupCache::new(source.clone());
        assert!(cache.snapshot().is_err());
        assert!(cache.snapshot().is_err());
        assert!(!cache.is_loaded());
        assert_eq!(source.loads(), 2);

        source.store.insert(MarkupInput::new(Some(5.0), 3.0)).unwrap();
        assert_eq!(cache.multiplier(1.0).unwrap(), 3.0);
    }

    #[test]
    fn shared_across_threads() {
        let source = CountingSource::new(&inputs());
        let cache = MultiThreadedMarkupCache::new_threadsafe(source.clone());
        let expected = cache.multiplier(12.5).unwrap();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        assert_eq!(cache.multiplier(12.5).unwrap(), expected);
                    }
                });
            }
        });
        assert_eq!(source.loads(), 1);
    }

    #[test]
    fn load_racing_a_clear_is_not_stored() {
        let backend = RwLockBackend::new();
        let table = MarkupTable::from_inputs(&inputs()).unwrap();
        let snapshot = backend
            .get_or_load(|| {
                backend.clear();
                Ok(MarkupSnapshot::new(table))
            })
            .unwrap();
        assert_eq!(snapshot.table().multiplier(15.0), 1.5);
        assert!(backend.cached().is_none());
    }
}

use std::cell::RefCell;
use std::sync::{
    Arc,
    PoisonError,
    RwLock
};

use uuid::Uuid;

use crate::store::storeerror::StoreError;

use super::markuptable::MarkupTable;

/// A loaded markup table, tagged with an id that changes on every reload.
pub struct MarkupSnapshot {
    uuid: Uuid,
    table: MarkupTable,
}

impl MarkupSnapshot {
    pub fn new(table: MarkupTable) -> MarkupSnapshot {
        MarkupSnapshot { uuid: Uuid::new_v4(), table }
    }

    pub fn uuid(&self) -> &Uuid {
        &self.uuid
    }

    pub fn table(&self) -> &MarkupTable {
        &self.table
    }
}

/// Holds at most one snapshot: load on first use, drop on `clear`.
///
/// A snapshot is never mutated after it is stored. Readers keep the `Arc` they
/// were handed, so a `clear` only affects later lookups.
pub trait CacheBackend {
    fn get_or_load(
        &self,
        load: impl FnOnce() -> Result<MarkupSnapshot, StoreError>,
    ) -> Result<Arc<MarkupSnapshot>, StoreError>;

    fn clear(&self);

    fn cached(&self) -> Option<Arc<MarkupSnapshot>>;
}

// ── Single-threaded: RefCell ────────────────────────────────────────────────

pub struct RefCellBackend {
    snapshot: RefCell<Option<Arc<MarkupSnapshot>>>,
}

impl RefCellBackend {
    pub fn new() -> Self {
        Self { snapshot: RefCell::new(None) }
    }
}

impl Default for RefCellBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBackend for RefCellBackend {
    fn get_or_load(
        &self,
        load: impl FnOnce() -> Result<MarkupSnapshot, StoreError>,
    ) -> Result<Arc<MarkupSnapshot>, StoreError> {
        if let Some(snapshot) = self.cached() {
            return Ok(snapshot);
        }
        let snapshot = Arc::new(load()?);
        *self.snapshot.borrow_mut() = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    fn clear(&self) {
        self.snapshot.borrow_mut().take();
    }

    fn cached(&self) -> Option<Arc<MarkupSnapshot>> {
        self.snapshot.borrow().clone()
    }
}

// ── Multi-threaded: RwLock ──────────────────────────────────────────────────
//
// The load runs without holding the lock, so two threads that miss at the same
// time may both load; whichever stores first wins and the other adopts it.
//
// `generation` is bumped by every `clear`. A load that started before a clear
// is handed back to its caller but not stored, otherwise a table read before
// an admin mutation could outlive the clear that followed it.

struct CacheState {
    generation: u64,
    snapshot: Option<Arc<MarkupSnapshot>>,
}

pub struct RwLockBackend {
    state: RwLock<CacheState>,
}

impl RwLockBackend {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CacheState { generation: 0, snapshot: None }),
        }
    }
}

impl Default for RwLockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBackend for RwLockBackend {
    fn get_or_load(
        &self,
        load: impl FnOnce() -> Result<MarkupSnapshot, StoreError>,
    ) -> Result<Arc<MarkupSnapshot>, StoreError> {
        let generation = {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = &state.snapshot {
                return Ok(Arc::clone(snapshot));
            }
            state.generation
        };

        let loaded = Arc::new(load()?);

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            return Ok(loaded);
        }
        if let Some(snapshot) = &state.snapshot {
            return Ok(Arc::clone(snapshot));
        }
        state.snapshot = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    fn clear(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.snapshot = None;
    }

    fn cached(&self) -> Option<Arc<MarkupSnapshot>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner).snapshot.clone()
    }
}

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{
    PoisonError,
    RwLock
};

use tracing::debug;

use crate::markup::breakpoint::MarkupInput;
use crate::markup::markuptable::MarkupTable;

use super::markuprow::MarkupRow;
use super::markupsource::MarkupSource;
use super::storeerror::StoreError;

struct StoreInner {
    rows: BTreeMap<i64, MarkupRow>,
    next_id: i64,
}

/// In-process `markup_matrix` table: rows keyed by an auto-incremented id.
///
/// Every insert and update is checked against the rest of the table, so the
/// store never holds two rows with the same threshold or a row that fails
/// `MarkupInput::validate`. Deleting down to zero rows is allowed; loading a
/// table from an empty store then fails with `EmptyTable`.
pub struct MarkupStore {
    inner: RwLock<StoreInner>,
}

impl MarkupStore {
    pub fn new() -> MarkupStore {
        MarkupStore {
            inner: RwLock::new(StoreInner { rows: BTreeMap::new(), next_id: 1 }),
        }
    }

    pub fn from_inputs(inputs: &[MarkupInput]) -> Result<MarkupStore, StoreError> {
        let store = MarkupStore::new();
        for input in inputs.iter() {
            store.insert(*input)?;
        }
        Ok(store)
    }

    /// Seeds a store from a JSON file holding either one `{value, multiplier}`
    /// object or an array of them.
    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<MarkupStore, StoreError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        let inputs: Vec<MarkupInput> = if json_value.is_array() {
            StoreError::from_json_or_json_parse_error(json_value)?
        } else {
            vec![StoreError::from_json_or_json_parse_error(json_value)?]
        };
        MarkupStore::from_inputs(&inputs)
    }

    pub fn list(&self) -> Vec<MarkupRow> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.rows.values().copied().collect()
    }

    pub fn get(&self, id: i64) -> Result<MarkupRow, StoreError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.rows.get(&id).copied().ok_or(StoreError::RowNotFound(id))
    }

    pub fn insert(&self, input: MarkupInput) -> Result<MarkupRow, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        check_candidate(inner.rows.values().map(MarkupRow::input), input)?;
        let row = MarkupRow::new(inner.next_id, input);
        inner.rows.insert(row.id(), row);
        inner.next_id += 1;
        debug!(id = row.id(), "markup row inserted");
        Ok(row)
    }

    pub fn update(&self, id: i64, input: MarkupInput) -> Result<MarkupRow, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !inner.rows.contains_key(&id) {
            return Err(StoreError::RowNotFound(id));
        }
        let others = inner.rows.values().filter(|row| row.id() != id).map(MarkupRow::input);
        check_candidate(others, input)?;
        let row = MarkupRow::new(id, input);
        inner.rows.insert(id, row);
        debug!(id, "markup row updated");
        Ok(row)
    }

    pub fn delete(&self, id: i64) -> Result<MarkupRow, StoreError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let row = inner.rows.remove(&id).ok_or(StoreError::RowNotFound(id))?;
        debug!(id, "markup row deleted");
        Ok(row)
    }
}

impl Default for MarkupStore {
    fn default() -> MarkupStore {
        MarkupStore::new()
    }
}

impl MarkupSource for MarkupStore {
    fn load_rows(&self) -> Result<Vec<MarkupRow>, StoreError> {
        Ok(self.list())
    }
}

/// Validates `candidate` and checks that the table it would join stays valid.
fn check_candidate(
    existing: impl Iterator<Item = MarkupInput>,
    candidate: MarkupInput,
) -> Result<(), StoreError> {
    let mut inputs: Vec<MarkupInput> = existing.collect();
    inputs.push(candidate);
    MarkupTable::from_inputs(&inputs)?;
    Ok(())
}

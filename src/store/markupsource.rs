use tracing::{
    debug,
    warn
};

use crate::markup::breakpoint::Breakpoint;
use crate::markup::markuptable::MarkupTable;

use super::markuprow::MarkupRow;
use super::storeerror::StoreError;

/// Where markup rows are read from: the `markup_matrix` table, a JSON file,
/// or an in-process store.
pub trait MarkupSource: Send + Sync {
    /// All rows, in no particular order.
    fn load_rows(&self) -> Result<Vec<MarkupRow>, StoreError>;

    /// Loads the rows and validates them into a table. Any malformed row fails
    /// the whole load.
    fn load_table(&self) -> Result<MarkupTable, StoreError> {
        let rows = self.load_rows()?;
        let mut breakpoints = Vec::with_capacity(rows.len());
        for row in rows.iter() {
            let threshold = row.value().unwrap_or(f64::INFINITY);
            let breakpoint = Breakpoint::new(threshold, row.multiplier()).inspect_err(|error| {
                warn!(row = row.id(), "rejected markup row: {}", error);
            })?;
            breakpoints.push(breakpoint);
        }
        let table = MarkupTable::new(&breakpoints)?;
        debug!(breakpoints = table.len(), "markup table loaded");
        Ok(table)
    }
}

//! Salsa tracked query functions.
//!
//! These functions are memoized by Salsa. Results are cached and only
//! recomputed when the inputs they read change.

use std::sync::Arc;

use super::inputs::{CategoryColumns, Selections};

/// Tracked function: indices of the rows that pass the category filter.
///
/// A row is kept when its species is in the selected species set AND its
/// island is in the selected island set. Indices are ascending, so the
/// source row order is preserved. An empty set on either side selects
/// nothing.
///
/// Salsa records that this query read the category columns and both
/// selection fields, and nothing else: writing a display setting never
/// re-executes it, while writing either selection marks the memo stale so
/// the next read recomputes it exactly once.
#[salsa::tracked]
pub fn filtered_rows(
    db: &dyn salsa::Database,
    columns: CategoryColumns,
    selections: Selections,
) -> Arc<Vec<usize>> {
    let species = selections.species(db);
    let islands = selections.islands(db);
    let species_column = columns.species(db);
    let island_column = columns.islands(db);

    let rows: Vec<usize> = species_column
        .iter()
        .zip(island_column.iter())
        .enumerate()
        .filter(|(_, (s, i))| species.contains(s) && islands.contains(i))
        .map(|(row, _)| row)
        .collect();

    tracing::debug!(
        "Recomputed filtered rows: {} of {} rows match {} species / {} islands",
        rows.len(),
        species_column.len(),
        species.len(),
        islands.len()
    );

    Arc::new(rows)
}

//! Side-by-side views of two recorded executions of one cell.
//!
//! A diff tool compares whole notebooks, so each selected execution is
//! wrapped in a single-cell notebook that shares the source notebook's
//! metadata and format version.

use serde::Serialize;
use tracing::debug;

use crate::error::ConvertError;
use crate::notebook::{Cell, CellMetadata, ExecutionRecord, Notebook};

/// The two notebooks to compare.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionPair {
    /// The earlier or reference execution.
    pub base: Notebook,
    /// The execution compared against `base`.
    pub remote: Notebook,
}

/// Selects executions `base` and `remote` of cell `cell`.
///
/// Each side holds one cell whose source and outputs come from the selected
/// execution and whose type and execution count come from the live cell. A
/// cell with no recorded provenance yields the whole notebook on both sides.
///
/// # Errors
///
/// Returns [`ConvertError::CellOutOfRange`] or
/// [`ConvertError::ExecutionOutOfRange`] for positions that do not exist.
pub fn select_executions(
    notebook: &Notebook,
    cell: usize,
    base: usize,
    remote: usize,
) -> Result<ExecutionPair, ConvertError> {
    let live = notebook.cells.get(cell).ok_or(ConvertError::CellOutOfRange {
        index: cell,
        count: notebook.cells.len(),
    })?;

    let history = live.provenance();
    if history.is_empty() {
        debug!(cell, "cell has no provenance; comparing whole notebooks");
        return Ok(ExecutionPair {
            base: notebook.clone(),
            remote: notebook.clone(),
        });
    }

    let pick = |position: usize| {
        history
            .get(position)
            .map(|record| single_cell(notebook, live, record))
            .ok_or(ConvertError::ExecutionOutOfRange {
                cell,
                position,
                count: history.len(),
            })
    };
    Ok(ExecutionPair {
        base: pick(base)?,
        remote: pick(remote)?,
    })
}

fn single_cell(notebook: &Notebook, live: &Cell, record: &ExecutionRecord) -> Notebook {
    let cell = Cell {
        cell_type: live.cell_type,
        execution_count: live.execution_count,
        metadata: CellMetadata::default(),
        outputs: record.outputs.clone(),
        source: record.source.clone().unwrap_or_default(),
        ..Cell::default()
    };
    Notebook {
        cells: vec![cell],
        metadata: notebook.metadata.clone(),
        nbformat: notebook.nbformat,
        nbformat_minor: notebook.nbformat_minor,
    }
}

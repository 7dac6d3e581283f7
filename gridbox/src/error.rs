//! Layout error types.

use gridbox_formula::FormulaError;
use thiserror::Error;

use crate::layout::{Dimension, TrackKind};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("grid must have at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },

    #[error("grid row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{rows}x{columns} grid needs {expected} cells, got {actual}")]
    CellCountMismatch {
        rows: usize,
        columns: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{kind} weights: expected {expected}, got {actual}")]
    WeightCountMismatch {
        kind: TrackKind,
        expected: usize,
        actual: usize,
    },

    #[error("{kind} index {index} out of range ({len} {kind}s)")]
    IndexOutOfRange {
        kind: TrackKind,
        index: usize,
        len: usize,
    },

    #[error("cannot erase the last {0}")]
    LastTrack(TrackKind),

    #[error("invalid size '{0}': sizes must be positive integers, formulas or 'auto'")]
    InvalidLength(String),

    #[error("invalid formula `{formula}`: {source}")]
    InvalidFormula {
        formula: String,
        #[source]
        source: FormulaError,
    },

    #[error("{dimension} formula `{formula}`: {source}")]
    Formula {
        dimension: Dimension,
        formula: String,
        #[source]
        source: FormulaError,
    },

    #[error("{dimension} formula `{formula}` evaluated to {value}, sizes must be positive")]
    NonPositiveSize {
        dimension: Dimension,
        formula: String,
        value: i64,
    },

    #[error("grid size exceeds u32::MAX pixels")]
    SizeOverflow,

    #[error("cell {path} would start at ({x}, {y}), outside i32 coordinates")]
    PositionOverflow { path: String, x: i64, y: i64 },

    #[error("unknown widget type: {0}")]
    UnknownWidget(String),

    #[error("invalid layout config: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

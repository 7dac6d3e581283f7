//! Grid containers and their structural edits.
//!
//! Cells live in one flat row-major `Vec`. Every edit inserts or removes a
//! whole row or column slice, so `cells.len() == rows * columns` holds after
//! each call returns, including when the call fails.

use std::fmt;

use tracing::debug;

use super::cell::Cell;
use super::length::Length;
use crate::error::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Row,
    Column,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrackKind::Row => "row",
            TrackKind::Column => "column",
        })
    }
}

/// A row or column of a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Track {
    /// Share of the extra space beyond the intrinsic size. 0 = no share,
    /// unless every track on the axis is 0.
    pub grow_weight: u32,
}

impl Track {
    pub fn new(grow_weight: u32) -> Self {
        Self { grow_weight }
    }
}

/// Where to insert relative to an existing row/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// A rows x columns arrangement of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    rows: Vec<Track>,
    columns: Vec<Track>,
    cells: Vec<Cell>,
    pub width: Length,
    pub height: Length,
}

impl Container {
    /// A grid of default (auto-sized spacer) cells, all weights 0.
    pub fn new(rows: usize, columns: usize) -> Result<Self, LayoutError> {
        let cells = (0..rows * columns).map(|_| Cell::default()).collect();
        Self::from_cells(rows, columns, cells)
    }

    /// Build from row-major cells. Rejects empty grids and count mismatches.
    pub fn from_cells(rows: usize, columns: usize, cells: Vec<Cell>) -> Result<Self, LayoutError> {
        if rows == 0 || columns == 0 {
            return Err(LayoutError::EmptyGrid { rows, columns });
        }
        let expected = rows * columns;
        if cells.len() != expected {
            return Err(LayoutError::CellCountMismatch {
                rows,
                columns,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            rows: vec![Track::default(); rows],
            columns: vec![Track::default(); columns],
            cells,
            width: Length::Auto,
            height: Length::Auto,
        })
    }

    pub fn builder() -> GridBuilder {
        GridBuilder::default()
    }

    // =====================================================================
    // Read access
    // =====================================================================

    pub fn rows(&self) -> &[Track] {
        &self.rows
    }

    pub fn columns(&self) -> &[Track] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        let index = self.index(row, column).ok()?;
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        let index = self.index(row, column).ok()?;
        self.cells.get_mut(index)
    }

    /// Cells in row-major order with their `(row, column)`.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        let columns = self.columns.len();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / columns, i % columns), cell))
    }

    /// Depth-first search for a cell by id, descending into nested grids.
    pub fn find(&self, id: &str) -> Option<&Cell> {
        for cell in &self.cells {
            if cell.id.as_deref() == Some(id) {
                return Some(cell);
            }
            if let Some(found) = cell.child().and_then(|child| child.find(id)) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`Container::find`].
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Cell> {
        for cell in &mut self.cells {
            if cell.id.as_deref() == Some(id) {
                return Some(cell);
            }
            if let Some(found) = cell.child_mut().and_then(|child| child.find_mut(id)) {
                return Some(found);
            }
        }
        None
    }

    // =====================================================================
    // Structural edits
    // =====================================================================

    /// Insert a row of default cells next to `index`. Returns the new row's index.
    pub fn insert_row(&mut self, index: usize, side: Side) -> Result<usize, LayoutError> {
        self.check(TrackKind::Row, index)?;
        let at = match side {
            Side::Before => index,
            Side::After => index + 1,
        };
        let columns = self.columns.len();
        let start = at * columns;
        self.cells
            .splice(start..start, (0..columns).map(|_| Cell::default()));
        self.rows.insert(at, Track::default());
        debug!(row = at, rows = self.rows.len(), "inserted row");
        Ok(at)
    }

    /// Erase a row, returning its cells in column order.
    pub fn erase_row(&mut self, index: usize) -> Result<Vec<Cell>, LayoutError> {
        self.check(TrackKind::Row, index)?;
        if self.rows.len() == 1 {
            return Err(LayoutError::LastTrack(TrackKind::Row));
        }
        let columns = self.columns.len();
        let start = index * columns;
        let removed: Vec<Cell> = self.cells.drain(start..start + columns).collect();
        self.rows.remove(index);
        debug!(row = index, rows = self.rows.len(), "erased row");
        Ok(removed)
    }

    /// Insert a column of default cells next to `index`. Returns the new column's index.
    pub fn insert_column(&mut self, index: usize, side: Side) -> Result<usize, LayoutError> {
        self.check(TrackKind::Column, index)?;
        let at = match side {
            Side::Before => index,
            Side::After => index + 1,
        };
        let old_columns = self.columns.len();
        // Back to front so earlier insertions don't shift later positions.
        for row in (0..self.rows.len()).rev() {
            self.cells.insert(row * old_columns + at, Cell::default());
        }
        self.columns.insert(at, Track::default());
        debug!(column = at, columns = self.columns.len(), "inserted column");
        Ok(at)
    }

    /// Erase a column, returning its cells in row order.
    pub fn erase_column(&mut self, index: usize) -> Result<Vec<Cell>, LayoutError> {
        self.check(TrackKind::Column, index)?;
        if self.columns.len() == 1 {
            return Err(LayoutError::LastTrack(TrackKind::Column));
        }
        let columns = self.columns.len();
        let mut removed: Vec<Cell> = (0..self.rows.len())
            .rev()
            .map(|row| self.cells.remove(row * columns + index))
            .collect();
        removed.reverse();
        self.columns.remove(index);
        debug!(column = index, columns = self.columns.len(), "erased column");
        Ok(removed)
    }

    /// Replace the cell at `(row, column)`, returning the previous one.
    pub fn set_cell(&mut self, row: usize, column: usize, cell: Cell) -> Result<Cell, LayoutError> {
        let index = self.index(row, column)?;
        Ok(std::mem::replace(&mut self.cells[index], cell))
    }

    pub fn set_row_weight(&mut self, row: usize, grow_weight: u32) -> Result<(), LayoutError> {
        self.check(TrackKind::Row, row)?;
        self.rows[row].grow_weight = grow_weight;
        Ok(())
    }

    pub fn set_column_weight(&mut self, column: usize, grow_weight: u32) -> Result<(), LayoutError> {
        self.check(TrackKind::Column, column)?;
        self.columns[column].grow_weight = grow_weight;
        Ok(())
    }

    pub fn set_width(&mut self, width: Length) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: Length) {
        self.height = height;
    }

    fn index(&self, row: usize, column: usize) -> Result<usize, LayoutError> {
        self.check(TrackKind::Row, row)?;
        self.check(TrackKind::Column, column)?;
        Ok(row * self.columns.len() + column)
    }

    fn check(&self, kind: TrackKind, index: usize) -> Result<(), LayoutError> {
        let len = match kind {
            TrackKind::Row => self.rows.len(),
            TrackKind::Column => self.columns.len(),
        };
        if index < len {
            Ok(())
        } else {
            Err(LayoutError::IndexOutOfRange { kind, index, len })
        }
    }
}

// =========================================================================
// GridBuilder
// =========================================================================

/// Row-by-row grid construction, validated once in [`GridBuilder::build`].
#[derive(Debug, Default)]
pub struct GridBuilder {
    rows: Vec<(u32, Vec<Cell>)>,
    column_weights: Option<Vec<u32>>,
    width: Length,
    height: Length,
}

impl GridBuilder {
    pub fn row(mut self, grow_weight: u32, cells: Vec<Cell>) -> Self {
        self.rows.push((grow_weight, cells));
        self
    }

    /// Column weights; defaults to all 0 when not given.
    pub fn column_weights(mut self, weights: &[u32]) -> Self {
        self.column_weights = Some(weights.to_vec());
        self
    }

    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    pub fn build(self) -> Result<Container, LayoutError> {
        let row_count = self.rows.len();
        let column_count = self.rows.first().map_or(0, |(_, cells)| cells.len());
        if row_count == 0 || column_count == 0 {
            return Err(LayoutError::EmptyGrid {
                rows: row_count,
                columns: column_count,
            });
        }

        let mut rows = Vec::with_capacity(row_count);
        let mut cells = Vec::with_capacity(row_count * column_count);
        for (row, (grow_weight, row_cells)) in self.rows.into_iter().enumerate() {
            if row_cells.len() != column_count {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: column_count,
                    actual: row_cells.len(),
                });
            }
            rows.push(Track::new(grow_weight));
            cells.extend(row_cells);
        }

        let columns = match self.column_weights {
            Some(weights) if weights.len() != column_count => {
                return Err(LayoutError::WeightCountMismatch {
                    kind: TrackKind::Column,
                    expected: column_count,
                    actual: weights.len(),
                });
            }
            Some(weights) => weights.into_iter().map(Track::new).collect(),
            None => vec![Track::default(); column_count],
        };

        Ok(Container {
            rows,
            columns,
            cells,
            width: self.width,
            height: self.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::WidgetKind;

    fn labeled(id: &str) -> Cell {
        Cell::leaf(WidgetKind::Label).with_id(id)
    }

    /// 2x2 grid with ids "r{row}c{col}".
    fn grid_2x2() -> Container {
        Container::builder()
            .row(0, vec![labeled("r0c0"), labeled("r0c1")])
            .row(0, vec![labeled("r1c0"), labeled("r1c1")])
            .build()
            .unwrap()
    }

    fn id_at(grid: &Container, row: usize, column: usize) -> Option<&str> {
        grid.cell(row, column).and_then(|c| c.id.as_deref())
    }

    fn assert_invariant(grid: &Container) {
        assert_eq!(grid.cells().count(), grid.row_count() * grid.column_count());
    }

    #[test]
    fn test_empty_grids_rejected() {
        assert!(matches!(
            Container::new(0, 3),
            Err(LayoutError::EmptyGrid { rows: 0, columns: 3 })
        ));
        assert!(matches!(
            Container::new(2, 0),
            Err(LayoutError::EmptyGrid { .. })
        ));
        assert!(matches!(
            Container::builder().build(),
            Err(LayoutError::EmptyGrid { rows: 0, .. })
        ));
        assert!(matches!(
            Container::builder().row(0, vec![]).build(),
            Err(LayoutError::EmptyGrid { columns: 0, .. })
        ));
    }

    #[test]
    fn test_count_mismatches_rejected() {
        assert!(matches!(
            Container::from_cells(2, 2, vec![Cell::default(); 3]),
            Err(LayoutError::CellCountMismatch { expected: 4, actual: 3, .. })
        ));
        assert!(matches!(
            Container::builder()
                .row(0, vec![Cell::default(), Cell::default()])
                .row(0, vec![Cell::default()])
                .build(),
            Err(LayoutError::RaggedRow { row: 1, expected: 2, actual: 1 })
        ));
        assert!(matches!(
            Container::builder()
                .row(0, vec![Cell::default()])
                .column_weights(&[1, 2])
                .build(),
            Err(LayoutError::WeightCountMismatch { expected: 1, actual: 2, .. })
        ));
    }

    #[test]
    fn test_builder_weights() {
        let grid = Container::builder()
            .row(3, vec![Cell::default(), Cell::default()])
            .column_weights(&[2, 1])
            .build()
            .unwrap();
        assert_eq!(grid.rows(), &[Track::new(3)]);
        assert_eq!(grid.columns(), &[Track::new(2), Track::new(1)]);
    }

    #[test]
    fn test_insert_row_before_and_after() {
        let mut grid = grid_2x2();
        assert_eq!(grid.insert_row(0, Side::Before).unwrap(), 0);
        assert_eq!(grid.row_count(), 3);
        assert_invariant(&grid);
        assert_eq!(id_at(&grid, 0, 0), None);
        assert_eq!(id_at(&grid, 1, 1), Some("r0c1"));
        assert_eq!(id_at(&grid, 2, 0), Some("r1c0"));

        assert_eq!(grid.insert_row(2, Side::After).unwrap(), 3);
        assert_invariant(&grid);
        assert_eq!(id_at(&grid, 2, 1), Some("r1c1"));
        assert_eq!(id_at(&grid, 3, 1), None);
    }

    #[test]
    fn test_insert_column_keeps_identity() {
        let mut grid = grid_2x2();
        assert_eq!(grid.insert_column(0, Side::After).unwrap(), 1);
        assert_eq!(grid.column_count(), 3);
        assert_invariant(&grid);
        assert_eq!(id_at(&grid, 0, 0), Some("r0c0"));
        assert_eq!(id_at(&grid, 0, 1), None);
        assert_eq!(id_at(&grid, 0, 2), Some("r0c1"));
        assert_eq!(id_at(&grid, 1, 0), Some("r1c0"));
        assert_eq!(id_at(&grid, 1, 1), None);
        assert_eq!(id_at(&grid, 1, 2), Some("r1c1"));
    }

    #[test]
    fn test_erase_row_and_column() {
        let mut grid = grid_2x2();
        let removed = grid.erase_column(0).unwrap();
        let ids: Vec<_> = removed.iter().map(|c| c.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("r0c0"), Some("r1c0")]);
        assert_invariant(&grid);
        assert_eq!(id_at(&grid, 1, 0), Some("r1c1"));

        let removed = grid.erase_row(0).unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(id_at(&grid, 0, 0), Some("r1c1"));

        assert!(matches!(
            grid.erase_row(0),
            Err(LayoutError::LastTrack(TrackKind::Row))
        ));
        assert!(matches!(
            grid.erase_column(0),
            Err(LayoutError::LastTrack(TrackKind::Column))
        ));
        assert_invariant(&grid);
    }

    #[test]
    fn test_weights_follow_their_tracks() {
        let mut grid = grid_2x2();
        grid.set_column_weight(1, 5).unwrap();
        grid.insert_column(0, Side::Before).unwrap();
        assert_eq!(grid.columns()[2].grow_weight, 5);
        grid.erase_column(0).unwrap();
        assert_eq!(grid.columns()[1].grow_weight, 5);
    }

    #[test]
    fn test_out_of_range() {
        let mut grid = grid_2x2();
        assert!(matches!(
            grid.insert_row(2, Side::After),
            Err(LayoutError::IndexOutOfRange { kind: TrackKind::Row, index: 2, len: 2 })
        ));
        assert!(matches!(
            grid.set_cell(0, 5, Cell::default()),
            Err(LayoutError::IndexOutOfRange { kind: TrackKind::Column, .. })
        ));
        assert!(grid.set_row_weight(9, 1).is_err());
        assert!(grid.cell(2, 0).is_none());
        assert_invariant(&grid);
    }

    #[test]
    fn test_set_cell_returns_previous() {
        let mut grid = grid_2x2();
        let old = grid.set_cell(1, 0, labeled("new")).unwrap();
        assert_eq!(old.id.as_deref(), Some("r1c0"));
        assert_eq!(id_at(&grid, 1, 0), Some("new"));
    }

    #[test]
    fn test_find_descends_into_nested_grids() {
        let mut outer = Container::new(1, 2).unwrap();
        outer.set_cell(0, 1, Cell::grid(grid_2x2())).unwrap();
        assert_eq!(outer.find("r1c1").and_then(|c| c.kind()), Some(WidgetKind::Label));
        assert!(outer.find("missing").is_none());

        outer.find_mut("r0c0").unwrap().content = crate::layout::CellContent::Leaf(WidgetKind::Button);
        assert_eq!(outer.find("r0c0").and_then(|c| c.kind()), Some(WidgetKind::Button));
    }
}

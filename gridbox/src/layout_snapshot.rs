//! Layout Snapshot
//!
//! The `LayoutSnapshot` is the output of one placement pass: a rectangle for
//! every leaf widget reachable from the root grid, plus the rectangle each
//! nested grid was placed into. Rectangles are in the coordinate space of
//! the root's origin. The renderer consumes the leaves in order; editors
//! look them up by id or by cell path.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::layout::WidgetKind;
use crate::primitives::Rect;

/// `(row, column)` of a cell within its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellIndex {
    pub row: usize,
    pub column: usize,
}

/// Route from the root grid to a cell, one index per nesting level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CellPath(Vec<CellIndex>);

impl CellPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, row: usize, column: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(CellIndex { row, column });
        Self(indices)
    }

    pub fn indices(&self) -> &[CellIndex] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<&[(usize, usize)]> for CellPath {
    fn from(indices: &[(usize, usize)]) -> Self {
        Self(
            indices
                .iter()
                .map(|&(row, column)| CellIndex { row, column })
                .collect(),
        )
    }
}

impl fmt::Display for CellPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{},{}", index.row, index.column)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedLeaf {
    pub path: CellPath,
    pub id: Option<String>,
    pub kind: WidgetKind,
    pub rect: Rect,
}

/// Rectangle handed to a nested grid's placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedGrid {
    pub path: CellPath,
    pub id: Option<String>,
    pub rect: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutSnapshot {
    bounds: Rect,
    leaves: Vec<PlacedLeaf>,
    grids: Vec<PlacedGrid>,
    /// Extra-space pixels left unassigned by integer division, summed over
    /// every grid in the tree.
    dropped_width: u64,
    dropped_height: u64,
    #[serde(skip)]
    leaf_by_id: HashMap<String, usize>,
    #[serde(skip)]
    leaf_by_path: HashMap<CellPath, usize>,
    #[serde(skip)]
    grid_by_path: HashMap<CellPath, usize>,
}

impl LayoutSnapshot {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub(crate) fn push_leaf(&mut self, leaf: PlacedLeaf) {
        if let Some(id) = &leaf.id {
            // First leaf with a given id wins.
            self.leaf_by_id.entry(id.clone()).or_insert(self.leaves.len());
        }
        self.leaf_by_path.insert(leaf.path.clone(), self.leaves.len());
        self.leaves.push(leaf);
    }

    pub(crate) fn push_grid(&mut self, grid: PlacedGrid) {
        self.grid_by_path.insert(grid.path.clone(), self.grids.len());
        self.grids.push(grid);
    }

    pub(crate) fn add_dropped(&mut self, width: u32, height: u32) {
        self.dropped_width += width as u64;
        self.dropped_height += height as u64;
    }

    /// Rectangle the root grid was placed into.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Leaves in depth-first, row-major order.
    pub fn leaves(&self) -> &[PlacedLeaf] {
        &self.leaves
    }

    pub fn grids(&self) -> &[PlacedGrid] {
        &self.grids
    }

    pub fn get(&self, id: &str) -> Option<&PlacedLeaf> {
        self.leaf_by_id.get(id).map(|&i| &self.leaves[i])
    }

    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.get(id).map(|leaf| leaf.rect)
    }

    pub fn at(&self, path: &CellPath) -> Option<&PlacedLeaf> {
        self.leaf_by_path.get(path).map(|&i| &self.leaves[i])
    }

    pub fn grid_at(&self, path: &CellPath) -> Option<&PlacedGrid> {
        self.grid_by_path.get(path).map(|&i| &self.grids[i])
    }

    /// Total `(horizontal, vertical)` pixels dropped by the remainder policy.
    pub fn dropped(&self) -> (u64, u64) {
        (self.dropped_width, self.dropped_height)
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

//! Measurement pass: bottom-up intrinsic ("best") sizes.
//!
//! Row height is the tallest cell best height in the row, column width the
//! widest cell best width in the column, and a grid's intrinsic size is the
//! sum of both. The per-track results are kept in a [`MeasuredGrid`] tree so
//! placement reuses exactly the numbers computed here.

use gridbox_formula::Variables;
use tracing::{debug, trace};

use super::cell::{Cell, CellContent};
use super::container::Container;
use super::length::{Dimension, Length};
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::primitives::Size;

/// Measured track sizes of one grid plus its measured nested grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasuredGrid {
    pub column_widths: Vec<u32>,
    pub row_heights: Vec<u32>,
    /// One entry per cell, row-major; `Some` for extensible cells.
    pub children: Vec<Option<MeasuredGrid>>,
    size: Size,
}

impl MeasuredGrid {
    /// Intrinsic size: `(sum(column_widths), sum(row_heights))`.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Intrinsic size of `container`.
pub fn measure(
    container: &Container,
    vars: &Variables,
    config: &LayoutConfig,
) -> Result<Size, LayoutError> {
    let measured = measure_tree(container, vars, config)?;
    debug!(
        width = measured.size.width,
        height = measured.size.height,
        "measured grid"
    );
    Ok(measured.size)
}

/// Intrinsic size raised to the grid's own declared width/height, if any.
pub fn best_size(
    container: &Container,
    vars: &Variables,
    config: &LayoutConfig,
) -> Result<Size, LayoutError> {
    let measured = measure_tree(container, vars, config)?;
    declared_best(container, &measured, vars)
}

/// Best size of an already measured root grid.
pub fn declared_best(
    container: &Container,
    measured: &MeasuredGrid,
    vars: &Variables,
) -> Result<Size, LayoutError> {
    declared_or_content(&container.width, &container.height, measured.size, vars)
}

/// Measure `container` and every nested grid.
pub fn measure_tree(
    container: &Container,
    vars: &Variables,
    config: &LayoutConfig,
) -> Result<MeasuredGrid, LayoutError> {
    let mut column_widths = vec![0u32; container.column_count()];
    let mut row_heights = vec![0u32; container.row_count()];
    let mut children = Vec::with_capacity(container.row_count() * container.column_count());

    for ((row, column), cell) in container.cells() {
        let (best, child) = cell_best_size(cell, vars, config)?;
        trace!(row, column, width = best.width, height = best.height, "cell best size");
        row_heights[row] = row_heights[row].max(best.height);
        column_widths[column] = column_widths[column].max(best.width);
        children.push(child);
    }

    let size = Size::new(sum(&column_widths)?, sum(&row_heights)?);
    Ok(MeasuredGrid {
        column_widths,
        row_heights,
        children,
        size,
    })
}

/// Best size of one cell, plus the measured subtree for extensible cells.
fn cell_best_size(
    cell: &Cell,
    vars: &Variables,
    config: &LayoutConfig,
) -> Result<(Size, Option<MeasuredGrid>), LayoutError> {
    match &cell.content {
        CellContent::Leaf(_) => {
            let width = cell
                .width
                .resolve(Dimension::Width, vars)?
                .unwrap_or(config.default_leaf_size.width);
            let height = cell
                .height
                .resolve(Dimension::Height, vars)?
                .unwrap_or(config.default_leaf_size.height);
            Ok((Size::new(width, height), None))
        }
        CellContent::Grid(child) => {
            let measured = measure_tree(child, vars, config)?;
            // The cell's own declaration wins over the nested grid's.
            let width = if cell.width.is_auto() { &child.width } else { &cell.width };
            let height = if cell.height.is_auto() { &child.height } else { &cell.height };
            let best = declared_or_content(width, height, measured.size, vars)?;
            Ok((best, Some(measured)))
        }
    }
}

/// Declared size per axis, never below `content`.
fn declared_or_content(
    width: &Length,
    height: &Length,
    content: Size,
    vars: &Variables,
) -> Result<Size, LayoutError> {
    let declared = Size::new(
        width.resolve(Dimension::Width, vars)?.unwrap_or(0),
        height.resolve(Dimension::Height, vars)?.unwrap_or(0),
    );
    Ok(declared.max(content))
}

fn sum(tracks: &[u32]) -> Result<u32, LayoutError> {
    tracks
        .iter()
        .try_fold(0u32, |acc, &px| acc.checked_add(px))
        .ok_or(LayoutError::SizeOverflow)
}

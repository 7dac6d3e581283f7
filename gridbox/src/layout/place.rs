//! Placement pass: top-down rectangles.
//!
//! Each grid gets its measured track sizes, grows them by the extra space
//! (see [`super::flex`]), then walks its cells row-major handing every
//! leaf its rectangle and every nested grid its cell rectangle as the
//! available size. All formulas were evaluated during measurement, so this
//! walk only fails when a cell origin leaves the `i32` coordinate space;
//! handing a grid less than its intrinsic size is a caller bug and panics.

use gridbox_formula::Variables;
use tracing::{debug, trace};

use super::cell::{Cell, CellContent};
use super::container::Container;
use super::flex::distribute;
use super::measure::{MeasuredGrid, best_size, measure_tree};
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::layout_snapshot::{CellPath, LayoutSnapshot, PlacedGrid, PlacedLeaf};
use crate::primitives::{Point, Rect, Size};

/// Place `container` at `origin` into exactly `available`.
///
/// # Panics
///
/// If `available` is smaller than the container's intrinsic size on either
/// axis.
pub fn place(
    container: &Container,
    origin: Point,
    available: Size,
    vars: &Variables,
    config: &LayoutConfig,
) -> Result<LayoutSnapshot, LayoutError> {
    let measured = measure_tree(container, vars, config)?;
    place_measured(container, &measured, origin, available, config)
}

/// Place `container` into `minimum` or its best size, whichever is larger.
pub fn layout(
    container: &Container,
    origin: Point,
    minimum: Size,
    vars: &Variables,
    config: &LayoutConfig,
) -> Result<LayoutSnapshot, LayoutError> {
    let best = best_size(container, vars, config)?;
    place(container, origin, minimum.max(best), vars, config)
}

/// Placement over an already measured tree.
pub fn place_measured(
    container: &Container,
    measured: &MeasuredGrid,
    origin: Point,
    available: Size,
    config: &LayoutConfig,
) -> Result<LayoutSnapshot, LayoutError> {
    let mut snapshot = LayoutSnapshot::new(Rect::from_origin_size(origin, available));
    place_grid(
        container,
        measured,
        origin,
        available,
        config,
        &CellPath::root(),
        &mut snapshot,
    )?;

    let (dropped_width, dropped_height) = snapshot.dropped();
    debug!(
        leaves = snapshot.len(),
        grids = snapshot.grids().len(),
        width = available.width,
        height = available.height,
        dropped_width,
        dropped_height,
        "placed grid"
    );
    Ok(snapshot)
}

fn place_grid(
    container: &Container,
    measured: &MeasuredGrid,
    origin: Point,
    available: Size,
    config: &LayoutConfig,
    path: &CellPath,
    snapshot: &mut LayoutSnapshot,
) -> Result<(), LayoutError> {
    let intrinsic = measured.size();
    assert!(
        available.contains(intrinsic),
        "grid at {path} placed into {}x{}, smaller than its intrinsic size {}x{}",
        available.width,
        available.height,
        intrinsic.width,
        intrinsic.height,
    );

    let column_weights: Vec<u32> = container.columns().iter().map(|t| t.grow_weight).collect();
    let row_weights: Vec<u32> = container.rows().iter().map(|t| t.grow_weight).collect();

    let mut column_widths = measured.column_widths.clone();
    let mut row_heights = measured.row_heights.clone();
    let dropped_width = distribute(
        &mut column_widths,
        &column_weights,
        available.width - intrinsic.width,
        config.remainder,
    );
    let dropped_height = distribute(
        &mut row_heights,
        &row_weights,
        available.height - intrinsic.height,
        config.remainder,
    );
    snapshot.add_dropped(dropped_width, dropped_height);
    trace!(%path, ?column_widths, ?row_heights, "track sizes");

    // Cursor runs in i64: u32 tracks can push it past i32::MAX.
    let columns = container.column_count();
    let mut y = origin.y as i64;
    for (row, &height) in row_heights.iter().enumerate() {
        let mut x = origin.x as i64;
        for (column, &width) in column_widths.iter().enumerate() {
            let index = row * columns + column;
            let child_path = path.child(row, column);
            let (Ok(cell_x), Ok(cell_y)) = (i32::try_from(x), i32::try_from(y)) else {
                return Err(LayoutError::PositionOverflow {
                    path: child_path.to_string(),
                    x,
                    y,
                });
            };
            let rect = Rect::new(cell_x, cell_y, width, height);
            // Index is in range by the row-major invariant.
            if let Some(cell) = container.cell(row, column) {
                place_cell(
                    cell,
                    measured.children[index].as_ref(),
                    rect,
                    config,
                    child_path,
                    snapshot,
                )?;
            }
            x += width as i64;
        }
        y += height as i64;
    }
    Ok(())
}

fn place_cell(
    cell: &Cell,
    measured: Option<&MeasuredGrid>,
    rect: Rect,
    config: &LayoutConfig,
    path: CellPath,
    snapshot: &mut LayoutSnapshot,
) -> Result<(), LayoutError> {
    match (&cell.content, measured) {
        (CellContent::Leaf(kind), _) => {
            snapshot.push_leaf(PlacedLeaf {
                path,
                id: cell.id.clone(),
                kind: *kind,
                rect,
            });
            Ok(())
        }
        (CellContent::Grid(child), Some(measured)) => {
            snapshot.push_grid(PlacedGrid {
                path: path.clone(),
                id: cell.id.clone(),
                rect,
            });
            place_grid(
                child,
                measured,
                rect.origin(),
                rect.size(),
                config,
                &path,
                snapshot,
            )
        }
        (CellContent::Grid(_), None) => {
            unreachable!("measured tree does not match grid at {path}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemainderPolicy;
    use crate::layout::WidgetKind;

    fn leaf(id: &str, width: &str, height: &str) -> Cell {
        Cell::leaf(WidgetKind::Label)
            .with_id(id)
            .sized(width, height)
            .unwrap()
    }

    fn place_default(grid: &Container, available: Size) -> LayoutSnapshot {
        place(
            grid,
            Point::ORIGIN,
            available,
            &Variables::new(),
            &LayoutConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_weighted_columns() {
        let grid = Container::builder()
            .row(0, vec![leaf("a", "40", "10"), leaf("b", "30", "10")])
            .column_weights(&[2, 1])
            .build()
            .unwrap();
        let snapshot = place_default(&grid, Size::new(100, 10));
        assert_eq!(snapshot.rect("a"), Some(Rect::new(0, 0, 60, 10)));
        assert_eq!(snapshot.rect("b"), Some(Rect::new(60, 0, 40, 10)));
    }

    #[test]
    fn test_zero_weights_split_evenly() {
        let grid = Container::builder()
            .row(0, vec![leaf("a", "40", "10"), leaf("b", "30", "10")])
            .build()
            .unwrap();
        let snapshot = place_default(&grid, Size::new(100, 10));
        assert_eq!(snapshot.rect("a").map(|r| r.width), Some(55));
        assert_eq!(snapshot.rect("b"), Some(Rect::new(55, 0, 45, 10)));
    }

    #[test]
    fn test_cursor_wraps_rows() {
        let grid = Container::builder()
            .row(0, vec![leaf("a", "10", "5"), leaf("b", "20", "5")])
            .row(0, vec![leaf("c", "10", "7"), leaf("d", "20", "7")])
            .build()
            .unwrap();
        let snapshot = place(
            &grid,
            Point::new(100, 50),
            Size::new(30, 12),
            &Variables::new(),
            &LayoutConfig::default(),
        )
        .unwrap();
        let ids: Vec<_> = snapshot.leaves().iter().filter_map(|l| l.id.as_deref()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(snapshot.rect("c"), Some(Rect::new(100, 55, 10, 7)));
        assert_eq!(snapshot.rect("d"), Some(Rect::new(110, 55, 20, 7)));
        assert_eq!(snapshot.bounds(), Rect::new(100, 50, 30, 12));
    }

    #[test]
    fn test_nested_grid_offset_by_cell_origin() {
        let inner = Container::builder()
            .row(0, vec![leaf("x", "60", "50"), leaf("y", "40", "50")])
            .build()
            .unwrap();
        let outer = Container::builder()
            .row(0, vec![leaf("side", "20", "50"), Cell::grid(inner).with_id("body")])
            .column_weights(&[0, 1])
            .build()
            .unwrap();
        let snapshot = place_default(&outer, Size::new(170, 50));

        let body = snapshot.grid_at(&CellPath::root().child(0, 1)).unwrap();
        assert_eq!(body.rect, Rect::new(20, 0, 150, 50));
        assert_eq!(body.id.as_deref(), Some("body"));
        // inner extra 50 split evenly (weights all 0)
        assert_eq!(snapshot.rect("x"), Some(Rect::new(20, 0, 85, 50)));
        assert_eq!(snapshot.rect("y"), Some(Rect::new(105, 0, 65, 50)));
        assert_eq!(snapshot.get("y").map(|l| l.path.depth()), Some(2));
    }

    #[test]
    fn test_remainder_policies() {
        let grid = Container::builder()
            .row(0, vec![leaf("a", "10", "10"), leaf("b", "10", "10"), leaf("c", "10", "10")])
            .build()
            .unwrap();

        let snapshot = place_default(&grid, Size::new(40, 10));
        assert_eq!(snapshot.rect("c"), Some(Rect::new(26, 0, 13, 10)));
        assert_eq!(snapshot.dropped(), (1, 0));

        let config = LayoutConfig {
            remainder: RemainderPolicy::LargestWeight,
            ..LayoutConfig::default()
        };
        let snapshot = place(&grid, Point::ORIGIN, Size::new(40, 10), &Variables::new(), &config)
            .unwrap();
        assert_eq!(snapshot.rect("a"), Some(Rect::new(0, 0, 14, 10)));
        assert_eq!(snapshot.rect("c"), Some(Rect::new(27, 0, 13, 10)));
        assert_eq!(snapshot.dropped(), (0, 0));
    }

    #[test]
    fn test_layout_grows_to_best_size() {
        let grid = Container::builder()
            .row(0, vec![leaf("a", "40", "10")])
            .build()
            .unwrap();
        let snapshot = layout(
            &grid,
            Point::ORIGIN,
            Size::ZERO,
            &Variables::new(),
            &LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(snapshot.bounds().size(), Size::new(40, 10));
    }

    #[test]
    #[should_panic(expected = "smaller than its intrinsic size")]
    fn test_undersized_available_panics() {
        let grid = Container::builder()
            .row(0, vec![leaf("a", "40", "10")])
            .build()
            .unwrap();
        place_default(&grid, Size::new(39, 10));
    }

    #[test]
    fn test_position_past_i32_is_an_error() {
        let wide = |id| leaf(id, "1000000000", "10");
        let grid = Container::builder()
            .row(0, vec![wide("a"), wide("b"), wide("c"), wide("d")])
            .build()
            .unwrap();
        let vars = Variables::new();
        let config = LayoutConfig::default();
        let size = measure_tree(&grid, &vars, &config).unwrap().size();
        assert_eq!(size.width, 4_000_000_000);

        let err = place(&grid, Point::ORIGIN, size, &vars, &config).unwrap_err();
        // Third cell starts at 2e9, still inside i32; the fourth does not.
        assert!(matches!(
            err,
            LayoutError::PositionOverflow { ref path, x: 3_000_000_000, y: 0 } if path == "0,3"
        ));
    }

    #[test]
    fn test_far_origin_still_placed_when_cells_fit() {
        let grid = Container::builder()
            .row(0, vec![leaf("a", "1000000000", "10"), leaf("b", "1000000000", "10")])
            .build()
            .unwrap();
        let snapshot = place(
            &grid,
            Point::new(1_147_483_647, 0),
            Size::new(2_000_000_000, 10),
            &Variables::new(),
            &LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(snapshot.rect("b").map(|r| r.x), Some(i32::MAX));
        assert_eq!(snapshot.rect("b").map(|r| r.right()), Some(i32::MAX as i64 + 1_000_000_000));

        let err = place(
            &grid,
            Point::new(1_147_483_648, 0),
            Size::new(2_000_000_000, 10),
            &Variables::new(),
            &LayoutConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::PositionOverflow { .. }));
    }
}

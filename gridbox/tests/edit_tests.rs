//! Structural edit tests: the cell matrix stays rectangular and every cell
//! keeps its logical row/column through unrelated inserts and erases.

use gridbox::{
    Cell, Container, LayoutConfig, LayoutError, Side, Size, TrackKind, Variables, WidgetKind,
    WindowLayout,
};

/// Grid whose cells are labelled `"{row}{column}"` with letters, e.g. `"b2"`.
fn labelled(rows: usize, columns: usize) -> Container {
    let mut builder = Container::builder();
    for row in 0..rows {
        let cells = (0..columns)
            .map(|column| Cell::leaf(WidgetKind::Label).with_id(label(row, column)))
            .collect();
        builder = builder.row(0, cells);
    }
    builder.build().unwrap()
}

fn label(row: usize, column: usize) -> String {
    format!("{}{}", (b'a' + row as u8) as char, column)
}

/// Ids in row-major order, `None` for unlabelled (inserted) cells.
fn ids(grid: &Container) -> Vec<Vec<Option<String>>> {
    (0..grid.row_count())
        .map(|row| {
            (0..grid.column_count())
                .map(|column| grid.cell(row, column).and_then(|c| c.id.clone()))
                .collect()
        })
        .collect()
}

fn check_shape(grid: &Container) {
    assert_eq!(grid.cells().count(), grid.row_count() * grid.column_count());
    assert_eq!(grid.rows().len(), grid.row_count());
    assert_eq!(grid.columns().len(), grid.column_count());
}

#[test]
fn test_insert_row_keeps_identities() {
    let mut grid = labelled(2, 3);
    assert_eq!(grid.insert_row(0, Side::After).unwrap(), 1);
    check_shape(&grid);
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.cell(0, 2).unwrap().id.as_deref(), Some("a2"));
    assert!(grid.cell(1, 0).unwrap().id.is_none());
    assert_eq!(grid.cell(2, 1).unwrap().id.as_deref(), Some("b1"));

    assert_eq!(grid.insert_row(0, Side::Before).unwrap(), 0);
    assert_eq!(grid.cell(1, 0).unwrap().id.as_deref(), Some("a0"));
}

#[test]
fn test_insert_column_keeps_identities() {
    let mut grid = labelled(3, 2);
    assert_eq!(grid.insert_column(1, Side::Before).unwrap(), 1);
    check_shape(&grid);
    assert_eq!(
        ids(&grid),
        vec![
            vec![Some("a0".into()), None, Some("a1".into())],
            vec![Some("b0".into()), None, Some("b1".into())],
            vec![Some("c0".into()), None, Some("c1".into())],
        ]
    );
}

#[test]
fn test_erase_returns_removed_slice() {
    let mut grid = labelled(3, 3);
    let removed = grid.erase_column(1).unwrap();
    let removed: Vec<_> = removed.iter().filter_map(|c| c.id.as_deref()).collect();
    assert_eq!(removed, vec!["a1", "b1", "c1"]);

    let removed = grid.erase_row(0).unwrap();
    let removed: Vec<_> = removed.iter().filter_map(|c| c.id.as_deref()).collect();
    assert_eq!(removed, vec!["a0", "a2"]);

    check_shape(&grid);
    assert_eq!(grid.cell(1, 1).unwrap().id.as_deref(), Some("c2"));
}

#[test]
fn test_last_track_and_bounds_rejected() {
    let mut grid = labelled(1, 2);
    assert!(matches!(grid.erase_row(0), Err(LayoutError::LastTrack(TrackKind::Row))));
    assert!(matches!(
        grid.insert_column(2, Side::After),
        Err(LayoutError::IndexOutOfRange { kind: TrackKind::Column, index: 2, len: 2 })
    ));
    grid.erase_column(0).unwrap();
    assert!(matches!(grid.erase_column(0), Err(LayoutError::LastTrack(TrackKind::Column))));
    assert!(grid.set_cell(0, 1, Cell::default()).is_err());
    check_shape(&grid);
}

#[test]
fn test_edit_sequence_preserves_row_major_invariant() {
    let mut grid = labelled(3, 4);
    let original = ids(&grid);

    grid.insert_row(1, Side::After).unwrap();
    grid.insert_column(0, Side::Before).unwrap();
    grid.insert_column(4, Side::After).unwrap();
    grid.erase_row(2).unwrap();
    grid.insert_row(0, Side::Before).unwrap();
    grid.erase_column(0).unwrap();
    grid.erase_column(4).unwrap();
    grid.erase_row(0).unwrap();
    check_shape(&grid);

    // Every inserted slice was erased again.
    assert_eq!(ids(&grid), original);

    // Each labelled cell still sits at the row/column its label names.
    for ((row, column), cell) in grid.cells() {
        assert_eq!(cell.id.as_deref(), Some(label(row, column).as_str()));
    }
}

#[test]
fn test_set_cell_replaces_in_place() {
    let mut grid = labelled(2, 2);
    let inner = Container::builder()
        .row(0, vec![Cell::leaf(WidgetKind::Button).with_id("inner")])
        .build()
        .unwrap();
    let old = grid.set_cell(1, 0, Cell::grid(inner).with_id("nested")).unwrap();
    assert_eq!(old.id.as_deref(), Some("b0"));
    assert!(grid.cell(1, 0).unwrap().is_extensible());
    assert!(grid.find("nested").is_some());
    // Ids inside nested grids are reachable too.
    assert_eq!(grid.find("inner").and_then(|c| c.kind()), Some(WidgetKind::Button));
    check_shape(&grid);
}

#[test]
fn test_window_relayout_after_edits() {
    let mut window =
        WindowLayout::new(labelled(2, 2), Variables::screen(640, 480), LayoutConfig::default())
            .unwrap();
    assert_eq!(window.best_size().unwrap(), Size::new(100, 40));

    window.edit(|grid| grid.insert_row(1, Side::After)).unwrap();
    window.edit(|grid| grid.set_row_weight(2, 1)).unwrap();
    let snapshot = window.layout(Size::new(100, 100)).unwrap();
    assert_eq!(snapshot.len(), 6);
    // Only the weighted row grows.
    assert_eq!(snapshot.rect("a0").map(|r| r.height), Some(20));
    assert_eq!(snapshot.at(&gridbox::CellPath::root().child(2, 0)).map(|l| l.rect.height), Some(60));
    assert_eq!(window.pass_counts(), (2, 1));
}

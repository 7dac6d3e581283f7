//! Grid Layout System
//!
//! A dialog is a tree of grids. Each grid arranges cells in rows and
//! columns; a cell is either a leaf widget or owns a nested grid. Layout
//! runs in two passes over the tree:
//!
//! ```text
//! measure (bottom-up, intrinsic sizes) -> place (top-down, rectangles)
//! ```
//!
//! Placement reuses the measured tree, so both passes agree on every track
//! size. Extra space beyond the intrinsic size is handed out by growth weight.

pub mod cell;
pub mod container;
pub mod flex;
pub mod length;
pub mod measure;
pub mod place;

pub use cell::{Cell, CellContent, WidgetKind};
pub use container::{Container, GridBuilder, Side, Track, TrackKind};
pub use length::{Dimension, Length};
pub use measure::{MeasuredGrid, best_size, declared_best, measure, measure_tree};
pub use place::{layout, place, place_measured};

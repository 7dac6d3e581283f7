//! Gridbox: formula-driven grid layout for dialog widgets
//!
//! Gridbox sizes and positions the widgets of a dialog:
//! - Nested grids of cells, each cell a leaf widget or another grid
//! - Declared sizes as fixed pixels, `auto`, or formulas over variables
//! - Extra space handed out to rows and columns by growth weight
//! - Structural edits (insert/erase rows and columns) that keep the grid rectangular
//!
//! # Usage
//!
//! ```ignore
//! use gridbox::{Cell, Container, LayoutConfig, Size, Variables, WidgetKind, WindowLayout};
//!
//! let root = Container::builder()
//!     .row(0, vec![Cell::leaf(WidgetKind::Button).with_id("ok").sized("80", "auto")?])
//!     .build()?;
//! let mut window = WindowLayout::new(root, Variables::screen(800, 600), LayoutConfig::default())?;
//! let snapshot = window.layout(Size::new(300, 200))?;
//! println!("{:?}", snapshot.rect("ok"));
//! ```

// Core primitives
pub mod primitives;
pub mod layout_snapshot;

// Grid layout
pub mod layout;

// Window driver with cached layout
pub mod window;

pub mod config;
pub mod error;

pub use config::{DEFAULT_LEAF_SIZE, LayoutConfig, RemainderPolicy};
pub use error::LayoutError;
pub use layout::{
    Cell, CellContent, Container, Dimension, GridBuilder, Length, MeasuredGrid, Side, Track,
    TrackKind, WidgetKind, best_size, layout, measure, place,
};
pub use layout_snapshot::{CellIndex, CellPath, LayoutSnapshot, PlacedGrid, PlacedLeaf};
pub use primitives::{Point, Rect, Size};
pub use window::WindowLayout;

pub use gridbox_formula::{Formula, FormulaError, Variables};

//! Cells: the slots of a grid.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::container::Container;
use super::length::Length;
use crate::error::LayoutError;

/// Leaf widget types.
///
/// The layout passes only care whether a cell is a leaf or holds a nested
/// grid; the kind is carried through to the snapshot for the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Empty filler.
    #[default]
    Spacer,
    Label,
    Button,
    Image,
    TextBox,
    Toggle,
    Slider,
    Listbox,
    Panel,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 9] = [
        WidgetKind::Spacer,
        WidgetKind::Label,
        WidgetKind::Button,
        WidgetKind::Image,
        WidgetKind::TextBox,
        WidgetKind::Toggle,
        WidgetKind::Slider,
        WidgetKind::Listbox,
        WidgetKind::Panel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Spacer => "spacer",
            WidgetKind::Label => "label",
            WidgetKind::Button => "button",
            WidgetKind::Image => "image",
            WidgetKind::TextBox => "text_box",
            WidgetKind::Toggle => "toggle",
            WidgetKind::Slider => "slider",
            WidgetKind::Listbox => "listbox",
            WidgetKind::Panel => "panel",
        }
    }
}

impl FromStr for WidgetKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| LayoutError::UnknownWidget(s.to_string()))
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Leaf(WidgetKind),
    /// Extensible cell owning a nested grid.
    Grid(Box<Container>),
}

/// One slot of a grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub id: Option<String>,
    pub width: Length,
    pub height: Length,
    pub content: CellContent,
}

impl Default for CellContent {
    fn default() -> Self {
        CellContent::Leaf(WidgetKind::Spacer)
    }
}

impl Cell {
    pub fn leaf(kind: WidgetKind) -> Self {
        Self {
            content: CellContent::Leaf(kind),
            ..Self::default()
        }
    }

    pub fn grid(child: Container) -> Self {
        Self {
            content: CellContent::Grid(Box::new(child)),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// Parse and set both declared sizes.
    pub fn sized(self, width: &str, height: &str) -> Result<Self, LayoutError> {
        Ok(self
            .with_width(Length::parse(width)?)
            .with_height(Length::parse(height)?))
    }

    pub fn is_extensible(&self) -> bool {
        matches!(self.content, CellContent::Grid(_))
    }

    pub fn kind(&self) -> Option<WidgetKind> {
        match self.content {
            CellContent::Leaf(kind) => Some(kind),
            CellContent::Grid(_) => None,
        }
    }

    pub fn child(&self) -> Option<&Container> {
        match &self.content {
            CellContent::Grid(child) => Some(child),
            CellContent::Leaf(_) => None,
        }
    }

    pub fn child_mut(&mut self) -> Option<&mut Container> {
        match &mut self.content {
            CellContent::Grid(child) => Some(child),
            CellContent::Leaf(_) => None,
        }
    }
}

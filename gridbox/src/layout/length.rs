//! Declared sizes.
//!
//! A cell or grid declares its width and height independently: either
//! nothing (size from content), a fixed pixel count, or a formula that is
//! evaluated against the layout variables on every pass.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use gridbox_formula::{Formula, Variables};

use crate::error::LayoutError;

/// The axis a declared size applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
        })
    }
}

/// Sizing mode for one axis of a cell or grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Length {
    /// Compute from content.
    #[default]
    Auto,
    /// Fixed pixel size.
    Fixed(NonZeroU32),
    /// Evaluated against the layout variables.
    Formula(Formula),
}

impl Length {
    /// Parse a declared size: `""`/`"auto"`, a positive integer, or a formula.
    pub fn parse(source: &str) -> Result<Self, LayoutError> {
        let trimmed = source.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed
                .parse::<u32>()
                .ok()
                .and_then(NonZeroU32::new)
                .map(Length::Fixed)
                .ok_or_else(|| LayoutError::InvalidLength(source.to_string()));
        }
        Formula::parse(trimmed)
            .map(Length::Formula)
            .map_err(|source| LayoutError::InvalidFormula {
                formula: trimmed.to_string(),
                source,
            })
    }

    /// Fixed size; zero is rejected.
    pub fn fixed(px: u32) -> Result<Self, LayoutError> {
        NonZeroU32::new(px)
            .map(Length::Fixed)
            .ok_or_else(|| LayoutError::InvalidLength(px.to_string()))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    /// The declared size in pixels, or `None` for `Auto`.
    ///
    /// Formula results must be in `1..=u32::MAX`.
    pub fn resolve(&self, dimension: Dimension, vars: &Variables) -> Result<Option<u32>, LayoutError> {
        match self {
            Length::Auto => Ok(None),
            Length::Fixed(px) => Ok(Some(px.get())),
            Length::Formula(formula) => {
                let value = formula.eval(vars).map_err(|source| LayoutError::Formula {
                    dimension,
                    formula: formula.source().to_string(),
                    source,
                })?;
                match u32::try_from(value) {
                    Ok(px) if px > 0 => Ok(Some(px)),
                    _ => Err(LayoutError::NonPositiveSize {
                        dimension,
                        formula: formula.source().to_string(),
                        value,
                    }),
                }
            }
        }
    }
}

impl FromStr for Length {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Length::parse(s)
    }
}

impl From<NonZeroU32> for Length {
    fn from(px: NonZeroU32) -> Self {
        Length::Fixed(px)
    }
}

impl From<Formula> for Length {
    fn from(formula: Formula) -> Self {
        Length::Formula(formula)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Auto => f.write_str("auto"),
            Length::Fixed(px) => write!(f, "{px}"),
            Length::Formula(formula) => write!(f, "{formula}"),
        }
    }
}

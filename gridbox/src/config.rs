//! Layout engine configuration.

use serde::Deserialize;

use crate::error::LayoutError;
use crate::primitives::Size;

/// Best size of an auto-sized leaf widget.
pub const DEFAULT_LEAF_SIZE: Size = Size::new(50, 20);

/// What to do with the pixels left over when extra space does not divide
/// evenly by the total growth weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Leave the remainder unassigned (trailing gap of up to `weight - 1` pixels).
    #[default]
    Drop,
    /// Give the whole remainder to the first track with the largest weight.
    LargestWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub default_leaf_size: Size,
    pub remainder: RemainderPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_leaf_size: DEFAULT_LEAF_SIZE,
            remainder: RemainderPolicy::Drop,
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.default_leaf_size.width == 0 || self.default_leaf_size.height == 0 {
            return Err(LayoutError::Config(format!(
                "default_leaf_size must be non-zero, got {}x{}",
                self.default_leaf_size.width, self.default_leaf_size.height
            )));
        }
        Ok(())
    }
}

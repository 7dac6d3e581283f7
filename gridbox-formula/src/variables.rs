//! Named integer variables that formulas are evaluated against.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const SCREEN_WIDTH: &str = "screen_width";
pub const SCREEN_HEIGHT: &str = "screen_height";

/// Evaluation context: variable name to integer value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    values: IndexMap<String, i64>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a screen of the given size.
    ///
    /// Besides `screen_width`/`screen_height` this defines the resolution
    /// flags `vga` (at least 640x480) and `svga` (at least 800x600) as 1/0.
    pub fn screen(width: i64, height: i64) -> Self {
        Self::new()
            .with(SCREEN_WIDTH, width)
            .with(SCREEN_HEIGHT, height)
            .with("vga", (width >= 640 && height >= 480) as i64)
            .with("svga", (width >= 800 && height >= 600) as i64)
    }

    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.set(name, value);
        self
    }

    /// Set a variable, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: i64) -> Option<i64> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn remove(&mut self, name: &str) -> Option<i64> {
        self.values.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_flags() {
        let vars = Variables::screen(1024, 768);
        assert_eq!(vars.get(SCREEN_WIDTH), Some(1024));
        assert_eq!(vars.get("vga"), Some(1));
        assert_eq!(vars.get("svga"), Some(1));

        let small = Variables::screen(640, 480);
        assert_eq!(small.get("vga"), Some(1));
        assert_eq!(small.get("svga"), Some(0));
    }

    #[test]
    fn test_set_returns_previous() {
        let mut vars = Variables::new();
        assert_eq!(vars.set("x", 1), None);
        assert_eq!(vars.set("x", 2), Some(1));
        assert_eq!(vars.get("x"), Some(2));
        assert_eq!(vars.remove("x"), Some(2));
        assert!(vars.is_empty());
    }

    #[test]
    fn test_json_is_a_plain_object() {
        let vars: Variables = serde_json::from_str(r#"{"screen_width": 800, "ref_width": 1024}"#).unwrap();
        assert_eq!(vars.get("ref_width"), Some(1024));
        assert_eq!(vars.iter().next(), Some(("screen_width", 800)));
        assert_eq!(
            serde_json::to_string(&vars).unwrap(),
            r#"{"screen_width":800,"ref_width":1024}"#
        );
    }
}

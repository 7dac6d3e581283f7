//! Window layout driver.
//!
//! Owns a root grid plus its variables and config, and recomputes layout
//! lazily: structural edits and variable changes only mark the layout
//! dirty, the next `best_size()`/`layout()` call measures again. A layout
//! request for the same size as last time returns the cached snapshot.
//!
//! All edits and layout calls go through `&mut self`, so a tree is never
//! mutated while one of its passes is running.

use gridbox_formula::Variables;
use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::layout::{Container, MeasuredGrid, declared_best, measure_tree, place_measured};
use crate::layout_snapshot::LayoutSnapshot;
use crate::primitives::{Point, Rect, Size};

/// Measurement and last placement, valid until the next edit.
#[derive(Debug)]
struct CachedLayout {
    measured: MeasuredGrid,
    best: Size,
    snapshot: Option<LayoutSnapshot>,
}

#[derive(Debug)]
pub struct WindowLayout {
    root: Container,
    variables: Variables,
    config: LayoutConfig,
    origin: Point,
    cache: Option<CachedLayout>,
    /// Number of measurement passes run (debugging aid).
    measurements: u64,
    /// Number of placement passes run (debugging aid).
    placements: u64,
}

impl WindowLayout {
    pub fn new(root: Container, variables: Variables, config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self {
            root,
            variables,
            config,
            origin: Point::ORIGIN,
            cache: None,
            measurements: 0,
            placements: 0,
        })
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Whether the next layout call has to measure again.
    pub fn is_dirty(&self) -> bool {
        self.cache.is_none()
    }

    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            debug!("layout invalidated");
        }
    }

    /// Apply a structural edit to the root grid. Always marks the layout dirty.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Container) -> R) -> R {
        self.invalidate();
        f(&mut self.root)
    }

    /// Set one variable; marks the layout dirty only if the value changed.
    pub fn set_variable(&mut self, name: impl Into<String>, value: i64) {
        if self.variables.set(name, value) != Some(value) {
            self.invalidate();
        }
    }

    pub fn set_variables(&mut self, variables: Variables) {
        if self.variables != variables {
            self.variables = variables;
            self.invalidate();
        }
    }

    pub fn set_config(&mut self, config: LayoutConfig) -> Result<(), LayoutError> {
        config.validate()?;
        if self.config != config {
            self.config = config;
            self.invalidate();
        }
        Ok(())
    }

    /// Moving the window keeps the measurement but not the placement.
    pub fn set_origin(&mut self, origin: Point) {
        if self.origin != origin {
            self.origin = origin;
            if let Some(cache) = &mut self.cache {
                cache.snapshot = None;
            }
        }
    }

    /// Best size of the root grid (intrinsic size raised to its declared size).
    pub fn best_size(&mut self) -> Result<Size, LayoutError> {
        let cache = ensure_measured(
            &mut self.cache,
            &mut self.measurements,
            &self.root,
            &self.variables,
            &self.config,
        )?;
        Ok(cache.best)
    }

    /// Lay the window out into `available`.
    ///
    /// A size smaller than the best size is raised to it: a window can't be
    /// shrunk below what its content needs.
    pub fn layout(&mut self, available: Size) -> Result<&LayoutSnapshot, LayoutError> {
        let cache = ensure_measured(
            &mut self.cache,
            &mut self.measurements,
            &self.root,
            &self.variables,
            &self.config,
        )?;

        let size = if available.contains(cache.best) {
            available
        } else {
            warn!(
                requested_width = available.width,
                requested_height = available.height,
                best_width = cache.best.width,
                best_height = cache.best.height,
                "window smaller than its best size, growing it"
            );
            available.max(cache.best)
        };

        let bounds = Rect::from_origin_size(self.origin, size);
        let snapshot = match cache.snapshot.take() {
            Some(snapshot) if snapshot.bounds() == bounds => snapshot,
            _ => {
                self.placements += 1;
                place_measured(&self.root, &cache.measured, self.origin, size, &self.config)?
            }
        };
        Ok(cache.snapshot.insert(snapshot))
    }

    /// `(measurement passes, placement passes)` run so far.
    pub fn pass_counts(&self) -> (u64, u64) {
        (self.measurements, self.placements)
    }

    pub fn into_root(self) -> Container {
        self.root
    }
}

fn ensure_measured<'a>(
    cache: &'a mut Option<CachedLayout>,
    measurements: &mut u64,
    root: &Container,
    variables: &Variables,
    config: &LayoutConfig,
) -> Result<&'a mut CachedLayout, LayoutError> {
    let cached = match cache.take() {
        Some(cached) => cached,
        None => {
            *measurements += 1;
            let measured = measure_tree(root, variables, config)?;
            let best = declared_best(root, &measured, variables)?;
            debug!(width = best.width, height = best.height, "window measured");
            CachedLayout {
                measured,
                best,
                snapshot: None,
            }
        }
    };
    Ok(cache.insert(cached))
}

//! Polygon rasterization for debug renderings.
//!
//! - [`scan`] – scanline conversion of multi-sheet polygons into pixel spans.
//! - [`stamp`] – thick polylines and dots built on top of the scan converter.

pub mod scan;
pub mod stamp;

pub use scan::{FillRule, ScanFill, Span};
pub use stamp::{dot_polygon, expand_polyline, fill_polygon, stamp_dot, stamp_polyline};

use crate::scene::RegionBoundary;

/// Polygon made of closed sheets; the closing edge of each sheet is implied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub sheets: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    pub fn new(sheets: Vec<Vec<[f64; 2]>>) -> Self {
        Self { sheets }
    }

    pub fn single(sheet: Vec<[f64; 2]>) -> Self {
        Self {
            sheets: vec![sheet],
        }
    }

    pub fn push_sheet(&mut self, sheet: Vec<[f64; 2]>) {
        self.sheets.push(sheet);
    }

    pub fn n_vertices(&self) -> usize {
        self.sheets.iter().map(Vec::len).sum()
    }

    /// Vertical extent `(min_y, max_y)` over all vertices.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let mut it = self.sheets.iter().flatten();
        let first = it.next()?;
        Some(it.fold((first[1], first[1]), |(lo, hi), p| {
            (lo.min(p[1]), hi.max(p[1]))
        }))
    }
}

impl From<&RegionBoundary> for Polygon {
    fn from(b: &RegionBoundary) -> Self {
        Self::new(b.sheets().to_vec())
    }
}

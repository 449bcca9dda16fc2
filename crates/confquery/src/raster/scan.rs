//! Scanline polygon conversion.
//!
//! Every integer row is sampled at the pixel center. Edges are treated as
//! half-open in `y` (`y0 <= y < y1`), so shared vertices are counted once.
//! Vertices are real-valued; spans are converted to pixels either by
//! pixel-center containment or, with boundary inclusion, by any overlap of
//! the pixel footprint `[i - 0.5, i + 0.5]` with the interior.

use super::Polygon;

/// Rule deciding which crossings bound the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Inside when crossed an odd number of times.
    #[default]
    EvenOdd,
    /// Inside when the signed crossing count is non-zero.
    NonZero,
}

/// Inclusive run of pixels `x_start..=x_end` on row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y: i64,
    pub x_start: i64,
    pub x_end: i64,
}

impl Span {
    pub fn len(&self) -> usize {
        (self.x_end - self.x_start + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.x_end < self.x_start
    }
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    winding: i32,
}

impl Edge {
    fn new(a: [f64; 2], b: [f64; 2]) -> Option<Self> {
        if a[1] == b[1] || !(a[0].is_finite() && a[1].is_finite() && b[0].is_finite() && b[1].is_finite()) {
            return None;
        }
        Some(if a[1] < b[1] {
            Self {
                x0: a[0],
                y0: a[1],
                x1: b[0],
                y1: b[1],
                winding: 1,
            }
        } else {
            Self {
                x0: b[0],
                y0: b[1],
                x1: a[0],
                y1: a[1],
                winding: -1,
            }
        })
    }

    fn crossing(&self, y: f64) -> Option<f64> {
        if self.y0 <= y && y < self.y1 {
            Some(self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0))
        } else {
            None
        }
    }
}

// Keeps boundary-mode samples strictly inside the polygon's y-extent.
const ROW_EPS: f64 = 1e-7;

/// Scanline converter over a [`Polygon`].
#[derive(Debug, Clone)]
pub struct ScanFill<'a> {
    polygon: &'a Polygon,
    rule: FillRule,
    include_boundary: bool,
    clip: Option<[u32; 2]>,
}

impl<'a> ScanFill<'a> {
    pub fn new(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            rule: FillRule::default(),
            include_boundary: false,
            clip: None,
        }
    }

    pub fn with_rule(mut self, rule: FillRule) -> Self {
        self.rule = rule;
        self
    }

    /// Also emit pixels whose footprint only partly overlaps the interior.
    pub fn with_boundary(mut self, include_boundary: bool) -> Self {
        self.include_boundary = include_boundary;
        self
    }

    /// Restrict output to `[0, width) x [0, height)`.
    pub fn clip_to(mut self, width: u32, height: u32) -> Self {
        self.clip = Some([width, height]);
        self
    }

    /// All spans, row by row, left to right.
    pub fn spans(&self) -> Vec<Span> {
        let mut out = Vec::new();
        let Some((y_min, y_max)) = self.polygon.y_range() else {
            return out;
        };
        let edges = self.edges();
        if edges.is_empty() {
            return out;
        }

        let (mut row_lo, mut row_hi) = if self.include_boundary {
            if y_max - y_min <= 2.0 * ROW_EPS {
                return out;
            }
            ((y_min - 0.5).ceil() as i64, (y_max + 0.5).floor() as i64)
        } else {
            (y_min.ceil() as i64, y_max.floor() as i64)
        };
        let mut col_range = None;
        if let Some([w, h]) = self.clip {
            if w == 0 || h == 0 {
                return out;
            }
            row_lo = row_lo.max(0);
            row_hi = row_hi.min(h as i64 - 1);
            col_range = Some((0i64, w as i64 - 1));
        }

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for row in row_lo..=row_hi {
            let y = if self.include_boundary {
                (row as f64).clamp(y_min + ROW_EPS, y_max - ROW_EPS)
            } else {
                row as f64
            };
            crossings.clear();
            crossings.extend(
                edges
                    .iter()
                    .filter_map(|e| e.crossing(y).map(|x| (x, e.winding))),
            );
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            for (xl, xr) in interior_intervals(&crossings, self.rule) {
                let (mut xs, mut xe) = if self.include_boundary {
                    ((xl - 0.5).ceil() as i64, (xr + 0.5).floor() as i64)
                } else {
                    (xl.ceil() as i64, xr.floor() as i64)
                };
                if let Some((lo, hi)) = col_range {
                    xs = xs.max(lo);
                    xe = xe.min(hi);
                }
                let span = Span {
                    y: row,
                    x_start: xs,
                    x_end: xe,
                };
                if !span.is_empty() {
                    out.push(span);
                }
            }
        }
        out
    }

    /// Call `f(x, y)` once per covered pixel.
    ///
    /// Overlapping intervals on a row (possible with self-intersecting
    /// sheets) may visit a pixel more than once.
    pub fn for_each_pixel(&self, mut f: impl FnMut(i64, i64)) {
        for span in self.spans() {
            for x in span.x_start..=span.x_end {
                f(x, span.y);
            }
        }
    }

    fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.polygon.n_vertices());
        for sheet in &self.polygon.sheets {
            if sheet.len() < 2 {
                continue;
            }
            for (i, &a) in sheet.iter().enumerate() {
                let b = sheet[(i + 1) % sheet.len()];
                edges.extend(Edge::new(a, b));
            }
        }
        edges
    }
}

fn interior_intervals(crossings: &[(f64, i32)], rule: FillRule) -> Vec<(f64, f64)> {
    match rule {
        FillRule::EvenOdd => crossings
            .chunks_exact(2)
            .map(|pair| (pair[0].0, pair[1].0))
            .collect(),
        FillRule::NonZero => {
            let mut out = Vec::new();
            let mut winding = 0;
            let mut start = 0.0;
            for &(x, w) in crossings {
                let prev = winding;
                winding += w;
                if prev == 0 && winding != 0 {
                    start = x;
                } else if prev != 0 && winding == 0 {
                    out.push((start, x));
                }
            }
            out
        }
    }
}

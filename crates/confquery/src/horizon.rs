//! Image-space horizon line `a x + b y + c = 0`.

use serde::{Deserialize, Serialize};

/// Homogeneous image line separating sky from ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonLine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl HorizonLine {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Row of the line at column `x`.
    ///
    /// A line with `b == 0` puts no constraint on rows and evaluates to 0.
    pub fn evaluate(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            -self.a / self.b * x - self.c / self.b
        }
    }

    /// `true` when the line has no vertical coefficient.
    pub fn is_degenerate(&self) -> bool {
        self.b == 0.0
    }

    /// `true` when the image point lies strictly above the line (sky side).
    pub fn is_above(&self, pixel_xy: [f64; 2]) -> bool {
        pixel_xy[1] < self.evaluate(pixel_xy[0])
    }
}

impl std::fmt::Display for HorizonLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{:.6} x + {:.6} y + {:.6} = 0>", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn evaluation_is_affine() {
        let l = HorizonLine::new(0.2, -1.5, 300.0);
        let (x1, x2, x3) = (-40.0, 10.0, 515.0);
        let slope = (l.evaluate(x2) - l.evaluate(x1)) / (x2 - x1);
        assert_relative_eq!(slope, -0.2 / -1.5, epsilon = 1e-12);
        assert_relative_eq!(
            l.evaluate(x3),
            l.evaluate(x1) + slope * (x3 - x1),
            epsilon = 1e-9
        );
        // points returned by evaluate lie on the line
        let y = l.evaluate(x3);
        assert_relative_eq!(l.a * x3 + l.b * y + l.c, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_b_evaluates_to_zero_everywhere() {
        let l = HorizonLine::new(3.0, 0.0, -7.0);
        for x in [-1.0e6, -3.0, 0.0, 42.5, 9.9e9] {
            assert_eq!(l.evaluate(x), 0.0);
        }
    }

    #[test]
    fn above_is_strict() {
        let l = HorizonLine::new(0.0, 1.0, -100.0);
        assert!(l.is_above([5.0, 99.9]));
        assert!(!l.is_above([5.0, 100.0]));
        assert!(!l.is_above([5.0, 250.0]));
    }
}

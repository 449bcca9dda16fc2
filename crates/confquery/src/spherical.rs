//! Cartesian to spherical conversion about the origin.

use nalgebra::Vector3;

/// Spherical coordinates: `theta` is the polar angle from `+z` in `[0, π]`,
/// `phi` the azimuth from `+x` toward `+y` in `(-π, π]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalPoint {
    pub radius: f64,
    pub theta: f64,
    pub phi: f64,
}

impl SphericalPoint {
    /// Returns `None` for the zero vector or non-finite input.
    pub fn from_cartesian(v: &Vector3<f64>) -> Option<Self> {
        let radius = v.norm();
        if !radius.is_finite() || radius <= 0.0 {
            return None;
        }
        let theta = (v.z / radius).clamp(-1.0, 1.0).acos();
        let phi = v.y.atan2(v.x);
        Some(Self { radius, theta, phi })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn axes_map_to_expected_angles() {
        let up = SphericalPoint::from_cartesian(&Vector3::new(0.0, 0.0, 2.0)).unwrap();
        assert_relative_eq!(up.radius, 2.0);
        assert_relative_eq!(up.theta, 0.0);

        let north_down = SphericalPoint::from_cartesian(&Vector3::new(0.0, 1.0, -1.0)).unwrap();
        assert_relative_eq!(north_down.theta, 3.0 * FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(north_down.phi, FRAC_PI_2, epsilon = 1e-12);

        let west = SphericalPoint::from_cartesian(&Vector3::new(-1.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(west.phi, PI, epsilon = 1e-12);
    }

    #[test]
    fn zero_vector_is_rejected() {
        assert!(SphericalPoint::from_cartesian(&Vector3::zeros()).is_none());
    }
}

//! Ground projection of region vertices.
//!
//! A vertex is projectable when it lies on or below the horizon and its ray
//! descends toward the ground. The ray is intersected with a flat ground at
//! a fixed camera altitude:
//! `distance = tan(π - θ) * altitude` with `θ` the polar angle of the ray.
//! A region is represented by its nearest projectable vertex.

use std::f64::consts::PI;

use crate::camera::CameraGeometry;
use crate::horizon::HorizonLine;
use crate::spherical::SphericalPoint;

// Rays must descend at least this much (unit direction) to meet the ground.
// Rays through the horizon row itself only reach it at infinity.
const MIN_DESCENT: f64 = 1e-9;

/// Nearest visible ground point of a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProjection {
    /// Ground distance from the camera footprint.
    pub distance: f64,
    /// Azimuth of the ray, radians.
    pub bearing: f64,
    /// Originating vertex, truncated to integer pixels.
    pub pixel: [u32; 2],
}

impl GroundProjection {
    /// Flat "nothing projected" value: distance and bearing -1, pixel origin.
    pub const UNSET: Self = Self {
        distance: -1.0,
        bearing: -1.0,
        pixel: [0, 0],
    };
}

/// Horizontal distance of a downward ray with polar angle `theta`.
pub fn ground_distance(theta: f64, altitude: f64) -> f64 {
    (PI - theta).tan() * altitude
}

/// Project the outer boundary of a region and keep the nearest vertex.
///
/// Vertices above the horizon are skipped. Among vertices with equal
/// distance the first one in boundary order is kept. Returns `None` when no
/// vertex projects to the ground.
pub fn project_outline<C: CameraGeometry + ?Sized>(
    camera: &C,
    horizon: &HorizonLine,
    outline: &[[f64; 2]],
    altitude: f64,
) -> Option<GroundProjection> {
    outline
        .iter()
        .filter(|&&p| !horizon.is_above(p))
        .filter_map(|&p| project_vertex(camera, p, altitude))
        .fold(None, |best: Option<GroundProjection>, cand| match best {
            Some(b) if b.distance <= cand.distance => Some(b),
            _ => Some(cand),
        })
}

fn project_vertex<C: CameraGeometry + ?Sized>(
    camera: &C,
    pixel_xy: [f64; 2],
    altitude: f64,
) -> Option<GroundProjection> {
    let ray = camera.backproject(pixel_xy)?;
    if !(ray.direction.z < -MIN_DESCENT) {
        tracing::trace!(
            "vertex {:.1}x{:.1} does not descend to the ground",
            pixel_xy[0],
            pixel_xy[1]
        );
        return None;
    }
    let sph = SphericalPoint::from_cartesian(&ray.direction)?;
    let distance = ground_distance(sph.theta, altitude);
    if !distance.is_finite() {
        return None;
    }
    tracing::trace!(
        "vertex {:.1}x{:.1} -> theta {:.4}, phi {:.4}, distance {:.3}",
        pixel_xy[0],
        pixel_xy[1],
        sph.theta,
        sph.phi,
        distance
    );
    Some(GroundProjection {
        distance,
        bearing: sph.phi,
        pixel: [pixel_xy[0] as u32, pixel_xy[1] as u32],
    })
}

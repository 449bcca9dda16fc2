//! Pinhole cameras posed above a flat ground plane.
//!
//! The query only needs three things from a camera: its center, a
//! back-projection ray for an image point, and the image of the ground
//! plane's line at infinity (the horizon). [`CameraGeometry`] is that seam;
//! [`PerspectiveCamera`] is the built-in implementation.
//!
//! World frame: `+x` east, `+y` north, `+z` up, ground plane at `z = 0`.
//! Camera frame: `+x` image right, `+y` image down, `+z` optical axis.

use nalgebra::{Matrix3, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::horizon::HorizonLine;

/// Geometry a camera must expose to drive ground projection.
///
/// Implement this trait to plug in a different camera model.
pub trait CameraGeometry {
    /// Camera center in world coordinates.
    fn center(&self) -> Point3<f64>;
    /// Back-project an image point into a world ray starting at the center.
    ///
    /// Returns `None` when the point cannot be mapped.
    fn backproject(&self, pixel_xy: [f64; 2]) -> Option<Ray3>;
    /// Image-space horizon of the ground plane.
    fn horizon(&self) -> HorizonLine;
}

/// World-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3 {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

/// Square-pixel pinhole intrinsics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CameraIntrinsics {
    /// Focal length in pixels.
    pub focal_px: f64,
    /// Principal point `[x, y]` in pixels.
    pub principal: [f64; 2],
}

impl CameraIntrinsics {
    /// Intrinsics for an `ni x nj` image whose height spans `top_fov_deg`,
    /// principal point at the image center.
    ///
    /// Returns `None` unless `0 < top_fov_deg < 180`.
    pub fn from_top_fov(ni: u32, nj: u32, top_fov_deg: f64) -> Option<Self> {
        if !(top_fov_deg > 0.0 && top_fov_deg < 180.0) {
            return None;
        }
        let principal = [f64::from(ni) * 0.5, f64::from(nj) * 0.5];
        let focal_px = principal[1] / (0.5 * top_fov_deg.to_radians()).tan();
        (focal_px.is_finite() && focal_px > 0.0).then_some(Self {
            focal_px,
            principal,
        })
    }

    /// Camera-frame direction `K⁻¹ [u, v, 1]` through an image point.
    pub fn ray_direction(&self, pixel_xy: [f64; 2]) -> Option<Vector3<f64>> {
        let d = Vector3::new(
            (pixel_xy[0] - self.principal[0]) / self.focal_px,
            (pixel_xy[1] - self.principal[1]) / self.focal_px,
            1.0,
        );
        (d.x.is_finite() && d.y.is_finite()).then_some(d)
    }

    /// Image point of a camera-frame point; `None` behind the camera.
    pub fn image_point(&self, pc: &Vector3<f64>) -> Option<[f64; 2]> {
        if pc.z <= 1e-12 {
            return None;
        }
        Some([
            self.focal_px * pc.x / pc.z + self.principal[0],
            self.focal_px * pc.y / pc.z + self.principal[1],
        ])
    }

    /// Image line `K⁻ᵀ n` of the plane through the center with camera-frame
    /// normal `n`.
    pub fn image_line(&self, n: &Vector3<f64>) -> HorizonLine {
        let [px, py] = self.principal;
        let f = self.focal_px;
        HorizonLine::new(n.x / f, n.y / f, n.z - (n.x * px + n.y * py) / f)
    }
}

/// Camera orientation and field of view, in degrees.
///
/// Heading is clockwise from north (`+y`), tilt is measured from nadir
/// (0 looks straight down, 90 looks at the horizon), roll turns the image
/// about the optical axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CameraAngles {
    pub heading_deg: f64,
    pub tilt_deg: f64,
    pub roll_deg: f64,
    pub top_fov_deg: f64,
}

impl CameraAngles {
    pub fn new(heading_deg: f64, tilt_deg: f64, roll_deg: f64, top_fov_deg: f64) -> Self {
        Self {
            heading_deg,
            tilt_deg,
            roll_deg,
            top_fov_deg,
        }
    }

    /// Identifier used in output file names.
    pub fn label(&self) -> String {
        format!(
            "heading_{:.2}_tilt_{:.2}_roll_{:.2}_top_fov_{:.2}",
            self.heading_deg, self.tilt_deg, self.roll_deg, self.top_fov_deg
        )
    }
}

/// Pinhole camera `P = K [R | -R C]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    intrinsics: CameraIntrinsics,
    rotation: Rotation3<f64>,
    center: Point3<f64>,
}

impl PerspectiveCamera {
    /// `rotation` maps world directions into the camera frame.
    pub fn new(intrinsics: CameraIntrinsics, rotation: Rotation3<f64>, center: Point3<f64>) -> Self {
        Self {
            intrinsics,
            rotation,
            center,
        }
    }

    /// Camera for an `ni x nj` image posed by `angles` at `(0, 0, altitude)`.
    pub fn from_angles(ni: u32, nj: u32, angles: &CameraAngles, altitude: f64) -> Option<Self> {
        let intrinsics = CameraIntrinsics::from_top_fov(ni, nj, angles.top_fov_deg)?;
        if !altitude.is_finite() {
            return None;
        }

        let (sh, ch) = angles.heading_deg.to_radians().sin_cos();
        let (st, ct) = angles.tilt_deg.to_radians().sin_cos();
        let (sr, cr) = angles.roll_deg.to_radians().sin_cos();

        let forward = Vector3::new(st * sh, st * ch, -ct);
        let right = Vector3::new(ch, -sh, 0.0);
        let down = forward.cross(&right);

        let x_axis = right * cr + down * sr;
        let y_axis = down * cr - right * sr;
        let rows = Matrix3::new(
            x_axis.x, x_axis.y, x_axis.z, //
            y_axis.x, y_axis.y, y_axis.z, //
            forward.x, forward.y, forward.z,
        );

        Some(Self::new(
            intrinsics,
            Rotation3::from_matrix_unchecked(rows),
            Point3::new(0.0, 0.0, altitude),
        ))
    }

    pub fn intrinsics(&self) -> CameraIntrinsics {
        self.intrinsics
    }

    /// Project a world point; `None` when it lies behind the camera.
    pub fn project(&self, world: &Point3<f64>) -> Option<[f64; 2]> {
        self.intrinsics
            .image_point(&(self.rotation * (world - self.center)))
    }
}

impl CameraGeometry for PerspectiveCamera {
    fn center(&self) -> Point3<f64> {
        self.center
    }

    fn backproject(&self, pixel_xy: [f64; 2]) -> Option<Ray3> {
        let dir = self.rotation.inverse() * self.intrinsics.ray_direction(pixel_xy)?;
        let direction = dir.try_normalize(1e-15)?;
        Some(Ray3 {
            origin: self.center,
            direction,
        })
    }

    fn horizon(&self) -> HorizonLine {
        // l = K^-T R n for the ground normal n.
        self.intrinsics.image_line(&(self.rotation * Vector3::z()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zero_focal_gives_no_ray() {
        let k = CameraIntrinsics {
            focal_px: 0.0,
            principal: [0.0, 0.0],
        };
        assert!(k.ray_direction([100.0, 100.0]).is_none());
    }

    #[test]
    fn image_point_inverts_ray_direction() {
        let k = CameraIntrinsics::from_top_fov(800, 600, 45.0).unwrap();
        let d = k.ray_direction([123.5, 456.25]).unwrap();
        let px = k.image_point(&(d * 7.0)).unwrap();
        assert_relative_eq!(px[0], 123.5, epsilon = 1e-9);
        assert_relative_eq!(px[1], 456.25, epsilon = 1e-9);
        assert!(k.image_point(&Vector3::new(1.0, 1.0, -2.0)).is_none());
    }

    #[test]
    fn top_fov_sets_focal_from_image_height() {
        let k = CameraIntrinsics::from_top_fov(640, 480, 90.0).unwrap();
        assert_relative_eq!(k.focal_px, 240.0, epsilon = 1e-9);
        assert_eq!(k.principal, [320.0, 240.0]);
        assert!(CameraIntrinsics::from_top_fov(640, 480, 0.0).is_none());
        assert!(CameraIntrinsics::from_top_fov(640, 480, 180.0).is_none());
    }

    #[test]
    fn level_camera_looks_along_heading() {
        let cam =
            PerspectiveCamera::from_angles(640, 480, &CameraAngles::new(90.0, 90.0, 0.0, 60.0), 5.0)
                .unwrap();
        let ray = cam.backproject([320.0, 240.0]).unwrap();
        assert_relative_eq!(ray.direction.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.direction.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ray.direction.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ray.origin.z, 5.0);
    }

    #[test]
    fn project_then_backproject_hits_the_point() {
        let cam =
            PerspectiveCamera::from_angles(800, 600, &CameraAngles::new(30.0, 70.0, 3.0, 45.0), 12.0)
                .unwrap();
        let world = Point3::new(4.0, 20.0, 0.0);
        let px = cam.project(&world).unwrap();
        let ray = cam.backproject(px).unwrap();
        let expected = (world - cam.center()).normalize();
        assert_relative_eq!(ray.direction, expected, epsilon = 1e-9);
    }

    #[test]
    fn horizon_passes_through_projected_far_points() {
        let cam =
            PerspectiveCamera::from_angles(800, 600, &CameraAngles::new(-40.0, 80.0, 5.0, 50.0), 3.0)
                .unwrap();
        let horizon = cam.horizon();
        // a distant ground point projects close to the horizon
        let far = cam.project(&Point3::new(-6.0e6, 7.0e6, 0.0)).unwrap();
        assert_relative_eq!(horizon.evaluate(far[0]), far[1], epsilon = 1e-3);
    }

    #[test]
    fn nadir_camera_has_degenerate_horizon() {
        let cam =
            PerspectiveCamera::from_angles(640, 480, &CameraAngles::new(15.0, 0.0, 0.0, 60.0), 10.0)
                .unwrap();
        let h = cam.horizon();
        assert!(h.is_degenerate());
        assert_eq!(h.evaluate(123.0), 0.0);
    }

    #[test]
    fn label_encodes_all_angles() {
        let a = CameraAngles::new(10.0, 85.5, -1.0, 45.0);
        assert_eq!(a.label(), "heading_10.00_tilt_85.50_roll_-1.00_top_fov_45.00");
    }
}

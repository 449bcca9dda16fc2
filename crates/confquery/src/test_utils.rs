//! Shared synthetic cameras and scenes for unit tests.

use nalgebra::Point3;

use crate::camera::{CameraAngles, PerspectiveCamera};
use crate::camera_space::{CameraGrid, CameraSpace};
use crate::scene::{DepthScene, RegionBoundary, SceneRegion};

/// Camera at `altitude` looking north at the horizon, 90° vertical field of
/// view on a 640x480 image (focal length 240 px).
pub(crate) fn level_camera(altitude: f64) -> PerspectiveCamera {
    PerspectiveCamera::from_angles(640, 480, &CameraAngles::new(0.0, 90.0, 0.0, 90.0), altitude)
        .expect("valid level camera")
}

/// Image point of the ground point `(x, y, 0)`.
pub(crate) fn ground_pixel(cam: &PerspectiveCamera, x: f64, y: f64) -> [f64; 2] {
    cam.project(&Point3::new(x, y, 0.0))
        .expect("ground point in front of the camera")
}

/// Two cameras (headings 0° and 90°) tilted 15° below the horizon at
/// altitude 10 over a 640x480 image.
pub(crate) fn sample_grid() -> CameraGrid {
    CameraGrid::new(640, 480, 10.0, vec![0.0, 90.0], vec![75.0], vec![0.0], vec![60.0])
        .expect("valid sample grid")
}

fn ground_square(cam: &PerspectiveCamera, cx: f64, cy: f64, half: f64) -> RegionBoundary {
    RegionBoundary::from_outer(vec![
        ground_pixel(cam, cx - half, cy - half),
        ground_pixel(cam, cx + half, cy - half),
        ground_pixel(cam, cx + half, cy + half),
        ground_pixel(cam, cx - half, cy + half),
    ])
}

/// Scene seen by the first camera of [`sample_grid`]:
/// - `plaza`: reference ground region,
/// - `tower`: reference scene region 20 units north,
/// - `house`: scene region to the north-east,
/// - `cloud`: scene region entirely above the horizon,
/// - `sky`: sky region flagged reference (must be ignored).
pub(crate) fn sample_scene(grid: &CameraGrid) -> DepthScene {
    let cam = grid.camera(0).expect("camera 0");
    let [ni, nj] = grid.image_size();
    let mut scene = DepthScene::new(ni, nj);

    scene.ground_plane.push(SceneRegion::new(
        "plaza",
        22,
        true,
        ground_square(&cam, 0.0, 40.0, 6.0),
    ));
    scene.scene_regions.push(SceneRegion::new(
        "tower",
        21,
        true,
        ground_square(&cam, 0.0, 20.0, 1.0),
    ));
    scene.scene_regions.push(SceneRegion::new(
        "house",
        17,
        false,
        ground_square(&cam, 6.0, 30.0, 2.0),
    ));
    scene.scene_regions.push(SceneRegion::new(
        "cloud",
        0,
        false,
        RegionBoundary::from_outer(vec![[100.0, 20.0], [300.0, 20.0], [300.0, 60.0], [100.0, 60.0]]),
    ));
    scene.sky.push(SceneRegion::new(
        "sky",
        0,
        true,
        RegionBoundary::from_outer(vec![[0.0, 0.0], [640.0, 0.0], [640.0, 10.0], [0.0, 10.0]]),
    ));
    scene
}

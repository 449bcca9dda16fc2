use std::collections::BTreeMap;

use crate::camera::CameraGeometry;
use crate::conf_object::ConfObject;
use crate::horizon::HorizonLine;
use crate::project::project_outline;
use crate::scene::DepthScene;

use super::CameraRecord;

/// Configurational objects observed from one camera.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfiguration {
    camera: CameraRecord,
    horizon: HorizonLine,
    objects: BTreeMap<String, ConfObject>,
    pixels: BTreeMap<String, [u32; 2]>,
}

impl CameraConfiguration {
    pub fn camera(&self) -> &CameraRecord {
        &self.camera
    }

    pub fn label(&self) -> &str {
        &self.camera.label
    }

    pub fn horizon(&self) -> &HorizonLine {
        &self.horizon
    }

    /// Region name -> configurational object.
    pub fn objects(&self) -> &BTreeMap<String, ConfObject> {
        &self.objects
    }

    /// Region name -> image pixel the object was projected from.
    pub fn pixels(&self) -> &BTreeMap<String, [u32; 2]> {
        &self.pixels
    }

    pub fn object(&self, name: &str) -> Option<&ConfObject> {
        self.objects.get(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Project every non-ground region of `scene` into every camera.
///
/// The output has one entry per camera, in input order. Ground-plane and
/// sky regions never produce objects; regions with no vertex below the
/// horizon are left out.
pub fn build_configurations(
    cameras: &[CameraRecord],
    scene: &DepthScene,
    altitude: f64,
) -> Vec<CameraConfiguration> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        cameras
            .par_iter()
            .map(|record| configure_camera(record, scene, altitude))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        cameras
            .iter()
            .map(|record| configure_camera(record, scene, altitude))
            .collect()
    }
}

fn configure_camera(
    record: &CameraRecord,
    scene: &DepthScene,
    altitude: f64,
) -> CameraConfiguration {
    let camera = &record.camera;
    let horizon = camera.horizon();
    let center = camera.center();
    tracing::debug!(
        "configuring camera {}: center ({:.2}, {:.2}, {:.2}), horizon {}",
        record.label,
        center.x,
        center.y,
        center.z,
        horizon
    );

    let mut objects = BTreeMap::new();
    let mut pixels = BTreeMap::new();
    for region in &scene.scene_regions {
        let outline = region.boundary.outer();
        let Some(proj) = project_outline(camera, &horizon, outline, altitude) else {
            tracing::trace!("region {} not observable from {}", region.name, record.label);
            continue;
        };
        let obj = ConfObject::new(proj.bearing as f32, proj.distance as f32, region.land_id);
        tracing::trace!("region {} ({} vertices): {}", region.name, outline.len(), obj);
        objects.insert(region.name.clone(), obj);
        pixels.insert(region.name.clone(), proj.pixel);
    }

    CameraConfiguration {
        camera: record.clone(),
        horizon,
        objects,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::build_cameras;
    use crate::camera_space::CameraSpace;
    use crate::scene::{RegionBoundary, SceneRegion};
    use crate::test_utils::{ground_pixel, sample_grid, sample_scene};
    use approx::assert_relative_eq;

    #[test]
    fn ground_regions_never_become_objects() {
        let grid = sample_grid();
        let scene = sample_scene(&grid);
        let cams = build_cameras(&grid).unwrap();
        let configs = build_configurations(&cams, &scene, 10.0);
        assert_eq!(configs.len(), cams.len());
        for cfg in &configs {
            for g in &scene.ground_plane {
                assert!(cfg.object(&g.name).is_none(), "{}", g.name);
            }
            for name in cfg.objects().keys() {
                assert!(scene.scene_regions.iter().any(|r| &r.name == name));
            }
            let pix_keys: Vec<_> = cfg.pixels().keys().collect();
            let obj_keys: Vec<_> = cfg.objects().keys().collect();
            assert_eq!(pix_keys, obj_keys);
        }
    }

    #[test]
    fn objects_carry_region_land_class() {
        let grid = sample_grid();
        let scene = sample_scene(&grid);
        let cams = build_cameras(&grid).unwrap();
        let configs = build_configurations(&cams, &scene, 10.0);
        let first = &configs[0];
        assert!(!first.is_empty());
        for (name, obj) in first.objects() {
            let region = scene
                .scene_regions
                .iter()
                .find(|r| &r.name == name)
                .unwrap();
            assert_eq!(obj.land(), region.land_id);
            assert!(obj.distance() > 0.0);
        }
    }

    #[test]
    fn sky_side_region_is_left_out() {
        let grid = sample_grid();
        let scene = sample_scene(&grid);
        let cams = build_cameras(&grid).unwrap();
        let configs = build_configurations(&cams, &scene, 10.0);
        for cfg in &configs {
            assert!(cfg.object("cloud").is_none());
        }
    }

    #[test]
    fn no_cameras_no_configurations() {
        let grid = sample_grid();
        let scene = sample_scene(&grid);
        assert!(build_configurations(&[], &scene, 10.0).is_empty());
    }

    #[test]
    fn inner_sheets_are_not_projected() {
        let grid = sample_grid();
        let cam = grid.camera(0).unwrap();
        let outer: Vec<[f64; 2]> = [(0.5, 29.0), (2.0, 29.5), (2.0, 31.0), (0.5, 31.0)]
            .iter()
            .map(|&(x, y)| ground_pixel(&cam, x, y))
            .collect();
        // nearer than any outer vertex and below the horizon
        let inner: Vec<[f64; 2]> = [(-0.5, 12.0), (0.5, 12.0), (0.0, 13.0)]
            .iter()
            .map(|&(x, y)| ground_pixel(&cam, x, y))
            .collect();
        let mut scene = DepthScene::new(640, 480);
        scene.scene_regions.push(SceneRegion::new(
            "courtyard",
            17,
            true,
            RegionBoundary::new(vec![outer.clone(), inner]),
        ));

        let cams = build_cameras(&grid).unwrap();
        let configs = build_configurations(&cams, &scene, 10.0);
        let obj = configs[0].object("courtyard").unwrap();
        assert_relative_eq!(obj.distance(), 841.25f32.sqrt(), epsilon = 1e-3);
        assert_relative_eq!(obj.bearing(), 29.0f32.atan2(0.5), epsilon = 1e-4);
        assert_eq!(
            configs[0].pixels()["courtyard"],
            [outer[0][0] as u32, outer[0][1] as u32]
        );
    }
}

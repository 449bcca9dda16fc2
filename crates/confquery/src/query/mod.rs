//! Configurational-object query over a camera space and a labeled scene.
//!
//! [`ConfQuery::new`] runs the three build steps in order:
//!
//! 1. **Reference objects** – names of the anchor regions of the scene.
//! 2. **Cameras** – every valid camera of the camera space with its labels.
//! 3. **Configurations** – per camera, the nearest visible ground point of
//!    every non-ground region as a [`ConfObject`](crate::ConfObject).
//!
//! Each step can be re-run on its own; a rebuild replaces the previous
//! state wholesale.

mod cameras;
mod configuration;
mod reference;
mod report;

pub use cameras::{build_cameras, CameraRecord};
pub use configuration::{build_configurations, CameraConfiguration};
pub use reference::parse_reference_objects;
pub use report::{CameraReport, ObjectReport, QueryReport};

use crate::camera_space::CameraSpace;
use crate::scene::DepthScene;

/// Errors that make a query unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// The scene flags no ground or non-ground region as reference.
    NoReferenceObject,
    /// The camera space could not materialize a valid camera.
    CameraConstruction {
        /// Index in the camera space.
        index: usize,
    },
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoReferenceObject => write!(f, "scene has no reference object"),
            Self::CameraConstruction { index } => {
                write!(f, "failed to construct camera {} from camera space", index)
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// Per-camera configurational objects for one scene.
#[derive(Debug, Clone)]
pub struct ConfQuery {
    scene: DepthScene,
    altitude: f64,
    reference_names: Vec<String>,
    configurations: Vec<CameraConfiguration>,
}

impl ConfQuery {
    /// Build the query: reference objects, cameras, configurations.
    pub fn new<S: CameraSpace + ?Sized>(space: &S, scene: DepthScene) -> Result<Self, QueryError> {
        let mut query = Self {
            scene,
            altitude: space.altitude(),
            reference_names: Vec::new(),
            configurations: Vec::new(),
        };
        query.rebuild_reference_objects()?;
        query.rebuild_cameras(space)?;
        Ok(query)
    }

    /// Recompute the reference-name list from the scene.
    pub fn rebuild_reference_objects(&mut self) -> Result<(), QueryError> {
        self.reference_names = parse_reference_objects(&self.scene)?;
        tracing::info!(
            "{} reference configurational objects are loaded: {}",
            self.reference_names.len(),
            self.reference_names.join(" ")
        );
        Ok(())
    }

    /// Re-read cameras and altitude from `space`, then rebuild every
    /// configuration.
    pub fn rebuild_cameras<S: CameraSpace + ?Sized>(&mut self, space: &S) -> Result<(), QueryError> {
        let cameras = build_cameras(space)?;
        tracing::info!("{} cameras are created", cameras.len());
        for (i, cam) in cameras.iter().enumerate() {
            tracing::debug!("{}: {}", i, cam.label);
        }
        self.altitude = space.altitude();
        self.configurations = build_configurations(&cameras, &self.scene, self.altitude);
        Ok(())
    }

    /// Recompute configurational objects for the current cameras.
    pub fn rebuild_configurations(&mut self) {
        let cameras: Vec<CameraRecord> = self
            .configurations
            .iter()
            .map(|c| c.camera().clone())
            .collect();
        self.configurations = build_configurations(&cameras, &self.scene, self.altitude);
    }

    pub fn scene(&self) -> &DepthScene {
        &self.scene
    }

    /// Camera altitude shared by all cameras.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Reference region names, ground plane first.
    pub fn reference_names(&self) -> &[String] {
        &self.reference_names
    }

    pub fn is_reference(&self, name: &str) -> bool {
        self.reference_names.iter().any(|n| n == name)
    }

    /// One entry per valid camera, in camera-space order.
    pub fn configurations(&self) -> &[CameraConfiguration] {
        &self.configurations
    }

    pub fn n_cameras(&self) -> usize {
        self.configurations.len()
    }

    /// Serializable summary of the query.
    pub fn report(&self) -> QueryReport {
        QueryReport::from_query(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera_space::CameraGrid;
    use crate::test_utils::{sample_grid, sample_scene};

    #[test]
    fn builds_one_configuration_per_valid_camera() {
        let grid = sample_grid();
        let scene = sample_scene(&grid);
        let q = ConfQuery::new(&grid, scene).unwrap();
        assert_eq!(q.n_cameras(), grid.valid_indices().len());
        assert_eq!(q.reference_names(), &["plaza", "tower"]);
        assert!(q.is_reference("tower"));
        assert!(!q.is_reference("house"));
        assert_eq!(q.altitude(), 10.0);
    }

    #[test]
    fn missing_reference_fails_construction() {
        let grid = sample_grid();
        let mut scene = sample_scene(&grid);
        for r in scene.ground_plane.iter_mut().chain(scene.scene_regions.iter_mut()) {
            r.is_reference = false;
        }
        let err = ConfQuery::new(&grid, scene).unwrap_err();
        assert_eq!(err, QueryError::NoReferenceObject);
        assert_eq!(err.to_string(), "scene has no reference object");
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let grid = sample_grid();
        let scene = sample_scene(&grid);
        let mut q = ConfQuery::new(&grid, scene.clone()).unwrap();
        let before = q.configurations().to_vec();
        q.rebuild_configurations();
        assert_eq!(q.configurations(), before.as_slice());
        q.rebuild_reference_objects().unwrap();
        q.rebuild_cameras(&grid).unwrap();
        assert_eq!(q.configurations(), before.as_slice());

        let other = ConfQuery::new(&grid, scene).unwrap();
        assert_eq!(other.configurations(), before.as_slice());
    }

    #[test]
    fn rebuild_cameras_replaces_previous_set() {
        let mut grid = sample_grid();
        let scene = sample_scene(&grid);
        let mut q = ConfQuery::new(&grid, scene).unwrap();
        grid.set_valid_indices(vec![1]).unwrap();
        q.rebuild_cameras(&grid).unwrap();
        assert_eq!(q.n_cameras(), 1);
        assert_eq!(q.configurations()[0].camera().index, 1);
    }

    #[test]
    fn altitude_comes_from_camera_space() {
        let grid =
            CameraGrid::new(640, 480, 25.0, vec![0.0], vec![75.0], vec![0.0], vec![60.0]).unwrap();
        let scene = sample_scene(&sample_grid());
        let q = ConfQuery::new(&grid, scene).unwrap();
        assert_eq!(q.altitude(), 25.0);
    }
}

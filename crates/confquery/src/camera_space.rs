//! Camera spaces: enumerations of candidate camera poses.
//!
//! A [`CameraSpace`] exposes a list of valid camera indices and, for each,
//! a camera, a textual identifier and its orientation angles. [`CameraGrid`]
//! enumerates the Cartesian product of heading, tilt, roll and field-of-view
//! samples at a single altitude.
//!
//! Camera-grid JSON follows the `confquery.cameras.v1` schema.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{CameraAngles, PerspectiveCamera};

const CAMERAS_SCHEMA_V1: &str = "confquery.cameras.v1";

/// Source of calibrated cameras for a query.
pub trait CameraSpace {
    /// Indices of cameras that passed external validity checks, in order.
    fn valid_indices(&self) -> &[usize];
    /// Camera at `index`, or `None` if it cannot be built.
    fn camera(&self, index: usize) -> Option<PerspectiveCamera>;
    /// Identifier used to label outputs for `index`.
    fn camera_string(&self, index: usize) -> Option<String>;
    /// Orientation angles of the camera at `index`.
    fn camera_angles(&self, index: usize) -> Option<CameraAngles>;
    /// Camera altitude above the ground plane, shared by all cameras.
    fn altitude(&self) -> f64;
}

/// Grid of poses: heading varies fastest, then tilt, roll, field of view.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraGrid {
    ni: u32,
    nj: u32,
    altitude: f64,
    headings_deg: Vec<f64>,
    tilts_deg: Vec<f64>,
    rolls_deg: Vec<f64>,
    top_fovs_deg: Vec<f64>,
    valid: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraGridSpecV1 {
    schema: String,
    ni: u32,
    nj: u32,
    altitude: f64,
    headings_deg: Vec<f64>,
    tilts_deg: Vec<f64>,
    #[serde(default = "default_rolls")]
    rolls_deg: Vec<f64>,
    top_fovs_deg: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    valid_indices: Option<Vec<usize>>,
}

fn default_rolls() -> Vec<f64> {
    vec![0.0]
}

impl CameraGrid {
    /// Build a grid; every index starts out valid.
    pub fn new(
        ni: u32,
        nj: u32,
        altitude: f64,
        headings_deg: Vec<f64>,
        tilts_deg: Vec<f64>,
        rolls_deg: Vec<f64>,
        top_fovs_deg: Vec<f64>,
    ) -> Result<Self, String> {
        if ni == 0 || nj == 0 {
            return Err(format!("camera image size must be positive, got {ni}x{nj}"));
        }
        if !altitude.is_finite() || altitude <= 0.0 {
            return Err(format!("camera altitude must be positive, got {altitude}"));
        }
        for (name, values) in [
            ("headings_deg", &headings_deg),
            ("tilts_deg", &tilts_deg),
            ("rolls_deg", &rolls_deg),
            ("top_fovs_deg", &top_fovs_deg),
        ] {
            if values.is_empty() {
                return Err(format!("{name} must not be empty"));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(format!("{name} contains non-finite values"));
            }
        }
        if let Some(fov) = top_fovs_deg.iter().find(|&&f| !(f > 0.0 && f < 180.0)) {
            return Err(format!("top field of view must be in (0, 180), got {fov}"));
        }

        let n = headings_deg.len() * tilts_deg.len() * rolls_deg.len() * top_fovs_deg.len();
        Ok(Self {
            ni,
            nj,
            altitude,
            headings_deg,
            tilts_deg,
            rolls_deg,
            top_fovs_deg,
            valid: (0..n).collect(),
        })
    }

    /// Load a camera grid from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Parse a camera grid from a JSON string.
    pub fn from_json_str(data: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let spec: CameraGridSpecV1 = serde_json::from_str(data)?;
        Self::from_spec(spec).map_err(Into::into)
    }

    fn from_spec(spec: CameraGridSpecV1) -> Result<Self, String> {
        if spec.schema != CAMERAS_SCHEMA_V1 {
            return Err(format!(
                "unsupported camera schema '{}' (expected '{}')",
                spec.schema, CAMERAS_SCHEMA_V1
            ));
        }
        let mut grid = Self::new(
            spec.ni,
            spec.nj,
            spec.altitude,
            spec.headings_deg,
            spec.tilts_deg,
            spec.rolls_deg,
            spec.top_fovs_deg,
        )?;
        if let Some(valid) = spec.valid_indices {
            grid.set_valid_indices(valid)?;
        }
        Ok(grid)
    }

    /// Total number of poses in the grid.
    pub fn len(&self) -> usize {
        self.headings_deg.len() * self.tilts_deg.len() * self.rolls_deg.len() * self.top_fovs_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn image_size(&self) -> [u32; 2] {
        [self.ni, self.nj]
    }

    /// Replace the valid-index list. Indices must be in range.
    pub fn set_valid_indices(&mut self, valid: Vec<usize>) -> Result<(), String> {
        let n = self.len();
        if let Some(bad) = valid.iter().find(|&&i| i >= n) {
            return Err(format!("valid camera index {bad} out of range (grid has {n})"));
        }
        self.valid = valid;
        Ok(())
    }

    fn angles_at(&self, index: usize) -> Option<CameraAngles> {
        if index >= self.len() {
            return None;
        }
        let nh = self.headings_deg.len();
        let nt = self.tilts_deg.len();
        let nr = self.rolls_deg.len();
        let h = index % nh;
        let t = (index / nh) % nt;
        let r = (index / (nh * nt)) % nr;
        let f = index / (nh * nt * nr);
        Some(CameraAngles::new(
            self.headings_deg[h],
            self.tilts_deg[t],
            self.rolls_deg[r],
            self.top_fovs_deg[f],
        ))
    }
}

impl CameraSpace for CameraGrid {
    fn valid_indices(&self) -> &[usize] {
        &self.valid
    }

    fn camera(&self, index: usize) -> Option<PerspectiveCamera> {
        let angles = self.angles_at(index)?;
        PerspectiveCamera::from_angles(self.ni, self.nj, &angles, self.altitude)
    }

    fn camera_string(&self, index: usize) -> Option<String> {
        self.angles_at(index).map(|a| a.label())
    }

    fn camera_angles(&self, index: usize) -> Option<CameraAngles> {
        self.angles_at(index)
    }

    fn altitude(&self) -> f64 {
        self.altitude
    }
}

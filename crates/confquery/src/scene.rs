//! Labeled scene regions drawn over a query image.
//!
//! Scene JSON follows the `confquery.scene.v1` schema: image size plus three
//! region lists (ground plane, non-ground scene regions, sky). Each region
//! carries its boundary sheets in image pixels, a land-cover class id and a
//! reference flag.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

const SCENE_SCHEMA_V1: &str = "confquery.scene.v1";

/// Region boundary as an ordered list of sheets.
///
/// The first sheet is the outer boundary. Further sheets are kept for
/// drawing but never projected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionBoundary {
    sheets: Vec<Vec<[f64; 2]>>,
}

impl RegionBoundary {
    pub fn new(sheets: Vec<Vec<[f64; 2]>>) -> Self {
        Self { sheets }
    }

    /// Single-sheet boundary.
    pub fn from_outer(outer: Vec<[f64; 2]>) -> Self {
        Self {
            sheets: vec![outer],
        }
    }

    /// Outer boundary vertices (empty when there are no sheets).
    pub fn outer(&self) -> &[[f64; 2]] {
        self.sheets.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Outer boundary with the first vertex repeated at the end.
    pub fn closed_outer(&self) -> Vec<[f64; 2]> {
        let outer = self.outer();
        let mut closed = outer.to_vec();
        if let Some(&first) = outer.first() {
            closed.push(first);
        }
        closed
    }

    pub fn sheets(&self) -> &[Vec<[f64; 2]>] {
        &self.sheets
    }
}

/// A labeled image region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRegion {
    pub name: String,
    pub land_id: u8,
    #[serde(default)]
    pub is_reference: bool,
    #[serde(rename = "sheets")]
    pub boundary: RegionBoundary,
}

impl SceneRegion {
    pub fn new(name: impl Into<String>, land_id: u8, is_reference: bool, boundary: RegionBoundary) -> Self {
        Self {
            name: name.into(),
            land_id,
            is_reference,
            boundary,
        }
    }
}

/// Semantic description of one query image.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthScene {
    /// Image width in pixels.
    pub ni: u32,
    /// Image height in pixels.
    pub nj: u32,
    /// Regions lying on the ground plane.
    pub ground_plane: Vec<SceneRegion>,
    /// Non-ground regions; the only ones that become configurational objects.
    pub scene_regions: Vec<SceneRegion>,
    /// Sky regions. Never reference objects, never projected.
    pub sky: Vec<SceneRegion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DepthSceneSpecV1 {
    schema: String,
    ni: u32,
    nj: u32,
    #[serde(default)]
    ground_plane: Vec<SceneRegion>,
    #[serde(default)]
    scene_regions: Vec<SceneRegion>,
    #[serde(default)]
    sky: Vec<SceneRegion>,
}

impl DepthScene {
    pub fn new(ni: u32, nj: u32) -> Self {
        Self {
            ni,
            nj,
            ground_plane: Vec::new(),
            scene_regions: Vec::new(),
            sky: Vec::new(),
        }
    }

    /// All regions in declaration order: ground plane, scene regions, sky.
    pub fn regions(&self) -> impl Iterator<Item = &SceneRegion> + '_ {
        self.ground_plane
            .iter()
            .chain(self.scene_regions.iter())
            .chain(self.sky.iter())
    }

    /// Load a scene from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Parse a scene from a JSON string.
    pub fn from_json_str(data: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let spec: DepthSceneSpecV1 = serde_json::from_str(data)?;
        Self::from_spec(spec).map_err(Into::into)
    }

    /// Serialize to the `confquery.scene.v1` JSON schema.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&DepthSceneSpecV1 {
            schema: SCENE_SCHEMA_V1.to_string(),
            ni: self.ni,
            nj: self.nj,
            ground_plane: self.ground_plane.clone(),
            scene_regions: self.scene_regions.clone(),
            sky: self.sky.clone(),
        })
    }

    fn from_spec(spec: DepthSceneSpecV1) -> Result<Self, String> {
        if spec.schema != SCENE_SCHEMA_V1 {
            return Err(format!(
                "unsupported scene schema '{}' (expected '{}')",
                spec.schema, SCENE_SCHEMA_V1
            ));
        }
        let scene = Self {
            ni: spec.ni,
            nj: spec.nj,
            ground_plane: spec.ground_plane,
            scene_regions: spec.scene_regions,
            sky: spec.sky,
        };
        scene.validate()?;
        Ok(scene)
    }

    /// Check image size, region names and boundaries.
    pub fn validate(&self) -> Result<(), String> {
        if self.ni == 0 || self.nj == 0 {
            return Err(format!("scene image size must be positive, got {}x{}", self.ni, self.nj));
        }
        let mut seen = HashSet::new();
        for region in self.regions() {
            if region.name.is_empty() {
                return Err("scene region with empty name".to_string());
            }
            if !seen.insert(region.name.as_str()) {
                return Err(format!("duplicate scene region name '{}'", region.name));
            }
            if region.boundary.outer().is_empty() {
                return Err(format!("scene region '{}' has no outer boundary", region.name));
            }
            let finite = region
                .boundary
                .sheets()
                .iter()
                .flatten()
                .all(|p| p[0].is_finite() && p[1].is_finite());
            if !finite {
                return Err(format!(
                    "scene region '{}' has non-finite vertices",
                    region.name
                ));
            }
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::camera::CameraAngles;
use crate::horizon::HorizonLine;
use crate::land::land_class;

use super::ConfQuery;

pub const REPORT_SCHEMA_V1: &str = "confquery.report.v1";

/// JSON summary of a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryReport {
    pub schema_version: String,
    /// Query image dimensions [width, height].
    pub image_size: [u32; 2],
    pub altitude: f64,
    pub reference_names: Vec<String>,
    pub cameras: Vec<CameraReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraReport {
    /// Index in the camera space.
    pub index: usize,
    pub label: String,
    pub angles: CameraAngles,
    pub horizon: HorizonLine,
    pub objects: Vec<ObjectReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectReport {
    pub name: String,
    pub is_reference: bool,
    /// Radians.
    pub bearing: f32,
    pub distance: f32,
    pub land: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_name: Option<String>,
    pub pixel: [u32; 2],
}

impl QueryReport {
    pub(super) fn from_query(query: &ConfQuery) -> Self {
        let cameras = query
            .configurations()
            .iter()
            .map(|cfg| CameraReport {
                index: cfg.camera().index,
                label: cfg.label().to_string(),
                angles: cfg.camera().angles,
                horizon: *cfg.horizon(),
                objects: cfg
                    .objects()
                    .iter()
                    .map(|(name, obj)| ObjectReport {
                        name: name.clone(),
                        is_reference: query.is_reference(name),
                        bearing: obj.bearing(),
                        distance: obj.distance(),
                        land: obj.land(),
                        land_name: land_class(obj.land()).map(|c| c.name.to_string()),
                        pixel: cfg.pixels().get(name).copied().unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            schema_version: REPORT_SCHEMA_V1.to_string(),
            image_size: [query.scene().ni, query.scene().nj],
            altitude: query.altitude(),
            reference_names: query.reference_names().to_vec(),
            cameras,
        }
    }
}

use crate::camera::{CameraAngles, PerspectiveCamera};
use crate::camera_space::CameraSpace;

use super::QueryError;

/// One valid camera of the camera space with its labels.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRecord {
    /// Index in the camera space.
    pub index: usize,
    pub camera: PerspectiveCamera,
    /// Identifier used in output names.
    pub label: String,
    pub angles: CameraAngles,
}

/// Materialize every valid camera of `space`, in valid-index order.
///
/// No filtering happens here; an index the space cannot materialize is an
/// error.
pub fn build_cameras<S: CameraSpace + ?Sized>(space: &S) -> Result<Vec<CameraRecord>, QueryError> {
    space
        .valid_indices()
        .iter()
        .map(|&index| {
            let err = QueryError::CameraConstruction { index };
            let camera = space.camera(index).ok_or(err.clone())?;
            let label = space.camera_string(index).ok_or(err.clone())?;
            let angles = space.camera_angles(index).ok_or(err)?;
            Ok(CameraRecord {
                index,
                camera,
                label,
                angles,
            })
        })
        .collect()
}

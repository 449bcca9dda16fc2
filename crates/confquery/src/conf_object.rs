use serde::{Deserialize, Serialize};

/// A landmark as seen from one camera: bearing, ground distance, land class.
///
/// `bearing` is the azimuth of the viewing ray in radians, counter-clockwise
/// from `+x`. `distance` is in the unit of the camera altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfObject {
    bearing: f32,
    distance: f32,
    land: u8,
}

impl ConfObject {
    pub fn new(bearing: f32, distance: f32, land: u8) -> Self {
        Self {
            bearing,
            distance,
            land,
        }
    }

    pub fn bearing(&self) -> f32 {
        self.bearing
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn land(&self) -> u8 {
        self.land
    }

    /// Ground-plane position relative to the camera footprint.
    pub fn ground_xy(&self) -> [f32; 2] {
        let (s, c) = self.bearing.sin_cos();
        [self.distance * c, self.distance * s]
    }
}

impl std::fmt::Display for ConfObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "bearing: {:.4}, distance: {:.2}, land: {}",
            self.bearing, self.distance, self.land
        )
    }
}

//! Land-cover classes and their display colors.
//!
//! Class ids index a fixed table: NLCD-style cover types first, followed by
//! the man-made categories that typically label non-ground regions.

use serde::Serialize;

/// One land-cover class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LandClass {
    pub id: u8,
    pub name: &'static str,
    pub color: [u8; 3],
}

const fn class(id: u8, name: &'static str, color: [u8; 3]) -> LandClass {
    LandClass { id, name, color }
}

/// Color used for ids outside the table.
pub const UNKNOWN_COLOR: [u8; 3] = [255, 0, 255];

pub const LAND_TABLE: &[LandClass] = &[
    class(0, "invalid", [0, 0, 0]),
    class(1, "open_water", [70, 107, 159]),
    class(2, "perennial_ice_snow", [209, 222, 248]),
    class(3, "developed_open_space", [222, 197, 197]),
    class(4, "developed_low_intensity", [217, 146, 130]),
    class(5, "developed_medium_intensity", [235, 0, 0]),
    class(6, "developed_high_intensity", [171, 0, 0]),
    class(7, "barren_land", [179, 172, 159]),
    class(8, "deciduous_forest", [104, 171, 95]),
    class(9, "evergreen_forest", [28, 95, 44]),
    class(10, "mixed_forest", [181, 197, 143]),
    class(11, "shrub_scrub", [204, 184, 121]),
    class(12, "grassland_herbaceous", [223, 223, 194]),
    class(13, "pasture_hay", [220, 217, 57]),
    class(14, "cultivated_crops", [171, 108, 40]),
    class(15, "woody_wetlands", [184, 217, 235]),
    class(16, "emergent_herbaceous_wetlands", [108, 159, 184]),
    class(17, "building", [255, 170, 0]),
    class(18, "road", [96, 96, 96]),
    class(19, "parking", [160, 160, 160]),
    class(20, "bridge", [120, 60, 180]),
    class(21, "tower", [255, 255, 0]),
    class(22, "park", [0, 200, 100]),
    class(23, "beach", [240, 220, 130]),
    class(24, "sand", [230, 210, 160]),
    class(25, "fort", [128, 64, 0]),
];

/// Table entry for `id`, if any.
pub fn land_class(id: u8) -> Option<&'static LandClass> {
    LAND_TABLE.get(id as usize)
}

/// Display color for `id`.
pub fn land_color(id: u8) -> [u8; 3] {
    land_class(id).map_or(UNKNOWN_COLOR, |c| c.color)
}

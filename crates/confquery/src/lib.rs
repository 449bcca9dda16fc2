//! confquery — configurational objects for camera-space geo-localization.
//!
//! A query image is annotated with labeled regions (ground plane, scene
//! regions, sky). For every hypothesized camera of a camera space, each
//! scene region is reduced to one configurational object: the bearing and
//! ground distance of its nearest visible point, plus its land class.
//! The build stages are:
//!
//! 1. **Reference** – collect the names of the anchor regions.
//! 2. **Cameras** – materialize every valid camera of the camera space.
//! 3. **Horizon** – image of the ground plane's line at infinity per camera.
//! 4. **Projection** – back-project outline vertices below the horizon onto
//!    the ground plane and keep the nearest one.
//! 5. **Visualize** – optional overlays and top views for debugging.
//!
//! # Public API
//! - [`ConfQuery`] as the entry point, built from a [`CameraSpace`] and a
//!   [`DepthScene`]
//! - [`CameraGrid`] as the stock camera space
//! - [`ConfObject`] and [`CameraConfiguration`] as results
//! - [`VisualStyle`] for the debug renderings

pub mod camera;
pub mod camera_space;
mod conf_object;
pub mod horizon;
pub mod land;
pub mod project;
pub mod query;
pub mod raster;
pub mod scene;
pub mod spherical;
mod visualize;

#[cfg(test)]
pub(crate) mod test_utils;

pub use camera::{CameraAngles, CameraGeometry, CameraIntrinsics, PerspectiveCamera, Ray3};
pub use camera_space::{CameraGrid, CameraSpace};
pub use conf_object::ConfObject;
pub use horizon::HorizonLine;
pub use land::{land_class, land_color, LandClass};
pub use project::{project_outline, GroundProjection};
pub use query::{
    CameraConfiguration, CameraRecord, CameraReport, ConfQuery, ObjectReport, QueryError,
    QueryReport,
};
pub use scene::{DepthScene, RegionBoundary, SceneRegion};
pub use visualize::{
    render_overlays, render_top_views, top_view_half_extent, VisualStyle, VisualizeError,
};

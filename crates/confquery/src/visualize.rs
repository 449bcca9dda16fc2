//! Debug renderings of a [`ConfQuery`].
//!
//! Two products per camera:
//! - an overlay of the query image with the horizon, every scene region's
//!   outline and a dot at each configurational object's source pixel;
//! - a top view centered on the camera footprint with one dot per object
//!   at its ground position.
//!
//! Reference objects are drawn larger and in [`VisualStyle::reference_color`].

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::land::land_color;
use crate::query::{CameraConfiguration, ConfQuery};
use crate::raster::{stamp_dot, stamp_polyline};

/// Colors, line widths and dot radii of the debug renderings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualStyle {
    pub horizon_color: [u8; 3],
    pub horizon_width: f64,
    pub boundary_width: f64,
    /// Color of reference outlines and dots, in both renderings.
    pub reference_color: [u8; 3],
    pub reference_boundary_width: f64,
    pub object_radius: f64,
    pub reference_object_radius: f64,
    pub top_view_background: [u8; 3],
    pub top_view_camera_color: [u8; 3],
    pub top_view_camera_radius: f64,
    pub top_view_object_radius: f64,
    pub top_view_reference_radius: f64,
    /// Extra pixels around the farthest object on each side of the top view.
    pub top_view_margin: u32,
    /// Upper bound on each half extent of the top view; farther objects
    /// fall off the canvas.
    pub top_view_max_half_extent: u32,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            horizon_color: [0, 0, 0],
            horizon_width: 6.0,
            boundary_width: 5.0,
            reference_color: [255, 255, 255],
            reference_boundary_width: 7.0,
            object_radius: 20.0,
            reference_object_radius: 30.0,
            top_view_background: [127, 127, 127],
            top_view_camera_color: [0, 0, 0],
            top_view_camera_radius: 5.0,
            top_view_object_radius: 10.0,
            top_view_reference_radius: 25.0,
            top_view_margin: 30,
            top_view_max_half_extent: 4096,
        }
    }
}

impl VisualStyle {
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Errors from writing debug renderings.
#[derive(Debug)]
pub enum VisualizeError {
    /// The query image does not exist.
    MissingInput(PathBuf),
    Image(image::ImageError),
    Io(std::io::Error),
}

impl std::fmt::Display for VisualizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInput(path) => write!(f, "can not find image {}", path.display()),
            Self::Image(e) => write!(f, "image error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for VisualizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingInput(_) => None,
            Self::Image(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for VisualizeError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<std::io::Error> for VisualizeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ── overlays ───────────────────────────────────────────────────────────────

/// One annotated copy of `image` per camera, in configuration order.
pub fn render_overlays(query: &ConfQuery, image: &RgbImage, style: &VisualStyle) -> Vec<RgbImage> {
    per_camera(query.configurations(), |cfg| {
        render_overlay(query, cfg, image, style)
    })
}

fn render_overlay(
    query: &ConfQuery,
    cfg: &CameraConfiguration,
    image: &RgbImage,
    style: &VisualStyle,
) -> RgbImage {
    let mut img = image.clone();

    let x_last = f64::from(query.scene().ni.max(1) - 1);
    let horizon = cfg.horizon();
    let line = [
        [0.0, horizon.evaluate(0.0).floor()],
        [x_last, horizon.evaluate(x_last).floor()],
    ];
    stamp_polyline(&mut img, &line, Rgb(style.horizon_color), style.horizon_width);

    for region in &query.scene().scene_regions {
        let outline = region.boundary.closed_outer();
        if query.is_reference(&region.name) {
            stamp_polyline(
                &mut img,
                &outline,
                Rgb(style.reference_color),
                style.reference_boundary_width,
            );
        } else {
            stamp_polyline(
                &mut img,
                &outline,
                Rgb(land_color(region.land_id)),
                style.boundary_width,
            );
        }
    }

    for (name, obj) in cfg.objects() {
        let Some(&[px, py]) = cfg.pixels().get(name) else {
            continue;
        };
        let center = [f64::from(px), f64::from(py)];
        if query.is_reference(name) {
            stamp_dot(
                &mut img,
                center,
                Rgb(style.reference_color),
                style.reference_object_radius,
            );
        } else {
            stamp_dot(&mut img, center, Rgb(land_color(obj.land())), style.object_radius);
        }
    }
    img
}

// ── top views ──────────────────────────────────────────────────────────────

/// Half width and half height of the top-view canvas: the largest
/// `ceil(|x|)` and `ceil(|y|)` over all objects of all cameras, plus the
/// style margin, clamped to `[1, top_view_max_half_extent]`.
pub fn top_view_half_extent(query: &ConfQuery, style: &VisualStyle) -> [u32; 2] {
    let mut half = [0u32; 2];
    for cfg in query.configurations() {
        for obj in cfg.objects().values() {
            let [x, y] = obj.ground_xy();
            half[0] = half[0].max(x.abs().ceil() as u32);
            half[1] = half[1].max(y.abs().ceil() as u32);
        }
    }
    let max = style.top_view_max_half_extent.max(1);
    half.map(|h| h.saturating_add(style.top_view_margin).clamp(1, max))
}

/// One top view per camera, all with the same canvas size.
pub fn render_top_views(query: &ConfQuery, style: &VisualStyle) -> Vec<RgbImage> {
    let half = top_view_half_extent(query, style);
    per_camera(query.configurations(), |cfg| {
        render_top_view(query, cfg, half, style)
    })
}

fn render_top_view(
    query: &ConfQuery,
    cfg: &CameraConfiguration,
    half: [u32; 2],
    style: &VisualStyle,
) -> RgbImage {
    let mut img = RgbImage::from_pixel(
        half[0].saturating_mul(2),
        half[1].saturating_mul(2),
        Rgb(style.top_view_background),
    );
    let (xo, yo) = (f64::from(half[0]), f64::from(half[1]));
    stamp_dot(
        &mut img,
        [xo, yo],
        Rgb(style.top_view_camera_color),
        style.top_view_camera_radius,
    );

    for (name, obj) in cfg.objects() {
        let [x, y] = obj.ground_xy();
        let center = [xo + f64::from(x), yo - f64::from(y)];
        if query.is_reference(name) {
            stamp_dot(
                &mut img,
                center,
                Rgb(style.reference_color),
                style.top_view_reference_radius,
            );
        } else {
            stamp_dot(
                &mut img,
                center,
                Rgb(land_color(obj.land())),
                style.top_view_object_radius,
            );
        }
    }
    img
}

fn per_camera<F>(configurations: &[CameraConfiguration], render: F) -> Vec<RgbImage>
where
    F: Fn(&CameraConfiguration) -> RgbImage + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        configurations.par_iter().map(render).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        configurations.iter().map(render).collect()
    }
}

fn ensure_dir(dir: &Path) -> Result<(), VisualizeError> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

impl ConfQuery {
    /// Draw the overlays on `in_file` and save them as
    /// `<out_folder>/<stem>_<camera label>.tif`. Returns the written paths.
    pub fn visualize_reference_objects(
        &self,
        in_file: &Path,
        out_folder: &Path,
        style: &VisualStyle,
    ) -> Result<Vec<PathBuf>, VisualizeError> {
        if !in_file.is_file() {
            return Err(VisualizeError::MissingInput(in_file.to_path_buf()));
        }
        let image = image::open(in_file)?.to_rgb8();
        let stem = in_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        ensure_dir(out_folder)?;

        let overlays = render_overlays(self, &image, style);
        let mut written = Vec::with_capacity(overlays.len());
        for (cfg, img) in self.configurations().iter().zip(&overlays) {
            let path = out_folder.join(format!("{}_{}.tif", stem, cfg.label()));
            img.save(&path)?;
            tracing::debug!("wrote {}", path.display());
            written.push(path);
        }
        tracing::info!("{} overlays saved to {}", written.len(), out_folder.display());
        Ok(written)
    }

    /// Save one top view per camera as `<out_folder>/<prefix>_<camera label>.tif`.
    pub fn generate_top_views(
        &self,
        out_folder: &Path,
        prefix: &str,
        style: &VisualStyle,
    ) -> Result<Vec<PathBuf>, VisualizeError> {
        ensure_dir(out_folder)?;
        let views = render_top_views(self, style);
        let mut written = Vec::with_capacity(views.len());
        for (cfg, img) in self.configurations().iter().zip(&views) {
            let path = out_folder.join(format!("{}_{}.tif", prefix, cfg.label()));
            img.save(&path)?;
            tracing::debug!("wrote {}", path.display());
            written.push(path);
        }
        tracing::info!("{} top views saved to {}", written.len(), out_folder.display());
        Ok(written)
    }
}

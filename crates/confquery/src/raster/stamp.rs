//! Thick lines and dots drawn into `image` buffers.

use image::{ImageBuffer, Pixel};

use super::{FillRule, Polygon, ScanFill};

/// Sweep a rectangle of full width `width` along every segment.
///
/// Each segment is extended by `width / 2` at both ends so consecutive
/// segments overlap at joints. All rectangles share one orientation;
/// fill the result with [`FillRule::NonZero`] to get their union.
pub fn expand_polyline(points: &[[f64; 2]], width: f64) -> Polygon {
    let half = 0.5 * width;
    let mut poly = Polygon::default();
    if !(half > 0.0) {
        return poly;
    }
    for seg in points.windows(2) {
        let (p, q) = (seg[0], seg[1]);
        let (dx, dy) = (q[0] - p[0], q[1] - p[1]);
        let len = dx.hypot(dy);
        if !(len > 1e-12 && len.is_finite()) {
            continue;
        }
        let (tx, ty) = (dx / len * half, dy / len * half);
        let (nx, ny) = (-ty, tx);
        poly.push_sheet(vec![
            [p[0] - tx + nx, p[1] - ty + ny],
            [q[0] + tx + nx, q[1] + ty + ny],
            [q[0] + tx - nx, q[1] + ty - ny],
            [p[0] - tx - nx, p[1] - ty - ny],
        ]);
    }
    poly
}

/// Disk approximation: vertices every 10° plus the four diagonals, sorted by
/// angle (40 vertices).
pub fn dot_polygon(center: [f64; 2], radius: f64) -> Polygon {
    let mut angles: Vec<f64> = (0..36).map(|i| f64::from(i) * 10.0).collect();
    angles.extend([45.0, 135.0, 225.0, 315.0]);
    angles.sort_by(f64::total_cmp);
    Polygon::single(
        angles
            .into_iter()
            .map(|deg| {
                let a = deg.to_radians();
                [center[0] + radius * a.cos(), center[1] + radius * a.sin()]
            })
            .collect(),
    )
}

/// Paint every pixel touched by `polygon`. Returns the number of writes.
pub fn fill_polygon<P: Pixel>(
    img: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    polygon: &Polygon,
    rule: FillRule,
    color: P,
) -> usize {
    let mut written = 0;
    ScanFill::new(polygon)
        .with_rule(rule)
        .with_boundary(true)
        .clip_to(img.width(), img.height())
        .for_each_pixel(|x, y| {
            img.put_pixel(x as u32, y as u32, color);
            written += 1;
        });
    written
}

pub fn stamp_polyline<P: Pixel>(
    img: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    points: &[[f64; 2]],
    color: P,
    width: f64,
) -> usize {
    fill_polygon(img, &expand_polyline(points, width), FillRule::NonZero, color)
}

pub fn stamp_dot<P: Pixel>(
    img: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    center: [f64; 2],
    color: P,
    radius: f64,
) -> usize {
    if !(radius > 0.0) {
        return 0;
    }
    fill_polygon(img, &dot_polygon(center, radius), FillRule::EvenOdd, color)
}

//! Hue ring geometry.
//!
//! Hue 0 sits at 12 o'clock and grows clockwise in screen coordinates
//! (y pointing down). Pointer hits are only accepted inside the annular band
//! between `radius - width / 2` and `radius + width / 2`.

use image::{Rgba, RgbaImage};

use crate::color::{hsl_to_rgb, normalize_hue, Hsl};

/// A point in component-local logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Places `hue` on a circle of `radius` around `center`.
pub fn hue_to_point(hue: f64, center: Point, radius: f64) -> Point {
    let angle = (hue - 90.0).to_radians();
    Point {
        x: center.x + angle.cos() * radius,
        y: center.y + angle.sin() * radius,
    }
}

/// Maps a point back to a hue, or `None` when it falls outside the band.
///
/// Points exactly on `inner` or `outer` count as hits. Non-finite
/// coordinates never do.
pub fn point_to_hue(point: Point, center: Point, inner: f64, outer: f64) -> Option<f64> {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let dist = dx.hypot(dy);
    if !(inner..=outer).contains(&dist) {
        return None;
    }
    let angle = dy.atan2(dx).to_degrees();
    Some(normalize_hue((angle + 90.0 + 360.0) % 360.0))
}

/// Ring placement: where the ring is centered, its center-line radius and
/// the width of the hit band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub center: Point,
    pub radius: f64,
    pub width: f64,
}

impl RingGeometry {
    pub const fn new(center: Point, radius: f64, width: f64) -> Self {
        Self {
            center,
            radius,
            width,
        }
    }

    /// Ring centered in a square canvas of `size` pixels.
    pub fn centered(size: u32, radius: f64, width: f64) -> Self {
        let half = size as f64 / 2.0;
        Self::new(Point::new(half, half), radius, width)
    }

    pub fn inner(&self) -> f64 {
        self.radius - self.width / 2.0
    }

    pub fn outer(&self) -> f64 {
        self.radius + self.width / 2.0
    }

    pub fn point_for_hue(&self, hue: f64) -> Point {
        hue_to_point(hue, self.center, self.radius)
    }

    pub fn hue_at(&self, point: Point) -> Option<f64> {
        point_to_hue(point, self.center, self.inner(), self.outer())
    }
}

/// Rasterizes the ring into a `size` x `size` image.
///
/// Pixels whose centers fall inside the band are painted with the fully
/// saturated hue at that angle; everything else is transparent.
pub fn render_hue_ring(geometry: &RingGeometry, size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |px, py| {
        let p = Point::new(px as f64 + 0.5, py as f64 + 0.5);
        match geometry.hue_at(p) {
            Some(hue) => {
                let c = hsl_to_rgb(Hsl::new(hue, 1.0, 0.5));
                Rgba([c.r, c.g, c.b, 255])
            }
            None => Rgba([0, 0, 0, 0]),
        }
    })
}

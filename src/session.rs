//! Session state: the currently selected color.
//!
//! The session keeps the HSL triple the ring works on together with the exact
//! RGB being shown. Ring moves derive the RGB from HSL; presets and sampled
//! colors keep their decoded RGB so the displayed value is not re-quantized
//! through a hue round trip.

use log::debug;

use crate::color::{
    hex_to_rgb, hsl_to_rgb, normalize_hue, rgb_to_hsl, rounded_hue, ColorDisplay, Hsl, Rgb,
};
use crate::error::PickerError;
use crate::ring::{Point, RingGeometry};

/// Color selected when nothing else is configured.
pub const DEFAULT_COLOR: Hsl = Hsl::new(320.0, 0.76, 0.62);

/// Where the ring thumb goes and how it is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thumb {
    pub position: Point,
    /// The pure hue at full saturation and half lightness.
    pub color: Rgb,
    /// Hue rounded to whole degrees.
    pub value: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    hsl: Hsl,
    rgb: Rgb,
    dragging: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR)
    }
}

impl Session {
    /// Starts a session on `initial`, with its hue wrapped into `[0, 360)`.
    pub fn new(initial: Hsl) -> Self {
        let hsl = Hsl::new(normalize_hue(initial.h), initial.s, initial.l);
        Self {
            hsl,
            rgb: hsl_to_rgb(hsl),
            dragging: false,
        }
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    /// The RGB value currently displayed.
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn display(&self) -> ColorDisplay {
        ColorDisplay::from_rgb(self.rgb)
    }

    pub fn thumb(&self, ring: &RingGeometry) -> Thumb {
        Thumb {
            position: ring.point_for_hue(self.hsl.h),
            color: hsl_to_rgb(Hsl::new(self.hsl.h, 1.0, 0.5)),
            value: rounded_hue(self.hsl.h),
        }
    }

    /// Pointer pressed on the ring canvas. Starts a drag even when the press
    /// itself lands outside the band.
    pub fn pointer_down(&mut self, ring: &RingGeometry, point: Point) -> bool {
        self.dragging = true;
        self.set_hue_at(ring, point)
    }

    /// Pointer moved; only acts while a drag is in progress.
    pub fn pointer_move(&mut self, ring: &RingGeometry, point: Point) -> bool {
        if !self.dragging {
            return false;
        }
        self.set_hue_at(ring, point)
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Sets the hue from a ring hit, keeping saturation and lightness.
    ///
    /// Returns `false` and leaves the state untouched when the point is
    /// outside the band.
    pub fn set_hue_at(&mut self, ring: &RingGeometry, point: Point) -> bool {
        let Some(h) = ring.hue_at(point) else {
            return false;
        };
        self.hsl.h = h;
        self.rgb = hsl_to_rgb(self.hsl);
        debug!("ring hue -> {h:.1} ({})", self.rgb);
        true
    }

    /// A preset swatch was chosen.
    pub fn select_preset(&mut self, hex: &str) -> Result<Rgb, PickerError> {
        self.apply_hex(hex)
    }

    /// A color came back from the screen sampler.
    pub fn apply_sample(&mut self, hex: &str) -> Result<Rgb, PickerError> {
        self.apply_hex(hex)
    }

    fn apply_hex(&mut self, hex: &str) -> Result<Rgb, PickerError> {
        let rgb = hex_to_rgb(hex)?;
        self.hsl = rgb_to_hsl(rgb);
        self.rgb = rgb;
        debug!("selected {rgb}");
        Ok(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> RingGeometry {
        RingGeometry::new(Point::new(150.0, 150.0), 110.0, 26.0)
    }

    #[test]
    fn starts_with_default_color() {
        let session = Session::default();
        assert_eq!(session.hsl(), DEFAULT_COLOR);
        assert_eq!(session.rgb(), Rgb::new(232, 84, 183));
        assert_eq!(session.hex(), "#E854B7");
        assert!(!session.is_dragging());
    }

    #[test]
    fn initial_hue_wraps_into_range() {
        let session = Session::new(Hsl::new(400.0, 0.5, 0.5));
        assert_eq!(session.hsl(), Hsl::new(40.0, 0.5, 0.5));
        assert_eq!(session.rgb(), hsl_to_rgb(Hsl::new(40.0, 0.5, 0.5)));

        let session = Session::new(Hsl::new(-40.0, 0.5, 0.5));
        assert_eq!(session.hsl().h, 320.0);
        assert_eq!(session.thumb(&ring()).value, 320);
    }

    #[test]
    fn press_in_band_sets_hue_only() {
        let mut session = Session::default();
        // 3 o'clock on the ring is hue 90
        assert!(session.pointer_down(&ring(), Point::new(260.0, 150.0)));
        let hsl = session.hsl();
        assert!((hsl.h - 90.0).abs() < 1e-9, "h = {}", hsl.h);
        assert_eq!(hsl.s, 0.76);
        assert_eq!(hsl.l, 0.62);
        assert_eq!(session.rgb(), hsl_to_rgb(hsl));
    }

    #[test]
    fn press_at_center_leaves_state_unchanged() {
        let mut session = Session::default();
        let before = session.clone();
        assert!(!session.pointer_down(&ring(), Point::new(150.0, 150.0)));
        assert_eq!(session.hsl(), before.hsl());
        assert_eq!(session.rgb(), before.rgb());
        // still counts as the start of a drag
        assert!(session.is_dragging());
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut session = Session::default();
        assert!(!session.pointer_move(&ring(), Point::new(260.0, 150.0)));
        assert_eq!(session.hsl(), DEFAULT_COLOR);
    }

    #[test]
    fn drag_follows_pointer_until_release() {
        let mut session = Session::default();
        session.pointer_down(&ring(), Point::new(150.0, 150.0));
        assert!(session.pointer_move(&ring(), Point::new(150.0, 260.0)));
        assert!((session.hsl().h - 180.0).abs() < 1e-9);

        // leaving the band mid-drag keeps the last hue
        assert!(!session.pointer_move(&ring(), Point::new(150.0, 150.0)));
        assert!((session.hsl().h - 180.0).abs() < 1e-9);

        session.pointer_up();
        assert!(!session.pointer_move(&ring(), Point::new(40.0, 150.0)));
        assert!((session.hsl().h - 180.0).abs() < 1e-9);
    }

    #[test]
    fn preset_keeps_exact_rgb() {
        let mut session = Session::default();
        let rgb = session.select_preset("#1e90ff").unwrap();
        assert_eq!(rgb, Rgb::new(30, 144, 255));
        assert_eq!(session.rgb(), rgb);
        assert!((session.hsl().h - 209.6).abs() < 1e-9);
        assert_eq!(session.display().hex, "#1E90FF");
    }

    #[test]
    fn invalid_preset_leaves_state_unchanged() {
        let mut session = Session::default();
        let err = session.select_preset("#12345").unwrap_err();
        assert_eq!(err, PickerError::InvalidFormat("#12345".into()));
        assert_eq!(session.hsl(), DEFAULT_COLOR);
        assert_eq!(session.rgb(), Rgb::new(232, 84, 183));
    }

    #[test]
    fn sample_path_matches_preset_path() {
        let mut a = Session::default();
        let mut b = Session::default();
        a.select_preset("#336699").unwrap();
        b.apply_sample("#336699").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn gray_preset_keeps_saturation_zero() {
        let mut session = Session::default();
        session.select_preset("#808080").unwrap();
        assert_eq!(session.hsl().s, 0.0);
        assert_eq!(session.rgb(), Rgb::new(128, 128, 128));
    }

    #[test]
    fn thumb_tracks_hue() {
        let mut session = Session::default();
        session.select_preset("#FF0000").unwrap();
        let thumb = session.thumb(&ring());
        assert!((thumb.position.x - 150.0).abs() < 1e-9);
        assert!((thumb.position.y - 40.0).abs() < 1e-9);
        assert_eq!(thumb.color, Rgb::new(255, 0, 0));
        assert_eq!(thumb.value, 0);
    }

    #[test]
    fn thumb_color_ignores_saturation_and_lightness() {
        let mut session = Session::new(Hsl::new(120.0, 0.2, 0.9));
        assert_eq!(session.thumb(&ring()).color, Rgb::new(0, 255, 0));
        session.pointer_down(&ring(), Point::new(150.0, 260.0));
        assert_eq!(session.thumb(&ring()).color, Rgb::new(0, 255, 255));
        assert_eq!(session.thumb(&ring()).value, 180);
    }
}

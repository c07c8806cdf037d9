// THEORY:
// The `Proportions` model is the single source of geometric truth for the
// compositor. Every generator reads its anchors from here instead of carrying
// its own magic numbers, which is what keeps feature placement consistent and
// testable across categories.
//
// Key architectural principles:
// 1.  **Anatomical Anchoring**: All placement hangs off one anchor, the canvas
//     center. The face box, the eye line, the nose span and the mouth line are
//     fixed offsets from that anchor.
// 2.  **Shape Invariance**: Offsets are constants, not functions of the chosen
//     face shape. A round face and an oblong face put the eyes at the same
//     coordinates. This is a known limitation of the schematic, kept on purpose
//     so that categories stay independent of one another.
// 3.  **Read-Only**: Nothing here mutates. Generators receive `&Proportions`
//     and only ever ask it questions.

use serde::{Deserialize, Serialize};

/// An inclusive pixel rectangle, `left..=right` by `top..=bottom`.
///
/// This is the bounding-box convention every drawing primitive uses: an ellipse
/// drawn on `Bounds::new(126, 76, 386, 436)` touches pixel column 126 and
/// pixel column 386.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Box of half-extents `(half_w, half_h)` around `(cx, cy)`.
    pub const fn around(cx: i32, cy: i32, half_w: i32, half_h: i32) -> Self {
        Self::new(cx - half_w, cy - half_h, cx + half_w, cy + half_h)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Geometric center, in pixel-center coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) as f64 / 2.0,
            (self.top + self.bottom) as f64 / 2.0,
        )
    }
}

/// Canvas geometry and the per-category offset table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proportions {
    /// Width of the canvas in pixels.
    pub canvas_width: u32,
    /// Height of the canvas in pixels.
    pub canvas_height: u32,
    /// The opaque color every composite starts from.
    pub background: [u8; 3],
    /// Width of the reference face box.
    pub face_width: i32,
    /// Height of the reference face box.
    pub face_height: i32,
    /// Horizontal distance from the center line to each eye.
    pub eye_spacing: i32,
    /// Vertical offset of the brow line from the canvas center.
    pub eyebrow_offset: i32,
    /// Vertical offset of the eye line from the canvas center.
    pub eye_offset: i32,
    /// Where the nose bridge starts, relative to the canvas center.
    pub nose_start_offset: i32,
    /// Where the nose tip sits, relative to the canvas center.
    pub nose_end_offset: i32,
    /// Vertical offset of the mouth line from the canvas center.
    pub mouth_offset: i32,
    /// Number of single-pixel marks in a stubble layer.
    pub stubble_points: usize,
    /// Horizontal half-spread of stubble around the center line.
    pub stubble_spread: i32,
    /// How far above the mouth line stubble may start.
    pub stubble_rise: i32,
    /// How far below the mouth line stubble may reach.
    pub stubble_drop: i32,
    /// Scar start point, relative to the canvas center.
    pub scar_offset: (i32, i32),
    /// Mole center, relative to the canvas center.
    pub mole_offset: (i32, i32),
    /// Vertical offset of the broken-nose bump.
    pub broken_nose_offset: i32,
    /// Vertical offset of the forehead birthmark.
    pub birthmark_offset: i32,
}

impl Default for Proportions {
    fn default() -> Self {
        Self {
            canvas_width: 512,
            canvas_height: 512,
            background: [245, 245, 245],
            face_width: 260,
            face_height: 360,
            eye_spacing: 75,
            eyebrow_offset: -70,
            eye_offset: -40,
            nose_start_offset: -20,
            nose_end_offset: 50,
            mouth_offset: 90,
            stubble_points: 100,
            stubble_spread: 70,
            stubble_rise: 15,
            stubble_drop: 55,
            scar_offset: (-60, 20),
            mole_offset: (50, 30),
            broken_nose_offset: 10,
            birthmark_offset: -100,
        }
    }
}

impl Proportions {
    /// The anatomical anchor every offset is measured from.
    pub fn center(&self) -> (i32, i32) {
        ((self.canvas_width / 2) as i32, (self.canvas_height / 2) as i32)
    }

    pub fn center_x(&self) -> i32 {
        self.center().0
    }

    pub fn center_y(&self) -> i32 {
        self.center().1
    }

    pub fn face_left(&self) -> i32 {
        self.center_x() - self.face_width / 2
    }

    pub fn face_right(&self) -> i32 {
        self.center_x() + self.face_width / 2
    }

    pub fn face_top(&self) -> i32 {
        self.center_y() - self.face_height / 2
    }

    pub fn face_bottom(&self) -> i32 {
        self.center_y() + self.face_height / 2
    }

    pub fn face_box(&self) -> Bounds {
        Bounds::new(self.face_left(), self.face_top(), self.face_right(), self.face_bottom())
    }

    pub fn left_eye_x(&self) -> i32 {
        self.center_x() - self.eye_spacing
    }

    pub fn right_eye_x(&self) -> i32 {
        self.center_x() + self.eye_spacing
    }

    pub fn eyebrow_y(&self) -> i32 {
        self.center_y() + self.eyebrow_offset
    }

    pub fn eye_y(&self) -> i32 {
        self.center_y() + self.eye_offset
    }

    pub fn nose_start_y(&self) -> i32 {
        self.center_y() + self.nose_start_offset
    }

    pub fn nose_end_y(&self) -> i32 {
        self.center_y() + self.nose_end_offset
    }

    pub fn mouth_y(&self) -> i32 {
        self.center_y() + self.mouth_offset
    }

    /// The fixed box every eye variant draws inside of.
    ///
    /// Changing only the eye selection can never alter a pixel outside it.
    pub fn eye_region(&self) -> Bounds {
        Bounds::new(
            self.left_eye_x() - 40,
            self.eye_y() - 35,
            self.right_eye_x() + 40,
            self.eye_y() + 35,
        )
    }

    /// The box stubble points are sampled from.
    pub fn stubble_region(&self) -> Bounds {
        Bounds::new(
            self.center_x() - self.stubble_spread,
            self.mouth_y() - self.stubble_rise,
            self.center_x() + self.stubble_spread,
            self.mouth_y() + self.stubble_drop,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_face_box_matches_reference_geometry() {
        let p = Proportions::default();
        assert_eq!(p.center(), (256, 256));
        assert_eq!(p.face_box(), Bounds::new(126, 76, 386, 436));
    }

    #[test]
    fn feature_lines_hang_off_the_center() {
        let p = Proportions::default();
        assert_eq!((p.left_eye_x(), p.right_eye_x()), (181, 331));
        assert_eq!(p.eyebrow_y(), 186);
        assert_eq!(p.eye_y(), 216);
        assert_eq!((p.nose_start_y(), p.nose_end_y()), (236, 306));
        assert_eq!(p.mouth_y(), 346);
    }

    #[test]
    fn eye_region_is_fixed() {
        let p = Proportions::default();
        assert_eq!(p.eye_region(), Bounds::new(141, 181, 371, 251));
        assert!(p.eye_region().contains(141, 251));
        assert!(!p.eye_region().contains(140, 216));
    }

    #[test]
    fn stubble_region_brackets_the_mouth() {
        let p = Proportions::default();
        assert_eq!(p.stubble_region(), Bounds::new(186, 331, 326, 401));
    }
}

// THEORY:
// A `Layer` is a canvas-sized, fully transparent RGBA buffer that exactly one
// feature generator draws into. It is the unit the compositor stacks.
//
// Key architectural principles:
// 1.  **Replace, Don't Blend**: Painting inside a layer overwrites the pixel,
//     alpha included. A translucent fill drawn over an opaque stroke leaves a
//     translucent pixel behind. All blending is deferred to the compositor, so a
//     layer is a pure description of "what this feature covers, and how much."
// 2.  **Integer Pixel Centers**: Every primitive decides coverage by testing the
//     center of each integer pixel against an analytic shape. No anti-aliasing,
//     no accumulated error: the same call always lights the same pixels.
// 3.  **Inclusive Bounding Boxes**: Ellipses, arcs and rectangles are described
//     by an inclusive `Bounds`. An ellipse on `left..=right` reaches both the
//     `left` and `right` pixel columns.
// 4.  **Silent Clipping**: Anything that falls off the canvas is dropped.
//     Generators never need to reason about canvas edges.

use crate::core_modules::proportions::Bounds;
use image::{Rgba, RgbaImage};

pub type Color = Rgba<u8>;

/// The "nothing drawn here" pixel every layer starts from.
pub const TRANSPARENT: Color = Rgba([255, 255, 255, 0]);
pub const BLACK: Color = Rgba([0, 0, 0, 255]);
pub const DARK_RED: Color = Rgba([139, 0, 0, 255]);
pub const BROWN: Color = Rgba([165, 42, 42, 255]);
/// Half-transparent saddle brown used to tint a birthmark.
pub const BIRTHMARK_FILL: Color = Rgba([139, 69, 19, 128]);
/// Half-transparent gray used to shade a goatee.
pub const GOATEE_FILL: Color = Rgba([100, 100, 100, 128]);

/// A transparent drawing surface holding a single feature's strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    image: RgbaImage,
}

impl Layer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, TRANSPARENT),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        *self.image.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// True when no pixel carries any alpha.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }

    /// The smallest box enclosing every pixel with non-zero alpha.
    pub fn painted_bounds(&self) -> Option<Bounds> {
        let mut found: Option<Bounds> = None;
        for (x, y, p) in self.image.enumerate_pixels() {
            if p[3] == 0 {
                continue;
            }
            let (x, y) = (x as i32, y as i32);
            found = Some(match found {
                None => Bounds::new(x, y, x, y),
                Some(b) => Bounds::new(b.left.min(x), b.top.min(y), b.right.max(x), b.bottom.max(y)),
            });
        }
        found
    }

    fn paint(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, color);
    }

    /// Clamps a box to the canvas, or `None` if it misses the canvas entirely.
    fn clip(&self, b: Bounds) -> Option<Bounds> {
        let clipped = Bounds::new(
            b.left.max(0),
            b.top.max(0),
            b.right.min(self.width() as i32 - 1),
            b.bottom.min(self.height() as i32 - 1),
        );
        (clipped.left <= clipped.right && clipped.top <= clipped.bottom).then_some(clipped)
    }

    /// Paints every pixel of `region` for which `covered` answers true.
    fn fill_where(&mut self, region: Bounds, color: Color, covered: impl Fn(i32, i32) -> bool) {
        let Some(region) = self.clip(region) else {
            return;
        };
        for y in region.top..=region.bottom {
            for x in region.left..=region.right {
                if covered(x, y) {
                    self.paint(x, y, color);
                }
            }
        }
    }

    /// A single-pixel mark.
    pub fn point(&mut self, x: i32, y: i32, color: Color) {
        self.paint(x, y, color);
    }

    /// An open polyline of stroke `width` through `points`.
    pub fn line(&mut self, points: &[(i32, i32)], width: u32, color: Color) {
        match points {
            [] => {}
            [only] => self.stamp(*only, width, color),
            _ => {
                for pair in points.windows(2) {
                    self.segment(pair[0], pair[1], width, color);
                }
                for joint in &points[1..points.len() - 1] {
                    self.stamp(*joint, width, color);
                }
            }
        }
    }

    /// A closed polygon outline of stroke `width`.
    pub fn polygon(&mut self, points: &[(i32, i32)], width: u32, color: Color) {
        if points.len() < 2 {
            self.line(points, width, color);
            return;
        }
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.segment(from, to, width, color);
        }
        for &vertex in points {
            self.stamp(vertex, width, color);
        }
    }

    /// A rectangle outline whose stroke grows inward from `bounds`.
    pub fn rectangle(&mut self, bounds: Bounds, width: u32, color: Color) {
        let w = width as i32;
        let inner = Bounds::new(bounds.left + w, bounds.top + w, bounds.right - w, bounds.bottom - w);
        self.fill_where(bounds, color, |x, y| !inner.contains(x, y));
    }

    /// An ellipse outline whose stroke grows inward from `bounds`.
    pub fn ellipse(&mut self, bounds: Bounds, width: u32, color: Color) {
        let ring = EllipseRing::new(bounds, width);
        self.fill_where(bounds, color, |x, y| ring.covers(x, y));
    }

    /// A solid ellipse filling `bounds`.
    pub fn filled_ellipse(&mut self, bounds: Bounds, color: Color) {
        let ring = EllipseRing::new(bounds, 0);
        self.fill_where(bounds, color, |x, y| ring.inside_outer(x, y));
    }

    /// A filled ellipse with an outline painted over the fill.
    pub fn outlined_ellipse(&mut self, bounds: Bounds, fill: Color, outline: Color, width: u32) {
        self.filled_ellipse(bounds, fill);
        self.ellipse(bounds, width, outline);
    }

    /// The part of the ellipse outline between `start` and `end` degrees.
    ///
    /// Angles run clockwise from three o'clock in image space, so `0..180` is
    /// the lower half and `180..360` the upper half.
    pub fn arc(&mut self, bounds: Bounds, start: f64, end: f64, width: u32, color: Color) {
        let ring = EllipseRing::new(bounds, width);
        let sweep = Sweep::new(start, end);
        self.fill_where(bounds, color, |x, y| ring.covers(x, y) && sweep.contains(ring.angle(x, y)));
    }

    fn segment(&mut self, from: (i32, i32), to: (i32, i32), width: u32, color: Color) {
        let (ax, ay) = (from.0 as f64, from.1 as f64);
        let (dx, dy) = (to.0 as f64 - ax, to.1 as f64 - ay);
        let length_sq = dx * dx + dy * dy;
        if length_sq == 0.0 {
            self.stamp(from, width, color);
            return;
        }
        let length = length_sq.sqrt();
        let half = width as f64 / 2.0;
        let reach = width as i32 / 2 + 1;
        let region = Bounds::new(
            from.0.min(to.0) - reach,
            from.1.min(to.1) - reach,
            from.0.max(to.0) + reach,
            from.1.max(to.1) + reach,
        );
        self.fill_where(region, color, |x, y| {
            let (px, py) = (x as f64 - ax, y as f64 - ay);
            let t = (px * dx + py * dy) / length_sq;
            if !(0.0..=1.0).contains(&t) {
                return false;
            }
            let offset = (px * dy - py * dx) / length;
            offset >= -half && offset < half
        });
    }

    /// A round dab of diameter `width`, used to close polyline joints.
    fn stamp(&mut self, at: (i32, i32), width: u32, color: Color) {
        if width <= 1 {
            self.paint(at.0, at.1, color);
            return;
        }
        let half = width as f64 / 2.0;
        let reach = width as i32 / 2;
        let region = Bounds::around(at.0, at.1, reach, reach);
        self.fill_where(region, color, |x, y| {
            let (dx, dy) = ((x - at.0) as f64, (y - at.1) as f64);
            dx * dx + dy * dy <= half * half
        });
    }
}

/// The band between an ellipse inscribed in a box and the same ellipse shrunk
/// by the stroke width.
struct EllipseRing {
    cx: f64,
    cy: f64,
    outer: (f64, f64),
    inner: (f64, f64),
}

impl EllipseRing {
    fn new(bounds: Bounds, width: u32) -> Self {
        let (cx, cy) = bounds.center();
        let outer = (
            bounds.width() as f64 / 2.0 + 0.5,
            bounds.height() as f64 / 2.0 + 0.5,
        );
        let inner = (outer.0 - width as f64, outer.1 - width as f64);
        Self { cx, cy, outer, inner }
    }

    fn norm(&self, x: i32, y: i32, radii: (f64, f64)) -> f64 {
        let nx = (x as f64 - self.cx) / radii.0;
        let ny = (y as f64 - self.cy) / radii.1;
        nx * nx + ny * ny
    }

    fn inside_outer(&self, x: i32, y: i32) -> bool {
        self.norm(x, y, self.outer) <= 1.0
    }

    fn covers(&self, x: i32, y: i32) -> bool {
        if !self.inside_outer(x, y) {
            return false;
        }
        // A stroke at least as wide as the radius fills the whole ellipse.
        if self.inner.0 <= 0.0 || self.inner.1 <= 0.0 {
            return true;
        }
        self.norm(x, y, self.inner) >= 1.0
    }

    /// Parametric angle of a pixel center in degrees, `0..360`.
    fn angle(&self, x: i32, y: i32) -> f64 {
        let nx = (x as f64 - self.cx) / self.outer.0;
        let ny = (y as f64 - self.cy) / self.outer.1;
        ny.atan2(nx).to_degrees().rem_euclid(360.0)
    }
}

/// An angular interval, normalised so its start lies in `0..360`.
struct Sweep {
    start: f64,
    end: f64,
    full: bool,
}

impl Sweep {
    fn new(start: f64, end: f64) -> Self {
        let span = end - start;
        let start = start.rem_euclid(360.0);
        Self {
            start,
            end: start + span,
            full: span >= 360.0,
        }
    }

    fn contains(&self, angle: f64) -> bool {
        self.full
            || (angle >= self.start && angle <= self.end)
            || (angle + 360.0 >= self.start && angle + 360.0 <= self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_painted(layer: &Layer) -> usize {
        layer.as_image().pixels().filter(|p| p[3] != 0).count()
    }

    #[test]
    fn new_layer_is_blank() {
        let layer = Layer::new(64, 64);
        assert!(layer.is_blank());
        assert_eq!(layer.pixel(10, 10), TRANSPARENT);
        assert_eq!(layer.painted_bounds(), None);
    }

    #[test]
    fn ellipse_touches_its_inclusive_bounds() {
        let mut layer = Layer::new(512, 512);
        layer.ellipse(Bounds::new(126, 76, 386, 436), 4, BLACK);

        assert_eq!(layer.painted_bounds(), Some(Bounds::new(126, 76, 386, 436)));
        assert_eq!(layer.pixel(126, 256), BLACK);
        assert_eq!(layer.pixel(386, 256), BLACK);
        assert_eq!(layer.pixel(256, 76), BLACK);
        assert_eq!(layer.pixel(256, 436), BLACK);
    }

    #[test]
    fn ellipse_stroke_is_exactly_its_width_on_the_axes() {
        let mut layer = Layer::new(512, 512);
        layer.ellipse(Bounds::new(126, 76, 386, 436), 4, BLACK);

        for x in 126..=129 {
            assert_eq!(layer.pixel(x, 256), BLACK, "column {x} should be stroked");
        }
        assert_eq!(layer.pixel(130, 256), TRANSPARENT);
        for y in 76..=79 {
            assert_eq!(layer.pixel(256, y), BLACK, "row {y} should be stroked");
        }
        assert_eq!(layer.pixel(256, 80), TRANSPARENT);
        assert_eq!(layer.pixel(256, 256), TRANSPARENT);
    }

    #[test]
    fn filled_ellipse_covers_its_center() {
        let mut layer = Layer::new(64, 64);
        layer.filled_ellipse(Bounds::around(32, 32, 4, 4), BLACK);
        assert_eq!(layer.pixel(32, 32), BLACK);
        assert_eq!(layer.painted_bounds(), Some(Bounds::around(32, 32, 4, 4)));
    }

    #[test]
    fn outline_overrides_fill_without_blending() {
        let mut layer = Layer::new(64, 64);
        layer.outlined_ellipse(Bounds::around(32, 32, 20, 20), GOATEE_FILL, BLACK, 2);
        assert_eq!(layer.pixel(32, 32), GOATEE_FILL);
        assert_eq!(layer.pixel(12, 32), BLACK);
    }

    #[test]
    fn horizontal_line_has_exact_thickness() {
        let mut layer = Layer::new(64, 64);
        layer.line(&[(10, 30), (50, 30)], 4, BLACK);
        let column: Vec<u32> = (0..64).filter(|&y| layer.pixel(30, y)[3] != 0).collect();
        assert_eq!(column.len(), 4);
        assert!(column.contains(&30));

        let mut odd = Layer::new(64, 64);
        odd.line(&[(10, 30), (50, 30)], 5, BLACK);
        let column: Vec<u32> = (0..64).filter(|&y| odd.pixel(30, y)[3] != 0).collect();
        assert_eq!(column, vec![28, 29, 30, 31, 32]);
    }

    #[test]
    fn line_does_not_run_past_its_endpoints() {
        let mut layer = Layer::new(64, 64);
        layer.line(&[(10, 30), (50, 30)], 3, BLACK);
        let bounds = layer.painted_bounds().expect("line should paint");
        assert_eq!((bounds.left, bounds.right), (10, 50));
    }

    #[test]
    fn thin_diagonal_line_is_connected() {
        let mut layer = Layer::new(64, 64);
        layer.line(&[(0, 0), (40, 20)], 1, BLACK);
        for x in 0..=40 {
            assert!(
                (0..64).any(|y| layer.pixel(x, y)[3] != 0),
                "column {x} has a gap"
            );
        }
    }

    #[test]
    fn upper_arc_stays_above_its_center() {
        let mut layer = Layer::new(128, 128);
        layer.arc(Bounds::new(20, 20, 100, 100), 180.0, 360.0, 3, BLACK);
        let bounds = layer.painted_bounds().expect("arc should paint");
        assert!(bounds.bottom <= 60);
        assert_eq!(bounds.top, 20);
        assert_eq!(layer.pixel(60, 20), BLACK);
        assert_eq!(layer.pixel(60, 100), TRANSPARENT);
    }

    #[test]
    fn lower_arc_stays_below_its_center() {
        let mut layer = Layer::new(128, 128);
        layer.arc(Bounds::new(20, 20, 100, 100), 0.0, 180.0, 3, BLACK);
        let bounds = layer.painted_bounds().expect("arc should paint");
        assert!(bounds.top >= 60);
        assert_eq!(layer.pixel(60, 100), BLACK);
    }

    #[test]
    fn quarter_arc_covers_one_quadrant() {
        let mut layer = Layer::new(128, 128);
        layer.arc(Bounds::new(20, 20, 100, 100), 180.0, 270.0, 3, BLACK);
        let bounds = layer.painted_bounds().expect("arc should paint");
        assert!(bounds.right <= 60 && bounds.bottom <= 60);
    }

    #[test]
    fn full_sweep_arc_matches_ellipse() {
        let mut arc = Layer::new(64, 64);
        arc.arc(Bounds::around(32, 32, 10, 10), 0.0, 360.0, 2, BLACK);
        let mut ellipse = Layer::new(64, 64);
        ellipse.ellipse(Bounds::around(32, 32, 10, 10), 2, BLACK);
        assert_eq!(arc, ellipse);
    }

    #[test]
    fn rectangle_outline_leaves_interior_clear() {
        let mut layer = Layer::new(64, 64);
        layer.rectangle(Bounds::new(10, 10, 50, 50), 4, BLACK);
        assert_eq!(layer.pixel(10, 10), BLACK);
        assert_eq!(layer.pixel(13, 30), BLACK);
        assert_eq!(layer.pixel(14, 30), TRANSPARENT);
        assert_eq!(layer.painted_bounds(), Some(Bounds::new(10, 10, 50, 50)));
    }

    #[test]
    fn polygon_is_closed() {
        let mut layer = Layer::new(64, 64);
        layer.polygon(&[(32, 5), (55, 32), (32, 59), (9, 32)], 2, BLACK);
        assert_eq!(layer.pixel(32, 5), BLACK);
        assert_eq!(layer.pixel(9, 32), BLACK);
        assert_eq!(layer.pixel(32, 32), TRANSPARENT);
    }

    #[test]
    fn off_canvas_drawing_is_clipped() {
        let mut layer = Layer::new(32, 32);
        layer.point(-1, 5, BLACK);
        layer.point(40, 5, BLACK);
        layer.ellipse(Bounds::new(-20, -20, 10, 10), 3, BLACK);
        assert!(count_painted(&layer) > 0);
        layer.point(5, 5, BLACK);
        assert_eq!(layer.pixel(5, 5), BLACK);
    }

    #[test]
    fn single_point_is_one_pixel() {
        let mut layer = Layer::new(16, 16);
        layer.point(3, 4, BLACK);
        assert_eq!(count_painted(&layer), 1);
        assert_eq!(layer.painted_bounds(), Some(Bounds::new(3, 4, 3, 4)));
    }
}

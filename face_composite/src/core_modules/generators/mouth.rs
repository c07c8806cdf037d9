use super::blank;
use crate::core_modules::features::MouthShape;
use crate::core_modules::layer::{BLACK, Layer};
use crate::core_modules::proportions::{Bounds, Proportions};

/// Draws the lips on the mouth line.
pub fn draw(mouth: MouthShape, p: &Proportions) -> Layer {
    let mut layer = blank(p);
    let cx = p.center_x();
    let y = p.mouth_y();

    match mouth {
        MouthShape::Full => {
            lips(&mut layer, Bounds::new(cx - 45, y - 18, cx + 45, y), Bounds::new(cx - 45, y, cx + 45, y + 28), 5);
        }
        MouthShape::Thin => {
            layer.line(&[(cx - 42, y), (cx + 42, y)], 4, BLACK);
            layer.arc(Bounds::new(cx - 42, y - 5, cx + 42, y + 5), 0.0, 180.0, 3, BLACK);
        }
        MouthShape::Wide => {
            lips(&mut layer, Bounds::new(cx - 55, y - 15, cx + 55, y + 2), Bounds::new(cx - 55, y - 2, cx + 55, y + 20), 5);
        }
        MouthShape::Small => {
            lips(&mut layer, Bounds::new(cx - 30, y - 12, cx + 30, y), Bounds::new(cx - 30, y, cx + 30, y + 18), 4);
        }
        MouthShape::Bow => {
            // Cupid's bow.
            let bow = [
                (cx - 45, y - 8),
                (cx - 15, y - 12),
                (cx, y - 8),
                (cx + 15, y - 12),
                (cx + 45, y - 8),
            ];
            layer.line(&bow, 4, BLACK);
            layer.arc(Bounds::new(cx - 45, y - 8, cx + 45, y + 20), 180.0, 360.0, 5, BLACK);
        }
        MouthShape::Downturned => {
            layer.arc(Bounds::new(cx - 45, y + 5, cx + 45, y + 30), 0.0, 180.0, 5, BLACK);
        }
        MouthShape::Neutral => {
            lips(&mut layer, Bounds::new(cx - 42, y - 15, cx + 42, y), Bounds::new(cx - 42, y, cx + 42, y + 22), 4);
        }
    }

    layer
}

/// An upper lip drawn as the lower half of `upper` and a lower lip drawn as
/// the upper half of `lower`.
fn lips(layer: &mut Layer, upper: Bounds, lower: Bounds, width: u32) {
    layer.arc(upper, 0.0, 180.0, width, BLACK);
    layer.arc(lower, 180.0, 360.0, width, BLACK);
}

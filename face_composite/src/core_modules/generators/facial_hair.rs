use super::blank;
use crate::core_modules::features::FacialHair;
use crate::core_modules::layer::{BLACK, GOATEE_FILL, Layer};
use crate::core_modules::proportions::{Bounds, Proportions};
use rand::Rng;

/// Draws facial hair around the mouth line.
///
/// `rng` is only consumed by stubble.
pub fn draw<R: Rng + ?Sized>(style: FacialHair, p: &Proportions, rng: &mut R) -> Layer {
    let mut layer = blank(p);
    let (cx, cy) = p.center();
    let mouth_y = p.mouth_y();

    match style {
        FacialHair::Mustache => {
            layer.arc(Bounds::new(cx - 50, mouth_y - 35, cx - 10, mouth_y - 10), 0.0, 180.0, 6, BLACK);
            layer.arc(Bounds::new(cx + 10, mouth_y - 35, cx + 50, mouth_y - 10), 0.0, 180.0, 6, BLACK);
        }
        FacialHair::Beard => {
            layer.arc(Bounds::new(cx - 70, mouth_y, cx + 70, p.face_bottom() + 30), 0.0, 180.0, 8, BLACK);
            // Sideburns.
            layer.line(&[(cx - 70, mouth_y + 20), (cx - 100, cy)], 6, BLACK);
            layer.line(&[(cx + 70, mouth_y + 20), (cx + 100, cy)], 6, BLACK);
        }
        FacialHair::Goatee => {
            layer.outlined_ellipse(Bounds::new(cx - 25, mouth_y + 15, cx + 25, mouth_y + 65), GOATEE_FILL, BLACK, 4);
        }
        FacialHair::Stubble => {
            let region = p.stubble_region();
            if region.left > region.right || region.top > region.bottom {
                return layer;
            }
            for _ in 0..p.stubble_points {
                let x = rng.random_range(region.left..=region.right);
                let y = rng.random_range(region.top..=region.bottom);
                layer.point(x, y, BLACK);
            }
        }
        FacialHair::Unrecognized => {}
    }

    layer
}

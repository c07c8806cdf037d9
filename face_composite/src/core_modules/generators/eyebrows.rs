use super::blank;
use crate::core_modules::features::Eyebrows;
use crate::core_modules::layer::{BLACK, Layer};
use crate::core_modules::proportions::{Bounds, Proportions};

const HALF_LENGTH: i32 = 40;

/// Draws both brows on the brow line, mirrored about the center.
pub fn draw(brows: Eyebrows, p: &Proportions) -> Layer {
    let mut layer = blank(p);
    let y = p.eyebrow_y();
    let (left, right) = (p.left_eye_x(), p.right_eye_x());

    match brows {
        Eyebrows::Straight => flat_pair(&mut layer, left, right, y, 5),
        Eyebrows::Bushy => flat_pair(&mut layer, left, right, y, 8),
        Eyebrows::Thin => flat_pair(&mut layer, left, right, y, 3),
        Eyebrows::Arched => {
            for x in [left, right] {
                layer.arc(Bounds::new(x - HALF_LENGTH, y - 15, x + HALF_LENGTH, y + 5), 180.0, 360.0, 5, BLACK);
            }
        }
        Eyebrows::Rounded => {
            for x in [left, right] {
                layer.arc(Bounds::new(x - HALF_LENGTH, y - 10, x + HALF_LENGTH, y + 10), 180.0, 360.0, 5, BLACK);
            }
        }
        Eyebrows::Angled => {
            layer.line(&[(left - 40, y + 5), (left - 10, y - 5), (left + 40, y)], 5, BLACK);
            layer.line(&[(right - 40, y), (right + 10, y - 5), (right + 40, y + 5)], 5, BLACK);
        }
    }

    layer
}

fn flat_pair(layer: &mut Layer, left: i32, right: i32, y: i32, width: u32) {
    for x in [left, right] {
        layer.line(&[(x - HALF_LENGTH, y), (x + HALF_LENGTH, y)], width, BLACK);
    }
}

use super::blank;
use crate::core_modules::features::FaceShape;
use crate::core_modules::layer::{BLACK, Layer};
use crate::core_modules::proportions::{Bounds, Proportions};

const STROKE: u32 = 4;

/// Draws the face outline, centered on the canvas.
pub fn draw(shape: FaceShape, p: &Proportions) -> Layer {
    let mut layer = blank(p);
    let (cx, cy) = p.center();
    let (left, top, right, bottom) = (p.face_left(), p.face_top(), p.face_right(), p.face_bottom());

    match shape {
        FaceShape::Oval => layer.ellipse(p.face_box(), STROKE, BLACK),
        FaceShape::Round => {
            // Trim height down towards the width.
            let adjust = (p.face_height - p.face_width) / 2;
            layer.ellipse(Bounds::new(left, top + adjust, right, bottom - adjust), STROKE, BLACK);
        }
        FaceShape::Square => layer.rectangle(p.face_box(), STROKE, BLACK),
        FaceShape::Diamond => {
            let points = [(cx, top), (right, cy), (cx, bottom), (left, cy)];
            layer.polygon(&points, STROKE, BLACK);
        }
        FaceShape::Heart => {
            layer.arc(Bounds::new(left, top, cx - 10, top + 100), 180.0, 360.0, STROKE, BLACK);
            layer.arc(Bounds::new(cx + 10, top, right, top + 100), 180.0, 360.0, STROKE, BLACK);
            layer.line(&[(left, top + 50), (cx, bottom)], STROKE, BLACK);
            layer.line(&[(right, top + 50), (cx, bottom)], STROKE, BLACK);
        }
        FaceShape::Oblong => layer.ellipse(Bounds::new(left + 20, top, right - 20, bottom), STROKE, BLACK),
    }

    layer
}

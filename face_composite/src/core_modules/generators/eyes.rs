use super::blank;
use crate::core_modules::features::EyeShape;
use crate::core_modules::layer::{BLACK, Layer};
use crate::core_modules::proportions::{Bounds, Proportions};

/// Draws both eyes with pupils on the eye line.
pub fn draw(eyes: EyeShape, p: &Proportions) -> Layer {
    let mut layer = blank(p);
    let y = p.eye_y();
    let (left, right) = (p.left_eye_x(), p.right_eye_x());

    match eyes {
        EyeShape::Almond => {
            for x in [left, right] {
                layer.ellipse(Bounds::around(x, y, 35, 18), 4, BLACK);
            }
        }
        EyeShape::Round => {
            for x in [left, right] {
                layer.ellipse(Bounds::around(x, y, 28, 28), 4, BLACK);
            }
        }
        EyeShape::Hooded => {
            for x in [left, right] {
                layer.ellipse(Bounds::around(x, y, 35, 15), 4, BLACK);
                // Heavy upper lid.
                layer.arc(Bounds::new(x - 35, y - 25, x + 35, y - 5), 180.0, 360.0, 3, BLACK);
            }
        }
        EyeShape::Upturned => {
            layer.line(&[(left - 35, y + 5), (left, y - 10), (left + 35, y - 15)], 4, BLACK);
            layer.line(&[(right - 35, y - 15), (right, y - 10), (right + 35, y + 5)], 4, BLACK);
        }
        EyeShape::Downturned => {
            layer.line(&[(left - 35, y - 15), (left, y - 10), (left + 35, y + 5)], 4, BLACK);
            layer.line(&[(right - 35, y + 5), (right, y - 10), (right + 35, y - 15)], 4, BLACK);
        }
        EyeShape::Monolid => {
            for x in [left, right] {
                layer.ellipse(Bounds::around(x, y, 35, 15), 4, BLACK);
            }
        }
    }

    for x in [left, right] {
        layer.filled_ellipse(Bounds::around(x, y, 10, 10), BLACK);
    }

    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_eye_shape_stays_inside_the_eye_region() {
        let p = Proportions::default();
        let region = p.eye_region();
        for eyes in [
            EyeShape::Almond,
            EyeShape::Round,
            EyeShape::Hooded,
            EyeShape::Upturned,
            EyeShape::Downturned,
            EyeShape::Monolid,
        ] {
            let bounds = draw(eyes, &p).painted_bounds().unwrap();
            assert!(region.contains(bounds.left, bounds.top), "{eyes:?} leaks: {bounds:?}");
            assert!(region.contains(bounds.right, bounds.bottom), "{eyes:?} leaks: {bounds:?}");
        }
    }

    #[test]
    fn pupils_are_solid() {
        let p = Proportions::default();
        let layer = draw(EyeShape::Almond, &p);
        let y = p.eye_y() as u32;
        assert_eq!(layer.pixel(p.left_eye_x() as u32, y), BLACK);
        assert_eq!(layer.pixel(p.right_eye_x() as u32, y), BLACK);
    }
}

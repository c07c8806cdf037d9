use super::blank;
use crate::core_modules::features::HairType;
use crate::core_modules::layer::{BLACK, Layer};
use crate::core_modules::proportions::{Bounds, Proportions};

/// Draws the hairline above the face box.
pub fn draw(hair: HairType, p: &Proportions) -> Layer {
    let mut layer = blank(p);
    let cx = p.center_x();
    let top = p.face_top();
    let crown = Bounds::new(cx - 100, top - 70, cx + 100, top + 30);

    match hair {
        HairType::Bald => {
            layer.arc(Bounds::new(cx - 90, top - 60, cx + 90, top + 40), 180.0, 360.0, 4, BLACK);
        }
        HairType::RecedingHairline => {
            // M-shaped: two temple quarters and a dip in the middle.
            layer.arc(Bounds::new(cx - 90, top - 50, cx - 20, top + 20), 180.0, 270.0, 5, BLACK);
            layer.arc(Bounds::new(cx + 20, top - 50, cx + 90, top + 20), 270.0, 360.0, 5, BLACK);
            layer.arc(Bounds::new(cx - 30, top - 20, cx + 30, top + 20), 0.0, 180.0, 5, BLACK);
        }
        HairType::Curly => {
            layer.arc(crown, 180.0, 360.0, 5, BLACK);
            for i in (-80..=80).step_by(20) {
                layer.arc(Bounds::new(cx + i - 10, top - 60, cx + i + 10, top - 40), 0.0, 360.0, 2, BLACK);
            }
        }
        HairType::Wavy => {
            layer.arc(crown, 180.0, 360.0, 5, BLACK);
            let points: Vec<(i32, i32)> = (-90..=90)
                .step_by(30)
                .map(|i: i32| {
                    let swing = if i.rem_euclid(60) == 0 { 10 } else { -10 };
                    (cx + i, top - 50 + swing)
                })
                .collect();
            layer.line(&points, 3, BLACK);
        }
        HairType::Straight => {
            layer.arc(crown, 180.0, 360.0, 5, BLACK);
            for i in (-90..=90).step_by(15) {
                layer.line(&[(cx + i, top - 60), (cx + i, top - 20)], 2, BLACK);
            }
        }
    }

    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hair_stays_above_the_eyebrows() {
        let p = Proportions::default();
        for hair in [HairType::Bald, HairType::RecedingHairline, HairType::Curly, HairType::Wavy, HairType::Straight] {
            let bounds = draw(hair, &p).painted_bounds().unwrap();
            assert!(bounds.bottom < p.eyebrow_y() - 15, "{hair:?} reaches {bounds:?}");
        }
    }

    #[test]
    fn straight_hair_has_thirteen_strands() {
        let p = Proportions::default();
        let layer = draw(HairType::Straight, &p);
        // Inside the crown arc only the strands cross this row.
        let row = (p.face_top() - 25) as u32;
        let span = (p.center_x() - 92) as u32..=(p.center_x() + 92) as u32;
        let mut strands = 0;
        let mut inside = false;
        for x in span {
            let painted = layer.pixel(x, row)[3] != 0;
            if painted && !inside {
                strands += 1;
            }
            inside = painted;
        }
        assert_eq!(strands, 13);
    }
}

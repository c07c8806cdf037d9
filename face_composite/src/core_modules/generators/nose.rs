use super::blank;
use crate::core_modules::features::NoseType;
use crate::core_modules::layer::{BLACK, Layer};
use crate::core_modules::proportions::{Bounds, Proportions};

/// Draws the nose down the center line, from bridge to tip.
pub fn draw(nose: NoseType, p: &Proportions) -> Layer {
    let mut layer = blank(p);
    let cx = p.center_x();
    let (start, end) = (p.nose_start_y(), p.nose_end_y());

    match nose {
        NoseType::Straight => {
            layer.line(&[(cx, start), (cx, end)], 4, BLACK);
            tip(&mut layer, cx, end, 18, 12, 4);
            nostrils(&mut layer, cx, end, 8, 15, 7);
        }
        NoseType::Aquiline => {
            // Hooked bridge.
            layer.arc(Bounds::new(cx - 15, start - 10, cx + 15, end), 180.0, 270.0, 4, BLACK);
            tip(&mut layer, cx, end, 18, 12, 4);
            nostrils(&mut layer, cx, end, 8, 15, 7);
        }
        NoseType::Broad => {
            layer.line(&[(cx, start), (cx, end)], 5, BLACK);
            tip(&mut layer, cx, end, 22, 15, 4);
            nostrils(&mut layer, cx, end, 10, 18, 8);
        }
        NoseType::Button => {
            layer.line(&[(cx, start), (cx, end - 5)], 4, BLACK);
            layer.ellipse(Bounds::new(cx - 16, end - 12, cx + 16, end + 8), 4, BLACK);
            layer.filled_ellipse(Bounds::new(cx - 12, end + 2, cx - 7, end + 7), BLACK);
            layer.filled_ellipse(Bounds::new(cx + 7, end + 2, cx + 12, end + 7), BLACK);
        }
        NoseType::Narrow => {
            layer.line(&[(cx, start), (cx, end)], 3, BLACK);
            tip(&mut layer, cx, end, 14, 10, 3);
            nostrils(&mut layer, cx, end, 7, 12, 5);
        }
        NoseType::Roman => {
            // Prominent bridge: a heavy line with a thin one beside it.
            layer.line(&[(cx, start), (cx, end)], 5, BLACK);
            layer.line(&[(cx - 3, start), (cx - 3, end)], 2, BLACK);
            tip(&mut layer, cx, end, 18, 12, 4);
            nostrils(&mut layer, cx, end, 8, 15, 7);
        }
    }

    layer
}

/// The lower curve of the nose tip.
fn tip(layer: &mut Layer, cx: i32, end: i32, half_w: i32, half_h: i32, width: u32) {
    layer.arc(Bounds::around(cx, end, half_w, half_h), 0.0, 180.0, width, BLACK);
}

/// Two outlined nostrils spanning `inner..=outer` either side of the center line.
fn nostrils(layer: &mut Layer, cx: i32, end: i32, inner: i32, outer: i32, size: i32) {
    layer.ellipse(Bounds::new(cx - outer, end, cx - inner, end + size), 2, BLACK);
    layer.ellipse(Bounds::new(cx + inner, end, cx + outer, end + size), 2, BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roman_adds_a_bridge_line_to_straight() {
        let p = Proportions::default();
        let roman = draw(NoseType::Roman, &p);
        let straight = draw(NoseType::Straight, &p);
        let x = (p.center_x() - 4) as u32;
        let y = (p.nose_start_y() + 10) as u32;
        assert_eq!(roman.pixel(x, y), BLACK);
        assert_eq!(straight.pixel(x, y)[3], 0);
    }
}

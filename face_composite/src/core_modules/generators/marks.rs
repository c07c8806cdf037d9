use super::blank;
use crate::core_modules::features::DistinctiveMark;
use crate::core_modules::layer::{BIRTHMARK_FILL, BLACK, BROWN, DARK_RED, Layer};
use crate::core_modules::proportions::{Bounds, Proportions};

/// Draws a distinctive mark at its fixed anatomical spot.
pub fn draw(mark: DistinctiveMark, p: &Proportions) -> Layer {
    let mut layer = blank(p);
    let (cx, cy) = p.center();

    match mark {
        DistinctiveMark::Scar => {
            // Left cheek.
            let (x, y) = (cx + p.scar_offset.0, cy + p.scar_offset.1);
            layer.line(&[(x, y), (x + 30, y + 40)], 3, DARK_RED);
        }
        DistinctiveMark::Mole => {
            // Right cheek.
            let (x, y) = (cx + p.mole_offset.0, cy + p.mole_offset.1);
            layer.filled_ellipse(Bounds::around(x, y, 4, 4), BLACK);
        }
        DistinctiveMark::BrokenNose => {
            // A bump across the bridge.
            let y = cy + p.broken_nose_offset;
            layer.line(&[(cx - 8, y), (cx + 8, y)], 6, BLACK);
        }
        DistinctiveMark::Birthmark => {
            // Forehead.
            let y = cy + p.birthmark_offset;
            layer.outlined_ellipse(Bounds::around(cx, y, 15, 10), BIRTHMARK_FILL, BROWN, 2);
        }
        DistinctiveMark::Unrecognized => {}
    }

    layer
}

// THEORY:
// One generator per feature category. Each is a pure function from a resolved
// variant and the shared `Proportions` to a fresh, canvas-sized `Layer`.
//
// Key architectural principles:
// 1.  **Pure and Total**: A generator never fails and never looks at another
//     category's selection. Every arm of its variant enum draws something, or
//     deliberately draws nothing (the `Unrecognized` arms).
// 2.  **Anchored Placement**: Positions come from `Proportions`. The local
//     extents of a shape (how wide an almond eye is, how tall a lip arc is) are
//     drawing detail and stay beside the strokes that use them.
// 3.  **One Source of Chance**: Stubble is the only stochastic drawing. The
//     random source is passed in from the orchestrator, so a seeded caller gets
//     a reproducible layer and nothing here owns hidden state.

pub mod eyebrows;
pub mod eyes;
pub mod face_shape;
pub mod facial_hair;
pub mod hair;
pub mod marks;
pub mod mouth;
pub mod nose;

use crate::core_modules::features::FeatureLayer;
use crate::core_modules::layer::Layer;
use crate::core_modules::proportions::Proportions;
use log::trace;
use rand::Rng;

/// Renders the layer for a single resolved feature.
pub fn render<R: Rng + ?Sized>(feature: FeatureLayer, proportions: &Proportions, rng: &mut R) -> Layer {
    let layer = match feature {
        FeatureLayer::FaceShape(shape) => face_shape::draw(shape, proportions),
        FeatureLayer::FacialHair(style) => facial_hair::draw(style, proportions, rng),
        FeatureLayer::HairType(hair) => hair::draw(hair, proportions),
        FeatureLayer::Eyebrows(brows) => eyebrows::draw(brows, proportions),
        FeatureLayer::EyeShape(eyes) => eyes::draw(eyes, proportions),
        FeatureLayer::NoseType(nose) => nose::draw(nose, proportions),
        FeatureLayer::MouthShape(mouth) => mouth::draw(mouth, proportions),
        FeatureLayer::DistinctiveMarks(mark) => marks::draw(mark, proportions),
    };
    trace!("{feature:?} painted {:?}", layer.painted_bounds());
    layer
}

fn blank(proportions: &Proportions) -> Layer {
    Layer::new(proportions.canvas_width, proportions.canvas_height)
}

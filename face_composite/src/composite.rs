// THEORY:
// The `composite` module is the top-level API of the compositor. It turns a
// caller's `FeatureSet` into the finished 512x512 portrait in one call, hiding the
// generators, the layer stack and the blend behind `FaceCompositor`.
//
// Key architectural principles:
// 1.  **Resolve, Render, Fold**: A composite is three pure steps. The feature set
//     is resolved into typed variants (skips and fallbacks applied), each variant
//     is rendered onto its own transparent layer, and the layers are folded in
//     category order onto the background.
// 2.  **Total on Typed Input**: `create_composite` cannot fail. Anything a caller
//     can type into a `FeatureSet` renders. Only the JSON entry point can reject
//     input, and only for values that are not strings.
// 3.  **Chance Is Injected**: The compositor owns no random state. Each call
//     builds its own generator, from the configured seed or a fresh one, so calls
//     are independent and a `FaceCompositor` can be shared across threads.

use crate::config::CompositorConfig;
use crate::core_modules::compositor::compositor;
use crate::core_modules::features::{Category, FeatureSet};
use crate::core_modules::generators;
use crate::core_modules::layer::Layer;
use crate::core_modules::proportions::Proportions;
use crate::error::CompositeError;
use image::RgbImage;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

/// The main, top-level struct for building composites.
#[derive(Debug, Clone, Default)]
pub struct FaceCompositor {
    config: CompositorConfig,
}

impl FaceCompositor {
    pub fn new(config: CompositorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn proportions(&self) -> &Proportions {
        &self.config.proportions
    }

    /// Renders the composite for `features`.
    ///
    /// Stubble is drawn from the configured seed when there is one and from a
    /// fresh OS seed otherwise.
    pub fn create_composite(&self, features: &FeatureSet) -> RgbImage {
        match self.config.stubble_seed {
            Some(seed) => self.create_composite_seeded(features, seed),
            None => {
                let mut rng = StdRng::from_os_rng();
                self.composite_with(features, &mut rng)
            }
        }
    }

    /// Renders the composite with stubble drawn from `seed`. Equal inputs give
    /// identical images.
    pub fn create_composite_seeded(&self, features: &FeatureSet, seed: u64) -> RgbImage {
        let mut rng = StdRng::seed_from_u64(seed);
        self.composite_with(features, &mut rng)
    }

    /// Parses a JSON feature object and renders it.
    pub fn create_composite_from_json(&self, value: &Value) -> Result<RgbImage, CompositeError> {
        let features = FeatureSet::from_json_value(value)?;
        Ok(self.create_composite(&features))
    }

    /// The individual layers of a composite, bottom first, tagged by category.
    /// Categories that resolve to a skip are absent.
    pub fn layers<R: Rng + ?Sized>(&self, features: &FeatureSet, rng: &mut R) -> Vec<(Category, Layer)> {
        let proportions = &self.config.proportions;
        let resolved = features.resolve().layers();

        for category in Category::ALL {
            if let Some(value) = features.get(category) {
                if !resolved.iter().any(|f| f.category() == category) {
                    debug!("Skipping {category} layer for value {value:?}");
                }
            }
        }

        resolved
            .into_iter()
            .map(|feature| {
                let category = feature.category();
                debug!("Rendering {category} layer as {feature:?}");
                (category, generators::render(feature, proportions, &mut *rng))
            })
            .collect()
    }

    fn composite_with<R: Rng + ?Sized>(&self, features: &FeatureSet, rng: &mut R) -> RgbImage {
        let p = &self.config.proportions;
        let layers = self.layers(features, rng);
        debug!("Compositing {} layers onto a {}x{} canvas", layers.len(), p.canvas_width, p.canvas_height);
        compositor::composite(
            p.canvas_width,
            p.canvas_height,
            p.background,
            layers.into_iter().map(|(_, layer)| layer),
        )
    }
}

/// Renders `features` with the default configuration.
pub fn create_composite(features: &FeatureSet) -> RgbImage {
    FaceCompositor::default().create_composite(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use serde_json::json;

    const GRAY: Rgb<u8> = Rgb([245, 245, 245]);

    fn seeded() -> FaceCompositor {
        FaceCompositor::new(CompositorConfig {
            stubble_seed: Some(7),
            ..CompositorConfig::default()
        })
    }

    #[test]
    fn empty_feature_set_is_plain_background() {
        let image = create_composite(&FeatureSet::new());
        assert_eq!(image.dimensions(), (512, 512));
        assert!(image.pixels().all(|p| *p == GRAY));
    }

    #[test]
    fn layers_come_back_in_category_order() {
        let features: FeatureSet = [
            ("distinctiveMarks", "mole"),
            ("faceShape", "oval"),
            ("eyeShape", "round"),
            ("hairType", "curly"),
        ]
        .into_iter()
        .collect();
        let mut rng = StdRng::seed_from_u64(1);
        let categories: Vec<Category> = seeded()
            .layers(&features, &mut rng)
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(
            categories,
            vec![Category::FaceShape, Category::HairType, Category::EyeShape, Category::DistinctiveMarks]
        );
    }

    #[test]
    fn skip_values_produce_no_layer() {
        let features = FeatureSet::new()
            .with("facialHair", "clean shaven")
            .with("distinctiveMarks", "none");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(seeded().layers(&features, &mut rng).is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let plain = seeded().create_composite(&FeatureSet::new().with("faceShape", "round"));
        let noisy = seeded().create_composite(
            &FeatureSet::new().with("faceShape", "round").with("earShape", "pointy"),
        );
        assert_eq!(plain, noisy);
    }

    #[test]
    fn configured_seed_makes_stubble_reproducible() {
        let features = FeatureSet::new().with("facialHair", "stubble");
        let compositor = seeded();
        assert_eq!(compositor.create_composite(&features), compositor.create_composite(&features));
        assert_eq!(
            compositor.create_composite(&features),
            compositor.create_composite_seeded(&features, 7)
        );
    }

    #[test]
    fn json_entry_point_rejects_non_strings() {
        let err = seeded()
            .create_composite_from_json(&json!({ "faceShape": 3 }))
            .unwrap_err();
        assert!(matches!(
            err,
            CompositeError::MalformedValue { category: Category::FaceShape, .. }
        ));
    }

    #[test]
    fn json_entry_point_matches_typed_entry_point() {
        let compositor = seeded();
        let from_json = compositor
            .create_composite_from_json(&json!({ "features": { "faceShape": "heart", "mouthShape": "smile" } }))
            .unwrap();
        let typed = compositor.create_composite(
            &FeatureSet::new().with("faceShape", "heart").with("mouthShape", "smile"),
        );
        assert_eq!(from_json, typed);
    }

    #[test]
    fn custom_background_fills_untouched_pixels() {
        let mut config = CompositorConfig::default();
        config.proportions.background = [255, 255, 255];
        let image = FaceCompositor::new(config).create_composite(&FeatureSet::new().with("faceShape", "oval"));
        assert_eq!(*image.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*image.get_pixel(126, 256), Rgb([0, 0, 0]));
    }
}

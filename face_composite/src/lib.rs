// THEORY:
// This file is the main entry point for the `face_composite` library crate.
// It exposes the feature-layer compositor: a deterministic renderer that turns a
// set of categorical facial-feature selections into one flattened line-art image,
// used as a geometric reference for downstream sketch synthesis.
//
// Callers build a `FeatureSet`, hand it to a `FaceCompositor` (or the free
// `create_composite` function), and receive an opaque 512x512 RGB image.
// Everything that actually draws and blends lives in `core_modules`; the
// orchestrator is what applies the layer ordering and skip rules.
//
// Around that core sit the ambient pieces a real consumer needs: configuration
// (`config`), an error taxonomy (`error`), PNG/data-URL export (`export`), the
// option catalog a selector UI presents (`catalog`), and a worker pool for
// rendering many composites at once (`batch`).

pub mod batch;
pub mod catalog;
pub mod composite;
pub mod config;
pub mod core_modules;
pub mod error;
pub mod export;

pub use composite::{FaceCompositor, create_composite};
pub use config::CompositorConfig;
pub use core_modules::features::{Category, FeatureSet};
pub use core_modules::proportions::Proportions;
pub use error::CompositeError;

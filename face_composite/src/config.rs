use crate::core_modules::proportions::Proportions;
use crate::error::CompositeError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the `FaceCompositor`.
///
/// Every field has a default, so an empty TOML document is a valid config:
///
/// ```toml
/// stubble_seed = 42
///
/// [proportions]
/// background = [255, 255, 255]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Canvas geometry and the per-category offset table.
    pub proportions: Proportions,
    /// Fixed seed for the stubble generator. When unset, every composite draws
    /// a fresh seed and stubble differs run to run.
    pub stubble_seed: Option<u64>,
}

impl CompositorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, CompositeError> {
        let config: CompositorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CompositeError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Rejects geometry the generators cannot place features on.
    pub fn validate(&self) -> Result<(), CompositeError> {
        let p = &self.proportions;
        if p.canvas_width == 0 || p.canvas_height == 0 {
            return Err(CompositeError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                p.canvas_width, p.canvas_height
            )));
        }
        if p.face_width <= 0 || p.face_height <= 0 {
            return Err(CompositeError::Config(format!(
                "face box must be non-empty, got {}x{}",
                p.face_width, p.face_height
            )));
        }
        if p.stubble_spread < 0 || p.stubble_rise + p.stubble_drop < 0 {
            return Err(CompositeError::Config(format!(
                "stubble region is inverted, got {:?}",
                p.stubble_region()
            )));
        }
        let face = p.face_box();
        if face.left < 0 || face.top < 0 || face.right >= p.canvas_width as i32 || face.bottom >= p.canvas_height as i32 {
            return Err(CompositeError::Config(format!(
                "face box {face:?} does not fit a {}x{} canvas",
                p.canvas_width, p.canvas_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_default() {
        let config = CompositorConfig::from_toml_str("").unwrap();
        assert_eq!(config, CompositorConfig::default());
        assert_eq!(config.stubble_seed, None);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = CompositorConfig::from_toml_str(
            r#"
            stubble_seed = 42

            [proportions]
            background = [255, 255, 255]
            "#,
        )
        .unwrap();
        assert_eq!(config.stubble_seed, Some(42));
        assert_eq!(config.proportions.background, [255, 255, 255]);
        assert_eq!(config.proportions.canvas_width, 512);
        assert_eq!(config.proportions.eye_spacing, 75);
    }

    #[test]
    fn zero_canvas_is_rejected() {
        let err = CompositorConfig::from_toml_str("[proportions]\ncanvas_width = 0\n").unwrap_err();
        assert!(matches!(err, CompositeError::Config(_)));
    }

    #[test]
    fn oversized_face_is_rejected() {
        let err = CompositorConfig::from_toml_str("[proportions]\nface_height = 600\n").unwrap_err();
        assert!(matches!(err, CompositeError::Config(_)));
    }

    #[test]
    fn inverted_stubble_region_is_rejected() {
        let err = CompositorConfig::from_toml_str("[proportions]\nstubble_spread = -5\n").unwrap_err();
        assert!(matches!(err, CompositeError::Config(_)));

        let err = CompositorConfig::from_toml_str("[proportions]\nstubble_rise = -60\n").unwrap_err();
        assert!(matches!(err, CompositeError::Config(_)));

        // A zero-width region is a single column, still drawable.
        let config = CompositorConfig::from_toml_str("[proportions]\nstubble_spread = 0\n").unwrap();
        assert_eq!(config.proportions.stubble_region().width(), 0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = CompositorConfig::from_toml_str("stubble_seed = \"soon\"").unwrap_err();
        assert!(matches!(err, CompositeError::ConfigParse(_)));
    }
}

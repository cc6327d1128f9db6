use serde::{Deserialize, Serialize};

/// Presentation class tokens attached to the rendered layers.
///
/// The stylesheet that gives these tokens meaning lives with the host; veil
/// only decides which tokens apply in which load state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassNames {
    /// Outer container holding both layers.
    pub container: String,
    /// Always present on the real content layer.
    pub original: String,
    /// Added to the real content once it finished loading.
    pub loaded: String,
    /// Added alongside `loaded`/`svg_image_disable` when animation is off.
    pub skip_anim: String,
    /// Always present on the placeholder image.
    pub svg_image: String,
    /// Added to the placeholder image once the content finished loading.
    pub svg_image_disable: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            container: "veil-container".to_string(),
            original: "veil-original".to_string(),
            loaded: "veil-loaded".to_string(),
            skip_anim: "veil-skip-anim".to_string(),
            svg_image: "veil-svg-image".to_string(),
            svg_image_disable: "veil-svg-image-disable".to_string(),
        }
    }
}

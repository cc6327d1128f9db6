//! The blurred placeholder layer.
//!
//! Rendered as a vector container sized to the full image, with the
//! low-quality image drawn through a Gaussian blur. Blurring eats into the
//! opaque edges of formats without meaningful alpha, so every non-png
//! placeholder additionally gets its alpha channel forced back to one.

use veil_config::ClassNames;
use veil_model::{BlurStrength, ImageDescriptor, SourceLocator};

use crate::markup::{join_classes, push_attr, push_non_empty_attr};
use crate::reveal::{LoadState, RevealMessage};

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderView {
    /// Class tokens on the vector container.
    pub class_name: String,
    /// View box width and height, taken from the full image.
    pub view_box: (u32, u32),
    pub filter_id: String,
    pub blur_strength: BlurStrength,
    /// Force alpha to one after blurring.
    pub alpha_remap: bool,
    pub image_href: SourceLocator,
    /// Class tokens on the placeholder image.
    pub image_class: String,
    /// Whether the placeholder is still the dominant layer.
    pub dominant: bool,
    /// Message to dispatch when the rendered placeholder image fires `load`.
    pub on_load: RevealMessage,
}

impl PlaceholderView {
    pub fn new(
        placeholder: &ImageDescriptor,
        full: &ImageDescriptor,
        blur_strength: &BlurStrength,
        placeholder_class_name: &str,
        classes: &ClassNames,
        load_state: LoadState,
    ) -> Self {
        let skip_anim = blur_strength.disables_animation();
        let image_class = if load_state.is_loaded() {
            join_classes([
                classes.svg_image_disable.as_str(),
                classes.svg_image.as_str(),
                if skip_anim { classes.skip_anim.as_str() } else { "" },
            ])
        } else {
            join_classes([classes.svg_image.as_str()])
        };

        Self {
            class_name: join_classes([placeholder_class_name]),
            view_box: (full.width, full.height),
            filter_id: filter_id(placeholder, blur_strength),
            blur_strength: blur_strength.clone(),
            alpha_remap: !placeholder.format.is_png(),
            image_href: placeholder.source.clone(),
            image_class,
            dominant: !load_state.is_loaded(),
            on_load: RevealMessage::PlaceholderElementLoaded,
        }
    }

    /// Render the layer as SVG markup.
    pub fn to_svg_markup(&self) -> String {
        let (width, height) = self.view_box;
        let mut out = String::from("<svg");
        push_non_empty_attr(&mut out, "class", &self.class_name);
        push_attr(&mut out, "viewBox", &format!("0 0 {width} {height}"));
        out.push_str("><defs><filter");
        push_attr(&mut out, "id", &self.filter_id);
        out.push_str(r#" x="0%" y="0%" width="100%" height="100%">"#);
        out.push_str(r#"<feGaussianBlur in="SourceGraphic""#);
        push_attr(&mut out, "stdDeviation", self.blur_strength.as_str());
        out.push_str(r#" color-interpolation-filters="sRGB"/>"#);
        if self.alpha_remap {
            out.push_str(concat!(
                r#"<feComponentTransfer color-interpolation-filters="sRGB">"#,
                r#"<feFuncA type="table" tableValues="1 1"/>"#,
                "</feComponentTransfer>",
            ));
        }
        out.push_str("</filter></defs><image");
        push_attr(&mut out, "preserveAspectRatio", "none");
        push_attr(&mut out, "filter", &format!("url(#{})", self.filter_id));
        push_non_empty_attr(&mut out, "class", &self.image_class);
        push_attr(&mut out, "href", self.image_href.as_str());
        push_attr(&mut out, "width", &width.to_string());
        push_attr(&mut out, "height", &height.to_string());
        out.push_str("/></svg>");
        out
    }
}

/// Filter ids are shared between reveals with the same format and strength.
pub fn filter_id(
    placeholder: &ImageDescriptor,
    blur_strength: &BlurStrength,
) -> String {
    format!("blur_{}_{}", placeholder.format, blur_strength)
}

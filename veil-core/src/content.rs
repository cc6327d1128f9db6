//! The real content layer and its decoration.
//!
//! The controller never needs to know what concrete node a host renders for
//! the full-quality image. Anything implementing [`ContentNode`] can receive
//! the derived class, style and load handlers; decoration always produces a
//! new node and leaves the caller's original untouched.

use std::collections::BTreeMap;

use crate::markup::{join_classes, push_attr, push_non_empty_attr};
use crate::reveal::RevealMessage;

/// Ordered inline style declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap(BTreeMap<String, String>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `self` overlaid with `other`; `other` wins on conflicts.
    pub fn merged(&self, other: &StyleMap) -> StyleMap {
        let mut merged = self.clone();
        for (property, value) in other.iter() {
            merged.set(property, value);
        }
        merged
    }

    /// Render as an inline `style` attribute value.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut style = StyleMap::new();
        for (property, value) in iter {
            style.set(property, value);
        }
        style
    }
}

/// Derived presentation attributes injected into the content node.
///
/// `class_name` and `style` are already merged with whatever the node
/// carried; implementors replace, not append. The handlers are the messages
/// the host must dispatch when the node fires `load` / `loadeddata`.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub class_name: String,
    pub style: StyleMap,
    pub on_load: RevealMessage,
    pub on_loaded_data: RevealMessage,
}

/// A node that can carry derived presentation attributes.
pub trait ContentNode: Clone {
    fn class_name(&self) -> Option<&str>;

    fn style(&self) -> Option<&StyleMap>;

    /// A copy of `self` carrying `presentation`.
    fn with_presentation(&self, presentation: Presentation) -> Self;
}

/// Host-agnostic element for hosts without a node type of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentElement {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub class_name: Option<String>,
    pub style: Option<StyleMap>,
    pub on_load: Option<RevealMessage>,
    pub on_loaded_data: Option<RevealMessage>,
}

impl ContentElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            class_name: None,
            style: None,
            on_load: None,
            on_loaded_data: None,
        }
    }

    pub fn img(src: impl Into<String>) -> Self {
        Self::new("img").attribute("src", src)
    }

    pub fn video(src: impl Into<String>) -> Self {
        Self::new("video").attribute("src", src)
    }

    pub fn attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }

    fn is_void(&self) -> bool {
        matches!(self.tag.as_str(), "img" | "source" | "br" | "hr")
    }

    /// Render the element as markup. Handlers are not serialised.
    pub fn to_markup(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            push_attr(&mut out, name, value);
        }
        if let Some(class_name) = &self.class_name {
            let classes = join_classes([class_name.as_str()]);
            push_non_empty_attr(&mut out, "class", &classes);
        }
        if let Some(style) = &self.style {
            push_non_empty_attr(&mut out, "style", &style.to_css());
        }
        if self.is_void() {
            out.push_str("/>");
        } else {
            out.push_str(&format!("></{}>", self.tag));
        }
        out
    }
}

impl ContentNode for ContentElement {
    fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    fn style(&self) -> Option<&StyleMap> {
        self.style.as_ref()
    }

    fn with_presentation(&self, presentation: Presentation) -> Self {
        let mut decorated = self.clone();
        decorated.class_name = Some(presentation.class_name);
        decorated.style = Some(presentation.style);
        decorated.on_load = Some(presentation.on_load);
        decorated.on_loaded_data = Some(presentation.on_loaded_data);
        decorated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presentation() -> Presentation {
        Presentation {
            class_name: "hero veil-original".to_string(),
            style: StyleMap::new().with("margin-top", "-50%"),
            on_load: RevealMessage::ContentLoad,
            on_loaded_data: RevealMessage::ContentLoadedData,
        }
    }

    #[test]
    fn merged_style_prefers_overlay() {
        let base = StyleMap::new().with("opacity", "1").with("margin-top", "0");
        let overlay = StyleMap::new().with("margin-top", "-50%");
        let merged = base.merged(&overlay);

        assert_eq!(merged.get("opacity"), Some("1"));
        assert_eq!(merged.get("margin-top"), Some("-50%"));
        assert_eq!(merged.to_css(), "margin-top: -50%; opacity: 1");
    }

    #[test]
    fn decoration_leaves_original_untouched() {
        let original = ContentElement::img("/full.jpg").with_class("hero");
        let decorated = original.with_presentation(presentation());

        assert_eq!(original.class_name(), Some("hero"));
        assert!(original.on_load.is_none());
        assert_eq!(decorated.class_name(), Some("hero veil-original"));
        assert_eq!(decorated.on_load, Some(RevealMessage::ContentLoad));
        assert_eq!(
            decorated.on_loaded_data,
            Some(RevealMessage::ContentLoadedData)
        );
        assert_eq!(decorated.attributes, original.attributes);
    }

    #[test]
    fn markup_escapes_attributes() {
        let element = ContentElement::img("/a\"b.jpg")
            .attribute("alt", "<cat>")
            .with_style(StyleMap::new().with("margin-top", "-50%"));

        assert_eq!(
            element.to_markup(),
            "<img alt=\"&lt;cat&gt;\" src=\"/a&quot;b.jpg\" style=\"margin-top: -50%\"/>"
        );
        assert_eq!(
            ContentElement::video("/clip.mp4").to_markup(),
            "<video src=\"/clip.mp4\"></video>"
        );
    }
}

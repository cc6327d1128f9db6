use std::fmt;

use veil_config::{ClassNames, RevealConfig};
use veil_model::{BlurStrength, ImageDescriptor, ObserverConfiguration};

use crate::content::{ContentNode, StyleMap};

/// Callback fired once the placeholder is ready to be shown.
pub type ReadyCallback = Box<dyn FnMut()>;

/// Construction parameters for a [`RevealController`].
///
/// [`RevealController`]: super::RevealController
pub struct RevealProps<C: ContentNode> {
    /// Low-quality placeholder image.
    pub placeholder: ImageDescriptor,
    /// Full-quality image; drives the view box and content offset.
    pub full: ImageDescriptor,
    /// The node rendering the full-quality image.
    pub content: C,
    /// Inline style for the outer container.
    pub style: StyleMap,
    pub observer: ObserverConfiguration,
    pub blur_strength: BlurStrength,
    /// Extra class tokens for the outer container.
    pub class_name: String,
    /// Class tokens for the placeholder's vector container.
    pub placeholder_class_name: String,
    pub on_ready: Option<ReadyCallback>,
    pub trigger_once: bool,
    pub classes: ClassNames,
}

impl<C: ContentNode> RevealProps<C> {
    pub fn new(
        placeholder: ImageDescriptor,
        full: ImageDescriptor,
        content: C,
    ) -> Self {
        Self {
            placeholder,
            full,
            content,
            style: StyleMap::default(),
            observer: ObserverConfiguration::default(),
            blur_strength: BlurStrength::default(),
            class_name: String::new(),
            placeholder_class_name: String::new(),
            on_ready: None,
            trigger_once: true,
            classes: ClassNames::default(),
        }
    }

    /// Seed blur, observer, trigger policy and class tokens from `config`.
    pub fn with_config(mut self, config: &RevealConfig) -> Self {
        self.blur_strength = config.blur_strength.clone();
        self.observer = config.observer.clone();
        self.trigger_once = config.trigger_once;
        self.classes = config.classes.clone();
        self
    }

    pub fn style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    pub fn observer(mut self, observer: ObserverConfiguration) -> Self {
        self.observer = observer;
        self
    }

    pub fn blur_strength(mut self, strength: impl Into<BlurStrength>) -> Self {
        self.blur_strength = strength.into();
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn placeholder_class_name(
        mut self,
        class_name: impl Into<String>,
    ) -> Self {
        self.placeholder_class_name = class_name.into();
        self
    }

    pub fn on_ready(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_ready = Some(Box::new(callback));
        self
    }

    pub fn trigger_once(mut self, trigger_once: bool) -> Self {
        self.trigger_once = trigger_once;
        self
    }

    pub fn classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }
}

impl<C: ContentNode + fmt::Debug> fmt::Debug for RevealProps<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealProps")
            .field("placeholder", &self.placeholder)
            .field("full", &self.full)
            .field("content", &self.content)
            .field("style", &self.style)
            .field("observer", &self.observer)
            .field("blur_strength", &self.blur_strength)
            .field("class_name", &self.class_name)
            .field("placeholder_class_name", &self.placeholder_class_name)
            .field("on_ready", &self.on_ready.is_some())
            .field("trigger_once", &self.trigger_once)
            .field("classes", &self.classes)
            .finish()
    }
}

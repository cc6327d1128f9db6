//! What a reveal renders: an outer container with two stacked layers.

use veil_model::ElementHandle;

use crate::content::{ContentElement, ContentNode, StyleMap};
use crate::markup::push_non_empty_attr;
use crate::placeholder::PlaceholderView;
use crate::reveal::{LoadState, RevealMessage, RevealState};

/// The reference a host attaches to the element it produced for the
/// container, so the tracker knows what to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeRef;

impl NodeRef {
    /// Message announcing that the container is now `element`.
    pub fn attach(&self, element: ElementHandle) -> RevealMessage {
        RevealMessage::Attach(Some(element))
    }

    /// Message announcing that the container left the tree.
    pub fn detach(&self) -> RevealMessage {
        RevealMessage::Attach(None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerView {
    pub node_ref: NodeRef,
    pub class_name: String,
    pub style: StyleMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealView<C> {
    pub container: ContainerView,
    /// Always rendered.
    pub placeholder: PlaceholderView,
    /// Decorated real content; present only once revealing.
    pub content: Option<C>,
    pub reveal_state: RevealState,
    pub load_state: LoadState,
}

impl<C: ContentNode> RevealView<C> {
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

impl RevealView<ContentElement> {
    /// Render the whole view as markup.
    pub fn to_markup(&self) -> String {
        let mut out = String::from("<div");
        push_non_empty_attr(&mut out, "class", &self.container.class_name);
        push_non_empty_attr(&mut out, "style", &self.container.style.to_css());
        out.push('>');
        out.push_str(&self.placeholder.to_svg_markup());
        if let Some(content) = &self.content {
            out.push_str(&content.to_markup());
        }
        out.push_str("</div>");
        out
    }
}

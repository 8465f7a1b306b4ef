//! Document - retained element tree with selector resolution.
//!
//! A `Document` is the stand-in for the host framework's page: an arena of
//! elements built once per navigation, queried by simple selectors, and
//! mutated only through inline-style operations that report the prior value
//! (so scopes can record exact undo information).
//!
//! The document also owns a reactive scroll-progress signal (0.0 at the top,
//! 1.0 at the bottom) standing in for the host's scroll position; scroll-driven
//! triggers subscribe to it through the effect system.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Signal, signal};

use super::node::{ElementData, ElementProps, NodeId};

// =============================================================================
// Selector
// =============================================================================

/// A parsed region selector: `#id`, `.class`, or a bare tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    fn parse(raw: &str) -> Self {
        if let Some(id) = raw.strip_prefix('#') {
            Self::Id(id.to_string())
        } else if let Some(class) = raw.strip_prefix('.') {
            Self::Class(class.to_string())
        } else {
            Self::Tag(raw.to_string())
        }
    }

    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Self::Class(class) => element.classes.iter().any(|c| c == class),
            Self::Tag(tag) => element.tag == *tag,
        }
    }
}

// =============================================================================
// Document
// =============================================================================

struct DocumentInner {
    nodes: Vec<ElementData>,
}

/// Clone-able handle to a page's element tree.
///
/// Clones share the same arena (like handles to the one real page), so the
/// coordinator, open scopes, and the host can all hold one.
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<DocumentInner>>,
    scroll: Signal<f64>,
}

impl Document {
    /// Create an empty document containing only the body element.
    pub fn new() -> Self {
        let body = ElementData::from_props(
            ElementProps {
                tag: "body".into(),
                ..Default::default()
            },
            None,
        );
        Self {
            inner: Rc::new(RefCell::new(DocumentInner { nodes: vec![body] })),
            scroll: signal(0.0),
        }
    }

    /// The root element every document starts with.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child element under `parent`. Returns the new node.
    pub fn append(&self, parent: NodeId, props: ElementProps) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        let node = NodeId(inner.nodes.len());
        inner.nodes.push(ElementData::from_props(props, Some(parent)));
        inner.nodes[parent.0].children.push(node);
        node
    }

    /// Number of elements in the document (body included).
    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    /// True if the document holds only the body element.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First element matching `selector`, in document order.
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector);
        let inner = self.inner.borrow();
        let mut stack = vec![NodeId(0)];
        while let Some(node) = stack.pop() {
            let element = &inner.nodes[node.0];
            if sel.matches(element) {
                return Some(node);
            }
            // Push in reverse so children visit in document order
            for &child in element.children.iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// All elements matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let sel = Selector::parse(selector);
        let inner = self.inner.borrow();
        let mut found = Vec::new();
        let mut stack = vec![NodeId(0)];
        while let Some(node) = stack.pop() {
            let element = &inner.nodes[node.0];
            if sel.matches(element) {
                found.push(node);
            }
            for &child in element.children.iter().rev() {
                stack.push(child);
            }
        }
        found
    }

    /// `root` and every element below it, in document order.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let inner = self.inner.borrow();
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            found.push(node);
            for &child in inner.nodes[node.0].children.iter().rev() {
                stack.push(child);
            }
        }
        found
    }

    /// Tag name of an element.
    pub fn tag(&self, node: NodeId) -> String {
        self.inner.borrow().nodes[node.0].tag.clone()
    }

    /// Id attribute of an element, if any.
    pub fn element_id(&self, node: NodeId) -> Option<String> {
        self.inner.borrow().nodes[node.0].id.clone()
    }

    // =========================================================================
    // Styles
    // =========================================================================

    /// Set an inline style property. Returns the *prior* inline value, which
    /// is exactly what a scope must restore on revert.
    pub fn set_inline_style(
        &self,
        node: NodeId,
        prop: &str,
        value: impl Into<String>,
    ) -> Option<String> {
        self.inner.borrow_mut().nodes[node.0]
            .inline_style
            .insert(prop.to_string(), value.into())
    }

    /// Remove an inline style property. Returns the removed value, if any.
    pub fn remove_inline_style(&self, node: NodeId, prop: &str) -> Option<String> {
        self.inner.borrow_mut().nodes[node.0].inline_style.remove(prop)
    }

    /// Restore an inline property to a recorded prior state.
    /// `Some(value)` re-applies the value; `None` clears the property.
    pub fn restore_inline_style(&self, node: NodeId, prop: &str, prior: Option<String>) {
        match prior {
            Some(value) => {
                self.set_inline_style(node, prop, value);
            }
            None => {
                self.remove_inline_style(node, prop);
            }
        }
    }

    /// Current inline value of a property.
    pub fn inline_style(&self, node: NodeId, prop: &str) -> Option<String> {
        self.inner.borrow().nodes[node.0].inline_style.get(prop).cloned()
    }

    /// Static (authored) value of a property.
    pub fn static_style(&self, node: NodeId, prop: &str) -> Option<String> {
        self.inner.borrow().nodes[node.0].static_style.get(prop).cloned()
    }

    /// Effective value of a property: inline wins over static.
    pub fn effective_style(&self, node: NodeId, prop: &str) -> Option<String> {
        self.inner.borrow().nodes[node.0]
            .effective_style(prop)
            .map(str::to_string)
    }

    /// Number of inline properties on an element. Zero on every element of a
    /// region is the "no residue" condition after a revert.
    pub fn inline_style_count(&self, node: NodeId) -> usize {
        self.inner.borrow().nodes[node.0].inline_style.len()
    }

    /// Whether the element is visible under its own effective styles.
    ///
    /// Hidden means `display: none`, `visibility: hidden`, or a zero opacity.
    /// Ancestor styling is not consulted; walk `descendants` to audit a whole
    /// subtree.
    pub fn is_visible(&self, node: NodeId) -> bool {
        let inner = self.inner.borrow();
        let element = &inner.nodes[node.0];
        !style_hides(element.effective_style("display"), "none")
            && !style_hides(element.effective_style("visibility"), "hidden")
            && !opacity_hides(element.effective_style("opacity"))
    }

    // =========================================================================
    // Scroll
    // =========================================================================

    /// Current scroll progress, 0.0 (top) to 1.0 (bottom).
    pub fn scroll_progress(&self) -> f64 {
        self.scroll.get()
    }

    /// Update scroll progress (clamped to 0.0..=1.0). Triggers subscribed
    /// through the effect system re-run synchronously.
    pub fn set_scroll_progress(&self, progress: f64) {
        self.scroll.set(progress.clamp(0.0, 1.0));
    }

    /// The scroll-progress signal itself, for effects and deriveds.
    pub fn scroll_signal(&self) -> Signal<f64> {
        self.scroll.clone()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn style_hides(value: Option<&str>, hiding: &str) -> bool {
    value.is_some_and(|v| v.trim() == hiding)
}

fn opacity_hides(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().parse::<f64>().is_ok_and(|n| n == 0.0))
}

// =============================================================================
// Tests
// =============================================================================

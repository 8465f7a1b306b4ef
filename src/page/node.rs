//! Element nodes - the cells of the page arena.
//!
//! Each element keeps two style maps: the *static* map (authored styling,
//! fixed once the element is appended) and the *inline* map (applied by
//! effect scopes, fully revertible). Keeping them separate is what makes
//! "no residue after revert" and the visibility fallback audit checkable.

use std::collections::HashMap;

// =============================================================================
// NodeId
// =============================================================================

/// Index of an element in its document's arena.
///
/// Only meaningful for the document that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

// =============================================================================
// Element Props
// =============================================================================

/// Properties for appending an element to a document.
///
/// `style` is the element's *static* presentation (what a stylesheet or the
/// markup author established); it never changes after the element is built.
///
/// # Example
///
/// ```ignore
/// use spark_fx::page::{Document, ElementProps};
///
/// let doc = Document::new();
/// let hero = doc.append(doc.body(), ElementProps {
///     tag: "section".into(),
///     id: Some("hero".into()),
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementProps {
    /// Tag name ("section", "h1", ...).
    pub tag: String,
    /// Optional unique id (matched by `#id` selectors).
    pub id: Option<String>,
    /// Class list (matched by `.class` selectors).
    pub classes: Vec<String>,
    /// Static style declarations, as (property, value) pairs.
    pub style: Vec<(String, String)>,
}

// =============================================================================
// Element Data
// =============================================================================

/// Arena cell for one element.
#[derive(Debug)]
pub(crate) struct ElementData {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    /// Authored styling; immutable after build.
    pub(crate) static_style: HashMap<String, String>,
    /// Effect-applied styling; every entry must be attributable to a scope.
    pub(crate) inline_style: HashMap<String, String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl ElementData {
    pub(crate) fn from_props(props: ElementProps, parent: Option<NodeId>) -> Self {
        Self {
            tag: props.tag,
            id: props.id,
            classes: props.classes,
            static_style: props.style.into_iter().collect(),
            inline_style: HashMap::new(),
            parent,
            children: Vec::new(),
        }
    }

    /// Effective value of a property: inline wins over static.
    pub(crate) fn effective_style(&self, prop: &str) -> Option<&str> {
        self.inline_style
            .get(prop)
            .or_else(|| self.static_style.get(prop))
            .map(String::as_str)
    }
}

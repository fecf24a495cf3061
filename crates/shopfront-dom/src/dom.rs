//! The `Dom` trait.

use std::fmt;

use crate::{DomResult, Selector};

/// Opaque handle to an element owned by a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    /// Wrap a raw index. Only meaningful to the `Dom` that issued it.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Operations the enhancements need from a page.
///
/// Queries only see elements attached to the document, in document order.
pub trait Dom {
    /// All matching elements in the document.
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// All matching descendants of `root` (excluding `root`).
    fn query_all_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId>;

    /// Element with the given `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// The `<head>` element.
    fn head(&self) -> Option<ElementId>;

    /// The `<body>` element.
    fn body(&self) -> Option<ElementId>;

    /// Lowercase tag name.
    fn tag_name(&self, el: ElementId) -> Option<String>;

    fn attribute(&self, el: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> DomResult<()>;

    fn has_class(&self, el: ElementId, class: &str) -> bool;

    fn add_class(&mut self, el: ElementId, class: &str) -> DomResult<()>;

    fn remove_class(&mut self, el: ElementId, class: &str) -> DomResult<()>;

    /// Text of the element and its descendants.
    fn text_content(&self, el: ElementId) -> Option<String>;

    /// Replace all children with a single text node.
    fn set_text_content(&mut self, el: ElementId, text: &str) -> DomResult<()>;

    /// Remove every child node.
    fn clear_children(&mut self, el: ElementId) -> DomResult<()>;

    /// Current value of a form control. `None` for non-controls.
    fn value(&self, el: ElementId) -> Option<String>;

    fn parent(&self, el: ElementId) -> Option<ElementId>;

    fn next_element_sibling(&self, el: ElementId) -> Option<ElementId>;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> DomResult<ElementId>;

    /// Insert `child` under `parent` before `reference`, or last when
    /// `reference` is `None`. A child already in the tree is moved.
    fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    ) -> DomResult<()>;

    /// First matching element in the document.
    fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// First matching descendant of `root`.
    fn query_within(&self, root: ElementId, selector: &Selector) -> Option<ElementId> {
        self.query_all_within(root, selector).into_iter().next()
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Toggle a class, returning whether it is now present.
    fn toggle_class(&mut self, el: ElementId, class: &str) -> DomResult<bool> {
        if self.has_class(el, class) {
            self.remove_class(el, class)?;
            Ok(false)
        } else {
            self.add_class(el, class)?;
            Ok(true)
        }
    }

    /// Set the whole `class` attribute from a space separated list.
    fn set_class_name(&mut self, el: ElementId, classes: &str) -> DomResult<()> {
        self.set_attribute(el, "class", classes)
    }
}

//! In-memory `Dom` used by tests and offline tooling.

use std::collections::BTreeMap;

use crate::{Dom, DomError, DomResult, ElementId, Selector};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    /// Text preceding the element children.
    text: String,
    value: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: None,
            parent: None,
            children: Vec::new(),
        }
    }

    fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// A small element tree with `<html>`, `<head>` and `<body>`.
///
/// Text is modelled as one run per element placed before its element
/// children, which is all the enhancements read or write.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create an empty document.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: vec![Node::new("html")],
            root: ElementId::from_raw(0),
            head: ElementId::from_raw(0),
            body: ElementId::from_raw(0),
        };
        dom.head = dom.push(Node::new("head"));
        dom.body = dom.push(Node::new("body"));
        dom.nodes[1].parent = Some(dom.root);
        dom.nodes[2].parent = Some(dom.root);
        dom.nodes[0].children = vec![dom.head, dom.body];
        dom
    }

    /// Start building a new element.
    pub fn build(&mut self, tag: &str) -> ElementBuilder<'_> {
        let id = self.push(Node::new(tag));
        ElementBuilder { dom: self, id }
    }

    /// Set a form control's value, as typing would.
    pub fn set_value(&mut self, el: ElementId, value: &str) -> DomResult<()> {
        self.node_mut(el)?.value = Some(value.to_string());
        Ok(())
    }

    /// Child elements in order.
    pub fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.node(el).map(|n| n.children.clone()).unwrap_or_default()
    }

    /// Whether the element is reachable from the document root.
    pub fn is_attached(&self, el: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    fn push(&mut self, node: Node) -> ElementId {
        let id = ElementId::from_raw(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, el: ElementId) -> Option<&Node> {
        self.nodes.get(el.raw() as usize)
    }

    fn node_mut(&mut self, el: ElementId) -> DomResult<&mut Node> {
        self.nodes
            .get_mut(el.raw() as usize)
            .ok_or(DomError::UnknownElement(el))
    }

    /// Descendants of `root` in document order, excluding `root`.
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self
            .node(root)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn matches(&self, el: ElementId, selector: &Selector) -> bool {
        match self.node(el) {
            Some(node) => selector.matches(&node.tag, |name| node.attributes.get(name).cloned()),
            None => false,
        }
    }

    fn detach(&mut self, el: ElementId) -> DomResult<()> {
        if let Some(parent) = self.node(el).and_then(|n| n.parent) {
            self.node_mut(parent)?.children.retain(|c| *c != el);
        }
        self.node_mut(el)?.parent = None;
        Ok(())
    }
}

impl Dom for MemoryDom {
    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.query_all_within(self.root, selector)
    }

    fn query_all_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.root).into_iter().find(|el| {
            self.node(*el)
                .and_then(|n| n.attributes.get("id"))
                .is_some_and(|v| v == id)
        })
    }

    fn head(&self) -> Option<ElementId> {
        Some(self.head)
    }

    fn body(&self) -> Option<ElementId> {
        Some(self.body)
    }

    fn tag_name(&self, el: ElementId) -> Option<String> {
        self.node(el).map(|n| n.tag.clone())
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.node(el).and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> DomResult<()> {
        self.node_mut(el)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.node(el).is_some_and(|n| n.classes().contains(&class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> DomResult<()> {
        let node = self.node_mut(el)?;
        let mut classes: Vec<String> = node.classes().into_iter().map(String::from).collect();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        node.attributes.insert("class".to_string(), classes.join(" "));
        Ok(())
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> DomResult<()> {
        let node = self.node_mut(el)?;
        let classes: Vec<String> = node
            .classes()
            .into_iter()
            .filter(|c| *c != class)
            .map(String::from)
            .collect();
        if node.attributes.contains_key("class") {
            node.attributes.insert("class".to_string(), classes.join(" "));
        }
        Ok(())
    }

    fn text_content(&self, el: ElementId) -> Option<String> {
        let node = self.node(el)?;
        let mut text = node.text.clone();
        for child in &node.children {
            if let Some(child_text) = self.text_content(*child) {
                text.push_str(&child_text);
            }
        }
        Some(text)
    }

    fn set_text_content(&mut self, el: ElementId, text: &str) -> DomResult<()> {
        self.clear_children(el)?;
        self.node_mut(el)?.text = text.to_string();
        Ok(())
    }

    fn clear_children(&mut self, el: ElementId) -> DomResult<()> {
        let children = std::mem::take(&mut self.node_mut(el)?.children);
        for child in children {
            self.node_mut(child)?.parent = None;
        }
        self.node_mut(el)?.text.clear();
        Ok(())
    }

    fn value(&self, el: ElementId) -> Option<String> {
        let node = self.node(el)?;
        match node.tag.as_str() {
            "input" | "textarea" | "select" => {
                Some(node.value.clone().unwrap_or_default())
            }
            _ => None,
        }
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).and_then(|n| n.parent)
    }

    fn next_element_sibling(&self, el: ElementId) -> Option<ElementId> {
        let parent = self.parent(el)?;
        let siblings = &self.node(parent)?.children;
        let index = siblings.iter().position(|c| *c == el)?;
        siblings.get(index + 1).copied()
    }

    fn create_element(&mut self, tag: &str) -> DomResult<ElementId> {
        Ok(self.push(Node::new(tag)))
    }

    fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    ) -> DomResult<()> {
        self.node(parent).ok_or(DomError::UnknownElement(parent))?;
        self.node(child).ok_or(DomError::UnknownElement(child))?;

        let mut ancestor = Some(parent);
        while let Some(id) = ancestor {
            if id == child {
                return Err(DomError::HierarchyRequest { child });
            }
            ancestor = self.parent(id);
        }

        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) || reference == child {
                return Err(DomError::NotAChild { parent, reference });
            }
        }

        self.detach(child)?;

        let siblings = &mut self.node_mut(parent)?.children;
        let index = reference
            .and_then(|r| siblings.iter().position(|c| *c == r))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }
}

/// Fluent construction of test markup.
///
/// ```
/// use shopfront_dom::{Dom, MemoryDom};
///
/// let mut dom = MemoryDom::new();
/// let body = dom.body().unwrap();
/// let item = dom.build("div").class("product-item").append_to(body);
/// dom.build("h2").class("product-name").text("Keyboard").append_to(item);
/// assert_eq!(dom.text_content(item).as_deref(), Some("Keyboard"));
/// ```
pub struct ElementBuilder<'a> {
    dom: &'a mut MemoryDom,
    id: ElementId,
}

impl<'a> ElementBuilder<'a> {
    /// Add a class.
    pub fn class(self, class: &str) -> Self {
        let result = self.dom.add_class(self.id, class);
        debug_assert!(result.is_ok(), "add class {:?}: {:?}", class, result);
        self
    }

    /// Set the `id` attribute.
    pub fn dom_id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Set an attribute.
    pub fn attr(self, name: &str, value: &str) -> Self {
        let result = self.dom.set_attribute(self.id, name, value);
        debug_assert!(result.is_ok(), "set attribute {:?}: {:?}", name, result);
        self
    }

    /// Set the text run.
    pub fn text(self, text: &str) -> Self {
        if let Some(node) = self.dom.nodes.get_mut(self.id.raw() as usize) {
            node.text = text.to_string();
        }
        self
    }

    /// Set the control value.
    pub fn value(self, value: &str) -> Self {
        let result = self.dom.set_value(self.id, value);
        debug_assert!(result.is_ok(), "set value: {:?}", result);
        self
    }

    /// Append to `parent` and return the handle.
    pub fn try_append_to(self, parent: ElementId) -> DomResult<ElementId> {
        self.dom.append_child(parent, self.id)?;
        Ok(self.id)
    }

    /// Append to `parent` and return the handle. An invalid parent is a
    /// markup bug and trips a debug assertion.
    pub fn append_to(self, parent: ElementId) -> ElementId {
        let id = self.id;
        let result = self.try_append_to(parent);
        debug_assert!(result.is_ok(), "append to {:?}: {:?}", parent, result);
        id
    }

    /// Leave detached and return the handle.
    pub fn finish(self) -> ElementId {
        self.id
    }
}

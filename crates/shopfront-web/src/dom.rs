//! `Dom` over the browser document.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use shopfront_dom::{Dom, DomError, DomResult, ElementId, Selector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Node, NodeList,
};

/// The live document.
///
/// Elements are handed out as [`ElementId`]s through a registry keyed by
/// element identity; the same element maps to the same id while it stays
/// registered. Ids are never reused.
#[derive(Debug)]
pub struct WebDom {
    document: Document,
    registry: RefCell<Registry>,
}

#[derive(Debug)]
struct Registry {
    /// Element to raw id.
    index: js_sys::Map,
    /// Raw id to element.
    elements: HashMap<u32, Element>,
    /// Ids that survive [`WebDom::release_detached`].
    pinned: HashSet<u32>,
    next: u32,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            registry: RefCell::new(Registry {
                index: js_sys::Map::new(),
                elements: HashMap::new(),
                pinned: HashSet::new(),
                next: 0,
            }),
        }
    }

    /// Id for an element, registering it on first sight.
    pub fn id_of(&self, element: &Element) -> ElementId {
        let mut registry = self.registry.borrow_mut();
        if let Some(raw) = registry.index.get(element).as_f64() {
            return ElementId::from_raw(raw as u32);
        }

        let raw = registry.next;
        registry.next += 1;
        registry.index.set(element, &JsValue::from(raw));
        registry.elements.insert(raw, element.clone());
        ElementId::from_raw(raw)
    }

    /// The element behind an id.
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.registry.borrow().elements.get(&id.raw()).cloned()
    }

    /// Keep `id` registered even while its element is detached. Used for
    /// elements the host holds listeners or observers on.
    pub fn pin(&self, id: ElementId) {
        self.registry.borrow_mut().pinned.insert(id.raw());
    }

    /// Forget unpinned elements no longer in the document. Returns how
    /// many were released.
    ///
    /// Only call between events: an element created and not yet inserted
    /// counts as detached.
    pub fn release_detached(&self) -> usize {
        let mut registry = self.registry.borrow_mut();
        let Registry {
            index,
            elements,
            pinned,
            ..
        } = &mut *registry;

        let before = elements.len();
        elements.retain(|raw, element| {
            let keep = pinned.contains(raw) || element.is_connected();
            if !keep {
                index.delete(element);
            }
            keep
        });
        before - elements.len()
    }

    fn resolve(&self, id: ElementId) -> DomResult<Element> {
        self.element(id).ok_or(DomError::UnknownElement(id))
    }

    fn collect(&self, nodes: Result<NodeList, JsValue>) -> Vec<ElementId> {
        let Ok(nodes) = nodes else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.id_of(&el))
            .collect()
    }
}

pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

fn rejected(err: JsValue) -> DomError {
    DomError::Rejected(js_error_message(&err))
}

impl Dom for WebDom {
    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.collect(self.document.query_selector_all(&selector.to_string()))
    }

    fn query_all_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        match self.element(root) {
            Some(root) => self.collect(root.query_selector_all(&selector.to_string())),
            None => Vec::new(),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.document.get_element_by_id(id).map(|el| self.id_of(&el))
    }

    fn head(&self) -> Option<ElementId> {
        self.document
            .head()
            .map(|head| self.id_of(head.unchecked_ref::<Element>()))
    }

    fn body(&self) -> Option<ElementId> {
        self.document
            .body()
            .map(|body| self.id_of(body.unchecked_ref::<Element>()))
    }

    fn tag_name(&self, el: ElementId) -> Option<String> {
        self.element(el).map(|el| el.tag_name().to_ascii_lowercase())
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.element(el)?.get_attribute(name)
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) -> DomResult<()> {
        self.resolve(el)?.set_attribute(name, value).map_err(rejected)
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.element(el)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> DomResult<()> {
        self.resolve(el)?.class_list().add_1(class).map_err(rejected)
    }

    fn remove_class(&mut self, el: ElementId, class: &str) -> DomResult<()> {
        self.resolve(el)?
            .class_list()
            .remove_1(class)
            .map_err(rejected)
    }

    fn text_content(&self, el: ElementId) -> Option<String> {
        self.element(el)?.text_content()
    }

    fn set_text_content(&mut self, el: ElementId, text: &str) -> DomResult<()> {
        self.resolve(el)?.set_text_content(Some(text));
        Ok(())
    }

    fn clear_children(&mut self, el: ElementId) -> DomResult<()> {
        let el = self.resolve(el)?;
        while let Some(child) = el.first_child() {
            el.remove_child(&child).map_err(rejected)?;
        }
        Ok(())
    }

    fn value(&self, el: ElementId) -> Option<String> {
        let el = self.element(el)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            Some(area.value())
        } else {
            el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
        }
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.element(el)?
            .parent_element()
            .map(|parent| self.id_of(&parent))
    }

    fn next_element_sibling(&self, el: ElementId) -> Option<ElementId> {
        self.element(el)?
            .next_element_sibling()
            .map(|sibling| self.id_of(&sibling))
    }

    fn create_element(&mut self, tag: &str) -> DomResult<ElementId> {
        let el = self.document.create_element(tag).map_err(rejected)?;
        Ok(self.id_of(&el))
    }

    fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    ) -> DomResult<()> {
        let parent = self.resolve(parent)?;
        let child = self.resolve(child)?;
        let reference = reference.map(|r| self.resolve(r)).transpose()?;
        let reference = reference.as_ref().map(|r| r.unchecked_ref::<Node>());
        parent
            .insert_before(&child, reference)
            .map(|_| ())
            .map_err(rejected)
    }
}

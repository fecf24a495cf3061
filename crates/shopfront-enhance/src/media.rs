//! Lazy image loading and click-to-zoom.

use shopfront_core::MediaConfig;
use shopfront_dom::{Dom, DomResult, ElementId, Selector, SelectorError};
use shopfront_observability::StructuredLogger;

use crate::events::IntersectionEntry;

/// Defers image downloads until the image scrolls into view.
///
/// Images carry their real URL in `data-src`. Loading copies it to `src`
/// and adds the `loaded` class.
#[derive(Debug, Clone)]
pub struct LazyImages {
    selector: Selector,
    source_attr: String,
    loaded_class: String,
    logger: StructuredLogger,
}

impl LazyImages {
    /// Create from configuration.
    pub fn new(config: &MediaConfig, logger: &StructuredLogger) -> Result<Self, SelectorError> {
        Ok(Self {
            selector: Selector::parse(&config.lazy_selector)?,
            source_attr: config.lazy_source_attr.clone(),
            loaded_class: config.loaded_class.clone(),
            logger: logger.for_component("media"),
        })
    }

    /// Lazy images currently on the page.
    pub fn discover<D: Dom>(&self, dom: &D) -> Vec<ElementId> {
        dom.query_all(&self.selector)
    }

    /// Load every lazy image now. Used when the browser cannot observe
    /// intersections. Returns how many were loaded.
    pub fn load_all<D: Dom>(&self, dom: &mut D) -> usize {
        self.discover(dom)
            .into_iter()
            .filter(|img| self.load(dom, *img))
            .count()
    }

    /// Swap in the real source. Returns `false` for an image without one.
    pub fn load<D: Dom>(&self, dom: &mut D, img: ElementId) -> bool {
        let Some(src) = dom.attribute(img, &self.source_attr) else {
            self.logger
                .debug_with("Lazy image has no source", &[("element", &img)]);
            return false;
        };

        let result = dom
            .set_attribute(img, "src", &src)
            .and_then(|()| dom.add_class(img, &self.loaded_class));
        match result {
            Ok(()) => true,
            Err(e) => {
                self.logger.debug_with("Could not load image", &[("error", &e)]);
                false
            }
        }
    }

    /// Load images that became visible. Returns the images to stop
    /// observing.
    pub fn on_intersection<D: Dom>(
        &self,
        dom: &mut D,
        entries: &[IntersectionEntry],
    ) -> Vec<ElementId> {
        entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .map(|entry| {
                self.load(dom, entry.target);
                entry.target
            })
            .collect()
    }
}

/// Toggles a zoom class on product images when clicked.
#[derive(Debug, Clone)]
pub struct ImageZoom {
    selector: Selector,
    zoomed_class: String,
}

impl ImageZoom {
    /// Create from configuration.
    pub fn new(config: &MediaConfig) -> Result<Self, SelectorError> {
        Ok(Self {
            selector: Selector::parse(&config.zoom_selector)?,
            zoomed_class: config.zoomed_class.clone(),
        })
    }

    /// Zoomable images currently on the page.
    pub fn targets<D: Dom>(&self, dom: &D) -> Vec<ElementId> {
        dom.query_all(&self.selector)
    }

    /// Toggle zoom. Returns whether the image is now zoomed.
    pub fn on_click<D: Dom>(&self, dom: &mut D, img: ElementId) -> DomResult<bool> {
        dom.toggle_class(img, &self.zoomed_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_dom::MemoryDom;

    fn lazy() -> LazyImages {
        LazyImages::new(&MediaConfig::default(), &StructuredLogger::disabled()).unwrap()
    }

    fn gallery() -> (MemoryDom, ElementId, ElementId, ElementId) {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let a = dom
            .build("img")
            .class("lazy-image")
            .attr("data-src", "/img/a.webp")
            .append_to(body);
        let b = dom
            .build("img")
            .class("lazy-image")
            .attr("data-src", "/img/b.webp")
            .append_to(body);
        let broken = dom.build("img").class("lazy-image").append_to(body);
        (dom, a, b, broken)
    }

    #[test]
    fn test_load_all_without_observer() {
        let (mut dom, a, b, broken) = gallery();
        assert_eq!(lazy().load_all(&mut dom), 2);
        assert_eq!(dom.attribute(a, "src").as_deref(), Some("/img/a.webp"));
        assert!(dom.has_class(b, "loaded"));
        assert_eq!(dom.attribute(broken, "src"), None);
        assert!(!dom.has_class(broken, "loaded"));
    }

    #[test]
    fn test_intersection_loads_visible_only() {
        let (mut dom, a, b, _) = gallery();
        let unobserve = lazy().on_intersection(
            &mut dom,
            &[
                IntersectionEntry {
                    target: a,
                    is_intersecting: true,
                },
                IntersectionEntry {
                    target: b,
                    is_intersecting: false,
                },
            ],
        );

        assert_eq!(unobserve, vec![a]);
        assert!(dom.has_class(a, "loaded"));
        assert_eq!(dom.attribute(b, "src"), None);
    }

    #[test]
    fn test_zoom_toggles() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let img = dom
            .build("img")
            .class("product-image-zoom")
            .append_to(body);

        let zoom = ImageZoom::new(&MediaConfig::default()).unwrap();
        assert_eq!(zoom.targets(&dom), vec![img]);
        assert!(zoom.on_click(&mut dom, img).unwrap());
        assert!(dom.has_class(img, "zoomed"));
        assert!(!zoom.on_click(&mut dom, img).unwrap());
        assert!(!dom.has_class(img, "zoomed"));
    }
}

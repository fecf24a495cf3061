//! Mobile menu toggle and horizontally scrollable tables.

use shopfront_core::MobileConfig;
use shopfront_dom::{Dom, DomResult, ElementId, Selector, SelectorError};
use shopfront_observability::StructuredLogger;

/// The first `.mobile-menu-toggle` paired with the first `.mobile-menu`.
#[derive(Debug, Clone)]
pub struct MobileMenu {
    toggle: ElementId,
    menu: ElementId,
    hidden_class: String,
    open_class: String,
}

impl MobileMenu {
    /// Find the toggle and menu. `Ok(None)` if either is missing.
    pub fn attach<D: Dom>(dom: &D, config: &MobileConfig) -> Result<Option<Self>, SelectorError> {
        let toggle_selector = Selector::parse(&config.toggle_selector)?;
        let menu_selector = Selector::parse(&config.menu_selector)?;

        let (Some(toggle), Some(menu)) = (dom.query(&toggle_selector), dom.query(&menu_selector))
        else {
            return Ok(None);
        };

        Ok(Some(Self {
            toggle,
            menu,
            hidden_class: config.hidden_class.clone(),
            open_class: config.menu_open_class.clone(),
        }))
    }

    /// The toggle control.
    pub fn toggle(&self) -> ElementId {
        self.toggle
    }

    /// Flip menu visibility. Returns whether the menu is now shown.
    pub fn on_click<D: Dom>(&self, dom: &mut D) -> DomResult<bool> {
        let hidden = dom.toggle_class(self.menu, &self.hidden_class)?;
        if let Some(body) = dom.body() {
            dom.toggle_class(body, &self.open_class)?;
        }
        Ok(!hidden)
    }
}

/// Wraps tables in a scroll container so wide tables do not break the
/// mobile layout.
#[derive(Debug, Clone)]
pub struct ResponsiveTables {
    tables: Selector,
    wrapper_class: String,
    logger: StructuredLogger,
}

impl ResponsiveTables {
    /// Create from configuration.
    pub fn new(config: &MobileConfig, logger: &StructuredLogger) -> Result<Self, SelectorError> {
        Ok(Self {
            tables: Selector::parse(&config.table_selector)?,
            wrapper_class: config.table_wrapper_class.clone(),
            logger: logger.for_component("mobile"),
        })
    }

    /// Wrap every table not already wrapped. Returns how many were wrapped.
    ///
    /// Safe to run repeatedly: a table whose parent already carries the
    /// wrapper class is skipped.
    pub fn wrap_all<D: Dom>(&self, dom: &mut D) -> usize {
        let mut wrapped = 0;
        for table in dom.query_all(&self.tables) {
            let Some(parent) = dom.parent(table) else {
                continue;
            };
            if dom.has_class(parent, &self.wrapper_class) {
                continue;
            }
            match self.wrap(dom, parent, table) {
                Ok(()) => wrapped += 1,
                Err(e) => self
                    .logger
                    .debug_with("Could not wrap table", &[("error", &e)]),
            }
        }
        wrapped
    }

    fn wrap<D: Dom>(&self, dom: &mut D, parent: ElementId, table: ElementId) -> DomResult<()> {
        let wrapper = dom.create_element("div")?;
        dom.set_class_name(wrapper, &self.wrapper_class)?;
        dom.insert_before(parent, wrapper, Some(table))?;
        dom.append_child(wrapper, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_dom::MemoryDom;

    #[test]
    fn test_menu_toggle() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let toggle = dom.build("button").class("mobile-menu-toggle").append_to(body);
        let menu = dom
            .build("nav")
            .class("mobile-menu")
            .class("hidden")
            .append_to(body);

        let mobile = MobileMenu::attach(&dom, &MobileConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(mobile.toggle(), toggle);

        assert!(mobile.on_click(&mut dom).unwrap());
        assert!(!dom.has_class(menu, "hidden"));
        assert!(dom.has_class(body, "menu-open"));

        assert!(!mobile.on_click(&mut dom).unwrap());
        assert!(dom.has_class(menu, "hidden"));
        assert!(!dom.has_class(body, "menu-open"));
    }

    #[test]
    fn test_menu_missing_is_none() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        dom.build("button").class("mobile-menu-toggle").append_to(body);
        assert!(MobileMenu::attach(&dom, &MobileConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_bad_selector_is_error() {
        let config = MobileConfig {
            menu_selector: "nav > ul".to_string(),
            ..MobileConfig::default()
        };
        assert!(MobileMenu::attach(&MemoryDom::new(), &config).is_err());
    }

    #[test]
    fn test_wrap_tables_once() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let section = dom.build("section").append_to(body);
        let intro = dom.build("p").append_to(section);
        let first = dom.build("table").append_to(section);
        let second = dom.build("table").append_to(body);

        let tables =
            ResponsiveTables::new(&MobileConfig::default(), &StructuredLogger::disabled()).unwrap();
        assert_eq!(tables.wrap_all(&mut dom), 2);

        let wrapper = dom.parent(first).unwrap();
        assert!(dom.has_class(wrapper, "responsive-table"));
        assert_eq!(dom.children(section), vec![intro, wrapper]);
        assert!(dom.has_class(dom.parent(second).unwrap(), "responsive-table"));

        assert_eq!(tables.wrap_all(&mut dom), 0);
        assert_eq!(
            dom.query_all(&Selector::class("responsive-table")).len(),
            2
        );
    }
}

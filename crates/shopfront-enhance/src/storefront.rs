//! Page driver tying the enhancements to one page.

use shopfront_cart::{CartStore, KeyValueStore};
use shopfront_core::StorefrontConfig;
use shopfront_dom::{Dom, ElementId};
use shopfront_observability::StructuredLogger;

use crate::events::{
    Capabilities, EventKind, EventOutcome, IntersectionEntry, Listener, PageEvent, ReadyReport,
    TimerToken,
};
use crate::forms::FormValidator;
use crate::media::{ImageZoom, LazyImages};
use crate::mobile::{MobileMenu, ResponsiveTables};
use crate::search::SearchBox;
use crate::seo::SeoInjector;

/// All enhancements for one page, plus the cart.
///
/// The host calls [`Storefront::on_ready`] once the document is parsed,
/// attaches the listeners it reports, and forwards every event to
/// [`Storefront::handle`]. Execution is single threaded; each call runs to
/// completion before the next event is delivered.
pub struct Storefront<D, S> {
    config: StorefrontConfig,
    dom: D,
    cart: CartStore<S>,
    logger: StructuredLogger,
    validator: FormValidator,
    tables: Option<ResponsiveTables>,
    lazy: Option<LazyImages>,
    zoom: Option<ImageZoom>,
    seo: Option<SeoInjector>,
    search: Option<SearchBox>,
    menu: Option<MobileMenu>,
    forms: Vec<ElementId>,
    zoom_targets: Vec<ElementId>,
    ready: bool,
}

impl<D: Dom, S: KeyValueStore> Storefront<D, S> {
    /// Build the enhancements. Nothing touches the page until
    /// [`Storefront::on_ready`].
    ///
    /// An enhancement whose configured selector cannot be parsed is
    /// disabled with a warning; the others still run.
    pub fn new(config: StorefrontConfig, dom: D, store: S, logger: StructuredLogger) -> Self {
        let cart = CartStore::new(store, config.cart.storage_key.clone()).with_logger(logger.clone());
        let validator = FormValidator::new(&config.forms, &logger);

        let tables = enabled(&logger, "mobile", ResponsiveTables::new(&config.mobile, &logger));
        let lazy = enabled(&logger, "media", LazyImages::new(&config.media, &logger));
        let zoom = enabled(&logger, "media", ImageZoom::new(&config.media));
        let seo = enabled(&logger, "seo", SeoInjector::new(&config.seo, &logger));

        Self {
            config,
            dom,
            cart,
            logger,
            validator,
            tables,
            lazy,
            zoom,
            seo,
            search: None,
            menu: None,
            forms: Vec::new(),
            zoom_targets: Vec::new(),
            ready: false,
        }
    }

    /// Run load-time work and report what the host must wire up.
    ///
    /// Only the first call has an effect.
    pub fn on_ready(&mut self, capabilities: Capabilities) -> ReadyReport {
        let mut report = ReadyReport::default();
        if self.ready {
            self.logger.debug("Page already initialised");
            return report;
        }
        self.ready = true;

        // Images load before structured data reads their sources.
        if let Some(lazy) = &self.lazy {
            if capabilities.intersection_observer {
                report.observe = lazy.discover(&self.dom);
            } else {
                report.loaded_images = lazy.load_all(&mut self.dom);
            }
        }

        if let Some(zoom) = &self.zoom {
            self.zoom_targets = zoom.targets(&self.dom);
            report
                .listeners
                .extend(self.zoom_targets.iter().map(|img| Listener {
                    target: *img,
                    kind: EventKind::Click,
                }));
        }

        match MobileMenu::attach(&self.dom, &self.config.mobile) {
            Ok(Some(menu)) => {
                report.listeners.push(Listener {
                    target: menu.toggle(),
                    kind: EventKind::Click,
                });
                self.menu = Some(menu);
            }
            Ok(None) => self.logger.debug("Mobile menu not on page"),
            Err(e) => self
                .logger
                .warn_with("Mobile menu disabled", &[("error", &e)]),
        }

        if let Some(tables) = &self.tables {
            report.wrapped_tables = tables.wrap_all(&mut self.dom);
        }

        self.search = SearchBox::attach(&self.dom, &self.config.search, &self.logger);
        if let Some(search) = &self.search {
            report.listeners.push(Listener {
                target: search.input(),
                kind: EventKind::Input,
            });
        }

        self.forms = self
            .validator
            .find_forms(&self.dom, &self.config.forms.form_ids);
        report
            .listeners
            .extend(self.forms.iter().map(|form| Listener {
                target: *form,
                kind: EventKind::Submit,
            }));

        if let Some(seo) = &self.seo {
            report.structured_data = seo.inject_all(&mut self.dom);
        }

        self.logger
            .info_builder("Enhancements ready")
            .field_usize("listeners", report.listeners.len())
            .field_usize("lazy_images", report.observe.len() + report.loaded_images)
            .field_usize("tables", report.wrapped_tables)
            .field_usize("structured_data", report.structured_data)
            .emit();
        report
    }

    /// Process one page event.
    pub fn handle(&mut self, event: PageEvent) -> EventOutcome {
        match event {
            PageEvent::Click { target } => self.on_click(target),
            PageEvent::Input { target } => self.on_input(target),
            PageEvent::Submit { target } => self.on_submit(target),
            PageEvent::Intersection(entries) => self.on_intersection(&entries),
            PageEvent::TimerFired(token) => self.on_timer(token),
        }
    }

    fn on_click(&mut self, target: ElementId) -> EventOutcome {
        if let Some(menu) = self.menu.as_ref().filter(|m| m.toggle() == target) {
            if let Err(e) = menu.on_click(&mut self.dom) {
                self.logger
                    .debug_with("Could not toggle menu", &[("error", &e)]);
            }
        }

        if let Some(zoom) = self.zoom.as_ref() {
            if self.zoom_targets.contains(&target) {
                if let Err(e) = zoom.on_click(&mut self.dom, target) {
                    self.logger
                        .debug_with("Could not toggle zoom", &[("error", &e)]);
                }
            }
        }

        EventOutcome::default()
    }

    fn on_input(&mut self, target: ElementId) -> EventOutcome {
        let timers = match self.search.as_mut() {
            Some(search) if search.input() == target => search.on_input(&mut self.dom),
            _ => Vec::new(),
        };
        EventOutcome {
            timers,
            ..EventOutcome::default()
        }
    }

    fn on_submit(&mut self, target: ElementId) -> EventOutcome {
        if !self.forms.contains(&target) {
            return EventOutcome::default();
        }
        let report = self.validator.validate(&mut self.dom, target);
        EventOutcome {
            prevent_default: !report.is_valid(),
            ..EventOutcome::default()
        }
    }

    fn on_intersection(&mut self, entries: &[IntersectionEntry]) -> EventOutcome {
        let unobserve = match &self.lazy {
            Some(lazy) => lazy.on_intersection(&mut self.dom, entries),
            None => Vec::new(),
        };
        EventOutcome {
            unobserve,
            ..EventOutcome::default()
        }
    }

    fn on_timer(&mut self, token: TimerToken) -> EventOutcome {
        if let Some(search) = self.search.as_mut() {
            if !search.on_timer(&mut self.dom, token) {
                self.logger
                    .trace(&format!("Ignoring stale {}", token));
            }
        }
        EventOutcome::default()
    }

    /// Register a callback for debounced search queries.
    pub fn set_search_hook(&mut self, hook: impl FnMut(&str) + 'static) -> bool {
        match self.search.as_mut() {
            Some(search) => {
                search.set_hook(hook);
                true
            }
            None => false,
        }
    }

    /// The cart.
    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// The cart, for mutation.
    pub fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// The page.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// The page, for mutation.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Active configuration.
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }
}

fn enabled<T, E: std::fmt::Display>(
    logger: &StructuredLogger,
    component: &str,
    result: Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            logger
                .for_component(component)
                .warn_with("Enhancement disabled by invalid selector", &[("error", &e)]);
            None
        }
    }
}

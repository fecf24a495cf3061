//! Module entry point and event plumbing.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use shopfront_core::{SessionId, StorefrontConfig};
use shopfront_dom::ElementId;
use shopfront_enhance::{
    Capabilities, EventKind, EventOutcome, IntersectionEntry, Listener, PageEvent, Storefront,
    TimerCommand, TimerToken,
};
use shopfront_observability::StructuredLogger;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CustomEvent, CustomEventInit, Element, Event,
    IntersectionObserver, IntersectionObserverEntry, Window,
};

use crate::bootstrap::{page_config, CONFIG_SCRIPT_ID, SEARCH_EVENT};
use crate::console::ConsoleSink;
use crate::dom::{js_error_message, WebDom};
use crate::storage::LocalStorage;

type PageStorefront = Storefront<WebDom, LocalStorage>;

/// Boot the enhancements once the document is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_loaded = Closure::once(move || {
            if let Err(e) = boot(window) {
                web_sys::console::error_1(&e);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_loaded.as_ref().unchecked_ref(),
        )?;
        on_loaded.forget();
        Ok(())
    } else {
        boot(window)
    }
}

fn boot(window: Window) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let session = SessionId::from_parts(js_sys::Date::now(), js_sys::Math::random());
    let script = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content());
    let (config, config_error) = match page_config(script.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (StorefrontConfig::default(), Some(e)),
    };

    let logger = StructuredLogger::from_config(&config.logging, session, Arc::new(ConsoleSink));
    if let Some(e) = config_error {
        logger.warn_with("Invalid page configuration, using defaults", &[("error", &e)]);
    }

    let capabilities = Capabilities {
        intersection_observer: js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false),
    };

    let storefront = Storefront::new(config, WebDom::new(document), LocalStorage::new(), logger.clone());
    let host = Rc::new(Host {
        window,
        storefront: RefCell::new(storefront),
        timers: RefCell::new(HashMap::new()),
        spent_timer: RefCell::new(None),
        observer: RefCell::new(None),
        logger,
    });
    Host::ready(&host, capabilities)
}

struct Host {
    window: Window,
    storefront: RefCell<PageStorefront>,
    timers: RefCell<HashMap<TimerToken, PendingTimer>>,
    /// Callback of the last timer that fired.
    spent_timer: RefCell<Option<Closure<dyn FnMut()>>>,
    observer: RefCell<Option<IntersectionObserver>>,
    logger: StructuredLogger,
}

impl Host {
    fn ready(host: &Rc<Self>, capabilities: Capabilities) -> Result<(), JsValue> {
        let report = host.storefront.borrow_mut().on_ready(capabilities);
        {
            let storefront = host.storefront.borrow();
            let dom = storefront.dom();
            let held = report.listeners.iter().map(|listener| listener.target);
            for id in held.chain(report.observe.iter().copied()) {
                dom.pin(id);
            }
        }

        for listener in &report.listeners {
            Self::listen(host, *listener)?;
        }
        if let Some(input) = report.listeners_of(EventKind::Input).next() {
            Self::forward_search(host, input);
        }
        if !report.observe.is_empty() {
            Self::observe(host, &report.observe)?;
        }
        host.release_detached();
        Ok(())
    }

    fn element(&self, id: ElementId) -> Option<Element> {
        self.storefront.borrow().dom().element(id)
    }

    fn listen(host: &Rc<Self>, listener: Listener) -> Result<(), JsValue> {
        let Some(element) = host.element(listener.target) else {
            return Ok(());
        };

        let this = Rc::clone(host);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let target = listener.target;
            let page_event = match listener.kind {
                EventKind::Click => PageEvent::Click { target },
                EventKind::Input => PageEvent::Input { target },
                EventKind::Submit => PageEvent::Submit { target },
            };
            this.dispatch(page_event, Some(&event));
        });
        element.add_event_listener_with_callback(
            listener.kind.as_str(),
            callback.as_ref().unchecked_ref(),
        )?;
        // Listeners live as long as the page.
        callback.forget();
        Ok(())
    }

    fn forward_search(host: &Rc<Self>, input: ElementId) {
        let Some(element) = host.element(input) else {
            return;
        };
        let hooked = host
            .storefront
            .borrow_mut()
            .set_search_hook(move |query: &str| {
                let init = CustomEventInit::new();
                init.set_bubbles(true);
                init.set_detail(&JsValue::from_str(query));
                if let Ok(event) = CustomEvent::new_with_event_init_dict(SEARCH_EVENT, &init) {
                    let _ = element.dispatch_event(&event);
                }
            });
        if !hooked {
            host.logger.debug("Search box not attached, no search events");
        }
    }

    fn observe(host: &Rc<Self>, images: &[ElementId]) -> Result<(), JsValue> {
        let this = Rc::clone(host);
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |records: js_sys::Array, _observer: IntersectionObserver| {
                let entries = {
                    let Ok(storefront) = this.storefront.try_borrow() else {
                        return;
                    };
                    records
                        .iter()
                        .map(|record| record.unchecked_into::<IntersectionObserverEntry>())
                        .map(|record| IntersectionEntry {
                            target: storefront.dom().id_of(&record.target()),
                            is_intersecting: record.is_intersecting(),
                        })
                        .collect()
                };
                this.dispatch(PageEvent::Intersection(entries), None);
            },
        );
        let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
        callback.forget();

        for image in images {
            if let Some(element) = host.element(*image) {
                observer.observe(&element);
            }
        }
        *host.observer.borrow_mut() = Some(observer);
        Ok(())
    }

    fn dispatch(self: &Rc<Self>, event: PageEvent, source: Option<&Event>) {
        let outcome = {
            let Ok(mut storefront) = self.storefront.try_borrow_mut() else {
                self.logger.debug("Event arrived during another event, dropped");
                return;
            };
            storefront.handle(event)
        };
        self.apply(outcome, source);
        self.release_detached();
    }

    fn release_detached(&self) {
        let Ok(storefront) = self.storefront.try_borrow() else {
            return;
        };
        let released = storefront.dom().release_detached();
        if released > 0 {
            self.logger
                .debug_with("Released detached elements", &[("count", &released)]);
        }
    }

    fn apply(self: &Rc<Self>, outcome: EventOutcome, source: Option<&Event>) {
        if outcome.prevent_default {
            if let Some(event) = source {
                event.prevent_default();
            }
        }

        for command in outcome.timers {
            if let Err(e) = self.run_timer(command) {
                self.logger
                    .warn_with("Timer command failed", &[("error", &js_error_message(&e))]);
            }
        }

        if !outcome.unobserve.is_empty() {
            if let Some(observer) = self.observer.borrow().as_ref() {
                for image in outcome.unobserve {
                    if let Some(element) = self.element(image) {
                        observer.unobserve(&element);
                    }
                }
            }
        }
    }

    fn run_timer(self: &Rc<Self>, command: TimerCommand) -> Result<(), JsValue> {
        match command {
            TimerCommand::Set { token, delay } => {
                let this = Rc::downgrade(self);
                let callback = Closure::<dyn FnMut()>::new(move || {
                    if let Some(host) = this.upgrade() {
                        host.timer_fired(token);
                    }
                });
                let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
                let handle = self
                    .window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        callback.as_ref().unchecked_ref(),
                        millis,
                    )?;
                let replaced = self
                    .timers
                    .borrow_mut()
                    .insert(token, PendingTimer { handle, callback });
                if let Some(stale) = replaced {
                    self.window.clear_timeout_with_handle(stale.handle);
                }
            }
            TimerCommand::Clear { token } => {
                // Dropping the entry frees its callback.
                if let Some(pending) = self.timers.borrow_mut().remove(&token) {
                    self.window.clear_timeout_with_handle(pending.handle);
                }
            }
        }
        Ok(())
    }

    fn timer_fired(self: &Rc<Self>, token: TimerToken) {
        // The running callback cannot be dropped from inside itself, so it
        // is parked until the next timer fires.
        let finished = self.timers.borrow_mut().remove(&token);
        *self.spent_timer.borrow_mut() = finished.map(|pending| pending.callback);
        self.dispatch(PageEvent::TimerFired(token), None);
    }
}

/// A scheduled `setTimeout` and the callback it will run.
struct PendingTimer {
    handle: i32,
    callback: Closure<dyn FnMut()>,
}

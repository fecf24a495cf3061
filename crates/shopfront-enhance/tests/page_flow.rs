//! End-to-end page behaviour against the in-memory page and store.

use std::sync::Arc;
use std::time::Duration;

use shopfront_cart::{LineItem, LineItemId, MemoryStore};
use shopfront_core::StorefrontConfig;
use shopfront_dom::{Dom, ElementId, MemoryDom, Selector};
use shopfront_enhance::prelude::*;
use shopfront_enhance::{IntersectionEntry, Listener};
use shopfront_observability::{LogLevel, MemorySink, SessionId, StructuredLogger};

struct Page {
    dom: MemoryDom,
    toggle: ElementId,
    menu: ElementId,
    search_input: ElementId,
    results: ElementId,
    form: ElementId,
    field: ElementId,
    lazy: Vec<ElementId>,
    zoom: ElementId,
    table: ElementId,
}

fn storefront_page() -> Page {
    let mut dom = MemoryDom::new();
    let body = dom.body().unwrap();

    let header = dom.build("header").append_to(body);
    let toggle = dom
        .build("button")
        .class("mobile-menu-toggle")
        .append_to(header);
    let menu = dom
        .build("nav")
        .class("mobile-menu")
        .class("hidden")
        .append_to(header);
    let search_input = dom.build("input").dom_id("search-input").append_to(header);
    let results = dom.build("div").dom_id("search-results").append_to(header);

    let main = dom.build("main").append_to(body);
    let card = dom.build("div").class("product-item").append_to(main);
    dom.build("h2")
        .class("product-name")
        .text("Arabic Coffee")
        .append_to(card);
    dom.build("span")
        .class("product-price")
        .attr("data-price", "45")
        .append_to(card);
    let lazy_a = dom
        .build("img")
        .class("lazy-image")
        .class("product-image")
        .attr("data-src", "/img/coffee.jpg")
        .append_to(card);
    let zoom = dom
        .build("img")
        .class("product-image-zoom")
        .append_to(card);
    let lazy_b = dom
        .build("img")
        .class("lazy-image")
        .attr("data-src", "/img/cups.jpg")
        .append_to(main);
    let table = dom.build("table").append_to(main);

    let form = dom.build("form").dom_id("contact-form").append_to(main);
    let field = dom.build("input").attr("required", "").append_to(form);

    Page {
        dom,
        toggle,
        menu,
        search_input,
        results,
        form,
        field,
        lazy: vec![lazy_a, lazy_b],
        zoom,
        table,
    }
}

fn storefront(dom: MemoryDom) -> (Storefront<MemoryDom, MemoryStore>, MemorySink) {
    let sink = MemorySink::new();
    let logger = StructuredLogger::new(SessionId::from_string("test"))
        .with_min_level(LogLevel::Debug)
        .with_sink(Arc::new(sink.clone()));
    let sf = Storefront::new(StorefrontConfig::default(), dom, MemoryStore::new(), logger);
    (sf, sink)
}

fn listener(target: ElementId, kind: EventKind) -> Listener {
    Listener { target, kind }
}

#[test]
fn test_ready_reports_listeners_and_observed_images() {
    let page = storefront_page();
    let (mut sf, sink) = storefront(page.dom);

    let report = sf.on_ready(Capabilities::default());

    assert_eq!(
        report.listeners,
        vec![
            listener(page.zoom, EventKind::Click),
            listener(page.toggle, EventKind::Click),
            listener(page.search_input, EventKind::Input),
            listener(page.form, EventKind::Submit),
        ]
    );
    assert_eq!(report.observe, page.lazy);
    assert_eq!(report.loaded_images, 0);
    assert_eq!(report.wrapped_tables, 1);
    assert_eq!(report.structured_data, 1);
    assert!(sink.contains("Enhancements ready"));

    let dom = sf.dom();
    assert!(dom.has_class(dom.parent(page.table).unwrap(), "responsive-table"));
    let scripts = dom.query_all(&Selector::parse("script[type=\"application/ld+json\"]").unwrap());
    assert_eq!(scripts.len(), 1);
    assert!(dom
        .text_content(scripts[0])
        .unwrap()
        .contains("\"name\":\"Arabic Coffee\""));
}

#[test]
fn test_second_ready_is_noop() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    sf.on_ready(Capabilities::default());
    let again = sf.on_ready(Capabilities::default());

    assert_eq!(again, ReadyReport::default());
    assert_eq!(
        sf.dom()
            .query_all(&Selector::class("responsive-table"))
            .len(),
        1
    );
}

#[test]
fn test_without_intersection_observer_images_load_at_ready() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    let report = sf.on_ready(Capabilities {
        intersection_observer: false,
    });

    assert!(report.observe.is_empty());
    assert_eq!(report.loaded_images, 2);
    for img in &page.lazy {
        assert!(sf.dom().has_class(*img, "loaded"));
    }
}

#[test]
fn test_structured_data_sees_images_loaded_at_ready() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    sf.on_ready(Capabilities {
        intersection_observer: false,
    });

    let dom = sf.dom();
    let scripts = dom.query_all(&Selector::parse("script[type=\"application/ld+json\"]").unwrap());
    let data: serde_json::Value =
        serde_json::from_str(&dom.text_content(scripts[0]).unwrap()).unwrap();
    assert_eq!(data["image"], "/img/coffee.jpg");
}

#[test]
fn test_intersection_event_loads_and_unobserves() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    sf.on_ready(Capabilities::default());

    let outcome = sf.handle(PageEvent::Intersection(vec![IntersectionEntry {
        target: page.lazy[1],
        is_intersecting: true,
    }]));

    assert_eq!(outcome.unobserve, vec![page.lazy[1]]);
    assert_eq!(
        sf.dom().attribute(page.lazy[1], "src").as_deref(),
        Some("/img/cups.jpg")
    );
    assert!(!sf.dom().has_class(page.lazy[0], "loaded"));
}

#[test]
fn test_menu_and_zoom_clicks() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    sf.on_ready(Capabilities::default());

    assert!(sf.handle(PageEvent::Click { target: page.toggle }).is_empty());
    assert!(!sf.dom().has_class(page.menu, "hidden"));
    assert!(sf.dom().has_class(sf.dom().body().unwrap(), "menu-open"));

    sf.handle(PageEvent::Click { target: page.zoom });
    assert!(sf.dom().has_class(page.zoom, "zoomed"));

    // Clicks on unrelated elements change nothing.
    sf.handle(PageEvent::Click { target: page.results });
    assert!(!sf.dom().has_class(page.menu, "hidden"));
}

#[test]
fn test_search_debounce_through_events() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    sf.on_ready(Capabilities::default());

    sf.dom_mut().set_value(page.search_input, "cof").unwrap();
    let first = sf.handle(PageEvent::Input {
        target: page.search_input,
    });
    sf.dom_mut().set_value(page.search_input, "coffee").unwrap();
    let second = sf.handle(PageEvent::Input {
        target: page.search_input,
    });

    let TimerCommand::Set { token: stale, delay } = first.timers[0] else {
        panic!("expected Set, got {:?}", first.timers);
    };
    assert_eq!(delay, Duration::from_millis(300));
    assert_eq!(second.timers[0], TimerCommand::Clear { token: stale });
    let TimerCommand::Set { token: fresh, .. } = second.timers[1] else {
        panic!("expected Set, got {:?}", second.timers);
    };

    sf.handle(PageEvent::TimerFired(stale));
    assert_eq!(sf.dom().text_content(page.results).as_deref(), Some(""));

    sf.handle(PageEvent::TimerFired(fresh));
    assert_eq!(
        sf.dom().text_content(page.results).as_deref(),
        Some("جاري البحث عن: coffee...")
    );

    sf.dom_mut().set_value(page.search_input, "co").unwrap();
    let short = sf.handle(PageEvent::Input {
        target: page.search_input,
    });
    assert!(short.timers.is_empty());
    assert_eq!(sf.dom().text_content(page.results).as_deref(), Some(""));
}

#[test]
fn test_submit_blocked_until_required_field_filled() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    sf.on_ready(Capabilities::default());

    let blocked = sf.handle(PageEvent::Submit { target: page.form });
    assert!(blocked.prevent_default);
    assert!(sf.dom().has_class(page.field, "border-error"));

    sf.dom_mut().set_value(page.field, "hello").unwrap();
    let allowed = sf.handle(PageEvent::Submit { target: page.form });
    assert!(!allowed.prevent_default);
    assert!(!sf.dom().has_class(page.field, "border-error"));
}

#[test]
fn test_submit_blocked_for_byte_order_mark_only() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    sf.on_ready(Capabilities::default());

    sf.dom_mut().set_value(page.field, "\u{FEFF}").unwrap();
    let outcome = sf.handle(PageEvent::Submit { target: page.form });
    assert!(outcome.prevent_default);
}

#[test]
fn test_unknown_form_submit_passes_through() {
    let page = storefront_page();
    let (mut sf, _) = storefront(page.dom);
    sf.on_ready(Capabilities::default());
    let outcome = sf.handle(PageEvent::Submit {
        target: page.results,
    });
    assert!(!outcome.prevent_default);
}

#[test]
fn test_empty_page_degrades_silently() {
    let (mut sf, sink) = storefront(MemoryDom::new());
    let report = sf.on_ready(Capabilities::default());

    assert!(report.listeners.is_empty());
    assert!(report.observe.is_empty());
    assert_eq!(report.structured_data, 0);
    assert!(sf.handle(PageEvent::TimerFired(TimerToken(1))).is_empty());
    assert!(sink
        .entries()
        .iter()
        .all(|e| e.level < LogLevel::Warn));
}

#[test]
fn test_invalid_selector_disables_one_enhancement() {
    let page = storefront_page();
    let mut config = StorefrontConfig::default();
    config.seo.product_selector = ".product-item > .card".to_string();

    let sink = MemorySink::new();
    let logger = StructuredLogger::new(SessionId::default()).with_sink(Arc::new(sink.clone()));
    let mut sf = Storefront::new(config, page.dom, MemoryStore::new(), logger);
    let report = sf.on_ready(Capabilities::default());

    assert_eq!(report.structured_data, 0);
    assert_eq!(report.wrapped_tables, 1);
    assert!(sink.contains("Enhancement disabled"));
}

#[test]
fn test_cart_shared_through_storefront() {
    let (mut sf, _) = storefront(MemoryDom::new());
    sf.cart_mut().add_item(LineItem::new("a", 1)).unwrap();
    sf.cart_mut().add_item(LineItem::new("a", 2)).unwrap();
    sf.cart_mut().add_item(LineItem::new("b", 1)).unwrap();
    sf.cart_mut().remove_item(&LineItemId::new("b")).unwrap();

    let items = sf.cart().get_cart();
    assert_eq!(items, vec![LineItem::new("a", 3)]);
    assert_eq!(sf.cart().key(), "digitalStoreCart");
}

//! Debounced search box.

use std::fmt;
use std::time::Duration;

use shopfront_core::SearchConfig;
use shopfront_dom::{Dom, DomResult, ElementId};
use shopfront_observability::StructuredLogger;

use crate::debounce::Debouncer;
use crate::events::{TimerCommand, TimerToken};
use crate::text::trim_value;

type SearchHook = Box<dyn FnMut(&str)>;

/// A search input wired to a results container.
///
/// Typing restarts a quiet period; once it elapses the results container
/// shows the "searching" message and the search hook receives the query.
/// Queries shorter than the configured minimum clear the results at once.
pub struct SearchBox {
    input: ElementId,
    results: ElementId,
    min_query_chars: usize,
    searching_message: String,
    debouncer: Debouncer<String>,
    hook: Option<SearchHook>,
    logger: StructuredLogger,
}

impl fmt::Debug for SearchBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBox")
            .field("input", &self.input)
            .field("results", &self.results)
            .field("min_query_chars", &self.min_query_chars)
            .field("pending", &self.debouncer.is_pending())
            .finish_non_exhaustive()
    }
}

impl SearchBox {
    /// Find the input and results container. `None` if either is missing.
    pub fn attach<D: Dom>(dom: &D, config: &SearchConfig, logger: &StructuredLogger) -> Option<Self> {
        let logger = logger.for_component("search");
        let input = dom.element_by_id(&config.input_id);
        let results = dom.element_by_id(&config.results_id);

        let (Some(input), Some(results)) = (input, results) else {
            logger.debug("Search input or results container not on page");
            return None;
        };

        Some(Self {
            input,
            results,
            min_query_chars: config.min_query_chars,
            searching_message: config.searching_message.clone(),
            debouncer: Debouncer::new(Duration::from_millis(u64::from(config.debounce_ms))),
            hook: None,
            logger,
        })
    }

    /// Register a callback that receives each debounced query.
    pub fn set_hook(&mut self, hook: impl FnMut(&str) + 'static) {
        self.hook = Some(Box::new(hook));
    }

    /// The search input element.
    pub fn input(&self) -> ElementId {
        self.input
    }

    /// The results container element.
    pub fn results(&self) -> ElementId {
        self.results
    }

    /// Handle an input event on the search field.
    pub fn on_input<D: Dom>(&mut self, dom: &mut D) -> Vec<TimerCommand> {
        let raw = dom.value(self.input).unwrap_or_default();
        let query = trim_value(&raw);

        if query.chars().count() < self.min_query_chars {
            if let Err(e) = dom.clear_children(self.results) {
                self.logger.debug_with("Could not clear results", &[("error", &e)]);
            }
            return self.debouncer.cancel().into_iter().collect();
        }

        self.debouncer.call(query.to_string())
    }

    /// Handle a timer expiry. Returns `false` if the token is not this
    /// box's current timer.
    pub fn on_timer<D: Dom>(&mut self, dom: &mut D, token: TimerToken) -> bool {
        let Some(query) = self.debouncer.fire(token) else {
            return false;
        };

        self.logger
            .debug_builder("Searching")
            .field("query", query.as_str())
            .emit();

        if let Err(e) = self.render_searching(dom, &query) {
            self.logger.debug_with("Could not render results", &[("error", &e)]);
        }
        if let Some(hook) = self.hook.as_mut() {
            hook(&query);
        }
        true
    }

    /// Whether a search is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn render_searching<D: Dom>(&self, dom: &mut D, query: &str) -> DomResult<()> {
        dom.clear_children(self.results)?;
        let paragraph = dom.create_element("p")?;
        dom.set_text_content(paragraph, &self.searching_message.replace("{query}", query))?;
        dom.append_child(self.results, paragraph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_dom::MemoryDom;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn page() -> (MemoryDom, ElementId, ElementId) {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let input = dom.build("input").dom_id("search-input").append_to(body);
        let results = dom.build("div").dom_id("search-results").append_to(body);
        (dom, input, results)
    }

    fn search_box(dom: &MemoryDom) -> SearchBox {
        SearchBox::attach(dom, &SearchConfig::default(), &StructuredLogger::disabled()).unwrap()
    }

    fn set_token(commands: &[TimerCommand]) -> TimerToken {
        match commands.last() {
            Some(TimerCommand::Set { token, delay }) => {
                assert_eq!(*delay, Duration::from_millis(300));
                *token
            }
            other => panic!("expected Set, got {:?}", other),
        }
    }

    #[test]
    fn test_attach_requires_both_elements() {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        dom.build("input").dom_id("search-input").append_to(body);
        assert!(SearchBox::attach(&dom, &SearchConfig::default(), &StructuredLogger::disabled())
            .is_none());
    }

    #[test]
    fn test_debounced_search_renders_message() {
        let (mut dom, input, results) = page();
        let mut search = search_box(&dom);

        dom.set_value(input, "  shoes ").unwrap();
        let token = set_token(&search.on_input(&mut dom));
        assert_eq!(dom.text_content(results).as_deref(), Some(""));

        assert!(search.on_timer(&mut dom, token));
        assert_eq!(
            dom.text_content(results).as_deref(),
            Some("جاري البحث عن: shoes...")
        );
        assert_eq!(dom.children(results).len(), 1);
    }

    #[test]
    fn test_stale_timer_ignored() {
        let (mut dom, input, results) = page();
        let mut search = search_box(&dom);

        dom.set_value(input, "sho").unwrap();
        let stale = set_token(&search.on_input(&mut dom));
        dom.set_value(input, "shoe").unwrap();
        let fresh = set_token(&search.on_input(&mut dom));

        assert!(!search.on_timer(&mut dom, stale));
        assert_eq!(dom.text_content(results).as_deref(), Some(""));
        assert!(search.on_timer(&mut dom, fresh));
        assert!(dom.text_content(results).unwrap().contains("shoe"));
    }

    #[test]
    fn test_short_query_clears_synchronously_and_cancels() {
        let (mut dom, input, results) = page();
        let mut search = search_box(&dom);

        dom.set_value(input, "shoes").unwrap();
        let token = set_token(&search.on_input(&mut dom));
        assert!(search.on_timer(&mut dom, token));
        assert!(!dom.text_content(results).unwrap().is_empty());

        dom.set_value(input, "bag").unwrap();
        let pending = set_token(&search.on_input(&mut dom));

        dom.set_value(input, "ba").unwrap();
        let commands = search.on_input(&mut dom);
        assert_eq!(commands, vec![TimerCommand::Clear { token: pending }]);
        assert_eq!(dom.text_content(results).as_deref(), Some(""));
        assert!(!search.on_timer(&mut dom, pending));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let (mut dom, input, _) = page();
        let mut search = search_box(&dom);

        // Two Arabic letters are four bytes but only two characters.
        dom.set_value(input, "قه").unwrap();
        assert!(search.on_input(&mut dom).is_empty());
        dom.set_value(input, "قهو").unwrap();
        assert_eq!(search.on_input(&mut dom).len(), 1);
    }

    #[test]
    fn test_query_rendered_as_text() {
        let (mut dom, input, results) = page();
        let mut search = search_box(&dom);

        dom.set_value(input, "<img src=x>").unwrap();
        let token = set_token(&search.on_input(&mut dom));
        search.on_timer(&mut dom, token);

        let paragraph = dom.children(results)[0];
        assert!(dom.children(paragraph).is_empty());
        assert!(dom.text_content(results).unwrap().contains("<img src=x>"));
    }

    #[test]
    fn test_hook_receives_query() {
        let (mut dom, input, _) = page();
        let mut search = search_box(&dom);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        search.set_hook(move |q| sink.borrow_mut().push(q.to_string()));

        dom.set_value(input, "lamp").unwrap();
        let token = set_token(&search.on_input(&mut dom));
        search.on_timer(&mut dom, token);

        assert_eq!(*seen.borrow(), vec!["lamp".to_string()]);
    }
}

//! Page events and the instructions returned to the host.

use std::fmt;
use std::time::Duration;

use shopfront_dom::ElementId;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Timer work the host performs on the enhancements' behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Deliver `PageEvent::TimerFired(token)` after `delay`.
    Set { token: TimerToken, delay: Duration },
    /// Forget a previously set timer.
    Clear { token: TimerToken },
}

/// DOM event types the enhancements listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Submit,
}

impl EventKind {
    /// DOM event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Input => "input",
            EventKind::Submit => "submit",
        }
    }
}

/// A listener the host must attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub target: ElementId,
    pub kind: EventKind,
}

/// One intersection observer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
}

/// Events delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A listened-for element was clicked.
    Click { target: ElementId },
    /// A listened-for input changed.
    Input { target: ElementId },
    /// A listened-for form is being submitted.
    Submit { target: ElementId },
    /// Observed images changed visibility.
    Intersection(Vec<IntersectionEntry>),
    /// A timer set through `TimerCommand::Set` elapsed.
    TimerFired(TimerToken),
}

/// What the host must do after an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Call `preventDefault()` on the originating event.
    pub prevent_default: bool,
    /// Timers to set or clear, in order.
    pub timers: Vec<TimerCommand>,
    /// Elements to stop observing.
    pub unobserve: Vec<ElementId>,
}

impl EventOutcome {
    /// Whether the host has nothing to do.
    pub fn is_empty(&self) -> bool {
        !self.prevent_default && self.timers.is_empty() && self.unobserve.is_empty()
    }
}

/// Browser features the host can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `IntersectionObserver` is available.
    pub intersection_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
        }
    }
}

/// Result of page-ready initialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadyReport {
    /// Listeners to attach.
    pub listeners: Vec<Listener>,
    /// Lazy images to observe.
    pub observe: Vec<ElementId>,
    /// Lazy images loaded immediately.
    pub loaded_images: usize,
    /// Tables wrapped in scroll containers.
    pub wrapped_tables: usize,
    /// JSON-LD blocks injected.
    pub structured_data: usize,
}

impl ReadyReport {
    /// Listeners of one kind.
    pub fn listeners_of(&self, kind: EventKind) -> impl Iterator<Item = ElementId> + '_ {
        self.listeners
            .iter()
            .filter(move |l| l.kind == kind)
            .map(|l| l.target)
    }
}

//! Progressive enhancements for the storefront pages.
//!
//! Each enhancement is an explicit value built from [`StorefrontConfig`]
//! and driven through a [`Dom`]:
//!
//! - **Media**: lazy image loading and click-to-zoom
//! - **Search**: debounced search box
//! - **Forms**: required-field validation with inline errors
//! - **Mobile**: menu toggle and scrollable tables
//! - **SEO**: `schema.org/Product` JSON-LD injection
//!
//! [`Storefront`] ties them together with the cart and turns page events
//! into DOM changes plus instructions for the host (timers to set, default
//! actions to prevent, images to stop observing).
//!
//! Missing markup is never an error: an enhancement whose elements are not
//! on the page simply does nothing.
//!
//! [`StorefrontConfig`]: shopfront_core::StorefrontConfig
//! [`Dom`]: shopfront_dom::Dom

pub mod debounce;
pub mod events;
pub mod forms;
pub mod media;
pub mod mobile;
pub mod search;
pub mod seo;

mod storefront;
mod text;

pub use debounce::Debouncer;
pub use events::{
    Capabilities, EventKind, EventOutcome, IntersectionEntry, Listener, PageEvent, ReadyReport,
    TimerCommand, TimerToken,
};
pub use forms::{FormValidator, ValidationReport};
pub use media::{ImageZoom, LazyImages};
pub use mobile::{MobileMenu, ResponsiveTables};
pub use search::SearchBox;
pub use seo::{Offer, ProductSnapshot, ProductStructuredData, SeoInjector};
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Capabilities, EventKind, EventOutcome, PageEvent, ReadyReport, Storefront, TimerCommand,
        TimerToken,
    };
    pub use shopfront_core::StorefrontConfig;
    pub use shopfront_dom::{Dom, ElementId, MemoryDom};
}

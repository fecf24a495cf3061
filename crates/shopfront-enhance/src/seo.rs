//! `schema.org/Product` structured data.
//!
//! Product cards rendered on the page are read back into
//! [`ProductSnapshot`]s and turned into JSON-LD `<script>` blocks in
//! `<head>` so crawlers see the same products the visitor does.

use serde::{Deserialize, Serialize};
use shopfront_core::SeoConfig;
use shopfront_dom::{Dom, DomResult, ElementId, Selector, SelectorError};
use shopfront_observability::StructuredLogger;

const SCHEMA_CONTEXT: &str = "https://schema.org/";
const INJECTED_ATTR: &str = "data-structured-data";
const INJECTED_VALUE: &str = "injected";

/// Product fields as read from one product card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The `offers` member of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "priceCurrency")]
    pub price_currency: String,
    pub price: String,
    pub availability: String,
}

/// A JSON-LD `Product` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStructuredData {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub offers: Offer,
}

impl ProductStructuredData {
    /// Build the document, or `None` when the name or price is missing or
    /// blank.
    pub fn from_snapshot(snapshot: &ProductSnapshot, config: &SeoConfig) -> Option<Self> {
        let name = non_blank(snapshot.name.as_deref())?;
        let price = non_blank(snapshot.price.as_deref())?;

        Some(Self {
            context: SCHEMA_CONTEXT.to_string(),
            kind: "Product".to_string(),
            name: name.to_string(),
            image: snapshot.image.clone().unwrap_or_default(),
            description: snapshot
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            offers: Offer {
                kind: "Offer".to_string(),
                price_currency: config.currency.clone(),
                price: price.to_string(),
                availability: config.availability.clone(),
            },
        })
    }

    /// Serialize as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
struct ProductSelectors {
    product: Selector,
    name: Selector,
    price: Selector,
    image: Selector,
    description: Selector,
}

/// Injects one JSON-LD block per product card.
#[derive(Debug, Clone)]
pub struct SeoInjector {
    selectors: ProductSelectors,
    config: SeoConfig,
    logger: StructuredLogger,
}

impl SeoInjector {
    /// Create from configuration.
    pub fn new(config: &SeoConfig, logger: &StructuredLogger) -> Result<Self, SelectorError> {
        Ok(Self {
            selectors: ProductSelectors {
                product: Selector::parse(&config.product_selector)?,
                name: Selector::parse(&config.name_selector)?,
                price: Selector::parse(&config.price_selector)?,
                image: Selector::parse(&config.image_selector)?,
                description: Selector::parse(&config.description_selector)?,
            },
            config: config.clone(),
            logger: logger.for_component("seo"),
        })
    }

    /// Read a product card.
    pub fn snapshot<D: Dom>(&self, dom: &D, product: ElementId) -> ProductSnapshot {
        let s = &self.selectors;
        ProductSnapshot {
            name: dom
                .query_within(product, &s.name)
                .and_then(|el| dom.text_content(el)),
            price: dom
                .query_within(product, &s.price)
                .and_then(|el| dom.attribute(el, "data-price")),
            image: dom
                .query_within(product, &s.image)
                .and_then(|el| dom.attribute(el, "src")),
            description: dom
                .query_within(product, &s.description)
                .and_then(|el| dom.text_content(el)),
        }
    }

    /// Inject structured data for every product card not yet handled.
    /// Cards without a name or price are skipped. Returns how many blocks
    /// were added.
    pub fn inject_all<D: Dom>(&self, dom: &mut D) -> usize {
        let Some(head) = dom.head() else {
            self.logger.debug("Document has no head");
            return 0;
        };

        let mut injected = 0;
        for product in dom.query_all(&self.selectors.product) {
            if dom.attribute(product, INJECTED_ATTR).as_deref() == Some(INJECTED_VALUE) {
                continue;
            }

            let snapshot = self.snapshot(dom, product);
            let Some(data) = ProductStructuredData::from_snapshot(&snapshot, &self.config) else {
                self.logger
                    .debug_with("Product card lacks name or price", &[("element", &product)]);
                continue;
            };

            match self.inject(dom, head, product, &data) {
                Ok(()) => injected += 1,
                Err(e) => self
                    .logger
                    .debug_with("Could not inject structured data", &[("error", &e)]),
            }
        }

        if injected > 0 {
            self.logger
                .debug_builder("Injected structured data")
                .field_usize("products", injected)
                .emit();
        }
        injected
    }

    fn inject<D: Dom>(
        &self,
        dom: &mut D,
        head: ElementId,
        product: ElementId,
        data: &ProductStructuredData,
    ) -> DomResult<()> {
        let json = data
            .to_json()
            .map_err(|e| shopfront_dom::DomError::Rejected(e.to_string()))?;
        let script = dom.create_element("script")?;
        dom.set_attribute(script, "type", "application/ld+json")?;
        dom.set_text_content(script, &json)?;
        dom.append_child(head, script)?;
        dom.set_attribute(product, INJECTED_ATTR, INJECTED_VALUE)
    }
}

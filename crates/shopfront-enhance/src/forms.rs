//! Required-field validation with inline error messages.

use shopfront_core::FormsConfig;
use shopfront_dom::{Dom, DomResult, ElementId, Selector};
use shopfront_observability::StructuredLogger;

use crate::text::trim_value;

/// Outcome of validating one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Required fields examined.
    pub checked: usize,
    /// Required fields that were empty, in document order.
    pub invalid: Vec<ElementId>,
}

impl ValidationReport {
    /// Whether the form may be submitted.
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Validates `[required]` fields on submit.
#[derive(Debug, Clone)]
pub struct FormValidator {
    required: Selector,
    message: String,
    marker_class: String,
    error_classes: String,
    field_error_class: String,
    logger: StructuredLogger,
}

impl FormValidator {
    /// Create a validator from configuration.
    pub fn new(config: &FormsConfig, logger: &StructuredLogger) -> Self {
        Self {
            required: Selector::has_attribute("required"),
            message: config.required_message.clone(),
            marker_class: config.error_marker_class.clone(),
            error_classes: config.error_element_classes.clone(),
            field_error_class: config.field_error_class.clone(),
            logger: logger.for_component("forms"),
        }
    }

    /// Resolve form ids to elements, skipping ids not on the page.
    pub fn find_forms<D: Dom>(&self, dom: &D, form_ids: &[String]) -> Vec<ElementId> {
        form_ids
            .iter()
            .filter_map(|id| dom.element_by_id(id))
            .collect()
    }

    /// Check every required field, marking empty ones and clearing the
    /// rest.
    pub fn validate<D: Dom>(&self, dom: &mut D, form: ElementId) -> ValidationReport {
        let fields = dom.query_all_within(form, &self.required);
        let mut report = ValidationReport {
            checked: fields.len(),
            invalid: Vec::new(),
        };

        for field in fields {
            let value = dom.value(field).unwrap_or_default();
            let result = if trim_value(&value).is_empty() {
                report.invalid.push(field);
                self.show_error(dom, field, &self.message)
            } else {
                self.clear_error(dom, field)
            };
            if let Err(e) = result {
                self.logger
                    .debug_with("Could not update field error", &[("error", &e)]);
            }
        }

        if !report.is_valid() {
            self.logger
                .debug_builder("Submission blocked")
                .field_usize("invalid", report.invalid.len())
                .emit();
        }
        report
    }

    /// Show `message` under `field`, reusing an existing error element
    /// directly after it.
    pub fn show_error<D: Dom>(&self, dom: &mut D, field: ElementId, message: &str) -> DomResult<()> {
        let error = match self.error_element(dom, field) {
            Some(existing) => existing,
            None => {
                let created = dom.create_element("div")?;
                dom.set_class_name(created, &self.error_classes)?;
                if let Some(parent) = dom.parent(field) {
                    let after = dom.next_element_sibling(field);
                    dom.insert_before(parent, created, after)?;
                }
                created
            }
        };

        dom.set_text_content(error, message)?;
        dom.add_class(field, &self.field_error_class)
    }

    /// Empty the error element after `field`, if any, and unmark the field.
    pub fn clear_error<D: Dom>(&self, dom: &mut D, field: ElementId) -> DomResult<()> {
        if let Some(error) = self.error_element(dom, field) {
            dom.set_text_content(error, "")?;
        }
        dom.remove_class(field, &self.field_error_class)
    }

    fn error_element<D: Dom>(&self, dom: &D, field: ElementId) -> Option<ElementId> {
        dom.next_element_sibling(field)
            .filter(|sibling| dom.has_class(*sibling, &self.marker_class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_dom::MemoryDom;

    struct Page {
        dom: MemoryDom,
        form: ElementId,
        name: ElementId,
        email: ElementId,
        note: ElementId,
    }

    fn page() -> Page {
        let mut dom = MemoryDom::new();
        let body = dom.body().unwrap();
        let form = dom.build("form").dom_id("checkout-form").append_to(body);
        let name = dom.build("input").attr("required", "").append_to(form);
        let email = dom
            .build("input")
            .attr("required", "")
            .value("a@b.sa")
            .append_to(form);
        let note = dom.build("textarea").append_to(form);
        Page {
            dom,
            form,
            name,
            email,
            note,
        }
    }

    fn validator() -> FormValidator {
        FormValidator::new(&FormsConfig::default(), &StructuredLogger::disabled())
    }

    #[test]
    fn test_empty_required_field_blocks() {
        let mut p = page();
        let report = validator().validate(&mut p.dom, p.form);

        assert_eq!(report.checked, 2);
        assert_eq!(report.invalid, vec![p.name]);
        assert!(!report.is_valid());

        let error = p.dom.next_element_sibling(p.name).unwrap();
        assert_eq!(
            p.dom.attribute(error, "class").as_deref(),
            Some("error-message text-error text-sm mt-1")
        );
        assert_eq!(p.dom.text_content(error).as_deref(), Some("هذا الحقل مطلوب"));
        assert!(p.dom.has_class(p.name, "border-error"));
        assert!(!p.dom.has_class(p.email, "border-error"));
        assert_eq!(p.dom.next_element_sibling(error), Some(p.email));
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let mut p = page();
        p.dom.set_value(p.name, " \t\u{3000}").unwrap();
        assert!(!validator().validate(&mut p.dom, p.form).is_valid());
    }

    #[test]
    fn test_byte_order_mark_counts_as_empty() {
        let mut p = page();
        p.dom.set_value(p.name, "\u{FEFF}").unwrap();
        let report = validator().validate(&mut p.dom, p.form);
        assert_eq!(report.invalid, vec![p.name]);
    }

    #[test]
    fn test_error_element_reused_then_cleared() {
        let mut p = page();
        let v = validator();
        v.validate(&mut p.dom, p.form);
        v.validate(&mut p.dom, p.form);

        let errors = p
            .dom
            .query_all_within(p.form, &Selector::class("error-message"));
        assert_eq!(errors.len(), 1);

        p.dom.set_value(p.name, "Noura").unwrap();
        let report = v.validate(&mut p.dom, p.form);
        assert!(report.is_valid());
        assert_eq!(p.dom.text_content(errors[0]).as_deref(), Some(""));
        assert!(!p.dom.has_class(p.name, "border-error"));
    }

    #[test]
    fn test_optional_fields_ignored() {
        let mut p = page();
        p.dom.set_value(p.name, "x").unwrap();
        let report = validator().validate(&mut p.dom, p.form);
        assert!(report.is_valid());
        assert!(p.dom.next_element_sibling(p.note).is_none());
    }

    #[test]
    fn test_unrelated_sibling_not_reused() {
        let mut p = page();
        let hint = p.dom.create_element("small").unwrap();
        p.dom.insert_before(p.form, hint, Some(p.email)).unwrap();

        validator().validate(&mut p.dom, p.form);
        let error = p.dom.next_element_sibling(p.name).unwrap();
        assert_ne!(error, hint);
        assert_eq!(p.dom.next_element_sibling(error), Some(hint));
    }

    #[test]
    fn test_find_forms_skips_missing() {
        let p = page();
        let forms = validator().find_forms(
            &p.dom,
            &["checkout-form".to_string(), "login-form".to_string()],
        );
        assert_eq!(forms, vec![p.form]);
    }
}

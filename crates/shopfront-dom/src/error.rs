//! DOM error types.

use thiserror::Error;

use crate::ElementId;

/// Errors from DOM mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// The handle does not refer to a live element.
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    /// The reference node is not a child of the parent.
    #[error("Element {reference} is not a child of {parent}")]
    NotAChild {
        parent: ElementId,
        reference: ElementId,
    },

    /// The insertion would make an element its own ancestor.
    #[error("Cannot insert {child} into its own subtree")]
    HierarchyRequest { child: ElementId },

    /// The host page rejected the operation.
    #[error("DOM operation rejected: {0}")]
    Rejected(String),
}

/// Result alias for DOM mutations.
pub type DomResult<T> = Result<T, DomError>;

/// Errors from parsing a selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unsupported selector syntax at '{0}'")]
    Unsupported(String),

    #[error("Unterminated attribute selector in '{0}'")]
    Unterminated(String),
}

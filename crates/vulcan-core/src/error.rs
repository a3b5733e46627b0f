//! # Error Types
//!
//! Domain-specific error types for vulcan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vulcan-core errors (this file)                                        │
//! │  ├── ComposeError  - Rejected document mutations                       │
//! │  └── SubmitError   - Submission gate failures                          │
//! │                                                                         │
//! │  Flow: ComposeError → host application → field-level UI message        │
//! │        SubmitError  → host application → blocked "Save" action         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, id, bounds)
//! 3. Errors are enum variants, never String
//! 4. Rejected mutations leave the document unchanged; nothing in this
//!    crate panics on bad input
//! 5. Business-rule rejections (duplicates) and integration bugs (unknown
//!    parent id) are distinct variants so the caller can tell "user needs
//!    to fix input" apart from "programmer error"

use thiserror::Error;

// =============================================================================
// Compose Error
// =============================================================================

/// Rejected composer mutations.
///
/// Every mutation on [`crate::EstimationDocument`] either applies fully or
/// returns one of these with the document untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    /// A standard line item for this catalog product already exists.
    ///
    /// ## When This Occurs
    /// - User picks the same base product twice from the catalog
    /// - Uniqueness key for standard items is the catalog product id
    #[error("'{product_name}' is already in the estimation")]
    DuplicateLineItem { product_name: String },

    /// A custom line item with this (product, size) pair already exists.
    ///
    /// Uniqueness key for custom items is (base product id, size label).
    /// Two sizes that differ only in formatting ("24" vs "24.0") are
    /// distinct keys.
    #[error("'{product_name}' with size {size} is already in the estimation")]
    DuplicateCustomItem { product_name: String, size: String },

    /// An add-on with this product id is already attached to the parent.
    ///
    /// Uniqueness is scoped per parent line item, not global.
    #[error("add-on '{product_name}' is already attached to this item")]
    DuplicateAddOn { product_name: String },

    /// The document is at its line item capacity.
    #[error("estimation cannot have more than {max} line items")]
    DocumentFull { max: usize },

    /// No line item with this id exists in either collection.
    ///
    /// This is an integration bug (the caller holds a stale id), not a
    /// user-correctable input problem.
    #[error("line item not found: {0}")]
    LineItemNotFound(String),

    /// The line item exists but is not a custom item.
    ///
    /// Size mutations only apply to custom items; standard items carry no
    /// geometry of their own.
    #[error("line item {0} is not a custom item")]
    NotCustom(String),

    /// No add-on with this id exists under the given parent.
    #[error("add-on {add_on_id} not found under line item {parent_id}")]
    AddOnNotFound {
        parent_id: String,
        add_on_id: String,
    },
}

// =============================================================================
// Submit Error
// =============================================================================

/// Submission gate failures.
///
/// Returned by [`crate::validation::validate_for_submission`]. A document
/// that fails the gate stays editable; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// GST percent must be greater than zero to finalize.
    #[error("GST percent must be greater than zero")]
    MissingGst,

    /// At least one line item (standard or custom) is required.
    #[error("estimation has no line items")]
    EmptyDocument,

    /// A line item's rate is below its catalog minimum cost.
    ///
    /// The advisory max-cost warning never blocks; only the minimum does.
    #[error("rate {rate} for '{product_name}' is below the minimum cost {min_cost}")]
    RateBelowMinimum {
        product_name: String,
        rate: f64,
        min_cost: f64,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ComposeError.
pub type CoreResult<T> = Result<T, ComposeError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Business rule validation for the estimation document.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Composer mutations                                           │
//! │  ├── Duplicate identity keys rejected                                  │
//! │  └── Non-positive quantities/dimensions ignored                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - submission gate                                │
//! │  ├── GST percent must be > 0                                           │
//! │  ├── At least one line item                                            │
//! │  └── No line item below its minimum cost                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Host application                                             │
//! │  └── Party completeness, transport, persistence                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The gate runs against live state on every call. A failing document stays
//! fully editable; the max-cost warning is advisory and never appears here.

use crate::document::EstimationDocument;
use crate::error::SubmitError;

/// Result type for the submission gate.
pub type SubmitResult = Result<(), SubmitError>;

// =============================================================================
// Submission Gate
// =============================================================================

/// Checks whether a document may be finalized and persisted.
///
/// Returns the first blocking problem:
/// 1. `gst_percent` must be greater than zero,
/// 2. at least one line item must exist (standard or custom),
/// 3. no line item's rate may sit below its frozen minimum cost.
///
/// ## Example
/// ```rust
/// use vulcan_core::{validation::validate_for_submission, EstimationDocument};
///
/// let doc = EstimationDocument::new();
/// assert!(validate_for_submission(&doc).is_err()); // empty, gst 0
/// ```
pub fn validate_for_submission(doc: &EstimationDocument) -> SubmitResult {
    if doc.gst_percent <= 0.0 {
        return Err(SubmitError::MissingGst);
    }
    if doc.is_empty() {
        return Err(SubmitError::EmptyDocument);
    }
    for item in doc.line_items() {
        if item.rate_bounds().invalid {
            return Err(SubmitError::RateBelowMinimum {
                product_name: item.product_name.clone(),
                rate: item.rate,
                min_cost: item.min_cost,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

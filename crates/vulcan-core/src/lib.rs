//! # vulcan-core: Pure Business Logic for the Vulcan ERP Estimation Engine
//!
//! This crate is the **heart** of the estimation flow. It contains all
//! business logic as pure functions and synchronous mutations with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Vulcan ERP Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host Application (UI)                        │   │
//! │  │   Catalog pickers ──► Line item modals ──► Overview ──► Save   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ fully-resolved inputs                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vulcan-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │ document  │  │  totals   │  │   │
//! │  │   │  Catalog  │  │ Volumetric│  │ Composer  │  │ Aggregator│  │   │
//! │  │   │  Parties  │  │  formula  │  │ LineItems │  │   + gate  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO AMBIENT STATE         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vulcan-wire (Estimation Mapper)                 │   │
//! │  │        persisted record shape ◄──► composed document            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (catalog products, dimensions, parties)
//! - [`pricing`] - Volumetric calculator and rate resolution
//! - [`document`] - The composed document and its mutations
//! - [`totals`] - Document aggregation and derived figures
//! - [`validation`] - The submission gate
//! - [`error`] - Typed domain errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every calculation is deterministic
//! 2. **No I/O**: Catalog data and selections are always caller-supplied
//! 3. **Degrade, Don't Crash**: Bad numeric input prices to `0`, a visibly
//!    correctable state; nothing here panics on user data
//! 4. **Explicit Errors**: Rejected mutations are typed, never strings
//!
//! ## Example Usage
//!
//! ```rust
//! use vulcan_core::{CatalogBaseProduct, Dimensions, EstimationDocument};
//!
//! let sheet = CatalogBaseProduct {
//!     id: "bp-1".into(),
//!     name: "Rubber Sheet".into(),
//!     default_length: "48".into(),
//!     default_width: "26".into(),
//!     default_thickness: "1".into(),
//!     default_weight: "120".into(),
//!     rate_per_unit: "750".into(),
//!     rate_per_kg: "500".into(),
//!     min_cost: 0.0,
//!     max_cost: 0.0,
//!     gst_percent: 18.0,
//!     remark: String::new(),
//! };
//!
//! let mut doc = EstimationDocument::new();
//! doc.add_custom_item(&sheet, "Belting", "Sheets", 2.0,
//!     Dimensions::new("24", "13", "1"), None).unwrap();
//! doc.set_gst_percent(18.0);
//!
//! // 24x13x1 at the reference density of 120kg per 48x26x1 is 30 kg;
//! // 30 kg * 500/kg * qty 2 = 30000.00
//! assert_eq!(doc.totals().subtotal, 30000.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod pricing;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vulcan_core::EstimationDocument` instead of
// `use vulcan_core::document::EstimationDocument`

pub use document::{AddOnLineItem, EstimationDocument, LineItem, LineItemKind};
pub use error::{ComposeError, CoreResult, SubmitError};
pub use pricing::RateBoundCheck;
pub use totals::DocumentTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sentinel size label for standard (non-custom) line items.
///
/// The wire format partitions products on this value: `"N/A"` means a flat
/// per-unit item, anything else is a custom cut to be split into
/// length/width/thickness.
pub const STANDARD_SIZE: &str = "N/A";

/// Separator used by the `"L x W x T"` size label convention.
pub const SIZE_SEPARATOR: &str = " x ";

/// GST percent assumed for legacy records that persisted no explicit rate
/// and whose back-solve is not computable.
pub const DEFAULT_GST_PERCENT: f64 = 18.0;

/// Maximum line items allowed in a single estimation.
///
/// ## Business Reason
/// Documents carry tens of line items at the expected scale; the cap
/// prevents runaway documents and keeps the linear duplicate scans cheap.
pub const MAX_LINE_ITEMS: usize = 100;

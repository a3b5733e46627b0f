//! # Domain Types
//!
//! Core domain types for the estimation engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────────┐   ┌─────────────────┐   ┌─────────────────┐     │
//! │  │ CatalogBaseProduct│   │   Dimensions    │   │ GeometrySnapshot│     │
//! │  │  ───────────────  │   │  ─────────────  │   │  ─────────────  │     │
//! │  │  id (catalog)     │   │  length         │   │  weight         │     │
//! │  │  default geometry │   │  width          │   │  length         │     │
//! │  │  rates, bounds    │   │  thickness      │   │  width          │     │
//! │  └───────────────────┘   │  "L x W x T"    │   │  thickness      │     │
//! │                          └─────────────────┘   └─────────────────┘     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CustomerInfo   │   │    BankInfo     │   │   TermsInfo     │       │
//! │  │  (who buys)     │   │  (how to pay)   │   │  (conditions)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Loosely-Typed Upstream Data
//! Catalog geometry and rate fields arrive as string-encoded decimals from
//! the catalog API and stay strings here. Parsing happens exactly once, in
//! the pricing module, through a single tolerant helper — never ad hoc at
//! call sites.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::SIZE_SEPARATOR;

// =============================================================================
// Catalog Base Product
// =============================================================================

/// A catalog entry with reference geometry and weight.
///
/// Read-only external input: fetched by the host application and handed to
/// the composer fully resolved. The engine never mutates catalog records;
/// everything a line item needs is snapshotted at selection time, so
/// catalog changes after selection do not retroactively affect an existing
/// line item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogBaseProduct {
    /// Catalog identifier (identity of the record).
    pub id: String,

    /// Display name shown in selection lists and on the estimate.
    pub name: String,

    /// Reference length (linear units, string-encoded decimal).
    pub default_length: String,

    /// Reference width (string-encoded decimal).
    pub default_width: String,

    /// Reference thickness (string-encoded decimal).
    pub default_thickness: String,

    /// Reference weight of the default-sized piece (string-encoded decimal).
    pub default_weight: String,

    /// Flat per-unit rate, used for standard line items.
    pub rate_per_unit: String,

    /// Per-kg rate, used for custom line items and add-ons.
    pub rate_per_kg: String,

    /// Lowest permitted rate. `0` means unbounded.
    pub min_cost: f64,

    /// Highest advisable rate. `0` means unbounded.
    pub max_cost: f64,

    /// GST percent suggested by the catalog for this product.
    pub gst_percent: f64,

    /// Free-text catalog remark.
    pub remark: String,
}

// =============================================================================
// Dimensions
// =============================================================================

/// Length, width and thickness of a custom-cut piece.
///
/// Values stay string-encoded decimals, matching how they arrive from the
/// dimension inputs and how they persist. The `"L x W x T"` size label
/// produced here is the one encode/decode convention shared by the
/// composer and the wire mapper.
///
/// ## Example
/// ```rust
/// use vulcan_core::Dimensions;
///
/// let dims = Dimensions::new("24", "13", "1");
/// assert_eq!(dims.size_label(), "24 x 13 x 1");
///
/// let parsed = Dimensions::from_size_label("24 x 13");
/// assert_eq!(parsed.thickness, "0"); // missing tokens default to "0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dimensions {
    pub length: String,
    pub width: String,
    pub thickness: String,
}

impl Dimensions {
    /// Creates dimensions from the three decimal strings.
    pub fn new(length: &str, width: &str, thickness: &str) -> Self {
        Dimensions {
            length: length.trim().to_string(),
            width: width.trim().to_string(),
            thickness: thickness.trim().to_string(),
        }
    }

    /// Renders the `"L x W x T"` size label.
    pub fn size_label(&self) -> String {
        [
            self.length.as_str(),
            self.width.as_str(),
            self.thickness.as_str(),
        ]
        .join(SIZE_SEPARATOR)
    }

    /// Parses a size label back into dimensions.
    ///
    /// Tokens are split on `x` and trimmed; fewer than three tokens fill
    /// the missing positions with `"0"`.
    pub fn from_size_label(label: &str) -> Self {
        let mut tokens = label.split('x').map(str::trim);
        Dimensions {
            length: tokens.next().unwrap_or("0").to_string(),
            width: tokens.next().unwrap_or("0").to_string(),
            thickness: tokens.next().unwrap_or("0").to_string(),
        }
    }
}

// =============================================================================
// Geometry Snapshot
// =============================================================================

/// Reference geometry and weight frozen from a catalog entry.
///
/// Each line item snapshots its base product's geometry at selection time,
/// and each add-on snapshots its *own* catalog entry independently — an
/// add-on never inherits the parent's reference shape. The snapshot is what
/// the volumetric formula derives density from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GeometrySnapshot {
    /// Weight of the reference piece (string-encoded decimal).
    pub weight: String,

    /// Reference length.
    pub length: String,

    /// Reference width.
    pub width: String,

    /// Reference thickness.
    pub thickness: String,
}

impl GeometrySnapshot {
    /// Freezes the reference geometry of a catalog product.
    pub fn from_catalog(product: &CatalogBaseProduct) -> Self {
        GeometrySnapshot {
            weight: product.default_weight.clone(),
            length: product.default_length.clone(),
            width: product.default_width.clone(),
            thickness: product.default_thickness.clone(),
        }
    }
}

// =============================================================================
// Party Records
// =============================================================================

/// The customer an estimation is addressed to.
///
/// Selected via an external step; the engine only checks completeness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub gstin: String,
}

impl CustomerInfo {
    /// Full name as persisted: first and last joined by one space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// All required fields non-empty. Email and GSTIN are optional.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.first_name) && is_filled(&self.phone) && is_filled(&self.address)
    }
}

/// Bank details printed on the estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BankInfo {
    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub branch: String,
}

impl BankInfo {
    /// All required fields non-empty. Branch is optional.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.bank_name) && is_filled(&self.account_number) && is_filled(&self.ifsc)
    }
}

/// Payment and delivery terms printed on the estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TermsInfo {
    pub payment_terms: String,
    pub delivery_terms: String,
    pub validity: String,
}

impl TermsInfo {
    /// All required fields non-empty. Validity is optional.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.payment_terms) && is_filled(&self.delivery_terms)
    }
}

/// Non-empty after trimming.
pub(crate) fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

// =============================================================================
// Template Type
// =============================================================================

/// Which downstream rendering template applies.
///
/// Selecting a template never affects pricing; it only routes the composed
/// document to a different PDF layout in the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TemplateType {
    /// Plain estimate layout.
    #[default]
    Standard,
    /// Estimate rendered on the company letterhead.
    Letterhead,
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Document Totals
//!
//! Stateless aggregation of a composed document into its derived figures.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Σ standard totals + Σ custom totals + Σ add-on totals                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal ──► discount_amount = subtotal * discount% / 100              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  after_discount ──► tax_amount = after_discount * gst% / 100            │
//! │       │                              │                                  │
//! │       │                              ├── cgst = tax / 2                 │
//! │       │                              └── sgst = tax / 2                 │
//! │       ▼                                                                 │
//! │  grand_total = after_discount + tax_amount                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are recomputed on every read, never cached across mutations.
//! Intermediates keep full f64 precision; rounding to currency happens only
//! in [`DocumentTotals::rounded`], at the display/serialization boundary,
//! so rounding error never compounds across many line items.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::document::EstimationDocument;
use crate::pricing::round2;

// =============================================================================
// Document Totals
// =============================================================================

/// The derived monetary figures of an estimation.
///
/// The rendering collaborator consumes this directly alongside the line
/// items; nothing here is ever stored back into the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub after_discount: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
}

impl DocumentTotals {
    /// Rounds every figure to 2 decimals for display or serialization.
    pub fn rounded(&self) -> DocumentTotals {
        DocumentTotals {
            subtotal: round2(self.subtotal),
            discount_amount: round2(self.discount_amount),
            after_discount: round2(self.after_discount),
            cgst: round2(self.cgst),
            sgst: round2(self.sgst),
            tax_amount: round2(self.tax_amount),
            grand_total: round2(self.grand_total),
        }
    }
}

impl From<&EstimationDocument> for DocumentTotals {
    fn from(doc: &EstimationDocument) -> Self {
        let subtotal = doc.subtotal();
        let discount_amount = subtotal * doc.discount_percent / 100.0;
        let after_discount = subtotal - discount_amount;
        let tax_amount = after_discount * doc.gst_percent / 100.0;
        let half_tax = tax_amount / 2.0;
        DocumentTotals {
            subtotal,
            discount_amount,
            after_discount,
            cgst: half_tax,
            sgst: half_tax,
            tax_amount,
            grand_total: after_discount + tax_amount,
        }
    }
}

impl EstimationDocument {
    /// Sum of every line item total plus every add-on total.
    ///
    /// Order-independent: permuting the collections cannot change the sum
    /// of the same addends beyond f64 associativity, and the collections
    /// are always summed in display order anyway.
    pub fn subtotal(&self) -> f64 {
        self.line_items()
            .map(|item| item.total_amount + item.add_ons_total())
            .sum()
    }

    /// Recomputes all derived figures from current state.
    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals::from(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogBaseProduct, Dimensions};

    fn product(id: &str, rate_per_unit: &str) -> CatalogBaseProduct {
        CatalogBaseProduct {
            id: id.to_string(),
            name: format!("Product {}", id),
            default_length: "48".to_string(),
            default_width: "26".to_string(),
            default_thickness: "1".to_string(),
            default_weight: "120".to_string(),
            rate_per_unit: rate_per_unit.to_string(),
            rate_per_kg: "500".to_string(),
            min_cost: 0.0,
            max_cost: 0.0,
            gst_percent: 18.0,
            remark: String::new(),
        }
    }

    #[test]
    fn test_reference_scenario() {
        // subtotal 100000 @ 10% discount, 18% gst
        let mut doc = EstimationDocument::new();
        doc.add_standard_item(&product("a", "100000"), "", "", 1.0, None)
            .unwrap();
        doc.set_discount_percent(10.0);
        doc.set_gst_percent(18.0);

        let totals = doc.totals();
        assert_eq!(totals.subtotal, 100000.0);
        assert_eq!(totals.discount_amount, 10000.0);
        assert_eq!(totals.after_discount, 90000.0);
        assert_eq!(totals.tax_amount, 16200.0);
        assert_eq!(totals.cgst, 8100.0);
        assert_eq!(totals.sgst, 8100.0);
        assert_eq!(totals.grand_total, 106200.0);
    }

    #[test]
    fn test_subtotal_includes_custom_items_and_add_ons() {
        let mut doc = EstimationDocument::new();
        doc.add_standard_item(&product("a", "750"), "", "", 2.0, None)
            .unwrap();
        doc.add_custom_item(
            &product("b", "750"),
            "",
            "",
            2.0,
            Dimensions::new("24", "13", "1"),
            None,
        )
        .unwrap();
        let parent_id = doc.standard_items[0].id.clone();
        doc.add_add_on(
            &parent_id,
            &product("c", "750"),
            1.0,
            Dimensions::new("24", "13", "1"),
            None,
        )
        .unwrap();

        // 1500 (standard) + 30000 (custom) + 15000 (add-on at qty 1)
        assert_eq!(doc.subtotal(), 46500.0);
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        let mut doc = EstimationDocument::new();
        doc.add_standard_item(&product("a", "100.25"), "", "", 1.0, None)
            .unwrap();
        doc.add_standard_item(&product("b", "250.75"), "", "", 3.0, None)
            .unwrap();
        doc.add_standard_item(&product("c", "19.99"), "", "", 7.0, None)
            .unwrap();
        let before = doc.totals();

        doc.standard_items.reverse();
        let after = doc.totals();
        assert!((before.subtotal - after.subtotal).abs() < 1e-9);
        assert!((before.grand_total - after.grand_total).abs() < 1e-9);
    }

    #[test]
    fn test_totals_follow_mutations() {
        let mut doc = EstimationDocument::new();
        doc.add_standard_item(&product("a", "750"), "", "", 2.0, None)
            .unwrap();
        assert_eq!(doc.totals().subtotal, 1500.0);

        let id = doc.standard_items[0].id.clone();
        doc.update_quantity(&id, 4.0).unwrap();
        assert_eq!(doc.totals().subtotal, 3000.0);

        doc.remove_line_item(&id).unwrap();
        assert_eq!(doc.totals().subtotal, 0.0);
    }

    #[test]
    fn test_rounded_applies_only_at_the_edge() {
        let mut doc = EstimationDocument::new();
        doc.add_standard_item(&product("a", "0.1"), "", "", 3.0, None)
            .unwrap();
        doc.set_gst_percent(18.0);

        let raw = doc.totals();
        // 0.1 * 3 carries the usual binary representation error...
        assert!((raw.subtotal - 0.3).abs() < 1e-12);
        // ...which the rounded view snaps to currency.
        assert_eq!(raw.rounded().subtotal, 0.3);
    }

    #[test]
    fn test_zero_discount_and_gst() {
        let mut doc = EstimationDocument::new();
        doc.add_standard_item(&product("a", "500"), "", "", 1.0, None)
            .unwrap();
        let totals = doc.totals();
        assert_eq!(totals.discount_amount, 0.0);
        assert_eq!(totals.tax_amount, 0.0);
        assert_eq!(totals.grand_total, 500.0);
    }
}

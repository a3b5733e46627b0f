//! # Persisted Record Shape
//!
//! The denormalized form an estimation takes in the persistence API.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     EstimationRecord (JSON)                             │
//! │                                                                         │
//! │  customerName: "Rayal Nuts"          ── joined, split on first space   │
//! │  products: [                                                            │
//! │    { size: "N/A",          ... }     ── standard item                  │
//! │    { size: "24 x 13 x 1",  ... }     ── custom item                    │
//! │  ]                                                                      │
//! │  subTotal: "46500.00"                ── monetary fields are strings    │
//! │  discount: "10"                      ── the PERCENT                    │
//! │  discountAmount: "4650.00"           ── the computed currency value    │
//! │  gstPercent: "18"                    ── absent on legacy records       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric fields are declared as `serde_json::Value`, not `String`:
//! upstream rows predate the schema settling and may carry numbers,
//! strings, or nulls in the same position. Reads go through
//! [`crate::coerce`]; writes always emit strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Estimation Record
// =============================================================================

/// A persisted estimation document.
///
/// Every field is defaulted so partial legacy records deserialize; the
/// mapper supplies the field-specific fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimationRecord {
    /// Persistence identifier; empty for not-yet-saved documents.
    pub id: String,

    /// Human-facing estimation number, assigned by the backend.
    pub estimation_no: String,

    /// ISO date (`YYYY-MM-DD`).
    pub date: String,

    // --- customer -----------------------------------------------------------
    /// Full name as a single field; split on the first whitespace on load.
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub customer_gstin: String,

    // --- bank ---------------------------------------------------------------
    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
    pub branch: String,

    // --- terms --------------------------------------------------------------
    pub payment_terms: String,
    pub delivery_terms: String,
    pub validity: String,

    // --- products -----------------------------------------------------------
    pub products: Vec<ProductRecord>,

    // --- figures (string-typed, recomputed on load) -------------------------
    pub sub_total: Value,
    /// The discount PERCENT, not the currency amount.
    pub discount: Value,
    /// The computed discount currency amount; both are persisted.
    pub discount_amount: Value,
    pub total_after_discount: Value,
    pub cgst: Value,
    pub sgst: Value,
    pub tax_total: Value,
    pub grand_total: Value,

    /// Explicit GST percent. Legacy records omit it; the mapper back-solves
    /// from `tax_total / total_after_discount`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_percent: Option<Value>,

    /// Rendering template selector (`standard` / `letterhead`).
    pub template_type: String,
}

// =============================================================================
// Product Record
// =============================================================================

/// One persisted product row, standard or custom.
///
/// The `size` field is the partition key: the sentinel `"N/A"` marks a
/// standard item; any other value is a custom cut whose label splits into
/// length/width/thickness.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    /// Line item id; blank on legacy rows (a fresh one is minted on load).
    pub id: String,

    /// 1-based display position, renumbered on every save.
    pub serial_no: Value,

    pub product_id: String,
    pub product_name: String,
    pub combo_name: String,
    pub category_name: String,

    /// `"N/A"` or an `"L x W x T"` label.
    pub size: String,

    pub quantity: Value,
    pub rate: Value,
    pub total: Value,

    pub min_cost: Value,
    pub max_cost: Value,

    // Reference geometry snapshot of the base product, `"0"` when unknown.
    pub base_product_weight: Value,
    pub base_product_length: Value,
    pub base_product_width: Value,
    pub base_product_thickness: Value,

    pub remark: String,
    pub custom_badge_text: String,

    pub add_ons: Vec<AddOnRecord>,
}

// =============================================================================
// Add-On Record
// =============================================================================

/// One persisted add-on row under a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddOnRecord {
    /// Add-on id; blank on legacy rows.
    pub id: String,

    pub product_id: String,
    pub product_name: String,

    /// Always an `"L x W x T"` label; add-ons are priced volumetrically.
    pub size: String,

    pub quantity: Value,
    pub rate: Value,
    pub total: Value,

    // The add-on's own reference geometry snapshot, independent of the
    // parent product's.
    pub base_product_weight: Value,
    pub base_product_length: Value,
    pub base_product_width: Value,
    pub base_product_thickness: Value,

    pub remark: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_legacy_record_deserializes() {
        // A legacy row: numbers where strings belong, missing gstPercent,
        // missing add-ons, no item ids.
        let raw = json!({
            "customerName": "Rayal Nuts",
            "products": [{
                "productId": "bp-1",
                "productName": "Rubber Sheet",
                "size": "N/A",
                "quantity": 2,
                "rate": "750",
                "total": 1500
            }],
            "subTotal": 1500,
            "grandTotal": "1770.00"
        });

        let record: EstimationRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.customer_name, "Rayal Nuts");
        assert_eq!(record.products.len(), 1);
        assert!(record.gst_percent.is_none());
        assert_eq!(record.products[0].quantity, json!(2));
        assert!(record.products[0].add_ons.is_empty());
    }

    #[test]
    fn test_round_trip_serialization_is_stable() {
        let record = EstimationRecord {
            customer_name: "Rayal Nuts".to_string(),
            sub_total: json!("1500.00"),
            gst_percent: Some(json!("18")),
            ..EstimationRecord::default()
        };
        let text = serde_json::to_string(&record).unwrap();
        let back: EstimationRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back.customer_name, "Rayal Nuts");
        assert_eq!(back.sub_total, json!("1500.00"));
        assert_eq!(back.gst_percent, Some(json!("18")));
    }
}
